//! US public libraries statistics: flat-file seeding into an embedded store
//! and a console menu of canned reports.

pub mod cache;
pub mod config;
pub mod database;
pub mod error;
pub mod loader;
pub mod menu;
pub mod relation;
pub mod render;
pub mod reports;
pub mod schema;
pub mod search;
pub mod storage;
pub mod value;

pub use database::{Database, Table};
pub use error::{Error, Result};
pub use reports::{Dispatcher, Outcome, ReportTable};
pub use value::{ColumnDefinition, DataType, Value};
