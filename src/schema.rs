//! Table layout of the libraries dataset.

use crate::value::{ColumnDefinition, DataType};

pub const STATES: &str = "states";
pub const SCHOOLS: &str = "schools";
pub const COUNTIES: &str = "counties";
pub const OPERATING_REVENUES: &str = "operating_revenues";
pub const CAPITAL_REVENUES: &str = "capital_revenues";
pub const COLLECTION_EXPENDITURES: &str = "collection_expenditures";
pub const EMPLOYEE_EXPENDITURES: &str = "employee_expenditures";
pub const STAFF_MEMBERS_COUNTS: &str = "staff_members_counts";
pub const DATABASES_COUNTS: &str = "databases_counts";
pub const LIBRARIES: &str = "libraries";

/// Every table in the order it must be seeded; `libraries` references all
/// the others and comes last.
pub const SEED_ORDER: [&str; 10] = [
    STATES,
    SCHOOLS,
    COUNTIES,
    OPERATING_REVENUES,
    CAPITAL_REVENUES,
    COLLECTION_EXPENDITURES,
    EMPLOYEE_EXPENDITURES,
    STAFF_MEMBERS_COUNTS,
    DATABASES_COUNTS,
    LIBRARIES,
];

fn int(name: &str) -> ColumnDefinition {
    ColumnDefinition::new(name, DataType::Integer)
}

fn float(name: &str) -> ColumnDefinition {
    ColumnDefinition::new(name, DataType::Float)
}

fn text(name: &str) -> ColumnDefinition {
    ColumnDefinition::new(name, DataType::Text)
}

pub fn columns(table: &str) -> Option<Vec<ColumnDefinition>> {
    let columns = match table {
        STATES => vec![int("state_code"), text("state_alpha_code")],
        SCHOOLS => vec![int("school_code"), text("school_name"), int("state_code")],
        COUNTIES => vec![
            int("state_code"),
            int("county_code"),
            int("county_population"),
            text("county_name"),
        ],
        OPERATING_REVENUES => vec![
            int("operating_revenue_id"),
            float("local_government_operating_revenue"),
            float("state_government_operating_revenue"),
            float("federal_government_operating_revenue"),
            float("other_operating_revenue"),
        ],
        CAPITAL_REVENUES => vec![
            int("capital_revenue_id"),
            float("local_government_capital_revenue"),
            float("state_government_capital_revenue"),
            float("federal_government_capital_revenue"),
            float("other_capital_revenue"),
        ],
        COLLECTION_EXPENDITURES => vec![
            int("collection_expenditure_id"),
            float("print_collection_expenditures"),
            float("digital_collection_expenditures"),
            float("other_collection_expenditures"),
        ],
        EMPLOYEE_EXPENDITURES => vec![
            int("employee_expenditure_id"),
            float("salaries"),
            float("benefits"),
        ],
        STAFF_MEMBERS_COUNTS => vec![
            int("staff_members_count_id"),
            float("librarians"),
            float("employees"),
        ],
        DATABASES_COUNTS => vec![
            int("databases_count_id"),
            int("local_cooperative_agreements"),
            int("state_licensed_databases"),
        ],
        LIBRARIES => vec![
            text("library_id"),
            text("library_name"),
            text("street_address"),
            text("city"),
            int("zipcode"),
            float("longitude"),
            float("latitude"),
            int("state_code"),
            int("county_code"),
            int("staff_members_count_id"),
            int("operating_revenue_id"),
            int("employee_expenditure_id"),
            int("collection_expenditure_id"),
            int("capital_revenue_id"),
            int("databases_count_id"),
        ],
        _ => return None,
    };
    Some(columns)
}
