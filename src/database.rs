use crate::error::{Error, Result};
use crate::value::{ColumnDefinition, Value};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Name of the table whose presence marks the database as seeded.
pub const SEED_MARKER_TABLE: &str = "libraries";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Database {
    pub tables: HashMap<String, Table>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<ColumnDefinition>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(columns: Vec<ColumnDefinition>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn validate(&self, table: &str, values: &[Value]) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(Error::ColumnCount {
                table: table.to_string(),
                expected: self.columns.len(),
                got: values.len(),
            });
        }
        for (value, column) in values.iter().zip(&self.columns) {
            if !value.fits(column) {
                return Err(Error::TypeMismatch {
                    column: column.name.clone(),
                    expected: column.data_type.to_string(),
                    value: value.render(),
                });
            }
        }
        Ok(())
    }
}

impl Database {
    pub fn new() -> Self {
        Database {
            tables: HashMap::new(),
        }
    }

    pub fn create_table(&mut self, name: &str, columns: Vec<ColumnDefinition>) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(Error::TableExists(name.to_string()));
        }
        self.tables.insert(name.to_string(), Table::new(columns));
        Ok(())
    }

    /// Returns true when the table was created by this call.
    pub fn create_table_if_absent(&mut self, name: &str, columns: Vec<ColumnDefinition>) -> bool {
        if self.tables.contains_key(name) {
            return false;
        }
        self.tables.insert(name.to_string(), Table::new(columns));
        true
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| Error::UnknownTable(name.to_string()))
    }

    pub fn insert(&mut self, table: &str, values: Vec<Value>) -> Result<()> {
        self.insert_batch(table, vec![values]).map(|_| ())
    }

    /// Inserts all rows or none of them.
    pub fn insert_batch(&mut self, table: &str, rows: Vec<Vec<Value>>) -> Result<usize> {
        let target = self
            .tables
            .get_mut(table)
            .ok_or_else(|| Error::UnknownTable(table.to_string()))?;
        for row in &rows {
            target.validate(table, row)?;
        }
        let count = rows.len();
        target.rows.extend(rows);
        Ok(count)
    }

    pub fn is_table_seeded(&self, table: &str) -> bool {
        self.tables.get(table).is_some_and(|t| !t.is_empty())
    }

    pub fn is_seeded(&self) -> bool {
        self.is_table_seeded(SEED_MARKER_TABLE)
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::DataType;

    fn states() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("state_code", DataType::Integer),
            ColumnDefinition::new("state_alpha_code", DataType::Text),
        ]
    }

    #[test]
    fn test_create_table_twice() {
        let mut db = Database::new();
        db.create_table("states", states()).unwrap();
        let err = db.create_table("states", states()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
        assert!(!db.create_table_if_absent("states", states()));
    }

    #[test]
    fn test_insert_validates_row_shape() {
        let mut db = Database::new();
        db.create_table("states", states()).unwrap();
        db.insert("states", vec![Value::Integer(2), Value::Text("AK".into())])
            .unwrap();

        let err = db.insert("states", vec![Value::Integer(1)]).unwrap_err();
        assert!(err.to_string().contains("Column count mismatch"));

        let err = db
            .insert("states", vec![Value::Text("AK".into()), Value::Integer(2)])
            .unwrap_err();
        assert!(err.to_string().contains("expects INTEGER"));
    }

    #[test]
    fn test_insert_batch_is_all_or_nothing() {
        let mut db = Database::new();
        db.create_table("states", states()).unwrap();
        let rows = vec![
            vec![Value::Integer(1), Value::Text("AL".into())],
            vec![Value::Null, Value::Text("AK".into())],
        ];
        assert!(db.insert_batch("states", rows).is_err());
        assert!(!db.is_table_seeded("states"));
    }

    #[test]
    fn test_seeded_marker() {
        let mut db = Database::new();
        assert!(!db.is_seeded());
        db.create_table(SEED_MARKER_TABLE, states()).unwrap();
        assert!(!db.is_seeded());
        db.insert(SEED_MARKER_TABLE, vec![Value::Integer(1), Value::Text("AL".into())])
            .unwrap();
        assert!(db.is_seeded());
    }

    #[test]
    fn test_unknown_table() {
        let mut db = Database::new();
        let err = db.insert("nope", vec![]).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }
}
