use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Float,
    Text,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "INTEGER",
            DataType::Float => "FLOAT",
            DataType::Text => "TEXT",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
}

impl ColumnDefinition {
    pub fn new(name: &str, data_type: DataType) -> Self {
        ColumnDefinition {
            name: name.to_string(),
            data_type,
            nullable: false,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Converts a raw flat-file cell into a value of the given column type.
    pub fn parse_as(raw: &str, column: &ColumnDefinition) -> Result<Value> {
        let raw = raw.trim();
        if raw.is_empty() && column.nullable {
            return Ok(Value::Null);
        }
        let mismatch = || Error::TypeMismatch {
            column: column.name.clone(),
            expected: column.data_type.to_string(),
            value: raw.to_string(),
        };
        match column.data_type {
            DataType::Integer => raw.parse::<i64>().map(Value::Integer).map_err(|_| mismatch()),
            // Non-finite floats cannot be written to the JSON store.
            DataType::Float => raw
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::Float)
                .ok_or_else(mismatch),
            DataType::Text => Ok(Value::Text(raw.to_string())),
        }
    }

    pub fn fits(&self, column: &ColumnDefinition) -> bool {
        match (self, &column.data_type) {
            (Value::Null, _) => column.nullable,
            (Value::Integer(_), DataType::Integer) => true,
            (Value::Integer(_), DataType::Float) => true,
            (Value::Float(_), DataType::Float) => true,
            (Value::Text(_), DataType::Text) => true,
            _ => false,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn add(&self, other: &Value) -> Value {
        self.arithmetic(other, i64::checked_add, |l, r| l + r)
    }

    pub fn sub(&self, other: &Value) -> Value {
        self.arithmetic(other, i64::checked_sub, |l, r| l - r)
    }

    /// Integer operands truncate toward zero; a zero divisor yields Null.
    pub fn div(&self, other: &Value) -> Value {
        match (self, other) {
            (_, Value::Integer(0)) => Value::Null,
            (_, Value::Float(r)) if *r == 0.0 => Value::Null,
            _ => self.arithmetic(other, i64::checked_div, |l, r| l / r),
        }
    }

    fn arithmetic(
        &self,
        other: &Value,
        int_op: fn(i64, i64) -> Option<i64>,
        float_op: fn(f64, f64) -> f64,
    ) -> Value {
        match (self, other) {
            (Value::Integer(l), Value::Integer(r)) => {
                int_op(*l, *r).map(Value::Integer).unwrap_or(Value::Null)
            }
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(l), Some(r)) => Value::Float(float_op(l, r)),
                _ => Value::Null,
            },
        }
    }

    /// Console form of the value; floats without a fractional part print
    /// without a trailing `.0`.
    pub fn render(&self) -> String {
        match self {
            Value::Null => "NULL".to_string(),
            Value::Integer(n) => n.to_string(),
            Value::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
            Value::Float(f) => format!("{:.2}", f),
            Value::Text(s) => s.clone(),
        }
    }

    /// Whole-number form, truncating any fractional part.
    pub fn render_truncated(&self) -> String {
        match self {
            Value::Float(f) => format!("{}", f.trunc() as i64),
            other => other.render(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Equality follows `Ord`, so `Integer(1) == Float(1.0)`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Text(_), _) => Ordering::Greater,
            (_, Value::Text(_)) => Ordering::Less,
            _ => {
                let a = self.as_f64().unwrap_or_default();
                let b = other.as_f64().unwrap_or_default();
                a.total_cmp(&b)
            }
        }
    }
}

impl std::hash::Hash for Value {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Value::Null => 0u8.hash(state),
            Value::Integer(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            Value::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    1u8.hash(state);
                    (*f as i64).hash(state);
                } else {
                    2u8.hash(state);
                    f.to_bits().hash(state);
                }
            }
            Value::Text(s) => {
                3u8.hash(state);
                s.hash(state);
            }
        }
    }
}
