//! A small in-memory relational algebra the canned reports are written in.
//!
//! Columns are named `table.column` (or `alias.column` after `scan_as`); a
//! bare column name resolves when exactly one column carries it.

use crate::database::Database;
use crate::error::{Error, Result};
use crate::value::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Column(String),
    Literal(Value),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    /// Null when the expression equals the value.
    NullIf(Box<Expr>, Value),
}

impl Expr {
    pub fn col(name: &str) -> Self {
        Expr::Column(name.to_string())
    }

    /// Left-folded sum of the named columns.
    pub fn sum_of(columns: &[&str]) -> Self {
        let mut iter = columns.iter();
        let first = iter
            .next()
            .map(|c| Expr::col(c))
            .unwrap_or(Expr::Literal(Value::Integer(0)));
        iter.fold(first, |acc, c| acc.add(Expr::col(c)))
    }

    pub fn add(self, other: Expr) -> Self {
        Expr::Add(Box::new(self), Box::new(other))
    }

    pub fn sub(self, other: Expr) -> Self {
        Expr::Sub(Box::new(self), Box::new(other))
    }

    pub fn div(self, other: Expr) -> Self {
        Expr::Div(Box::new(self), Box::new(other))
    }

    pub fn null_if(self, value: Value) -> Self {
        Expr::NullIf(Box::new(self), value)
    }

    fn bind(&self, relation: &Relation) -> Result<BoundExpr> {
        Ok(match self {
            Expr::Column(name) => BoundExpr::Column(relation.index_of(name)?),
            Expr::Literal(v) => BoundExpr::Literal(v.clone()),
            Expr::Add(l, r) => BoundExpr::Add(Box::new(l.bind(relation)?), Box::new(r.bind(relation)?)),
            Expr::Sub(l, r) => BoundExpr::Sub(Box::new(l.bind(relation)?), Box::new(r.bind(relation)?)),
            Expr::Div(l, r) => BoundExpr::Div(Box::new(l.bind(relation)?), Box::new(r.bind(relation)?)),
            Expr::NullIf(e, v) => BoundExpr::NullIf(Box::new(e.bind(relation)?), v.clone()),
        })
    }
}

enum BoundExpr {
    Column(usize),
    Literal(Value),
    Add(Box<BoundExpr>, Box<BoundExpr>),
    Sub(Box<BoundExpr>, Box<BoundExpr>),
    Div(Box<BoundExpr>, Box<BoundExpr>),
    NullIf(Box<BoundExpr>, Value),
}

impl BoundExpr {
    fn eval(&self, row: &[Value]) -> Value {
        match self {
            BoundExpr::Column(idx) => row[*idx].clone(),
            BoundExpr::Literal(v) => v.clone(),
            BoundExpr::Add(l, r) => l.eval(row).add(&r.eval(row)),
            BoundExpr::Sub(l, r) => l.eval(row).sub(&r.eval(row)),
            BoundExpr::Div(l, r) => l.eval(row).div(&r.eval(row)),
            BoundExpr::NullIf(e, v) => {
                let value = e.eval(row);
                if value.cmp(v) == Ordering::Equal && !value.is_null() {
                    Value::Null
                } else {
                    value
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregateFunction {
    /// Non-null values.
    Count,
    /// Distinct non-null values.
    CountDistinct,
    /// Null when every input is null.
    Sum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub function: AggregateFunction,
    pub column: String,
    pub name: String,
}

impl Aggregate {
    pub fn count(column: &str, name: &str) -> Self {
        Self::new(AggregateFunction::Count, column, name)
    }

    pub fn count_distinct(column: &str, name: &str) -> Self {
        Self::new(AggregateFunction::CountDistinct, column, name)
    }

    pub fn sum(column: &str, name: &str) -> Self {
        Self::new(AggregateFunction::Sum, column, name)
    }

    fn new(function: AggregateFunction, column: &str, name: &str) -> Self {
        Aggregate {
            function,
            column: column.to_string(),
            name: name.to_string(),
        }
    }

    fn compute(&self, idx: usize, rows: &[&Vec<Value>]) -> Value {
        let values = rows.iter().map(|row| &row[idx]).filter(|v| !v.is_null());
        match self.function {
            AggregateFunction::Count => Value::Integer(values.count() as i64),
            AggregateFunction::CountDistinct => {
                let distinct: HashSet<&Value> = values.collect();
                Value::Integer(distinct.len() as i64)
            }
            AggregateFunction::Sum => values.fold(Value::Null, |acc, v| {
                if acc.is_null() {
                    v.clone()
                } else {
                    acc.add(v)
                }
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub expr: Expr,
    pub name: String,
}

impl Projection {
    /// Keeps a column under its current name.
    pub fn column(name: &str) -> Self {
        Projection {
            expr: Expr::col(name),
            name: name.to_string(),
        }
    }

    pub fn expr(expr: Expr, name: &str) -> Self {
        Projection {
            expr,
            name: name.to_string(),
        }
    }

    pub fn renamed(column: &str, name: &str) -> Self {
        Self::expr(Expr::col(column), name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SortKey {
    pub column: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(column: &str) -> Self {
        SortKey {
            column: column.to_string(),
            descending: false,
        }
    }

    pub fn desc(column: &str) -> Self {
        SortKey {
            column: column.to_string(),
            descending: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Relation {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Relation {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        Relation { columns, rows }
    }

    pub fn scan(db: &Database, table: &str) -> Result<Self> {
        Self::scan_as(db, table, table)
    }

    pub fn scan_as(db: &Database, table: &str, alias: &str) -> Result<Self> {
        let source = db.table(table)?;
        let columns = source
            .columns
            .iter()
            .map(|c| format!("{}.{}", alias, c.name))
            .collect();
        Ok(Relation {
            columns,
            rows: source.rows.clone(),
        })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<Value>> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Result<usize> {
        if let Some(idx) = self.columns.iter().position(|c| c == name) {
            return Ok(idx);
        }
        if name.contains('.') {
            return Err(Error::UnknownColumn(name.to_string()));
        }
        let suffix = format!(".{}", name);
        let mut matches = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.ends_with(&suffix));
        match (matches.next(), matches.next()) {
            (Some((idx, _)), None) => Ok(idx),
            (Some(_), Some(_)) => Err(Error::AmbiguousColumn(name.to_string())),
            _ => Err(Error::UnknownColumn(name.to_string())),
        }
    }

    pub fn column_values(&self, name: &str) -> Result<Vec<Value>> {
        let idx = self.index_of(name)?;
        Ok(self.rows.iter().map(|row| row[idx].clone()).collect())
    }

    /// Inner equi-join. Rows keep the left relation's order; a null key
    /// never matches.
    pub fn join(self, other: Relation, on: &[(&str, &str)]) -> Result<Relation> {
        let left_keys = on
            .iter()
            .map(|(l, _)| self.index_of(l))
            .collect::<Result<Vec<_>>>()?;
        let right_keys = on
            .iter()
            .map(|(_, r)| other.index_of(r))
            .collect::<Result<Vec<_>>>()?;

        let mut lookup: HashMap<Vec<&Value>, Vec<usize>> = HashMap::new();
        for (idx, row) in other.rows.iter().enumerate() {
            let key: Vec<&Value> = right_keys.iter().map(|&k| &row[k]).collect();
            if key.iter().any(|v| v.is_null()) {
                continue;
            }
            lookup.entry(key).or_default().push(idx);
        }

        let mut rows = Vec::new();
        for left in &self.rows {
            let key: Vec<&Value> = left_keys.iter().map(|&k| &left[k]).collect();
            if let Some(matches) = lookup.get(&key) {
                for &idx in matches {
                    let mut combined = left.clone();
                    combined.extend(other.rows[idx].iter().cloned());
                    rows.push(combined);
                }
            }
        }

        let mut columns = self.columns;
        columns.extend(other.columns);
        Ok(Relation { columns, rows })
    }

    pub fn filter(self, column: &str, predicate: impl Fn(&Value) -> bool) -> Result<Relation> {
        let idx = self.index_of(column)?;
        let rows = self
            .rows
            .into_iter()
            .filter(|row| predicate(&row[idx]))
            .collect();
        Ok(Relation {
            columns: self.columns,
            rows,
        })
    }

    /// Groups on `keys` (ordered by key) and appends one column per
    /// aggregate. Key columns keep their names.
    pub fn group_by(self, keys: &[&str], aggregates: &[Aggregate]) -> Result<Relation> {
        let key_indices = keys
            .iter()
            .map(|k| self.index_of(k))
            .collect::<Result<Vec<_>>>()?;
        let agg_indices = aggregates
            .iter()
            .map(|a| self.index_of(&a.column))
            .collect::<Result<Vec<_>>>()?;

        let mut groups: BTreeMap<Vec<Value>, Vec<&Vec<Value>>> = BTreeMap::new();
        for row in &self.rows {
            let key = key_indices.iter().map(|&idx| row[idx].clone()).collect();
            groups.entry(key).or_default().push(row);
        }

        let rows = groups
            .into_iter()
            .map(|(mut key, members)| {
                for (agg, &idx) in aggregates.iter().zip(&agg_indices) {
                    key.push(agg.compute(idx, &members));
                }
                key
            })
            .collect();

        let mut columns: Vec<String> = key_indices.iter().map(|&i| self.columns[i].clone()).collect();
        columns.extend(aggregates.iter().map(|a| a.name.clone()));
        Ok(Relation { columns, rows })
    }

    pub fn project(self, projections: &[Projection]) -> Result<Relation> {
        let bound = projections
            .iter()
            .map(|p| p.expr.bind(&self))
            .collect::<Result<Vec<_>>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| bound.iter().map(|e| e.eval(row)).collect())
            .collect();
        Ok(Relation {
            columns: projections.iter().map(|p| p.name.clone()).collect(),
            rows,
        })
    }

    /// Stable multi-key sort; nulls sort lowest.
    pub fn order_by(mut self, keys: &[SortKey]) -> Result<Relation> {
        let indices = keys
            .iter()
            .map(|k| self.index_of(&k.column).map(|idx| (idx, k.descending)))
            .collect::<Result<Vec<_>>>()?;
        self.rows.sort_by(|a, b| {
            for &(idx, descending) in &indices {
                let cmp = a[idx].cmp(&b[idx]);
                if cmp != Ordering::Equal {
                    return if descending { cmp.reverse() } else { cmp };
                }
            }
            Ordering::Equal
        });
        Ok(self)
    }

    pub fn limit(mut self, n: usize) -> Relation {
        self.rows.truncate(n);
        self
    }
}
