use crate::database::Database;
use crate::error::{Error, Result};
use crate::schema;
use crate::storage::StorageEngine;
use crate::value::{ColumnDefinition, Value};
use log::{debug, error, info};
use regex::Regex;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Delimiter {
    /// One or more whitespace characters.
    Whitespace,
    Comma,
    Tab,
}

/// Splits trimmed records on a `Delimiter`.
pub struct Splitter {
    delimiter: Delimiter,
    whitespace: Option<Regex>,
}

impl Splitter {
    pub fn new(delimiter: Delimiter) -> Result<Self> {
        let whitespace = match delimiter {
            Delimiter::Whitespace => Some(
                Regex::new(r"\s+")
                    .map_err(|e| Error::Config(format!("bad delimiter pattern: {}", e)))?,
            ),
            Delimiter::Comma | Delimiter::Tab => None,
        };
        Ok(Splitter {
            delimiter,
            whitespace,
        })
    }

    pub fn split<'r>(&self, record: &'r str) -> Vec<&'r str> {
        let record = record.trim();
        match (&self.whitespace, self.delimiter) {
            (Some(re), _) => re.split(record).collect(),
            (None, Delimiter::Tab) => record.split('\t').collect(),
            (None, _) => record.split(',').collect(),
        }
    }
}

/// Where a target column's value comes from in a source record.
#[derive(Debug, Clone)]
pub struct SeedColumn {
    pub source: usize,
    /// Used when the record is too short or the cell is empty.
    pub default: Option<Value>,
}

impl SeedColumn {
    pub fn at(source: usize) -> Self {
        SeedColumn {
            source,
            default: None,
        }
    }

    pub fn or(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }
}

/// How one flat file maps onto one table.
#[derive(Debug, Clone)]
pub struct SeedSpec {
    pub table: &'static str,
    pub file: &'static str,
    pub delimiter: Delimiter,
    /// One entry per target column, in table column order.
    pub columns: Vec<SeedColumn>,
}

impl SeedSpec {
    pub fn new(table: &'static str, file: &'static str, delimiter: Delimiter) -> Self {
        SeedSpec {
            table,
            file,
            delimiter,
            columns: Vec::new(),
        }
    }

    /// Target columns read straight from source cells `0..n`.
    pub fn sequential(mut self, n: usize) -> Self {
        self.columns = (0..n).map(SeedColumn::at).collect();
        self
    }

    pub fn column(mut self, column: SeedColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Parses the contents of a seed file: the first line is a header and
    /// blank lines are ignored.
    pub fn parse(&self, contents: &str, layout: &[ColumnDefinition]) -> Result<Vec<Vec<Value>>> {
        if layout.len() != self.columns.len() {
            return Err(Error::ColumnCount {
                table: self.table.to_string(),
                expected: layout.len(),
                got: self.columns.len(),
            });
        }
        let splitter = Splitter::new(self.delimiter)?;
        let mut rows = Vec::new();
        for (idx, record) in contents.lines().enumerate().skip(1) {
            if record.trim().is_empty() {
                continue;
            }
            let line = idx + 1;
            let cells = splitter.split(record);
            rows.push(self.parse_record(&cells, layout, line)?);
        }
        Ok(rows)
    }

    fn parse_record(
        &self,
        cells: &[&str],
        layout: &[ColumnDefinition],
        line: usize,
    ) -> Result<Vec<Value>> {
        let mut row = Vec::with_capacity(layout.len());
        for (seed, column) in self.columns.iter().zip(layout) {
            let cell = cells
                .get(seed.source)
                .map(|c| c.trim())
                .filter(|c| !c.is_empty());
            let value = match (cell, &seed.default) {
                (Some(raw), _) => {
                    Value::parse_as(raw, column).map_err(|e| self.parse_error(line, e.to_string()))?
                }
                (None, Some(default)) => default.clone(),
                (None, None) => {
                    return Err(self.parse_error(
                        line,
                        format!("missing field {} for column '{}'", seed.source, column.name),
                    ));
                }
            };
            row.push(value);
        }
        Ok(row)
    }

    fn parse_error(&self, line: usize, message: String) -> Error {
        Error::Parse {
            file: self.file.to_string(),
            line,
            message,
        }
    }
}

/// The seed files of the libraries dataset, in seed order.
pub fn default_specs() -> Vec<SeedSpec> {
    use Delimiter::*;
    vec![
        SeedSpec::new(schema::STATES, "states.txt", Whitespace).sequential(2),
        SeedSpec::new(schema::SCHOOLS, "schools.txt", Tab).sequential(3),
        SeedSpec::new(schema::COUNTIES, "county.csv", Comma).sequential(4),
        SeedSpec::new(schema::OPERATING_REVENUES, "operating_revenues.txt", Whitespace)
            .sequential(5),
        SeedSpec::new(schema::CAPITAL_REVENUES, "capital_revenues.txt", Whitespace)
            .sequential(5),
        SeedSpec::new(
            schema::COLLECTION_EXPENDITURES,
            "collection_expenditures.txt",
            Whitespace,
        )
        .sequential(4),
        SeedSpec::new(
            schema::EMPLOYEE_EXPENDITURES,
            "employee_expenditures.txt",
            Whitespace,
        )
        .column(SeedColumn::at(0))
        .column(SeedColumn::at(1).or(Value::Float(0.0)))
        .column(SeedColumn::at(2).or(Value::Float(0.0))),
        SeedSpec::new(
            schema::STAFF_MEMBERS_COUNTS,
            "staff_members_counts.txt",
            Whitespace,
        )
        .sequential(3),
        SeedSpec::new(schema::DATABASES_COUNTS, "databases_counts.txt", Whitespace)
            .sequential(3),
        // library.txt carries the state and county codes after the six
        // foreign-key ids.
        [0, 1, 2, 3, 4, 5, 6, 13, 14, 7, 8, 9, 10, 11, 12]
            .into_iter()
            .fold(SeedSpec::new(schema::LIBRARIES, "library.txt", Tab), |spec, source| {
                spec.column(SeedColumn::at(source))
            }),
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub enum SeedOutcome {
    Inserted(usize),
    /// The table already held rows.
    Skipped,
    Failed(String),
}

#[derive(Debug)]
pub struct SeedReport {
    pub tables: Vec<(&'static str, SeedOutcome)>,
    pub elapsed: Duration,
}

impl SeedReport {
    pub fn rows_inserted(&self) -> usize {
        self.tables
            .iter()
            .map(|(_, outcome)| match outcome {
                SeedOutcome::Inserted(n) => *n,
                _ => 0,
            })
            .sum()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.tables.iter().filter_map(|(table, outcome)| match outcome {
            SeedOutcome::Failed(msg) => Some((*table, msg.as_str())),
            _ => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl fmt::Display for SeedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (table, outcome) in &self.tables {
            match outcome {
                SeedOutcome::Inserted(n) => writeln!(f, "{:<26} {} row(s) inserted", table, n)?,
                SeedOutcome::Skipped => writeln!(f, "{:<26} already seeded", table)?,
                SeedOutcome::Failed(msg) => writeln!(f, "{:<26} failed: {}", table, msg)?,
            }
        }
        write!(f, "Seconds: {:.3}", self.elapsed.as_secs_f64())
    }
}

/// Creates the dataset tables and fills the empty ones from flat files.
pub struct Loader {
    data_dir: PathBuf,
    specs: Vec<SeedSpec>,
}

impl Loader {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Loader {
            data_dir: data_dir.into(),
            specs: default_specs(),
        }
    }

    pub fn with_specs<P: Into<PathBuf>>(data_dir: P, specs: Vec<SeedSpec>) -> Self {
        Loader {
            data_dir: data_dir.into(),
            specs,
        }
    }

    pub fn create_tables_if_absent(&self, db: &mut Database) -> Result<()> {
        for spec in &self.specs {
            let columns =
                schema::columns(spec.table).ok_or_else(|| Error::UnknownTable(spec.table.to_string()))?;
            if db.create_table_if_absent(spec.table, columns) {
                debug!("created table {}", spec.table);
            }
        }
        Ok(())
    }

    /// Seeds every table in order and saves the store once at the end. A
    /// table that fails to load is left empty and the run continues.
    pub fn run(&self, db: &mut Database, storage: &dyn StorageEngine) -> Result<SeedReport> {
        let start = Instant::now();
        info!("seeding from {}", self.data_dir.display());
        self.create_tables_if_absent(db)?;

        let mut tables = Vec::with_capacity(self.specs.len());
        for spec in &self.specs {
            let outcome = match self.seed_table(db, spec) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("seeding {} failed: {}", spec.table, e);
                    SeedOutcome::Failed(e.to_string())
                }
            };
            tables.push((spec.table, outcome));
        }

        storage.save(db)?;
        let report = SeedReport {
            tables,
            elapsed: start.elapsed(),
        };
        info!(
            "seeded {} row(s) in {:.3}s",
            report.rows_inserted(),
            report.elapsed.as_secs_f64()
        );
        Ok(report)
    }

    /// Runs a seed pass only when the store holds no libraries yet.
    pub fn ensure_seeded(
        &self,
        db: &mut Database,
        storage: &dyn StorageEngine,
    ) -> Result<Option<SeedReport>> {
        if db.is_seeded() {
            debug!("database already seeded");
            return Ok(None);
        }
        self.run(db, storage).map(Some)
    }

    fn seed_table(&self, db: &mut Database, spec: &SeedSpec) -> Result<SeedOutcome> {
        if db.is_table_seeded(spec.table) {
            info!("{} already seeded, skipping", spec.table);
            return Ok(SeedOutcome::Skipped);
        }
        let path = self.data_dir.join(spec.file);
        let contents = fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let layout = db.table(spec.table)?.columns.clone();
        let rows = spec.parse(&contents, &layout)?;
        let inserted = db.insert_batch(spec.table, rows)?;
        info!("{}: {} row(s) from {}", spec.table, inserted, spec.file);
        Ok(SeedOutcome::Inserted(inserted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorageEngine;

    fn layout(table: &str) -> Vec<ColumnDefinition> {
        schema::columns(table).unwrap()
    }

    fn spec(table: &str) -> SeedSpec {
        default_specs()
            .into_iter()
            .find(|s| s.table == table)
            .unwrap()
    }

    #[test]
    fn test_whitespace_split_collapses_runs() {
        let splitter = Splitter::new(Delimiter::Whitespace).unwrap();
        assert_eq!(splitter.split("  1 \t  AL   "), vec!["1", "AL"]);
    }

    #[test]
    fn test_tab_split_keeps_inner_spaces() {
        let splitter = Splitter::new(Delimiter::Tab).unwrap();
        assert_eq!(
            splitter.split("AK0001\tAnchorage Public Library\t3600 Denali St"),
            vec!["AK0001", "Anchorage Public Library", "3600 Denali St"]
        );
    }

    #[test]
    fn test_header_and_blank_lines_are_skipped() {
        let rows = spec(schema::STATES)
            .parse("code alpha\n1 AL\n\n2 AK\n", &layout(schema::STATES))
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], vec![Value::Integer(2), Value::Text("AK".into())]);
    }

    #[test]
    fn test_short_employee_record_defaults_to_zero() {
        let rows = spec(schema::EMPLOYEE_EXPENDITURES)
            .parse("id salaries benefits\n7\n8 100.5 20\n", &layout(schema::EMPLOYEE_EXPENDITURES))
            .unwrap();
        assert_eq!(
            rows[0],
            vec![Value::Integer(7), Value::Float(0.0), Value::Float(0.0)]
        );
        assert_eq!(
            rows[1],
            vec![Value::Integer(8), Value::Float(100.5), Value::Float(20.0)]
        );
    }

    #[test]
    fn test_library_cells_are_reordered() {
        let record = [
            "AK0001", "Anchorage", "3600 Denali St", "Anchorage", "99503", "-149.87", "61.19",
            "1", "2", "3", "4", "5", "6", "2", "20",
        ]
        .join("\t");
        let contents = format!("header\n{}\n", record);
        let rows = spec(schema::LIBRARIES)
            .parse(&contents, &layout(schema::LIBRARIES))
            .unwrap();
        let row = &rows[0];
        assert_eq!(row[7], Value::Integer(2), "state_code");
        assert_eq!(row[8], Value::Integer(20), "county_code");
        assert_eq!(row[9], Value::Integer(1), "staff_members_count_id");
        assert_eq!(row[14], Value::Integer(6), "databases_count_id");
    }

    #[test]
    fn test_bad_cell_reports_file_and_line() {
        let err = spec(schema::STATES)
            .parse("code alpha\n1 AL\nxx AK\n", &layout(schema::STATES))
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("states.txt:3:"), "{}", msg);
    }

    #[test]
    fn test_missing_field_without_default() {
        let err = spec(schema::STATES)
            .parse("code alpha\n1\n", &layout(schema::STATES))
            .unwrap_err();
        assert!(err.to_string().contains("missing field 1"));
    }

    #[test]
    fn test_run_records_failures_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("states.txt"), "code alpha\n1 AL\n").unwrap();
        let loader = Loader::with_specs(
            dir.path(),
            vec![spec(schema::STATES), spec(schema::COUNTIES)],
        );
        let storage = MemoryStorageEngine::new();
        let mut db = Database::new();

        let report = loader.run(&mut db, &storage).unwrap();
        assert_eq!(report.tables[0].1, SeedOutcome::Inserted(1));
        assert!(matches!(report.tables[1].1, SeedOutcome::Failed(_)));
        assert!(!report.is_complete());
        assert!(storage.load().unwrap().is_table_seeded(schema::STATES));

        let again = loader.run(&mut db, &storage).unwrap();
        assert_eq!(again.tables[0].1, SeedOutcome::Skipped);
    }
}
