//! Console rendering of report outcomes.

use crate::reports::{NOT_FOUND, Outcome, ReportTable};
use std::cmp::max;
use std::fmt;

struct Column<'a> {
    name: &'a str,
    width: usize,
}

impl Column<'_> {
    fn rule(&self) -> String {
        "-".repeat(self.width)
    }

    fn cell(&self, content: &str) -> String {
        let padding = self.width.saturating_sub(content.chars().count() + 1);
        format!(" {}{}", content, " ".repeat(padding))
    }
}

/// A pipe-delimited grid sized to its widest cell.
pub struct TextTable<'a> {
    columns: Vec<Column<'a>>,
    rows: &'a [Vec<String>],
}

impl<'a> TextTable<'a> {
    pub fn new(header: &'a [String], rows: &'a [Vec<String>]) -> Self {
        let mut columns: Vec<Column> = header
            .iter()
            .map(|name| Column {
                name,
                width: name.chars().count() + 2,
            })
            .collect();
        for row in rows {
            for (column, cell) in columns.iter_mut().zip(row) {
                column.width = max(column.width, cell.chars().count() + 2);
            }
        }
        TextTable { columns, rows }
    }

    fn line(&self, cells: impl Iterator<Item = String>) -> String {
        format!("|{}|", cells.collect::<Vec<_>>().join("|"))
    }
}

impl fmt::Display for TextTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return Ok(());
        }
        writeln!(f, "{}", self.line(self.columns.iter().map(|c| c.cell(c.name))))?;
        write!(f, "{}", self.line(self.columns.iter().map(Column::rule)))?;
        for row in self.rows {
            let cells = self
                .columns
                .iter()
                .zip(row)
                .map(|(column, cell)| column.cell(cell));
            write!(f, "\n{}", self.line(cells))?;
        }
        Ok(())
    }
}

pub fn render_table(table: &ReportTable) -> String {
    format!(
        "{}\n{}",
        table.title,
        TextTable::new(&table.header, &table.rows)
    )
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Table(table) => render_table(table),
        Outcome::NotFound => NOT_FOUND.to_string(),
        Outcome::Message(message) => message.clone(),
    }
}
