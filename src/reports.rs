//! The fixed catalogue of canned reports and the dispatcher that runs them.

use crate::cache::{Clock, ReportCache, SystemClock};
use crate::database::Database;
use crate::error::{Error, Result};
use crate::relation::{Aggregate, Expr, Projection, Relation, SortKey};
use crate::schema::*;
use crate::search::closest_by;
use crate::value::Value;
use log::{debug, info};
use std::collections::HashSet;
use std::time::Duration;

pub const NOT_FOUND: &str = "- - - No records are found - - -";
pub const OPTION_NOT_FOUND: &str = "Option not found";
pub const NOT_NUMERICAL: &str = "--- The input must be numerical ---";
pub const CACHED_PREFIX: &str = "Cached: ";

/// Key of the runner used for numbers outside the catalogue.
pub const DEFAULT_KEY: usize = 0;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTable {
    pub title: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Table(ReportTable),
    NotFound,
    Message(String),
}

type Runner = fn(&Database, &[String]) -> Result<Outcome>;

pub struct Report {
    pub key: usize,
    pub title: &'static str,
    /// Prompts for the arguments the report needs, in order.
    pub params: &'static [&'static str],
    runner: Runner,
}

impl Report {
    /// Parameterised reports depend on their input and are never cached.
    pub fn cacheable(&self) -> bool {
        self.params.is_empty() && self.key != DEFAULT_KEY
    }

    pub fn run(&self, db: &Database, args: &[String]) -> Result<Outcome> {
        if args.len() != self.params.len() {
            return Err(Error::Argument(format!(
                "'{}' takes {} argument(s), got {}",
                self.title,
                self.params.len(),
                args.len()
            )));
        }
        (self.runner)(db, args)
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.key, self.title)
    }
}

pub struct Catalog {
    reports: Vec<Report>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        let mut catalog = Catalog {
            reports: Vec::new(),
        };
        catalog.register("Default", &[], option_not_found);
        catalog.register(
            "Library with total operating revenue closest to n US dollars",
            &["n"],
            closest_operating_revenue,
        );
        catalog.register(
            "Libraries with ID of id_1 or id_2",
            &["id_1 (e.g. AK0001)", "id_2 (e.g. WY0023)"],
            libraries_with_ids,
        );
        catalog.register(
            "Average state licensed databases per library for counties that belong to states with less than 5 counties",
            &[],
            licensed_databases_in_small_states,
        );
        catalog.register(
            "Top 10 libraries with the highest average pay per employee",
            &[],
            highest_average_pay,
        );
        catalog.register(
            "Schools with their state's total population",
            &[],
            schools_with_state_population,
        );
        catalog.register(
            "Top 10 counties ordered by libraries count then by schools count",
            &[],
            top_counties_by_libraries_and_schools,
        );
        catalog.register(
            "Top 10 most expensive libraries to run",
            &[],
            most_expensive_to_run,
        );
        catalog.register(
            "Staff count and staff pay per library",
            &[],
            staff_count_and_pay,
        );
        catalog.register("Library count per county", &[], library_count_per_county);
        catalog.register("Database count per library", &[], database_count_per_library);
        catalog.register("Address of each library", &[], library_addresses);
        catalog.register(
            "Capital revenues of each library desc",
            &[],
            capital_revenues_desc,
        );
        catalog.register(
            "Operating revenues of each library desc",
            &[],
            operating_revenues_desc,
        );
        catalog.register(
            "Collection expenditures of each library desc",
            &[],
            collection_expenditures_desc,
        );
        catalog
    }

    fn register(&mut self, title: &'static str, params: &'static [&'static str], runner: Runner) {
        let key = self.reports.len();
        self.reports.push(Report {
            key,
            title,
            params,
            runner,
        });
    }

    /// The report for `key`, falling back to the default runner.
    pub fn get(&self, key: usize) -> &Report {
        self.reports
            .get(key)
            .unwrap_or(&self.reports[DEFAULT_KEY])
    }

    /// Every selectable report, default runner excluded.
    pub fn listed(&self) -> impl Iterator<Item = &Report> {
        self.reports.iter().skip(1)
    }

    pub fn len(&self) -> usize {
        self.reports.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Runs catalogue reports, answering repeat requests from the cache.
pub struct Dispatcher<C: Clock = SystemClock> {
    catalog: Catalog,
    cache: ReportCache<C>,
}

impl Dispatcher<SystemClock> {
    pub fn new(ttl: Duration) -> Self {
        Self::with_cache(ReportCache::new(ttl))
    }
}

impl<C: Clock> Dispatcher<C> {
    pub fn with_cache(cache: ReportCache<C>) -> Self {
        Dispatcher {
            catalog: Catalog::new(),
            cache,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dispatch(&mut self, db: &Database, key: usize, args: &[String]) -> Result<Outcome> {
        let report = self.catalog.get(key);
        if report.cacheable() {
            if let Some(cached) = self.cache.get(report.title) {
                info!("serving '{}' from cache", report.title);
                let mut table = cached.clone();
                table.title = format!("{}{}", CACHED_PREFIX, table.title);
                return Ok(Outcome::Table(table));
            }
        }

        debug!("running report {} '{}'", report.key, report.title);
        let outcome = report.run(db, args)?;
        if let (true, Outcome::Table(table)) = (report.cacheable(), &outcome) {
            self.cache.put(report.title, table.clone());
        }
        Ok(outcome)
    }
}

#[derive(Debug, Clone, Copy)]
enum Cell {
    Text,
    /// Whole number, fractional part truncated.
    Whole,
    /// Two decimal places.
    Money,
    /// Full precision.
    Exact,
}

fn format_cell(value: &Value, cell: Cell) -> String {
    match (cell, value) {
        (Cell::Whole, v) => v.render_truncated(),
        (Cell::Money, Value::Float(f)) => format!("{:.2}", f),
        (Cell::Exact, Value::Float(f)) => f.to_string(),
        (Cell::Text | Cell::Money | Cell::Exact, v) => v.render(),
    }
}

fn tabulate(title: &str, relation: Relation, layout: &[(&str, &str, Cell)]) -> Result<Outcome> {
    if relation.is_empty() {
        return Ok(Outcome::NotFound);
    }
    let indices = layout
        .iter()
        .map(|(column, _, cell)| relation.index_of(column).map(|idx| (idx, *cell)))
        .collect::<Result<Vec<_>>>()?;
    let rows = relation
        .rows()
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&(idx, cell)| format_cell(&row[idx], cell))
                .collect()
        })
        .collect();
    Ok(Outcome::Table(ReportTable {
        title: title.to_string(),
        header: layout.iter().map(|(_, header, _)| header.to_string()).collect(),
        rows,
    }))
}

const OPERATING_REVENUE_COLUMNS: [&str; 4] = [
    "local_government_operating_revenue",
    "state_government_operating_revenue",
    "federal_government_operating_revenue",
    "other_operating_revenue",
];

const CAPITAL_REVENUE_COLUMNS: [&str; 4] = [
    "local_government_capital_revenue",
    "state_government_capital_revenue",
    "federal_government_capital_revenue",
    "other_capital_revenue",
];

const COLLECTION_EXPENDITURE_COLUMNS: [&str; 3] = [
    "print_collection_expenditures",
    "digital_collection_expenditures",
    "other_collection_expenditures",
];

fn libraries_joined(db: &Database, tables: &[(&str, &str)]) -> Result<Relation> {
    tables
        .iter()
        .try_fold(Relation::scan(db, LIBRARIES)?, |rel, &(table, key)| {
            let left = format!("{}.{}", LIBRARIES, key);
            let right = format!("{}.{}", table, key);
            rel.join(Relation::scan(db, table)?, &[(left.as_str(), right.as_str())])
        })
}

fn option_not_found(_: &Database, _: &[String]) -> Result<Outcome> {
    Ok(Outcome::Message(OPTION_NOT_FOUND.to_string()))
}

fn closest_operating_revenue(db: &Database, args: &[String]) -> Result<Outcome> {
    let n = match args[0].trim().parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => return Ok(Outcome::Message(NOT_NUMERICAL.to_string())),
    };

    let libraries = libraries_joined(db, &[(OPERATING_REVENUES, "operating_revenue_id")])?
        .project(&[
            Projection::column("library_name"),
            Projection::expr(
                Expr::sum_of(&OPERATING_REVENUE_COLUMNS),
                "total_operating_revenue",
            ),
        ])?
        .filter("total_operating_revenue", |v| !v.is_null())?
        .order_by(&[SortKey::asc("total_operating_revenue")])?
        .into_rows();

    let Some(closest) = closest_by(&libraries, n, |row| row[1].as_f64().unwrap_or_default()) else {
        return Ok(Outcome::NotFound);
    };
    Ok(Outcome::Table(ReportTable {
        title: "Library with total operating revenue closest to n US dollars".to_string(),
        header: vec![
            "Library".to_string(),
            "Total Operating Revenue".to_string(),
            "n".to_string(),
        ],
        rows: vec![vec![
            closest[0].render(),
            format_cell(&closest[1], Cell::Money),
            n.to_string(),
        ]],
    }))
}

fn libraries_with_ids(db: &Database, args: &[String]) -> Result<Outcome> {
    let wanted: Vec<Value> = args.iter().map(|a| Value::Text(a.trim().to_string())).collect();
    let libraries = Relation::scan(db, LIBRARIES)?.filter("library_id", |v| wanted.contains(v))?;
    tabulate(
        "Libraries with ID of id_1 or id_2",
        libraries,
        &[
            ("library_id", "Library ID", Cell::Text),
            ("library_name", "Library", Cell::Text),
        ],
    )
}

fn licensed_databases_in_small_states(db: &Database, _: &[String]) -> Result<Outcome> {
    let small_states: HashSet<Value> = Relation::scan(db, STATES)?
        .join(
            Relation::scan(db, COUNTIES)?,
            &[("states.state_code", "counties.state_code")],
        )?
        .group_by(
            &["states.state_code"],
            &[Aggregate::count("counties.county_code", "county_count")],
        )?
        .filter("county_count", |v| *v < Value::Integer(5))?
        .column_values("states.state_code")?
        .into_iter()
        .collect();

    let counties = Relation::scan_as(db, COUNTIES, "outer_counties")?
        .filter("outer_counties.state_code", |v| small_states.contains(v))?
        .join(
            Relation::scan(db, STATES)?,
            &[("outer_counties.state_code", "states.state_code")],
        )?
        .join(
            Relation::scan(db, LIBRARIES)?,
            &[
                ("states.state_code", "libraries.state_code"),
                ("outer_counties.county_code", "libraries.county_code"),
            ],
        )?
        .join(
            Relation::scan(db, DATABASES_COUNTS)?,
            &[(
                "libraries.databases_count_id",
                "databases_counts.databases_count_id",
            )],
        )?
        .group_by(
            &["outer_counties.county_code", "outer_counties.state_code"],
            &[
                Aggregate::sum("databases_counts.state_licensed_databases", "licensed_total"),
                Aggregate::count("libraries.library_id", "library_count"),
            ],
        )?
        .project(&[
            Projection::column("outer_counties.county_code"),
            Projection::column("outer_counties.state_code"),
            Projection::expr(
                Expr::col("licensed_total").div(Expr::col("library_count")),
                "average_per_library",
            ),
        ])?
        .order_by(&[SortKey::asc("average_per_library")])?;

    tabulate(
        "Average state licensed databases per library for counties that belong to states with less than 5 counties",
        counties,
        &[
            ("outer_counties.county_code", "County Code", Cell::Whole),
            ("outer_counties.state_code", "State Code", Cell::Whole),
            (
                "average_per_library",
                "Average State Licensed Databases per Library for County",
                Cell::Whole,
            ),
        ],
    )
}

fn highest_average_pay(db: &Database, _: &[String]) -> Result<Outcome> {
    let libraries = libraries_joined(
        db,
        &[
            (STAFF_MEMBERS_COUNTS, "staff_members_count_id"),
            (EMPLOYEE_EXPENDITURES, "employee_expenditure_id"),
        ],
    )?
    .project(&[
        Projection::column("library_name"),
        Projection::expr(
            Expr::sum_of(&["salaries", "benefits"])
                .div(Expr::sum_of(&["librarians", "employees"]).null_if(Value::Integer(0))),
            "average_pay",
        ),
    ])?
    .order_by(&[SortKey::desc("average_pay")])?
    .limit(10);

    tabulate(
        "Top 10 libraries with the highest average pay per employee",
        libraries,
        &[
            ("library_name", "Library", Cell::Text),
            ("average_pay", "Average Pay", Cell::Whole),
        ],
    )
}

fn schools_with_state_population(db: &Database, _: &[String]) -> Result<Outcome> {
    let state_population = Relation::scan(db, COUNTIES)?
        .join(
            Relation::scan(db, STATES)?,
            &[("counties.state_code", "states.state_code")],
        )?
        .group_by(
            &["counties.state_code"],
            &[Aggregate::sum("counties.county_population", "state_population")],
        )?
        .project(&[
            Projection::renamed("counties.state_code", "state_pop.state_code"),
            Projection::renamed("state_population", "state_pop.state_population"),
        ])?;

    let schools = Relation::scan(db, SCHOOLS)?
        .join(
            Relation::scan(db, STATES)?,
            &[("schools.state_code", "states.state_code")],
        )?
        .join(
            state_population,
            &[("schools.state_code", "state_pop.state_code")],
        )?;

    tabulate(
        "Schools with their state's total population",
        schools,
        &[
            ("schools.school_name", "School", Cell::Text),
            ("states.state_alpha_code", "State Alpha Code", Cell::Text),
            ("state_pop.state_population", "State Population", Cell::Whole),
        ],
    )
}

fn top_counties_by_libraries_and_schools(db: &Database, _: &[String]) -> Result<Outcome> {
    // Libraries are counted per county and schools per state, then joined.
    let libraries_per_county = Relation::scan(db, COUNTIES)?
        .join(
            Relation::scan(db, STATES)?,
            &[("counties.state_code", "states.state_code")],
        )?
        .join(
            Relation::scan(db, LIBRARIES)?,
            &[
                ("states.state_code", "libraries.state_code"),
                ("counties.county_code", "libraries.county_code"),
            ],
        )?
        .group_by(
            &["counties.county_code", "counties.state_code"],
            &[Aggregate::count_distinct("libraries.library_id", "libraries_count")],
        )?;

    let schools_per_state = Relation::scan(db, SCHOOLS)?
        .group_by(
            &["schools.state_code"],
            &[Aggregate::count_distinct("schools.school_code", "schools_count")],
        )?;

    let counties = libraries_per_county
        .join(
            schools_per_state,
            &[("counties.state_code", "schools.state_code")],
        )?
        .order_by(&[SortKey::desc("libraries_count"), SortKey::desc("schools_count")])?
        .limit(10);

    tabulate(
        "Top 10 counties ordered by libraries count then by schools count",
        counties,
        &[
            ("counties.county_code", "County Code", Cell::Whole),
            ("counties.state_code", "State Code", Cell::Whole),
            ("libraries_count", "Libraries", Cell::Whole),
            ("schools_count", "Schools", Cell::Whole),
        ],
    )
}

fn most_expensive_to_run(db: &Database, _: &[String]) -> Result<Outcome> {
    let revenues: Vec<&str> = OPERATING_REVENUE_COLUMNS
        .iter()
        .chain(CAPITAL_REVENUE_COLUMNS.iter())
        .copied()
        .collect();
    let spending: Vec<&str> = ["salaries", "benefits"]
        .into_iter()
        .chain(COLLECTION_EXPENDITURE_COLUMNS)
        .collect();

    let libraries = libraries_joined(
        db,
        &[
            (OPERATING_REVENUES, "operating_revenue_id"),
            (CAPITAL_REVENUES, "capital_revenue_id"),
            (COLLECTION_EXPENDITURES, "collection_expenditure_id"),
            (EMPLOYEE_EXPENDITURES, "employee_expenditure_id"),
        ],
    )?
    .project(&[
        Projection::column("library_name"),
        Projection::expr(
            Expr::sum_of(&revenues).sub(Expr::sum_of(&spending)),
            "total_cost",
        ),
    ])?
    .order_by(&[SortKey::desc("total_cost")])?
    .limit(10);

    tabulate(
        "Top 10 most expensive libraries to run",
        libraries,
        &[
            ("library_name", "Library", Cell::Text),
            ("total_cost", "Total Cost", Cell::Money),
        ],
    )
}

fn staff_count_and_pay(db: &Database, _: &[String]) -> Result<Outcome> {
    let libraries = libraries_joined(
        db,
        &[
            (STAFF_MEMBERS_COUNTS, "staff_members_count_id"),
            (EMPLOYEE_EXPENDITURES, "employee_expenditure_id"),
        ],
    )?
    .project(&[
        Projection::column("library_name"),
        Projection::column("librarians"),
        Projection::column("employees"),
        Projection::expr(Expr::sum_of(&["librarians", "employees"]), "total_staff"),
        Projection::column("salaries"),
        Projection::column("benefits"),
        Projection::expr(
            Expr::sum_of(&["salaries", "benefits"]),
            "total_employee_expenditures",
        ),
    ])?
    .order_by(&[
        SortKey::desc("total_staff"),
        SortKey::desc("total_employee_expenditures"),
    ])?;

    tabulate(
        "Staff count and staff pay per library",
        libraries,
        &[
            ("library_name", "Library", Cell::Text),
            ("librarians", "Librarians", Cell::Whole),
            ("employees", "Employees", Cell::Whole),
            ("total_staff", "Total Staff", Cell::Whole),
            ("salaries", "Salaries", Cell::Whole),
            ("benefits", "Benefits", Cell::Whole),
            (
                "total_employee_expenditures",
                "Total Employee Expenditures",
                Cell::Whole,
            ),
        ],
    )
}

fn library_count_per_county(db: &Database, _: &[String]) -> Result<Outcome> {
    let counties = Relation::scan(db, COUNTIES)?
        .join(
            Relation::scan(db, LIBRARIES)?,
            &[
                ("counties.state_code", "libraries.state_code"),
                ("counties.county_code", "libraries.county_code"),
            ],
        )?
        .join(
            Relation::scan(db, STATES)?,
            &[("counties.state_code", "states.state_code")],
        )?
        .group_by(
            &[
                "states.state_alpha_code",
                "counties.county_population",
                "counties.county_name",
            ],
            &[Aggregate::count("libraries.library_id", "library_count")],
        )?
        .order_by(&[SortKey::desc("library_count")])?;

    tabulate(
        "Library count per county",
        counties,
        &[
            ("counties.county_name", "County", Cell::Text),
            ("counties.county_population", "County Population", Cell::Whole),
            ("states.state_alpha_code", "State Alpha Code", Cell::Text),
            ("library_count", "Libraries", Cell::Whole),
        ],
    )
}

fn database_count_per_library(db: &Database, _: &[String]) -> Result<Outcome> {
    let libraries = libraries_joined(db, &[(DATABASES_COUNTS, "databases_count_id")])?
        .project(&[
            Projection::column("library_name"),
            Projection::column("local_cooperative_agreements"),
            Projection::column("state_licensed_databases"),
            Projection::expr(
                Expr::sum_of(&["local_cooperative_agreements", "state_licensed_databases"]),
                "total_databases",
            ),
        ])?
        .order_by(&[SortKey::desc("total_databases")])?;

    tabulate(
        "Database count per library",
        libraries,
        &[
            ("library_name", "Library", Cell::Text),
            (
                "local_cooperative_agreements",
                "Local Cooperative Agreements",
                Cell::Whole,
            ),
            (
                "state_licensed_databases",
                "State Licensed Databases",
                Cell::Whole,
            ),
            ("total_databases", "Total Databases", Cell::Whole),
        ],
    )
}

fn library_addresses(db: &Database, _: &[String]) -> Result<Outcome> {
    let libraries = Relation::scan(db, LIBRARIES)?
        .join(
            Relation::scan(db, STATES)?,
            &[("libraries.state_code", "states.state_code")],
        )?
        .join(
            Relation::scan(db, COUNTIES)?,
            &[
                ("libraries.state_code", "counties.state_code"),
                ("libraries.county_code", "counties.county_code"),
            ],
        )?;

    tabulate(
        "Address of each library",
        libraries,
        &[
            ("library_name", "Library", Cell::Text),
            ("street_address", "Street", Cell::Text),
            ("city", "City", Cell::Text),
            ("zipcode", "Zipcode", Cell::Text),
            ("state_alpha_code", "State Alpha Code", Cell::Text),
            ("county_name", "County", Cell::Text),
            ("latitude", "Latitude", Cell::Exact),
            ("longitude", "Longitude", Cell::Exact),
        ],
    )
}

/// One library per row with each revenue or expenditure column and their
/// total, largest total first.
fn breakdown_desc(
    db: &Database,
    title: &str,
    table: &str,
    key: &str,
    columns: &[&str],
    headers: &[&str],
    total: (&str, &str),
) -> Result<Outcome> {
    let mut projections = vec![Projection::column("library_name")];
    projections.extend(columns.iter().map(|c| Projection::column(c)));
    projections.push(Projection::expr(Expr::sum_of(columns), total.0));

    let libraries = libraries_joined(db, &[(table, key)])?
        .project(&projections)?
        .order_by(&[SortKey::desc(total.0)])?;

    let mut layout = vec![("library_name", "Library", Cell::Text)];
    layout.extend(
        columns
            .iter()
            .zip(headers)
            .map(|(c, h)| (*c, *h, Cell::Whole)),
    );
    layout.push((total.0, total.1, Cell::Whole));
    tabulate(title, libraries, &layout)
}

fn capital_revenues_desc(db: &Database, _: &[String]) -> Result<Outcome> {
    breakdown_desc(
        db,
        "Capital revenues of each library desc",
        CAPITAL_REVENUES,
        "capital_revenue_id",
        &CAPITAL_REVENUE_COLUMNS,
        &[
            "Local Government Capital Revenue",
            "State Government Capital Revenue",
            "Federal Government Capital Revenue",
            "Other Capital Revenue",
        ],
        ("total_capital_revenue", "Total Capital Revenue"),
    )
}

fn operating_revenues_desc(db: &Database, _: &[String]) -> Result<Outcome> {
    breakdown_desc(
        db,
        "Operating revenues of each library desc",
        OPERATING_REVENUES,
        "operating_revenue_id",
        &OPERATING_REVENUE_COLUMNS,
        &[
            "Local Government Operating Revenue",
            "State Government Operating Revenue",
            "Federal Government Operating Revenue",
            "Other Operating Revenue",
        ],
        ("total_operating_revenue", "Total Operating Revenue"),
    )
}

fn collection_expenditures_desc(db: &Database, _: &[String]) -> Result<Outcome> {
    breakdown_desc(
        db,
        "Collection expenditures of each library desc",
        COLLECTION_EXPENDITURES,
        "collection_expenditure_id",
        &COLLECTION_EXPENDITURE_COLUMNS,
        &[
            "Print Collection Expenditures",
            "Digital Collection Expenditures",
            "Other Collection Expenditures",
        ],
        ("total_collection_expenditures", "Total Collection Expenditures"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_keys_follow_registration_order() {
        let catalog = Catalog::new();
        assert_eq!(catalog.len(), 14);
        for (expected, report) in catalog.listed().enumerate() {
            assert_eq!(report.key, expected + 1);
        }
        assert_eq!(catalog.get(99).key, DEFAULT_KEY);
        assert_eq!(
            catalog.get(1).to_string(),
            "1 Library with total operating revenue closest to n US dollars"
        );
    }

    #[test]
    fn test_only_parameterless_reports_are_cacheable() {
        let catalog = Catalog::new();
        assert!(!catalog.get(1).cacheable());
        assert!(!catalog.get(2).cacheable());
        assert!(!catalog.get(DEFAULT_KEY).cacheable());
        assert!(catalog.listed().skip(2).all(Report::cacheable));
    }

    #[test]
    fn test_argument_count_is_checked() {
        let catalog = Catalog::new();
        let err = catalog.get(2).run(&Database::new(), &["AK0001".to_string()]).unwrap_err();
        assert!(err.to_string().contains("takes 2 argument(s)"));
    }

    #[test]
    fn test_default_runner() {
        let outcome = Catalog::new().get(42).run(&Database::new(), &[]).unwrap();
        assert_eq!(outcome, Outcome::Message(OPTION_NOT_FOUND.to_string()));
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(&Value::Float(12.99), Cell::Whole), "12");
        assert_eq!(format_cell(&Value::Float(12.5), Cell::Money), "12.50");
        assert_eq!(format_cell(&Value::Float(61.2181), Cell::Exact), "61.2181");
        assert_eq!(format_cell(&Value::Null, Cell::Whole), "NULL");
    }
}
