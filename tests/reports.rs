mod common;

use common::{seeded_database, strings};
use std::time::Duration;
use us_libraries::cache::{ManualClock, ReportCache};
use us_libraries::loader::Loader;
use us_libraries::reports::{CACHED_PREFIX, Catalog, NOT_NUMERICAL};
use us_libraries::{Database, Dispatcher, Outcome, ReportTable};

fn run(db: &Database, key: usize, args: &[&str]) -> Outcome {
    Catalog::new().get(key).run(db, &strings(args)).unwrap()
}

fn table(db: &Database, key: usize, args: &[&str]) -> ReportTable {
    match run(db, key, args) {
        Outcome::Table(table) => table,
        other => panic!("report {} gave {:?}", key, other),
    }
}

fn column(table: &ReportTable, idx: usize) -> Vec<&str> {
    table.rows.iter().map(|row| row[idx].as_str()).collect()
}

#[test]
fn test_closest_operating_revenue() {
    let db = seeded_database();
    let result = table(&db, 1, &["4000"]);
    assert_eq!(result.header, strings(&["Library", "Total Operating Revenue", "n"]));
    assert_eq!(result.rows, vec![strings(&["Juneau Library", "5000.00", "4000"])]);

    let result = table(&db, 1, &["3000"]);
    assert_eq!(result.rows[0][0], "Fairhope Library");
}

#[test]
fn test_closest_operating_revenue_outside_the_range() {
    let db = seeded_database();
    assert_eq!(table(&db, 1, &["-5"]).rows[0][0], "Autauga Library");
    assert_eq!(table(&db, 1, &["1e9"]).rows[0][0], "Baldwin Library");
}

#[test]
fn test_closest_operating_revenue_rejects_text() {
    let db = seeded_database();
    assert_eq!(run(&db, 1, &["a lot"]), Outcome::Message(NOT_NUMERICAL.to_string()));
    assert_eq!(run(&db, 1, &["NaN"]), Outcome::Message(NOT_NUMERICAL.to_string()));
}

#[test]
fn test_libraries_with_ids() {
    let db = seeded_database();
    let result = table(&db, 2, &["AK0001", "AL0002"]);
    assert_eq!(result.header, strings(&["Library ID", "Library"]));
    assert_eq!(
        result.rows,
        vec![
            strings(&["AL0002", "Baldwin Library"]),
            strings(&["AK0001", "Juneau Library"]),
        ]
    );
    assert_eq!(run(&db, 2, &["XX0001", "XX0002"]), Outcome::NotFound);
}

#[test]
fn test_licensed_databases_in_small_states() {
    let db = seeded_database();
    let result = table(&db, 3, &[]);
    // Baldwin county averages (10 + 4) / 2 with integer division.
    assert_eq!(
        result.rows,
        vec![
            strings(&["1", "1", "5"]),
            strings(&["20", "2", "6"]),
            strings(&["3", "1", "7"]),
        ]
    );
}

#[test]
fn test_highest_average_pay_puts_unstaffed_last() {
    let db = seeded_database();
    let result = table(&db, 4, &[]);
    assert_eq!(
        result.rows,
        vec![
            strings(&["Baldwin Library", "1000"]),
            strings(&["Fairhope Library", "800"]),
            strings(&["Autauga Library", "0"]),
            strings(&["Juneau Library", "NULL"]),
        ]
    );
}

#[test]
fn test_schools_with_state_population() {
    let db = seeded_database();
    let result = table(&db, 5, &[]);
    assert_eq!(
        result.rows,
        vec![
            strings(&["Auburn High", "AL", "6000"]),
            strings(&["Baldwin Prep", "AL", "6000"]),
            strings(&["Juneau-Douglas High", "AK", "1100"]),
        ]
    );
}

#[test]
fn test_top_counties() {
    let db = seeded_database();
    let result = table(&db, 6, &[]);
    assert_eq!(
        result.header,
        strings(&["County Code", "State Code", "Libraries", "Schools"])
    );
    assert_eq!(
        result.rows,
        vec![
            strings(&["3", "1", "2", "2"]),
            strings(&["1", "1", "1", "2"]),
            strings(&["20", "2", "1", "1"]),
        ]
    );
}

#[test]
fn test_most_expensive_to_run() {
    let db = seeded_database();
    let result = table(&db, 7, &[]);
    assert_eq!(
        result.rows,
        vec![
            strings(&["Baldwin Library", "2100.00"]),
            strings(&["Juneau Library", "2010.00"]),
            strings(&["Autauga Library", "1100.00"]),
            strings(&["Fairhope Library", "-200.00"]),
        ]
    );
}

#[test]
fn test_staff_count_and_pay() {
    let db = seeded_database();
    let result = table(&db, 8, &[]);
    assert_eq!(result.header.len(), 7);
    assert_eq!(
        column(&result, 0),
        vec!["Baldwin Library", "Fairhope Library", "Autauga Library", "Juneau Library"]
    );
    assert_eq!(
        result.rows[1],
        strings(&["Fairhope Library", "1", "1", "2", "1500", "500", "2000"])
    );
}

#[test]
fn test_library_count_per_county() {
    let db = seeded_database();
    let result = table(&db, 9, &[]);
    // Sitka has no library; a county-code-only join would credit it with Baldwin's two.
    assert_eq!(
        result.rows,
        vec![
            strings(&["Baldwin", "5000", "AL", "2"]),
            strings(&["Juneau", "300", "AK", "1"]),
            strings(&["Autauga", "1000", "AL", "1"]),
        ]
    );
}

#[test]
fn test_database_count_per_library() {
    let db = seeded_database();
    let result = table(&db, 10, &[]);
    assert_eq!(column(&result, 3), vec!["11", "9", "7", "4"]);
    assert_eq!(result.rows[0], strings(&["Baldwin Library", "1", "10", "11"]));
}

#[test]
fn test_library_addresses() {
    let db = seeded_database();
    let result = table(&db, 11, &[]);
    // Sitka shares county code 3 with Baldwin but lies in Alaska.
    assert_eq!(result.rows.len(), 4);
    assert_eq!(column(&result, 5), vec!["Autauga", "Baldwin", "Baldwin", "Juneau"]);
    assert_eq!(
        result.rows[0],
        strings(&[
            "Autauga Library",
            "1 Main St",
            "Prattville",
            "36067",
            "AL",
            "Autauga",
            "32.46",
            "-86.47",
        ])
    );
}

#[test]
fn test_breakdowns_are_descending() {
    let db = seeded_database();

    let capital = table(&db, 12, &[]);
    assert_eq!(capital.header[5], "Total Capital Revenue");
    // Equal totals keep library order.
    assert_eq!(
        column(&capital, 0),
        vec!["Baldwin Library", "Fairhope Library", "Juneau Library", "Autauga Library"]
    );

    let operating = table(&db, 13, &[]);
    assert_eq!(column(&operating, 5), vec!["7000", "5000", "2000", "1250"]);

    let collection = table(&db, 14, &[]);
    assert_eq!(collection.header.len(), 5);
    assert_eq!(column(&collection, 4), vec!["1000", "500", "300", "150"]);
}

#[test]
fn test_empty_tables_give_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut db = Database::new();
    Loader::new(dir.path()).create_tables_if_absent(&mut db).unwrap();
    for key in 3..=14 {
        assert_eq!(run(&db, key, &[]), Outcome::NotFound, "report {}", key);
    }
    assert_eq!(run(&db, 1, &["10"]), Outcome::NotFound);
}

#[test]
fn test_repeat_requests_are_served_from_cache() {
    let db = seeded_database();
    let clock = ManualClock::new();
    let mut dispatcher = Dispatcher::with_cache(ReportCache::with_clock(Duration::from_secs(30), &clock));

    let Outcome::Table(first) = dispatcher.dispatch(&db, 13, &[]).unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(first.title, "Operating revenues of each library desc");

    clock.advance(Duration::from_secs(10));
    let Outcome::Table(second) = dispatcher.dispatch(&db, 13, &[]).unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(second.title, format!("{}{}", CACHED_PREFIX, first.title));
    assert_eq!(second.rows, first.rows);

    clock.advance(Duration::from_secs(21));
    let Outcome::Table(third) = dispatcher.dispatch(&db, 13, &[]).unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(third.title, first.title);
}

#[test]
fn test_parameterised_reports_are_never_cached() {
    let db = seeded_database();
    let clock = ManualClock::new();
    let mut dispatcher = Dispatcher::with_cache(ReportCache::with_clock(Duration::from_secs(30), &clock));
    let args = strings(&["4000"]);
    for _ in 0..2 {
        let Outcome::Table(result) = dispatcher.dispatch(&db, 1, &args).unwrap() else {
            panic!("expected a table");
        };
        assert!(!result.title.starts_with(CACHED_PREFIX));
    }
    let Outcome::Table(other) = dispatcher.dispatch(&db, 1, &strings(&["3000"])).unwrap() else {
        panic!("expected a table");
    };
    assert_eq!(other.rows[0][0], "Fairhope Library");
}

#[test]
fn test_not_found_is_not_cached() {
    let db = seeded_database();
    let mut empty = Database::new();
    Loader::new(".").create_tables_if_absent(&mut empty).unwrap();

    let clock = ManualClock::new();
    let mut dispatcher = Dispatcher::with_cache(ReportCache::with_clock(Duration::from_secs(30), &clock));
    assert_eq!(dispatcher.dispatch(&empty, 10, &[]).unwrap(), Outcome::NotFound);
    let Outcome::Table(result) = dispatcher.dispatch(&db, 10, &[]).unwrap() else {
        panic!("expected a table");
    };
    assert!(!result.title.starts_with(CACHED_PREFIX));
}
