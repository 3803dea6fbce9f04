#![allow(dead_code)]

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use us_libraries::Database;
use us_libraries::loader::Loader;
use us_libraries::storage::MemoryStorageEngine;

pub const STATES: &str = "state_code state_alpha_code
1 AL
2 AK
3 AZ
";

pub const SCHOOLS: &str = "school_code\tschool_name\tstate_code
100\tAuburn High\t1
101\tBaldwin Prep\t1
200\tJuneau-Douglas High\t2
300\tPhoenix Prep\t3
";

pub const COUNTIES: &str = "state_code,county_code,county_population,county_name
1,1,1000,Autauga
1,3,5000,Baldwin
2,20,300,Juneau
2,3,800,Sitka
";

pub const OPERATING_REVENUES: &str = "id local state federal other
1 1000 200 0 50
2 5000 1000 500 500
3 2000 0 0 0
4 3000 1500 100 400
";

pub const CAPITAL_REVENUES: &str = "id local state federal other
1 0 0 0 0
2 100 0 0 0
3 50 50 0 0
4 0 0 0 10
";

pub const COLLECTION_EXPENDITURES: &str = "id print digital other
1 100 50 0
2 500 300 200
3 200 100 0
4 250 250 0
";

pub const EMPLOYEE_EXPENDITURES: &str = "id salaries benefits
1
2 3000 1000
3 1500 500
4 2000 500
";

pub const STAFF_MEMBERS_COUNTS: &str = "id librarians employees
1 1 1
2 2 2
3 1 1.5
4 0 0
";

pub const DATABASES_COUNTS: &str = "id local_cooperative_agreements state_licensed_databases
1 2 5
2 1 10
3 0 4
4 3 6
";

/// Cells 7..12 are the foreign-key ids, 13 and 14 the state and county.
pub const LIBRARIES: &str = "library_id\tname\tstreet\tcity\tzip\tlongitude\tlatitude\tstaff\toperating\temployee\tcollection\tcapital\tdatabases\tstate\tcounty
AL0001\tAutauga Library\t1 Main St\tPrattville\t36067\t-86.47\t32.46\t1\t1\t1\t1\t1\t1\t1\t1
AL0002\tBaldwin Library\t2 Bay St\tDaphne\t36526\t-87.9\t30.6\t2\t2\t2\t2\t2\t2\t1\t3
AL0003\tFairhope Library\t3 Oak St\tFairhope\t36532\t-87.9\t30.52\t3\t3\t3\t3\t3\t3\t1\t3
AK0001\tJuneau Library\t4 Glacier Ave\tJuneau\t99801\t-134.42\t58.3\t4\t4\t4\t4\t4\t4\t2\t20
";

pub const FIXTURES: [(&str, &str); 10] = [
    ("states.txt", STATES),
    ("schools.txt", SCHOOLS),
    ("county.csv", COUNTIES),
    ("operating_revenues.txt", OPERATING_REVENUES),
    ("capital_revenues.txt", CAPITAL_REVENUES),
    ("collection_expenditures.txt", COLLECTION_EXPENDITURES),
    ("employee_expenditures.txt", EMPLOYEE_EXPENDITURES),
    ("staff_members_counts.txt", STAFF_MEMBERS_COUNTS),
    ("databases_counts.txt", DATABASES_COUNTS),
    ("library.txt", LIBRARIES),
];

pub fn write_fixtures(dir: &Path) {
    for (file, contents) in FIXTURES {
        fs::write(dir.join(file), contents).unwrap();
    }
}

pub fn fixture_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    dir
}

/// A database seeded from the fixture files.
pub fn seeded_database() -> Database {
    let dir = fixture_dir();
    let mut db = Database::new();
    let report = Loader::new(dir.path())
        .run(&mut db, &MemoryStorageEngine::new())
        .unwrap();
    assert!(report.is_complete(), "{}", report);
    db
}

pub fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}
