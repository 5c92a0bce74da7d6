use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

mod common;
use common::{entry, init, seed, setup_test_db, stored, tp};
use timepunch::core::store::keys;
use timepunch::models::entry::Entry;
use timepunch::models::project::Project;

fn projects(db: &str) -> Vec<Project> {
    serde_json::from_str(&stored(db, keys::PROJECTS).unwrap_or_else(|| "[]".into())).unwrap()
}

#[test]
fn test_add_select_and_credit_project() {
    let name = "project_credit";
    let db = setup_test_db(name);
    init(name, &db);

    tp(name)
        .args(["--db", &db, "project", "--add", "  Alpha  "])
        .assert()
        .success()
        .stdout(contains("Project 'Alpha' created").and(contains("red")));
    tp(name)
        .args(["--db", &db, "project", "--add", "Beta"])
        .assert()
        .success()
        .stdout(contains("blue"));

    let ps = projects(&db);
    assert_eq!(ps.len(), 2);
    assert_eq!(ps[0].name, "Alpha");
    assert_eq!(ps[0].total_hours, 0.0);

    tp(name)
        .args(["--db", &db, "project", "--select", "alpha"])
        .assert()
        .success()
        .stdout(contains("Active project: Alpha"));
    assert_eq!(stored(&db, keys::CURRENT_PROJECT), Some(ps[0].id.clone()));

    tp(name).args(["--db", &db, "in"]).assert().success();
    tp(name)
        .args(["--db", &db, "out"])
        .assert()
        .success()
        .stdout(contains("Project: Alpha"));

    let entries: Vec<Entry> =
        serde_json::from_str(&stored(&db, keys::ENTRIES).unwrap()).unwrap();
    assert_eq!(entries[0].project.as_deref(), Some(ps[0].id.as_str()));

    tp(name)
        .args(["--db", &db, "project", "--list"])
        .assert()
        .success()
        .stdout(contains("Alpha").and(contains("Beta")).and(contains("*")));
}

#[test]
fn test_blank_and_unknown_projects() {
    let name = "project_invalid";
    let db = setup_test_db(name);
    init(name, &db);

    tp(name)
        .args(["--db", &db, "project", "--add", "   "])
        .assert()
        .success()
        .stdout(contains("cannot be empty"));
    assert!(projects(&db).is_empty());

    tp(name)
        .args(["--db", &db, "project", "--select", "Nope"])
        .assert()
        .failure()
        .stderr(contains("Unknown project: Nope"));
}

#[test]
fn test_clear_stops_attribution() {
    let name = "project_clear";
    let db = setup_test_db(name);
    init(name, &db);

    tp(name).args(["--db", &db, "project", "--add", "Alpha"]).assert().success();
    tp(name).args(["--db", &db, "project", "--select", "Alpha"]).assert().success();
    tp(name)
        .args(["--db", &db, "project", "--clear"])
        .assert()
        .success()
        .stdout(contains("cleared"));
    assert!(stored(&db, keys::CURRENT_PROJECT).is_none());

    tp(name).args(["--db", &db, "in"]).assert().success();
    tp(name).args(["--db", &db, "out"]).assert().success();
    let entries: Vec<Entry> =
        serde_json::from_str(&stored(&db, keys::ENTRIES).unwrap()).unwrap();
    assert!(entries[0].project.is_none());
}

#[test]
fn test_rebuild_repairs_totals_and_stats_use_entries() {
    let name = "project_rebuild";
    let db = setup_test_db(name);
    init(name, &db);

    let mut alpha = Project::new("100".into(), "Alpha", 0);
    alpha.total_hours = 42.0;
    seed(
        &db,
        &[
            entry("2", "Monday, March 10, 2025", 1.5, Some("100")),
            entry("1", "Sunday, March 9, 2025", 2.0, Some("100")),
        ],
        &[alpha],
    );

    tp(name)
        .args(["--db", &db, "stats"])
        .assert()
        .success()
        .stdout(contains("Total          : 3.5h over 2 sessions").and(contains("Alpha")));

    tp(name)
        .args(["--db", &db, "db", "--rebuild"])
        .assert()
        .success()
        .stdout(contains("Repaired 1 project total(s)"));
    assert_eq!(projects(&db)[0].total_hours, 3.5);

    tp(name)
        .args(["--db", &db, "db", "--rebuild", "--info"])
        .assert()
        .success()
        .stdout(contains("already consistent").and(contains("Entries:")));
}
