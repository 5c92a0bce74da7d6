use predicates::str::contains;
use std::fs;

mod common;
use common::{entry, init, seed, setup_test_db, temp_out, tp};
use timepunch::models::project::Project;

fn seeded(name: &str) -> String {
    let db = setup_test_db(name);
    init(name, &db);
    seed(
        &db,
        &[
            entry("3", "Monday, March 10, 2025", 0.5, Some("100")),
            entry("2", "Sunday, March 9, 2025", 1.25, Some("gone")),
            entry("1", "Saturday, March 8, 2025", 8.0, None),
        ],
        &[Project::new("100".into(), "Alpha", 0)],
    );
    db
}

#[test]
fn test_export_csv_has_n_plus_one_lines_of_six_fields() {
    let name = "export_csv";
    let db = seeded(name);
    let out = temp_out(name, "csv");

    tp(name)
        .args(["--db", &db, "export", "--format", "csv", "--file", &out])
        .assert()
        .success()
        .stdout(contains("CSV export completed"));

    let body = fs::read_to_string(&out).unwrap();
    assert_eq!(body.lines().count(), 4);

    let mut rdr = csv::Reader::from_path(&out).unwrap();
    assert_eq!(
        rdr.headers().unwrap().iter().collect::<Vec<_>>(),
        vec!["Date", "Clock In", "Clock Out", "Duration", "Hours Worked", "Project"]
    );
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 6));

    assert_eq!(&rows[0][0], "Monday, March 10, 2025");
    assert_eq!(&rows[0][4], "0.50");
    assert_eq!(&rows[0][5], "Alpha");
    assert_eq!(&rows[1][5], "gone");
    assert_eq!(&rows[2][5], "No Project");
}

#[test]
fn test_export_txt() {
    let name = "export_txt";
    let db = seeded(name);
    let out = temp_out(name, "txt");

    tp(name)
        .args(["--db", &db, "export", "--format", "txt", "--file", &out])
        .assert()
        .success();

    let body = fs::read_to_string(&out).unwrap();
    assert!(body.starts_with("TimePunch Work Log\n==================\n\nDate: Monday, March 10, 2025\n"));
    assert!(body.contains("Hours: 1.25\nProject: gone\n"));
    assert_eq!(body.matches("Date: ").count(), 3);
}

#[test]
fn test_export_refuses_overwrite_without_confirmation() {
    let name = "export_overwrite";
    let db = seeded(name);
    let out = temp_out(name, "csv");
    fs::write(&out, "keep me").unwrap();

    tp(name)
        .args(["--db", &db, "export", "--file", &out])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stderr(contains("export cancelled"));
    assert_eq!(fs::read_to_string(&out).unwrap(), "keep me");

    tp(name)
        .args(["--db", &db, "export", "--file", &out, "--force"])
        .assert()
        .success();
    assert!(fs::read_to_string(&out).unwrap().starts_with("Date,"));
}

#[test]
fn test_export_with_no_entries_writes_header_only() {
    let name = "export_empty";
    let db = setup_test_db(name);
    init(name, &db);
    let out = temp_out(name, "csv");

    tp(name)
        .args(["--db", &db, "export", "--file", &out])
        .assert()
        .success();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "Date,Clock In,Clock Out,Duration,Hours Worked,Project\n"
    );
}

#[test]
fn test_export_default_name_in_export_dir() {
    let name = "export_default_name";
    let db = seeded(name);
    let dir = std::env::temp_dir().join(format!("{name}_exports"));
    fs::remove_dir_all(&dir).ok();

    // export_dir comes from the config file under the test HOME
    let home = std::env::temp_dir().join(format!("{name}_timepunch_home"));
    fs::create_dir_all(home.join(".timepunch")).unwrap();
    fs::write(
        home.join(".timepunch").join("timepunch.conf"),
        format!("export_dir: {}\n", dir.display()),
    )
    .unwrap();

    tp(name)
        .args(["--db", &db, "export", "--format", "txt"])
        .assert()
        .success();

    let files: Vec<String> = fs::read_dir(&dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(files.len(), 1);
    assert!(files[0].starts_with("timepunch-log-"));
    assert!(files[0].ends_with(".txt"));
}
