#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

use timepunch::core::store::keys;
use timepunch::db::kv::{KeyValueStore, SqliteKv};
use timepunch::models::entry::Entry;
use timepunch::models::project::Project;

/// The binary with HOME pointed at an empty per-test directory, so a real
/// user configuration never leaks into a test.
pub fn tp(name: &str) -> Command {
    let home = env::temp_dir().join(format!("{name}_timepunch_home"));
    fs::create_dir_all(&home).ok();
    let mut cmd = cargo_bin_cmd!("timepunch");
    cmd.env("HOME", &home)
        .env("APPDATA", &home)
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_timepunch.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// `--db <db> --test init`
pub fn init(name: &str, db_path: &str) {
    tp(name)
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

pub fn entry(id: &str, date: &str, hours: f64, project: Option<&str>) -> Entry {
    let whole = hours.trunc() as i64;
    let minutes = ((hours - hours.trunc()) * 60.0).round() as i64;
    Entry {
        id: id.to_string(),
        date: date.to_string(),
        clock_in: "09:00:00 AM".to_string(),
        clock_out: "05:00:00 PM".to_string(),
        duration: format!("{whole}h {minutes}m"),
        hours_worked: hours,
        project: project.map(String::from),
    }
}

/// Write entries and projects straight into the store keys.
pub fn seed(db_path: &str, entries: &[Entry], projects: &[Project]) {
    let mut kv = SqliteKv::open(db_path).expect("open db");
    kv.set(keys::ENTRIES, &serde_json::to_string(entries).expect("entries json"))
        .expect("seed entries");
    kv.set(keys::PROJECTS, &serde_json::to_string(projects).expect("projects json"))
        .expect("seed projects");
}

pub fn stored(db_path: &str, key: &str) -> Option<String> {
    let kv = SqliteKv::open(db_path).expect("open db");
    kv.get(key).expect("read key")
}
