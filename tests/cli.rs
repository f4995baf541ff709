#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn write_roster(dir: &std::path::Path) -> std::path::PathBuf {
    let mut csv = String::from("id,name,capabilities\n");
    for i in 1..=20 {
        csv.push_str(&format!("{i},Worker {i},charge;specialist;generic\n"));
    }
    let path = dir.join("workers.csv");
    fs::write(&path, csv).unwrap();
    path
}

#[test]
fn plan_then_check() {
    let dir = tempdir().unwrap();
    let workers = write_roster(dir.path());
    let leave = dir.path().join("leave.csv");
    fs::write(&leave, "worker_id,start,end\n1,2024-09-24,2024-09-26\n").unwrap();
    let plan = dir.path().join("plan.json");
    let report = dir.path().join("report.json");

    Command::cargo_bin("garde-cli")
        .unwrap()
        .args(["plan", "--workers"])
        .arg(&workers)
        .arg("--leave")
        .arg(&leave)
        .args(["--start", "2024-09-22", "--weeks", "2", "--out-json"])
        .arg(&plan)
        .arg("--report")
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("fairness score"))
        .stdout(predicate::str::contains("W2 D7 | 2024-10-05"));

    assert!(plan.exists());
    assert!(report.exists());

    Command::cargo_bin("garde-cli")
        .unwrap()
        .args(["check", "--workers"])
        .arg(&workers)
        .arg("--leave")
        .arg(&leave)
        .args(["--start", "2024-09-22", "--weeks", "2", "--plan"])
        .arg(&plan)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no violations"));
}

#[test]
fn leave_without_start_date_fails() {
    let dir = tempdir().unwrap();
    let workers = write_roster(dir.path());
    let leave = dir.path().join("leave.csv");
    fs::write(&leave, "worker_id,start,end\n1,2024-09-24,2024-09-26\n").unwrap();

    Command::cargo_bin("garde-cli")
        .unwrap()
        .args(["plan", "--workers"])
        .arg(&workers)
        .arg("--leave")
        .arg(&leave)
        .assert()
        .failure()
        .stderr(predicate::str::contains("start date must be set"));
}

#[test]
fn understaffed_plan_exits_with_warning_code() {
    let dir = tempdir().unwrap();
    let workers = dir.path().join("workers.csv");
    fs::write(&workers, "id,name,capabilities\n1,Alice,generic\n2,Bob,generic\n").unwrap();

    Command::cargo_bin("garde-cli")
        .unwrap()
        .args(["plan", "--workers"])
        .arg(&workers)
        .args(["--weeks", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no candidate for charge"));
}
