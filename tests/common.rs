#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveTime};
use shiftdesk::config::Config;
use shiftdesk::models::domain::DomainData;
use shiftdesk::models::employee::Employee;
use shiftdesk::models::holiday::{Holiday, HolidayKind};
use shiftdesk::models::leave::{Leave, LeaveStatus, LeaveType};
use shiftdesk::models::shift::ShiftTemplate;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn sd() -> Command {
    cargo_bin_cmd!("shiftdesk")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftdesk.sqlite", name));
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

/// Fresh empty directory inside tempdir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_shiftdesk_dir", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

/// Initialize DB and add a small roster through the CLI
pub fn init_db_with_roster(db_path: &str) {
    sd().args(["--db", db_path, "--test", "init"])
        .assert()
        .success();

    sd().args([
        "--db", db_path, "--test", "employee", "add", "Jane", "Doe", "jane@example.com", "--position",
        "Agent", "--group", "Support",
    ])
    .assert()
    .success();

    sd().args([
        "--db", db_path, "--test", "employee", "add", "Charlie", "Brown", "charlie@example.com",
        "--position", "Manager", "--group", "Support",
    ])
    .assert()
    .success();
}

pub fn d(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("test date")
}

pub fn t(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").expect("test time")
}

pub fn test_config() -> Config {
    Config::with_database(":memory:".to_string())
}

/// Two employees, the default shift templates, VL and OT leave types.
pub fn sample_data() -> DomainData {
    let mut data = DomainData::default();

    data.employees.push(Employee::new(1, "Jane", "Doe", "jane@example.com", "Agent", "Support"));
    data.employees.push(Employee::new(2, "Charlie", "Brown", "charlie@example.com", "Manager", "Support"));

    data.shift_templates.push(ShiftTemplate {
        id: 1,
        name: "Manager Shift".into(),
        start: t("08:00"),
        end: t("17:00"),
        break_start: Some(t("12:00")),
        break_end: Some(t("13:00")),
    });
    data.shift_templates.push(ShiftTemplate {
        id: 2,
        name: "Mid Shift".into(),
        start: t("10:00"),
        end: t("19:00"),
        break_start: Some(t("14:00")),
        break_end: Some(t("15:00")),
    });

    data.leave_types.push(LeaveType {
        id: 1,
        name: "Vacation Leave".into(),
        abbreviation: "VL".into(),
        color: "#33AA55".into(),
        is_work_extension: false,
    });
    data.leave_types.push(LeaveType {
        id: 2,
        name: "Overtime".into(),
        abbreviation: "OT".into(),
        color: "#FF8800".into(),
        is_work_extension: true,
    });

    data
}

pub fn approved_leave(id: i64, employee_id: i64, leave_type: &str, start: &str, end: &str, hours: Option<f64>) -> Leave {
    Leave {
        id,
        employee_id,
        leave_type: leave_type.into(),
        start_date: d(start),
        end_date: d(end),
        status: LeaveStatus::Approved,
        reason: String::new(),
        hours,
    }
}

pub fn holiday(id: i64, title: &str, date: &str) -> Holiday {
    Holiday {
        id,
        title: title.into(),
        date: d(date),
        kind: HolidayKind::Regular,
    }
}
