use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use shiftdesk::report::package::XlsxPackage;
use std::fs;

mod common;
use common::{init_db_with_roster, sd, setup_test_db, temp_dir, temp_out};

#[test]
fn test_init_and_list_employees() {
    let db_path = setup_test_db("cli_employees");
    init_db_with_roster(&db_path);

    sd().args(["--db", &db_path, "--test", "employee", "list"])
        .assert()
        .success()
        .stdout(contains("Doe, Jane"))
        .stdout(contains("Brown, Charlie"))
        .stdout(contains("charlie@example.com"));
}

#[test]
fn test_duplicate_email_is_rejected() {
    let db_path = setup_test_db("cli_duplicate_email");
    init_db_with_roster(&db_path);

    sd().args([
        "--db", &db_path, "--test", "employee", "add", "Janet", "Doe", "JANE@example.com",
    ])
    .assert()
    .failure()
    .stderr(contains("already exists"));
}

#[test]
fn test_shift_and_schedule_grid() {
    let db_path = setup_test_db("cli_shift_grid");
    init_db_with_roster(&db_path);

    sd().args([
        "--db", &db_path, "--test", "shift", "set", "Jane Doe", "2025-03-03", "--time", "9am-6pm",
        "--break", "13:00-14:00",
    ])
    .assert()
    .success();

    sd().args(["--db", &db_path, "--test", "shift", "set", "Brown, Charlie", "2025-03-03", "--off"])
        .assert()
        .success();

    sd().args(["--db", &db_path, "--test", "list", "--period", "2025-03-03:2025-03-04"])
        .assert()
        .success()
        .stdout(contains("09:00-18:00"))
        .stdout(contains("OFF"))
        .stdout(contains("Doe, Jane"));
}

#[test]
fn test_leave_flow() {
    let db_path = setup_test_db("cli_leave_flow");
    init_db_with_roster(&db_path);

    sd().args(["--db", &db_path, "--test", "leave", "type", "Vacation Leave", "vl", "--color", "33aa55"])
        .assert()
        .success()
        .stdout(contains("(VL)"));

    sd().args([
        "--db", &db_path, "--test", "leave", "submit", "jane@example.com", "Vacation Leave",
        "2025-03-10", "--end", "2025-03-11",
    ])
    .assert()
    .success()
    .stdout(contains("Leave #1"));

    sd().args(["--db", &db_path, "--test", "leave", "approve", "1"])
        .assert()
        .success();

    sd().args(["--db", &db_path, "--test", "leave", "list", "--status", "approved"])
        .assert()
        .success()
        .stdout(contains("Vacation Leave").and(contains("approved")));

    sd().args(["--db", &db_path, "--test", "leave", "approve", "1"])
        .assert()
        .failure()
        .stderr(contains("already approved"));
}

#[test]
fn test_import_and_export_holidays() {
    let db_path = setup_test_db("cli_holidays");
    init_db_with_roster(&db_path);

    let input = temp_out("cli_holidays_in", "csv");
    fs::write(
        &input,
        "Title,Date,Type\nNew Year,2025-01-01,Regular\nBad,xx,Regular\nFounders Day,2025-03-15,Special\n",
    )
    .unwrap();

    sd().args(["--db", &db_path, "--test", "import", "holidays", &input])
        .assert()
        .success()
        .stdout(contains("2 added"))
        .stdout(contains("1 skipped"));

    let out = temp_out("cli_holidays_export", "csv");
    sd().args(["--db", &db_path, "--test", "export", "holidays", "--file", &out, "--force"])
        .assert()
        .success();

    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(
        text,
        "Title,Date,Type\nNew Year,2025-01-01,Regular\nFounders Day,2025-03-15,Special\n"
    );
}

#[test]
fn test_import_missing_headers_fails() {
    let db_path = setup_test_db("cli_import_headers");
    init_db_with_roster(&db_path);

    let input = temp_out("cli_import_headers_in", "csv");
    fs::write(&input, "Name,Day\nX,2025-01-01\n").unwrap();

    sd().args(["--db", &db_path, "--test", "import", "holidays", &input])
        .assert()
        .failure()
        .stderr(contains("Missing required columns").and(contains("Title")));
}

#[test]
fn test_import_schedule_then_export_schedule() {
    let db_path = setup_test_db("cli_schedule_csv");
    init_db_with_roster(&db_path);

    let input = temp_out("cli_schedule_in", "csv");
    fs::write(
        &input,
        "Employees,2025-03-03,2025-03-04\n\"Doe, Jane\",09:00-18:00,OFF\nCharlie Brown,HOL-OFF,10:00-19:00\n",
    )
    .unwrap();

    sd().args(["--db", &db_path, "--test", "import", "schedule", &input])
        .assert()
        .success()
        .stdout(contains("4 added"));

    let out = temp_out("cli_schedule_export", "csv");
    sd().args([
        "--db", &db_path, "--test", "export", "schedule", "--file", &out, "--period",
        "2025-03-03:2025-03-04", "--force",
    ])
    .assert()
    .success();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.contains("Charlie Brown,HOL-OFF,10:00-19:00"));
    assert!(text.contains("Jane Doe,09:00-18:00,OFF"));
}

#[test]
fn test_builtin_report_is_written() {
    let db_path = setup_test_db("cli_report_builtin");
    init_db_with_roster(&db_path);
    let dir = temp_dir("cli_report_builtin");
    let dir_s = dir.to_string_lossy().to_string();

    sd().args(["--db", &db_path, "--test", "shift", "set", "Jane Doe", "2025-03-03", "--time", "09:00-18:00"])
        .assert()
        .success();

    sd().args([
        "--db", &db_path, "--test", "report", "work-schedule", "--period", "2025-03-03", "--out", &dir_s,
    ])
    .assert()
    .success()
    .stdout(contains("export completed"));

    let bytes = fs::read(dir.join("work-schedule_2025-03-03_2025-03-03.xlsx")).unwrap();
    let pkg = XlsxPackage::read(&bytes).unwrap();
    assert!(pkg.sheet.contains_text("JANE DOE"));
    assert!(pkg.sheet.contains_text("09:00"));

    sd().args([
        "--db", &db_path, "--test", "report", "attendance", "--period", "2025-03", "--format", "pdf",
        "--out", &dir_s,
    ])
    .assert()
    .success();
    let pdf = fs::read(dir.join("attendance_2025-03-01_2025-03-31.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_template_upload_and_report() {
    let db_path = setup_test_db("cli_report_template");
    init_db_with_roster(&db_path);
    let dir = temp_dir("cli_report_template");
    let dir_s = dir.to_string_lossy().to_string();

    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "{{company}}").unwrap();
    sheet.write_string(1, 0, "{{employee_name}}").unwrap();
    sheet.write_string(1, 1, "{{day_status}}").unwrap();
    let template_path = dir.join("schedule_template.xlsx");
    workbook.save(&template_path).unwrap();
    let template_s = template_path.to_string_lossy().to_string();

    sd().args(["--db", &db_path, "--test", "template", "upload", "monthly", "work-schedule", &template_s])
        .assert()
        .success();

    sd().args(["--db", &db_path, "--test", "template", "list"])
        .assert()
        .success()
        .stdout(contains("monthly").and(contains("schedule_template.xlsx")));

    // wrong kind for the stored template
    sd().args([
        "--db", &db_path, "--test", "report", "attendance", "--period", "2025-03-03", "--template",
        "monthly", "--out", &dir_s,
    ])
    .assert()
    .failure();

    sd().args(["--db", &db_path, "--test", "shift", "set", "Jane Doe", "2025-03-03", "--off"])
        .assert()
        .success();

    sd().args([
        "--db", &db_path, "--test", "report", "work-schedule", "--period", "2025-03-03", "--template",
        "monthly", "--out", &dir_s, "--force",
    ])
    .assert()
    .success();

    let bytes = fs::read(dir.join("work-schedule_2025-03-03_2025-03-03.xlsx")).unwrap();
    let pkg = XlsxPackage::read(&bytes).unwrap();
    assert_eq!(pkg.sheet.text_at(1, 0), Some("My Company"));
    assert_eq!(pkg.sheet.row_texts(2), vec!["CHARLIE BROWN", ""]);
    assert_eq!(pkg.sheet.row_texts(3), vec!["JANE DOE", "OFF"]);

    sd().args(["--db", &db_path, "--test", "template", "delete", "monthly"])
        .assert()
        .success();
    sd().args(["--db", &db_path, "--test", "template", "delete", "monthly"])
        .assert()
        .failure();
}

#[test]
fn test_template_without_anchor_is_refused() {
    let db_path = setup_test_db("cli_template_anchor");
    init_db_with_roster(&db_path);
    let dir = temp_dir("cli_template_anchor");

    let mut workbook = rust_xlsxwriter::Workbook::new();
    workbook.add_worksheet().write_string(0, 0, "nothing here").unwrap();
    let path = dir.join("bad.xlsx");
    workbook.save(&path).unwrap();

    sd().args([
        "--db", &db_path, "--test", "template", "upload", "bad", "attendance",
        &path.to_string_lossy(),
    ])
    .assert()
    .failure()
    .stderr(contains("{{employee_name}}"));
}

#[test]
fn test_log_records_operations() {
    let db_path = setup_test_db("cli_log");
    init_db_with_roster(&db_path);

    sd().args(["--db", &db_path, "--test", "holiday", "add", "New Year", "2025-01-01"])
        .assert()
        .success();

    sd().args(["--db", &db_path, "--test", "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("holiday"));
}

#[test]
fn test_invalid_period_fails() {
    let db_path = setup_test_db("cli_bad_period");
    init_db_with_roster(&db_path);

    sd().args(["--db", &db_path, "--test", "report", "attendance", "--period", "March"])
        .assert()
        .failure()
        .stderr(contains("Invalid date format"));
}
