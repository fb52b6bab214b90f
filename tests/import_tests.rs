use shiftdesk::core::import::ImportLogic;
use shiftdesk::errors::AppError;
use shiftdesk::import::ImportKind;
use shiftdesk::import::allowances::parse_allowances;
use shiftdesk::import::holidays::parse_holidays;
use shiftdesk::import::leave_types::parse_leave_types;
use shiftdesk::import::members::parse_members;
use shiftdesk::import::names::find_employee_by_name;
use shiftdesk::import::schedule::{ScheduleCode, parse_code, parse_schedule};
use shiftdesk::models::holiday::HolidayKind;
use shiftdesk::models::leave::LeaveStatus;
use shiftdesk::models::shift::ShiftKind;
use std::io::Cursor;

mod common;
use common::{approved_leave, d, sample_data, t};

#[test]
fn holidays_skip_bad_rows_and_keep_good_ones() {
    let csv = "Title,Date,Type\n\
               New Year,2025-01-01,Regular\n\
               Broken,not-a-date,Regular\n\
               Founders Day,03/15/2025,special\n";

    let parsed = parse_holidays(csv.as_bytes()).unwrap();
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.skipped.len(), 1);
    assert_eq!(parsed.records[1].date, d("2025-03-15"));
    assert_eq!(parsed.records[1].kind, HolidayKind::Special);
}

#[test]
fn missing_headers_are_reported_by_name() {
    let err = parse_holidays("Name,When\nX,2025-01-01\n".as_bytes()).unwrap_err();
    match err {
        AppError::MissingHeaders(cols) => {
            assert!(cols.contains(&"Title".to_string()));
            assert!(cols.contains(&"Date".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn headers_match_ignoring_case_and_bom() {
    let csv = "\u{feff}title , DATE\nLabor Day,2025-05-01\n";
    let parsed = parse_holidays(csv.as_bytes()).unwrap();
    assert_eq!(parsed.records[0].title, "Labor Day");
    assert_eq!(parsed.records[0].kind, HolidayKind::Regular);
}

#[test]
fn no_valid_rows_is_an_error() {
    let err = parse_holidays("Title,Date\n,2025-01-01\nX,bad\n".as_bytes()).unwrap_err();
    assert!(matches!(err, AppError::NoValidRows(_)));
}

#[test]
fn leave_types_normalize_color_and_abbreviation() {
    let csv = "Type,Abbreviation,Color,Work Extension\n\
               Sick Leave,sl,00ff00,no\n\
               Rendered OT,ot,#ABCDEF,yes\n\
               Broken,XX,green,no\n";
    let parsed = parse_leave_types(csv.as_bytes()).unwrap();

    assert_eq!(parsed.records.len(), 2);
    assert_eq!(parsed.records[0].abbreviation, "SL");
    assert_eq!(parsed.records[0].color, "#00FF00");
    assert!(parsed.records[1].is_work_extension);
    assert_eq!(parsed.skipped.len(), 1);
}

#[test]
fn members_skip_existing_and_repeated_emails() {
    let data = sample_data();
    let csv = "First Name,Last Name,Email,Position,Group\n\
               Lucy,Van Pelt,lucy@example.com,Agent,Support\n\
               Jane,Doe,JANE@example.com,Agent,Support\n\
               Lucy,Again,lucy@example.com,Agent,Support\n";

    let parsed = parse_members(csv.as_bytes(), &data).unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.records[0].email, "lucy@example.com");
    assert_eq!(parsed.skipped.len(), 2);
}

#[test]
fn names_match_in_both_orders() {
    let data = sample_data();
    let by_full = find_employee_by_name(&data.employees, "Charlie Brown").unwrap();
    let by_last = find_employee_by_name(&data.employees, "Brown, Charlie").unwrap();
    assert_eq!(by_full.id, by_last.id);

    assert_eq!(find_employee_by_name(&data.employees, "  jane   DOE ").unwrap().id, 1);
    assert_eq!(find_employee_by_name(&data.employees, "Doe, J").unwrap().id, 1);
    assert!(find_employee_by_name(&data.employees, "Snoopy").is_none());
    assert!(find_employee_by_name(&data.employees, "").is_none());
}

#[test]
fn schedule_codes() {
    let data = sample_data();
    assert_eq!(parse_code(&data, "off"), Some(ScheduleCode::Off));
    assert_eq!(parse_code(&data, "HOL-OFF"), Some(ScheduleCode::HolidayOff));
    assert_eq!(
        parse_code(&data, "vl"),
        Some(ScheduleCode::Leave("Vacation Leave".to_string()))
    );
    assert_eq!(
        parse_code(&data, "9am-6pm"),
        Some(ScheduleCode::Shift(t("09:00"), t("18:00")))
    );
    assert_eq!(parse_code(&data, "whenever"), None);
}

#[test]
fn schedule_matrix_is_merged_into_shifts_and_leaves() {
    let mut data = sample_data();
    let csv = "Employees,2025-03-03,2025-03-04,Notes\n\
               \"Doe, Jane\",09:00-18:00,VL,ignored\n\
               Charlie Brown,OFF,,\n\
               Nobody Here,OFF,OFF,\n";

    let parsed = parse_schedule(csv.as_bytes(), &data).unwrap();
    assert_eq!(parsed.records.len(), 3);
    assert_eq!(parsed.skipped.len(), 1);

    let summary = ImportLogic::run(&mut data, ImportKind::Schedule, Cursor::new(csv)).unwrap();
    assert_eq!(summary.stats.added, 3);
    assert_eq!(summary.skipped, 1);

    let jane: Vec<_> = data.shifts_on(1, d("2025-03-03")).collect();
    assert_eq!(jane.len(), 1);
    assert_eq!(jane[0].start, Some(t("09:00")));

    let off: Vec<_> = data.shifts_on(2, d("2025-03-03")).collect();
    assert_eq!(off[0].kind, ShiftKind::DayOff);

    let leave = data.leaves.iter().find(|l| l.employee_id == 1).unwrap();
    assert_eq!(leave.leave_type, "Vacation Leave");
    assert_eq!(leave.status, LeaveStatus::Approved);
    assert_eq!(leave.start_date, d("2025-03-04"));

    // importing the same file again replaces instead of duplicating
    let again = ImportLogic::run(&mut data, ImportKind::Schedule, Cursor::new(csv)).unwrap();
    assert_eq!(again.stats.added, 0);
    assert_eq!(again.stats.updated, 3);
    assert_eq!(data.shifts.len(), 2);
    assert_eq!(data.leaves.len(), 1);
}

#[test]
fn reimported_schedule_replaces_an_imported_leave_code() {
    let mut data = sample_data();
    data.leaves.push(approved_leave(1, 2, "Vacation Leave", "2025-03-04", "2025-03-04", None));

    let first = "Employees,2025-03-04\nJane Doe,VL\nCharlie Brown,09:00-18:00\n";
    ImportLogic::run(&mut data, ImportKind::Schedule, first.as_bytes()).unwrap();
    assert_eq!(data.leaves.len(), 2);

    let second = "Employees,2025-03-04\nJane Doe,10:00-19:00\nCharlie Brown,OFF\n";
    let summary = ImportLogic::run(&mut data, ImportKind::Schedule, second.as_bytes()).unwrap();
    assert_eq!(summary.stats.updated, 2);

    // Jane's imported VL is gone; Charlie's own request is untouched
    assert!(!data.leaves.iter().any(|l| l.employee_id == 1));
    assert_eq!(data.leaves.len(), 1);
    assert_eq!(data.leaves[0].employee_id, 2);

    let jane: Vec<_> = data.shifts_on(1, d("2025-03-04")).collect();
    assert_eq!(jane.len(), 1);
    assert_eq!(jane[0].start, Some(t("10:00")));
}

#[test]
fn schedule_without_date_columns_is_rejected() {
    let data = sample_data();
    let err = parse_schedule("Employees,Monday\nJane Doe,OFF\n".as_bytes(), &data).unwrap_err();
    assert!(matches!(err, AppError::MissingHeaders(_)));
}

#[test]
fn allowances_update_the_same_month() {
    let mut data = sample_data();
    let csv = "Employee,Month,Amount,Remarks\nJane Doe,2025-03,500,phone\n\"Brown, Charlie\",2025-03,abc,\n";
    let parsed = parse_allowances(csv.as_bytes(), &data).unwrap();
    assert_eq!(parsed.records.len(), 1);

    ImportLogic::run(&mut data, ImportKind::Allowances, csv.as_bytes()).unwrap();
    let again = "Employee,Month,Amount\nJane Doe,2025-03,750\n";
    let summary = ImportLogic::run(&mut data, ImportKind::Allowances, again.as_bytes()).unwrap();

    assert_eq!(summary.stats.updated, 1);
    assert_eq!(data.allowances.len(), 1);
    assert_eq!(data.allowances[0].amount, 750.0);
}

#[test]
fn tardy_records_resolve_employees_by_name() {
    let mut data = sample_data();
    let csv = "Employee,Date,Minutes Late,Remarks\nCharlie Brown,2025-03-03,12,bus\n";
    ImportLogic::run(&mut data, ImportKind::Tardy, csv.as_bytes()).unwrap();

    let rec = data.tardy_on(2, d("2025-03-03")).unwrap();
    assert_eq!(rec.minutes_late, 12);
    assert_eq!(rec.remarks, "bus");
}
