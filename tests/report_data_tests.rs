use shiftdesk::core::schedule::{ScheduleLogic, ShiftSpec};
use shiftdesk::models::leave::LeaveStatus;
use shiftdesk::models::report_kind::ReportKind;
use shiftdesk::report::data::{ReportRow, generate};
use shiftdesk::report::tokens::{ReportContext, global_tokens, grid_data, row_tokens};
use shiftdesk::utils::date::days_between;

mod common;
use common::{approved_leave, d, holiday, sample_data, t, test_config};

fn row_for<'a>(rows: &'a [ReportRow], employee_id: i64, date: &str) -> &'a ReportRow {
    rows.iter()
        .find(|r| r.employee_id == employee_id && r.date == d(date))
        .expect("row present")
}

fn regular(start: &str, end: &str) -> ShiftSpec {
    ShiftSpec::Regular {
        start: t(start),
        end: t(end),
        break_start: Some(t("12:00")),
        break_end: Some(t("13:00")),
        remote: false,
    }
}

#[test]
fn one_row_per_employee_and_day_ordered_by_name() {
    let data = sample_data();
    let rows = generate(&data, &test_config(), None, d("2025-03-03"), d("2025-03-05"));

    assert_eq!(rows.len(), 6);
    // Brown sorts before Doe
    assert_eq!(rows[0].employee_name, "CHARLIE BROWN");
    assert_eq!(rows[0].date, d("2025-03-03"));
    assert_eq!(rows[2].date, d("2025-03-05"));
    assert_eq!(rows[3].employee_name, "JANE DOE");
}

#[test]
fn inverted_interval_gives_no_rows() {
    let data = sample_data();
    let rows = generate(&data, &test_config(), None, d("2025-03-05"), d("2025-03-01"));
    assert!(rows.is_empty());
}

#[test]
fn day_off_wins_over_leave_and_holiday() {
    let mut data = sample_data();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), ShiftSpec::DayOff).unwrap();
    data.leaves
        .push(approved_leave(1, 1, "Vacation Leave", "2025-03-03", "2025-03-03", None));
    data.holidays.push(holiday(1, "Founders Day", "2025-03-03"));

    let rows = generate(&data, &test_config(), None, d("2025-03-03"), d("2025-03-03"));
    let row = row_for(&rows, 1, "2025-03-03");

    assert_eq!(row.day_status, "OFF");
    assert_eq!(row.schedule_start, "");
    assert_eq!(row.schedule_end, "");
    assert_eq!(row.holiday, "Founders Day");
    assert_eq!(row.leave_type, "Vacation Leave");
}

#[test]
fn holiday_off_then_leave_then_holiday_use_default_template() {
    let mut data = sample_data();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), ShiftSpec::HolidayOff).unwrap();
    data.leaves
        .push(approved_leave(1, 1, "Vacation Leave", "2025-03-03", "2025-03-04", None));
    data.holidays.push(holiday(1, "Founders Day", "2025-03-05"));

    let rows = generate(&data, &test_config(), None, d("2025-03-03"), d("2025-03-05"));

    let hol_off = row_for(&rows, 1, "2025-03-03");
    assert_eq!(hol_off.day_status, "HOL-OFF");
    // staff position uses the Mid Shift template
    assert_eq!(hol_off.schedule_start, "10:00");
    assert_eq!(hol_off.schedule_end, "19:00");

    let leave = row_for(&rows, 1, "2025-03-04");
    assert_eq!(leave.day_status, "VL");
    assert_eq!(leave.break_start, "14:00");

    let hol = row_for(&rows, 1, "2025-03-05");
    assert_eq!(hol.day_status, "HOLIDAY");

    // the manager gets the Manager Shift template on the holiday
    let manager = row_for(&rows, 2, "2025-03-05");
    assert_eq!(manager.day_status, "HOLIDAY");
    assert_eq!(manager.schedule_start, "08:00");
}

#[test]
fn regular_shift_is_on_with_night_differential() {
    let mut data = sample_data();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), regular("22:00", "07:00")).unwrap();

    let rows = generate(&data, &test_config(), None, d("2025-03-03"), d("2025-03-04"));
    let on = row_for(&rows, 1, "2025-03-03");
    assert_eq!(on.day_status, "ON");
    assert_eq!(on.schedule_start, "22:00");
    assert_eq!(on.schedule_end, "07:00");
    assert_eq!(on.night_diff_minutes, 480);
    assert_eq!(on.schedule_code(), "22:00-07:00");

    let nothing = row_for(&rows, 1, "2025-03-04");
    assert_eq!(nothing.day_status, "");
    assert_eq!(nothing.schedule_code(), "");
}

#[test]
fn work_extension_adds_overtime_but_keeps_the_day_on() {
    let mut data = sample_data();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), regular("09:00", "18:00")).unwrap();
    data.leaves
        .push(approved_leave(1, 1, "Overtime", "2025-03-03", "2025-03-03", Some(2.5)));

    let rows = generate(&data, &test_config(), None, d("2025-03-03"), d("2025-03-03"));
    let row = row_for(&rows, 1, "2025-03-03");
    assert_eq!(row.day_status, "ON");
    assert_eq!(row.overtime_hours, 2.5);
    assert_eq!(row.leave_type, "");

    let tokens = row_tokens(&test_config(), ReportKind::Overtime, row);
    assert_eq!(tokens["overtime_hours"], "2.50");
    assert_eq!(tokens["night_diff_hours"], "");
}

#[test]
fn pending_and_rejected_leaves_are_ignored() {
    let mut data = sample_data();
    let mut pending = approved_leave(1, 1, "Vacation Leave", "2025-03-03", "2025-03-03", None);
    pending.status = LeaveStatus::Pending;
    let mut rejected = approved_leave(2, 1, "Vacation Leave", "2025-03-04", "2025-03-04", None);
    rejected.status = LeaveStatus::Rejected;
    data.leaves.push(pending);
    data.leaves.push(rejected);

    let rows = generate(&data, &test_config(), None, d("2025-03-03"), d("2025-03-04"));
    assert!(rows.iter().all(|r| r.day_status.is_empty() && r.leave_type.is_empty()));
}

#[test]
fn hidden_inactive_and_other_groups_are_excluded() {
    let mut data = sample_data();
    data.employees[1].visibility.show_in_reports = false;
    let mut other = data.employees[0].clone();
    other.id = 3;
    other.email = "ops@example.com".into();
    other.group = "Ops".into();
    data.employees.push(other);
    let mut gone = data.employees[0].clone();
    gone.id = 4;
    gone.email = "gone@example.com".into();
    gone.active = false;
    data.employees.push(gone);

    let rows = generate(&data, &test_config(), Some("support"), d("2025-03-03"), d("2025-03-03"));
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].employee_id, 1);
}

#[test]
fn names_keep_their_case_when_uppercasing_is_off() {
    let data = sample_data();
    let mut cfg = test_config();
    cfg.uppercase_names = false;

    let rows = generate(&data, &cfg, Some("Support"), d("2025-03-03"), d("2025-03-03"));
    assert_eq!(rows[1].employee_name, "Jane Doe");
}

#[test]
fn tardiness_shows_up_in_attendance_tokens() {
    let mut data = sample_data();
    shiftdesk::core::tardy::TardyLogic::record(&mut data, 1, d("2025-03-03"), 15, "traffic").unwrap();

    let cfg = test_config();
    let rows = generate(&data, &cfg, None, d("2025-03-03"), d("2025-03-03"));
    let tokens = row_tokens(&cfg, ReportKind::Attendance, row_for(&rows, 1, "2025-03-03"));
    assert_eq!(tokens["tardy_minutes"], "15");
    assert_eq!(tokens["day"], "Mon");
    assert_eq!(tokens["date"], "2025-03-03");
}

#[test]
fn global_tokens_describe_the_period() {
    let cfg = test_config();
    let ctx = ReportContext {
        kind: ReportKind::WorkSchedule,
        start: d("2025-03-01"),
        end: d("2025-03-31"),
        group: None,
        generated_on: d("2025-04-02"),
    };

    let g = global_tokens(&cfg, &ctx);
    assert_eq!(g["start_date"], "2025-03-01");
    assert_eq!(g["end_date"], "2025-03-31");
    assert_eq!(g["month"], "March");
    assert_eq!(g["year"], "2025");
    assert_eq!(g["group"], "All");
    assert_eq!(g["company"], cfg.company_name);
    assert_eq!(g["generated_on"], "2025-04-02");
}

#[test]
fn wfh_grid_marks_remote_days() {
    let mut data = sample_data();
    let remote = ShiftSpec::Regular {
        start: t("09:00"),
        end: t("18:00"),
        break_start: None,
        break_end: None,
        remote: true,
    };
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), remote).unwrap();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-04"), regular("09:00", "18:00")).unwrap();
    ScheduleLogic::set_shift(&mut data, 2, d("2025-03-03"), ShiftSpec::DayOff).unwrap();

    let cfg = test_config();
    let days = days_between(d("2025-03-03"), d("2025-03-04"));
    let rows = generate(&data, &cfg, None, d("2025-03-03"), d("2025-03-04"));
    let grid = grid_data(&cfg, &rows, &days);

    assert_eq!(grid.employees, vec!["CHARLIE BROWN", "JANE DOE"]);
    assert_eq!(grid.dates, vec!["2025-03-03", "2025-03-04"]);
    assert_eq!(grid.cells[0], vec!["OFF", ""]);
    assert_eq!(grid.cells[1], vec!["WFH", "09:00-18:00"]);
}
