use shiftdesk::core::schedule::{ScheduleLogic, ShiftSpec};
use shiftdesk::export::csv::{schedule_cell, write_holidays, write_leave_types, write_schedule_matrix};
use shiftdesk::export::range::parse_period;
use shiftdesk::import::holidays::parse_holidays;
use shiftdesk::import::leave_types::parse_leave_types;
use shiftdesk::models::holiday::HolidayKind;
use shiftdesk::utils::date::days_between;

mod common;
use common::{approved_leave, d, holiday, sample_data, t};

#[test]
fn holidays_survive_export_then_import() {
    let mut data = sample_data();
    data.holidays.push(holiday(1, "Independence Day", "2025-06-12"));
    data.holidays.push(holiday(2, "New Year", "2025-01-01"));
    data.holidays[0].kind = HolidayKind::Special;

    let mut buf = Vec::new();
    write_holidays(&mut buf, &data).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.starts_with("Title,Date,Type\nNew Year,2025-01-01,Regular\n"));

    let back = parse_holidays(buf.as_slice()).unwrap();
    assert!(back.skipped.is_empty());
    assert_eq!(back.records.len(), 2);
    assert_eq!(back.records[1].title, "Independence Day");
    assert_eq!(back.records[1].kind, HolidayKind::Special);
}

#[test]
fn leave_types_survive_export_then_import() {
    let data = sample_data();

    let mut buf = Vec::new();
    write_leave_types(&mut buf, &data).unwrap();
    let back = parse_leave_types(buf.as_slice()).unwrap();

    let names: Vec<_> = back.records.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Vacation Leave", "Overtime"]);
    assert_eq!(back.records[0].color, "#33AA55");
    assert!(!back.records[0].is_work_extension);
    assert!(back.records[1].is_work_extension);
}

#[test]
fn schedule_cells_follow_the_import_codes() {
    let mut data = sample_data();
    let shift = ShiftSpec::Regular {
        start: t("09:00"),
        end: t("18:00"),
        break_start: None,
        break_end: None,
        remote: false,
    };
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-03"), shift).unwrap();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-04"), ShiftSpec::DayOff).unwrap();
    ScheduleLogic::set_shift(&mut data, 1, d("2025-03-05"), ShiftSpec::HolidayOff).unwrap();
    data.leaves
        .push(approved_leave(1, 1, "Vacation Leave", "2025-03-06", "2025-03-06", None));

    assert_eq!(schedule_cell(&data, 1, d("2025-03-03")), "09:00-18:00");
    assert_eq!(schedule_cell(&data, 1, d("2025-03-04")), "OFF");
    assert_eq!(schedule_cell(&data, 1, d("2025-03-05")), "HOL-OFF");
    assert_eq!(schedule_cell(&data, 1, d("2025-03-06")), "VL");
    assert_eq!(schedule_cell(&data, 1, d("2025-03-07")), "");

    data.employees[1].visibility.show_in_schedule = false;
    let mut buf = Vec::new();
    let days = days_between(d("2025-03-03"), d("2025-03-04"));
    write_schedule_matrix(&mut buf, &data, None, &days).unwrap();
    let text = String::from_utf8(buf).unwrap();

    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Employees,2025-03-03,2025-03-04"));
    assert_eq!(lines.next(), Some("Jane Doe,09:00-18:00,OFF"));
    assert_eq!(lines.next(), None);
}

#[test]
fn periods() {
    assert_eq!(parse_period("2025-02").unwrap(), (d("2025-02-01"), d("2025-02-28")));
    assert_eq!(parse_period("2024-02").unwrap().1, d("2024-02-29"));
    assert_eq!(parse_period("2025-03-15").unwrap(), (d("2025-03-15"), d("2025-03-15")));
    assert_eq!(
        parse_period("2025-01:2025-03").unwrap(),
        (d("2025-01-01"), d("2025-03-31"))
    );
    assert_eq!(
        parse_period("03/01/2025:2025-03-10").unwrap(),
        (d("2025-03-01"), d("2025-03-10"))
    );
    assert!(parse_period("March").is_err());
    assert!(parse_period("2025-13").is_err());
}
