use shiftdesk::core::holiday::HolidayLogic;
use shiftdesk::core::leave::{LeaveLogic, LeaveRequest};
use shiftdesk::core::roster::{NewEmployee, RosterLogic, resolve_employee};
use shiftdesk::core::schedule::ScheduleLogic;
use shiftdesk::core::task::TaskLogic;
use shiftdesk::db::log::{audit, load_log};
use shiftdesk::db::pool::DbPool;
use shiftdesk::db::store::{fetch_all, save_all};
use shiftdesk::errors::AppError;
use shiftdesk::models::holiday::HolidayKind;
use shiftdesk::models::leave::LeaveStatus;

mod common;
use common::d;

fn jane() -> NewEmployee<'static> {
    NewEmployee {
        first_name: "Jane",
        middle_name: Some("Q"),
        last_name: "Doe",
        email: "Jane@Example.com",
        position: "Agent",
        group: "Support",
    }
}

#[test]
fn fresh_database_has_the_default_shift_templates() {
    let pool = DbPool::in_memory().unwrap();
    let data = fetch_all(&pool.conn).unwrap();

    assert!(data.employees.is_empty());
    assert!(data.shift_template("manager shift").is_some());
    assert!(data.shift_template("Mid Shift").is_some());
}

#[test]
fn domain_round_trips_through_sqlite() {
    let mut pool = DbPool::in_memory().unwrap();
    let mut data = fetch_all(&pool.conn).unwrap();

    let id = RosterLogic::add_employee(&mut data, &jane()).unwrap();
    ScheduleLogic::set_from_template(&mut data, id, d("2025-03-03"), "Mid Shift").unwrap();
    LeaveLogic::upsert_type(&mut data, "Vacation Leave", "vl", "33aa55", false).unwrap();
    let leave = LeaveLogic::submit(
        &mut data,
        &LeaveRequest {
            employee_id: id,
            leave_type: "vacation leave",
            start: d("2025-03-10"),
            end: d("2025-03-12"),
            reason: "trip",
            hours: None,
        },
    )
    .unwrap();
    LeaveLogic::approve(&mut data, leave).unwrap();
    HolidayLogic::add(&mut data, "Founders Day", d("2025-03-15"), HolidayKind::Special).unwrap();
    TaskLogic::add(&mut data, id, d("2025-03-03"), "Inventory").unwrap();

    save_all(&mut pool.conn, &data).unwrap();
    let back = fetch_all(&pool.conn).unwrap();

    assert_eq!(back.employees, data.employees);
    assert_eq!(back.employees[0].email, "jane@example.com");
    assert_eq!(back.employees[0].full_name(), "Jane Q Doe");
    assert_eq!(back.shifts, data.shifts);
    assert_eq!(back.leave_types[0].abbreviation, "VL");
    assert_eq!(back.leave_types[0].color, "#33AA55");
    assert_eq!(back.leaves[0].status, LeaveStatus::Approved);
    assert_eq!(back.holidays, data.holidays);
    assert_eq!(back.tasks, data.tasks);

    let days: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM leave_days WHERE leave_id = ?1", [leave], |r| r.get(0))
        .unwrap();
    assert_eq!(days, 3);
}

#[test]
fn saving_twice_replaces_instead_of_appending() {
    let mut pool = DbPool::in_memory().unwrap();
    let mut data = fetch_all(&pool.conn).unwrap();
    RosterLogic::add_employee(&mut data, &jane()).unwrap();

    save_all(&mut pool.conn, &data).unwrap();
    save_all(&mut pool.conn, &data).unwrap();

    assert_eq!(fetch_all(&pool.conn).unwrap().employees.len(), 1);
}

#[test]
fn roster_rules() {
    let mut data = fetch_all(&DbPool::in_memory().unwrap().conn).unwrap();
    let id = RosterLogic::add_employee(&mut data, &jane()).unwrap();

    let dup = RosterLogic::add_employee(&mut data, &jane()).unwrap_err();
    assert!(matches!(dup, AppError::DuplicateEmail(_)));

    assert_eq!(resolve_employee(&data, &id.to_string()).unwrap().id, id);
    assert_eq!(resolve_employee(&data, "jane@example.com").unwrap().id, id);
    assert_eq!(resolve_employee(&data, "Doe, Jane").unwrap().id, id);
    assert!(resolve_employee(&data, "nobody").is_err());

    let vis = RosterLogic::set_visibility(&mut data, id, None, Some(false)).unwrap();
    assert!(vis.show_in_schedule);
    assert!(!vis.show_in_reports);

    RosterLogic::set_active(&mut data, id, false).unwrap();
    assert!(data.roster(None).is_empty());
}

#[test]
fn leave_rules() {
    let mut data = fetch_all(&DbPool::in_memory().unwrap().conn).unwrap();
    let id = RosterLogic::add_employee(&mut data, &jane()).unwrap();
    LeaveLogic::upsert_type(&mut data, "Overtime", "OT", "#FF8800", true).unwrap();
    LeaveLogic::upsert_type(&mut data, "Sick Leave", "SL", "#00FF00", false).unwrap();

    let base = LeaveRequest {
        employee_id: id,
        leave_type: "Overtime",
        start: d("2025-03-03"),
        end: d("2025-03-03"),
        reason: "",
        hours: None,
    };

    // work extensions need hours
    assert!(LeaveLogic::submit(&mut data, &base).is_err());
    let ot = LeaveLogic::submit(&mut data, &LeaveRequest { hours: Some(2.0), ..base.clone() }).unwrap();

    // overlapping request
    let sick = LeaveRequest {
        leave_type: "Sick Leave",
        ..base.clone()
    };
    assert!(LeaveLogic::submit(&mut data, &sick).is_err());

    // inverted range
    let inverted = LeaveRequest {
        start: d("2025-03-09"),
        end: d("2025-03-08"),
        ..sick.clone()
    };
    assert!(LeaveLogic::submit(&mut data, &inverted).is_err());

    assert!(matches!(
        LeaveLogic::submit(&mut data, &LeaveRequest { leave_type: "Bereavement", ..sick }),
        Err(AppError::LeaveTypeNotFound(_))
    ));

    LeaveLogic::reject(&mut data, ot).unwrap();
    assert!(LeaveLogic::approve(&mut data, ot).is_err());
    assert!(matches!(LeaveLogic::approve(&mut data, 99), Err(AppError::LeaveNotFound(99))));
}

#[test]
fn holidays_and_tasks() {
    let mut data = fetch_all(&DbPool::in_memory().unwrap().conn).unwrap();
    let id = RosterLogic::add_employee(&mut data, &jane()).unwrap();

    HolidayLogic::add(&mut data, "New Year", d("2025-01-01"), HolidayKind::Regular).unwrap();
    let removed = HolidayLogic::remove(&mut data, d("2025-01-01")).unwrap();
    assert_eq!(removed, vec!["New Year".to_string()]);
    assert!(HolidayLogic::remove(&mut data, d("2025-01-01")).is_err());

    let task = TaskLogic::add(&mut data, id, d("2025-03-03"), "Count stock").unwrap();
    TaskLogic::complete(&mut data, task).unwrap();
    assert!(data.tasks[0].completed);
    assert!(matches!(TaskLogic::complete(&mut data, 42), Err(AppError::TaskNotFound(42))));
}

#[test]
fn audit_lines_are_kept_in_order() {
    let pool = DbPool::in_memory().unwrap();
    audit(&pool.conn, "import", "holidays.csv", "2 added").unwrap();
    audit(&pool.conn, "report", "attendance", "10 rows").unwrap();

    let ops: Vec<_> = load_log(&pool.conn)
        .unwrap()
        .into_iter()
        .map(|(_, _, op, _, _)| op)
        .filter(|op| op == "import" || op == "report")
        .collect();
    assert_eq!(ops, vec!["import", "report"]);
}
