//! Report rows: one per (employee, day) of the requested interval.

use crate::config::Config;
use crate::models::domain::DomainData;
use crate::models::employee::Employee;
use crate::models::shift::{ShiftKind, ShiftTemplate};
use crate::utils::date::days_between;
use crate::utils::time::{fmt_hhmm, night_minutes};
use chrono::NaiveDate;
use serde::Serialize;

pub const STATUS_ON: &str = "ON";
pub const STATUS_OFF: &str = "OFF";
pub const STATUS_HOLIDAY_OFF: &str = "HOL-OFF";
pub const STATUS_HOLIDAY: &str = "HOLIDAY";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub employee_name: String,
    pub employee_id: i64,
    pub position: String,
    pub date: NaiveDate,
    /// `ON`, `OFF`, `HOL-OFF`, `HOLIDAY`, a leave abbreviation, or empty.
    pub day_status: String,
    pub schedule_start: String,
    pub schedule_end: String,
    pub break_start: String,
    pub break_end: String,
    pub leave_type: String,
    pub holiday: String,
    pub tardy_minutes: Option<i32>,
    pub overtime_hours: f64,
    pub night_diff_minutes: i64,
    pub remote: bool,
}

impl ReportRow {
    fn blank(employee: &Employee, name: String, date: NaiveDate) -> Self {
        Self {
            employee_name: name,
            employee_id: employee.id,
            position: employee.position.clone(),
            date,
            day_status: String::new(),
            schedule_start: String::new(),
            schedule_end: String::new(),
            break_start: String::new(),
            break_end: String::new(),
            leave_type: String::new(),
            holiday: String::new(),
            tardy_minutes: None,
            overtime_hours: 0.0,
            night_diff_minutes: 0,
            remote: false,
        }
    }

    fn with_template(mut self, status: &str, template: Option<&ShiftTemplate>) -> Self {
        self.day_status = status.to_string();
        if let Some(t) = template {
            self.schedule_start = fmt_hhmm(Some(t.start));
            self.schedule_end = fmt_hhmm(Some(t.end));
            self.break_start = fmt_hhmm(t.break_start);
            self.break_end = fmt_hhmm(t.break_end);
        }
        self
    }

    /// Schedule code as shown in grids: the status, or the time range for worked days.
    pub fn schedule_code(&self) -> String {
        if self.day_status == STATUS_ON {
            format!("{}-{}", self.schedule_start, self.schedule_end)
        } else {
            self.day_status.clone()
        }
    }
}

/// Default shift template for an employee on leave or holiday days.
fn default_template<'a>(
    data: &'a DomainData,
    cfg: &Config,
    employee: &Employee,
) -> Option<&'a ShiftTemplate> {
    let name = if cfg.is_manager_position(&employee.position) {
        &cfg.manager_shift
    } else {
        &cfg.staff_shift
    };
    data.shift_template(name)
}

/// Employees included in reports for `group`, in report order.
pub fn report_roster<'a>(data: &'a DomainData, group: Option<&str>) -> Vec<&'a Employee> {
    data.roster(group)
        .into_iter()
        .filter(|e| e.visibility.show_in_reports)
        .collect()
}

pub fn display_name(cfg: &Config, employee: &Employee) -> String {
    let name = employee.full_name();
    if cfg.uppercase_names {
        name.to_uppercase()
    } else {
        name
    }
}

/// Build the rows for `[start, end]`, ordered by employee then date.
/// An inverted interval gives no rows.
pub fn generate(
    data: &DomainData,
    cfg: &Config,
    group: Option<&str>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ReportRow> {
    let days = days_between(start, end);
    let mut rows = Vec::new();

    for employee in report_roster(data, group) {
        let name = display_name(cfg, employee);
        for day in &days {
            rows.push(build_row(data, cfg, employee, name.clone(), *day));
        }
    }

    rows
}

fn build_row(
    data: &DomainData,
    cfg: &Config,
    employee: &Employee,
    name: String,
    date: NaiveDate,
) -> ReportRow {
    let shifts: Vec<_> = data.shifts_on(employee.id, date).collect();
    let day_off = shifts.iter().any(|s| s.kind == ShiftKind::DayOff);
    let holiday_off = shifts.iter().any(|s| s.kind == ShiftKind::HolidayOff);
    let regular = shifts.iter().find(|s| s.kind == ShiftKind::Regular);

    let approved: Vec<_> = data.approved_leaves_on(employee.id, date).collect();
    let absence = approved.iter().find_map(|l| {
        data.leave_type(&l.leave_type)
            .filter(|t| !t.is_work_extension)
    });
    let holiday = data.holiday_on(date);

    let mut row = ReportRow::blank(employee, name, date);

    if let Some(h) = holiday {
        row.holiday = h.title.clone();
    }
    if let Some(t) = absence {
        row.leave_type = t.name.clone();
    }
    row.tardy_minutes = data.tardy_on(employee.id, date).map(|t| t.minutes_late);
    row.overtime_hours = approved
        .iter()
        .filter(|l| {
            data.leave_type(&l.leave_type)
                .is_some_and(|t| t.is_work_extension)
        })
        .filter_map(|l| l.hours)
        .sum();

    if day_off {
        row.day_status = STATUS_OFF.to_string();
        return row;
    }

    let fallback = default_template(data, cfg, employee);
    if holiday_off {
        return row.with_template(STATUS_HOLIDAY_OFF, fallback);
    }
    if let Some(t) = absence {
        return row.with_template(&t.abbreviation, fallback);
    }
    if holiday.is_some() {
        return row.with_template(STATUS_HOLIDAY, fallback);
    }

    if let Some(s) = regular {
        row.day_status = STATUS_ON.to_string();
        row.schedule_start = fmt_hhmm(s.start);
        row.schedule_end = fmt_hhmm(s.end);
        row.break_start = fmt_hhmm(s.break_start);
        row.break_end = fmt_hhmm(s.break_end);
        row.remote = s.remote;
        if let (Some(a), Some(b)) = (s.start, s.end) {
            row.night_diff_minutes = night_minutes(a, b);
        }
    }

    row
}
