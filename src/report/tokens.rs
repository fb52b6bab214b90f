//! Token vocabularies per report kind.

use crate::config::Config;
use crate::models::report_kind::ReportKind;
use crate::report::data::{ReportRow, STATUS_ON};
use crate::report::template::{GridData, TokenMap};
use crate::utils::date::month_name;
use crate::utils::time::hours_label;
use chrono::{Datelike, NaiveDate};

/// Period and context for one generation.
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub kind: ReportKind,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub group: Option<&'a str>,
    pub generated_on: NaiveDate,
}

fn fmt_date(cfg: &Config, d: NaiveDate) -> String {
    d.format(&cfg.report_date_format).to_string()
}

pub fn global_tokens(cfg: &Config, ctx: &ReportContext) -> TokenMap {
    let mut m = TokenMap::new();
    m.insert("start_date".into(), fmt_date(cfg, ctx.start));
    m.insert("end_date".into(), fmt_date(cfg, ctx.end));
    m.insert("month".into(), month_name(ctx.start.month()).to_string());
    m.insert("year".into(), ctx.start.year().to_string());
    m.insert("group".into(), ctx.group.unwrap_or("All").to_string());
    m.insert("company".into(), cfg.company_name.clone());
    m.insert("generated_on".into(), fmt_date(cfg, ctx.generated_on));
    m
}

pub fn row_tokens(cfg: &Config, kind: ReportKind, row: &ReportRow) -> TokenMap {
    let mut m = TokenMap::new();
    let mut put = |k: &str, v: String| {
        m.insert(k.to_string(), v);
    };

    put("employee_name", row.employee_name.clone());
    put("date", fmt_date(cfg, row.date));
    put("day_status", row.day_status.clone());
    put("schedule_start", row.schedule_start.clone());
    put("schedule_end", row.schedule_end.clone());

    match kind {
        ReportKind::WorkSchedule => {
            put("position", row.position.clone());
            put("day", row.date.format("%a").to_string());
            put("break_start", row.break_start.clone());
            put("break_end", row.break_end.clone());
        }
        ReportKind::Attendance => {
            put("day", row.date.format("%a").to_string());
            put("leave_type", row.leave_type.clone());
            put("holiday", row.holiday.clone());
            put(
                "tardy_minutes",
                row.tardy_minutes.map(|t| t.to_string()).unwrap_or_default(),
            );
        }
        ReportKind::Overtime => {
            let overtime = if row.overtime_hours > 0.0 {
                format!("{:.2}", row.overtime_hours)
            } else {
                String::new()
            };
            put("overtime_hours", overtime);
            put("night_diff_hours", hours_label(row.night_diff_minutes));
        }
        ReportKind::Wfh => {}
    }

    m
}

/// Cell value for the WFH grid.
pub fn wfh_code(row: &ReportRow) -> String {
    if row.remote && row.day_status == STATUS_ON {
        "WFH".to_string()
    } else {
        row.schedule_code()
    }
}

/// Fold rows (already ordered employee then date) into a grid.
pub fn grid_data(cfg: &Config, rows: &[ReportRow], days: &[NaiveDate]) -> GridData {
    let mut grid = GridData {
        dates: days.iter().map(|d| fmt_date(cfg, *d)).collect(),
        ..Default::default()
    };

    let mut current: Option<i64> = None;
    for row in rows {
        if current != Some(row.employee_id) {
            current = Some(row.employee_id);
            grid.employees.push(row.employee_name.clone());
            grid.cells.push(Vec::with_capacity(days.len()));
        }
        if let Some(line) = grid.cells.last_mut() {
            line.push(wfh_code(row));
        }
    }

    grid
}

/// Column headers and their row token for the built-in table layout.
pub fn columns(kind: ReportKind) -> &'static [(&'static str, &'static str)] {
    match kind {
        ReportKind::WorkSchedule => &[
            ("Employee", "employee_name"),
            ("Position", "position"),
            ("Date", "date"),
            ("Day", "day"),
            ("Status", "day_status"),
            ("Start", "schedule_start"),
            ("End", "schedule_end"),
            ("Break Start", "break_start"),
            ("Break End", "break_end"),
        ],
        ReportKind::Attendance => &[
            ("Employee", "employee_name"),
            ("Date", "date"),
            ("Day", "day"),
            ("Status", "day_status"),
            ("Start", "schedule_start"),
            ("End", "schedule_end"),
            ("Leave", "leave_type"),
            ("Holiday", "holiday"),
            ("Tardy (min)", "tardy_minutes"),
        ],
        ReportKind::Overtime => &[
            ("Employee", "employee_name"),
            ("Date", "date"),
            ("Status", "day_status"),
            ("Start", "schedule_start"),
            ("End", "schedule_end"),
            ("Overtime (h)", "overtime_hours"),
            ("Night Diff (h)", "night_diff_hours"),
        ],
        ReportKind::Wfh => &[("Employee", "employee_name")],
    }
}
