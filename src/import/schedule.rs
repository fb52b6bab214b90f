//! Schedule matrix: `Employees` column followed by one `yyyy-MM-dd` column per day.

use super::names::find_employee_by_name;
use super::{CsvTable, ImportOutcome, RowOutcome, finish};
use crate::errors::{AppError, AppResult};
use crate::models::domain::DomainData;
use crate::ui::messages::warning;
use crate::utils::time::parse_time_range;
use chrono::{NaiveDate, NaiveTime};
use std::io::Read;

pub const EMPLOYEES_HEADER: &str = "Employees";

#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleCode {
    Off,
    HolidayOff,
    /// Leave type name resolved from its abbreviation.
    Leave(String),
    Shift(NaiveTime, NaiveTime),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub employee_id: i64,
    pub date: NaiveDate,
    pub code: ScheduleCode,
}

pub fn parse_code(data: &DomainData, raw: &str) -> Option<ScheduleCode> {
    let code = raw.trim();
    match code.to_uppercase().as_str() {
        "OFF" => return Some(ScheduleCode::Off),
        "HOL-OFF" => return Some(ScheduleCode::HolidayOff),
        _ => {}
    }

    if let Some(t) = data.leave_type_by_abbreviation(code) {
        return Some(ScheduleCode::Leave(t.name.clone()));
    }

    parse_time_range(code).map(|(a, b)| ScheduleCode::Shift(a, b))
}

pub fn parse_schedule<R: Read>(input: R, data: &DomainData) -> AppResult<ImportOutcome<ScheduleEntry>> {
    let table = CsvTable::read(input)?;
    table.require_headers(&[EMPLOYEES_HEADER])?;

    let name_col = table.column(EMPLOYEES_HEADER).unwrap_or(0);

    let mut date_cols: Vec<(usize, NaiveDate)> = Vec::new();
    for (i, h) in table.headers.iter().enumerate() {
        if i == name_col {
            continue;
        }
        match NaiveDate::parse_from_str(h.trim(), "%Y-%m-%d") {
            Ok(d) => date_cols.push((i, d)),
            Err(_) => warning(format!("schedule import: column '{h}' is not a yyyy-MM-dd date (ignored)")),
        }
    }
    if date_cols.is_empty() {
        return Err(AppError::MissingHeaders(vec!["yyyy-MM-dd date column".to_string()]));
    }

    let mut outcomes = Vec::new();
    for (line, record) in &table.rows {
        let name = record.get(name_col).unwrap_or("");
        let Some(employee) = find_employee_by_name(&data.employees, name) else {
            outcomes.push(RowOutcome::skip(*line, format!("no employee matches '{name}'")));
            continue;
        };

        for (col, date) in &date_cols {
            let raw = record.get(*col).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            match parse_code(data, raw) {
                Some(code) => outcomes.push(RowOutcome::Parsed(ScheduleEntry {
                    employee_id: employee.id,
                    date: *date,
                    code,
                })),
                None => outcomes.push(RowOutcome::skip(
                    *line,
                    format!("{date}: unknown schedule code '{raw}'"),
                )),
            }
        }
    }

    finish("schedule", outcomes)
}
