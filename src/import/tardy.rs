use super::names::find_employee_by_name;
use super::{CsvTable, ImportOutcome, RowOutcome, finish};
use crate::errors::AppResult;
use crate::models::domain::DomainData;
use crate::models::tardy::TardyRecord;
use crate::utils::date::parse_date;
use std::io::Read;

pub fn parse_tardy<R: Read>(input: R, data: &DomainData) -> AppResult<ImportOutcome<TardyRecord>> {
    let table = CsvTable::read(input)?;
    table.require_headers(&["Employee", "Date", "Minutes Late"])?;

    let outcomes = table
        .rows
        .iter()
        .map(|(line, record)| {
            let name = table.value(record, "Employee");
            let date_raw = table.value(record, "Date");
            let minutes_raw = table.value(record, "Minutes Late");

            let Some(employee) = find_employee_by_name(&data.employees, name) else {
                return RowOutcome::skip(*line, format!("no employee matches '{name}'"));
            };
            let Some(date) = parse_date(date_raw) else {
                return RowOutcome::skip(*line, format!("invalid date '{date_raw}'"));
            };
            let minutes_late = match minutes_raw.parse::<i32>() {
                Ok(m) if m >= 0 => m,
                _ => return RowOutcome::skip(*line, format!("invalid minutes '{minutes_raw}'")),
            };

            RowOutcome::Parsed(TardyRecord {
                id: 0,
                employee_id: employee.id,
                date,
                minutes_late,
                remarks: table.value(record, "Remarks").to_string(),
            })
        })
        .collect();

    finish("tardy", outcomes)
}
