use super::names::find_employee_by_name;
use super::{CsvTable, ImportOutcome, RowOutcome, finish};
use crate::errors::AppResult;
use crate::models::allowance::Allowance;
use crate::models::domain::DomainData;
use crate::utils::date::parse_month;
use std::io::Read;

pub fn parse_allowances<R: Read>(input: R, data: &DomainData) -> AppResult<ImportOutcome<Allowance>> {
    let table = CsvTable::read(input)?;
    table.require_headers(&["Employee", "Month", "Amount"])?;

    let outcomes = table
        .rows
        .iter()
        .map(|(line, record)| {
            let name = table.value(record, "Employee");
            let month_raw = table.value(record, "Month");
            let amount_raw = table.value(record, "Amount");

            let Some(employee) = find_employee_by_name(&data.employees, name) else {
                return RowOutcome::skip(*line, format!("no employee matches '{name}'"));
            };
            let Some(month) = parse_month(month_raw) else {
                return RowOutcome::skip(*line, format!("invalid month '{month_raw}' (expected YYYY-MM)"));
            };
            let amount = match amount_raw.replace(',', "").parse::<f64>() {
                Ok(a) if a >= 0.0 => a,
                _ => return RowOutcome::skip(*line, format!("invalid amount '{amount_raw}'")),
            };

            RowOutcome::Parsed(Allowance {
                id: 0,
                employee_id: employee.id,
                month,
                amount,
                remarks: table.value(record, "Remarks").to_string(),
            })
        })
        .collect();

    finish("allowances", outcomes)
}
