use super::{CsvTable, ImportOutcome, RowOutcome, finish, parse_flag};
use crate::errors::AppResult;
use crate::models::leave::LeaveType;
use std::io::Read;

pub fn parse_leave_types<R: Read>(input: R) -> AppResult<ImportOutcome<LeaveType>> {
    let table = CsvTable::read(input)?;
    table.require_headers(&["Type", "Abbreviation", "Color"])?;

    let outcomes = table
        .rows
        .iter()
        .map(|(line, record)| {
            let name = table.value(record, "Type");
            let abbreviation = table.value(record, "Abbreviation");
            let color = table.value(record, "Color");
            let ext_raw = table.value(record, "Work Extension");

            if name.is_empty() || abbreviation.is_empty() {
                return RowOutcome::skip(*line, "type and abbreviation are required");
            }
            let Some(color) = LeaveType::normalize_color(color) else {
                return RowOutcome::skip(*line, format!("invalid color '{color}' (expected #RRGGBB)"));
            };
            let Some(is_work_extension) = parse_flag(ext_raw) else {
                return RowOutcome::skip(*line, format!("invalid Work Extension value '{ext_raw}'"));
            };

            RowOutcome::Parsed(LeaveType {
                id: 0,
                name: name.to_string(),
                abbreviation: abbreviation.to_uppercase(),
                color,
                is_work_extension,
            })
        })
        .collect();

    finish("leave types", outcomes)
}
