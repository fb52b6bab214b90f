use super::{CsvTable, ImportOutcome, RowOutcome, finish};
use crate::errors::AppResult;
use crate::models::holiday::{Holiday, HolidayKind};
use crate::utils::date::parse_date;
use std::io::Read;

pub fn parse_holidays<R: Read>(input: R) -> AppResult<ImportOutcome<Holiday>> {
    let table = CsvTable::read(input)?;
    table.require_headers(&["Title", "Date"])?;

    let outcomes = table
        .rows
        .iter()
        .map(|(line, record)| {
            let title = table.value(record, "Title");
            let date_raw = table.value(record, "Date");
            let kind_raw = table.value(record, "Type");

            if title.is_empty() {
                return RowOutcome::skip(*line, "empty title");
            }
            let Some(date) = parse_date(date_raw) else {
                return RowOutcome::skip(*line, format!("invalid date '{date_raw}'"));
            };
            let Some(kind) = HolidayKind::parse(kind_raw) else {
                return RowOutcome::skip(*line, format!("unknown holiday type '{kind_raw}'"));
            };

            RowOutcome::Parsed(Holiday {
                id: 0,
                title: title.to_string(),
                date,
                kind,
            })
        })
        .collect();

    finish("holidays", outcomes)
}
