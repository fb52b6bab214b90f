// src/export/range.rs

use crate::errors::{AppError, AppResult};
use crate::utils::date::parse_date;
use chrono::{Datelike, NaiveDate};

/// Parse a report period.
///
/// Supported:
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD (also MM/DD/YYYY on either side)
pub fn parse_period(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, _) = parse_single(start_raw)?;
        let (_, end) = parse_single(end_raw)?;
        return Ok((start, end));
    }

    parse_single(r)
}

/// A month gives its full span; a day gives itself.
fn parse_single(s: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let s = s.trim();

    if let Some(d) = parse_date(s) {
        return Ok((d, d));
    }

    if s.len() == 7 {
        let first = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(s.to_string()))?;
        return Ok((first, month_last_day(first)));
    }

    Err(AppError::InvalidDate(format!(
        "{s} (expected YYYY-MM, YYYY-MM-DD or a start:end range)"
    )))
}

fn month_last_day(first: NaiveDate) -> NaiveDate {
    first
        .iter_days()
        .take_while(|d| d.month() == first.month())
        .last()
        .unwrap_or(first)
}
