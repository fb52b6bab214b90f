// src/export/excel_date.rs

use chrono::{NaiveDate, NaiveTime, Timelike};

/// Interpret report text as a date or time, returning the Excel serial and
/// the number format to display it with.
pub(crate) fn parse_to_excel_date(s: &str, date_format: &str) -> Option<(&'static str, f64)> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, date_format)
        && let Some(serial) = date_to_excel_serial(d)
    {
        return Some(("yyyy-mm-dd", serial));
    }

    if s.len() == 5
        && let Ok(t) = NaiveTime::parse_from_str(s, "%H:%M")
    {
        let seconds = t.num_seconds_from_midnight() as f64;
        return Some(("hh:mm", seconds / 86400.0));
    }

    None
}

/// Days since the Excel epoch (1899-12-30, which absorbs the 1900 leap bug).
pub(crate) fn date_to_excel_serial(d: NaiveDate) -> Option<f64> {
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    Some((d - epoch).num_days() as f64)
}
