//! Time utilities: parsing 12h/24h times and ranges, night differential math.

use chrono::{NaiveTime, Timelike};

/// Parse `HH:MM` (24h) or 12h notations such as `9:00 AM`, `9am`, `9:30pm`.
pub fn parse_time(t: &str) -> Option<NaiveTime> {
    let s = t.trim().to_uppercase().replace('.', "");
    if s.is_empty() {
        return None;
    }

    if let Ok(v) = NaiveTime::parse_from_str(&s, "%H:%M") {
        return Some(v);
    }

    let (body, pm) = if let Some(b) = s.strip_suffix("PM") {
        (b.trim(), true)
    } else if let Some(b) = s.strip_suffix("AM") {
        (b.trim(), false)
    } else {
        return None;
    };

    let (h, m) = match body.split_once(':') {
        Some((h, m)) => (h.trim().parse::<u32>().ok()?, m.trim().parse::<u32>().ok()?),
        None => (body.parse::<u32>().ok()?, 0),
    };

    if !(1..=12).contains(&h) {
        return None;
    }

    let hour = match (h, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    NaiveTime::from_hms_opt(hour, m, 0)
}

/// Parse `start-end` where both sides accept [`parse_time`] notations.
pub fn parse_time_range(s: &str) -> Option<(NaiveTime, NaiveTime)> {
    let (a, b) = s.split_once('-')?;
    Some((parse_time(a)?, parse_time(b)?))
}

pub fn fmt_hhmm(t: Option<NaiveTime>) -> String {
    t.map(|t| t.format("%H:%M").to_string()).unwrap_or_default()
}

/// Minutes of `[start, end)` falling in the 22:00–06:00 window.
/// An end not after the start is treated as an overnight shift.
pub fn night_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let s = (start.num_seconds_from_midnight() / 60) as i64;
    let mut e = (end.num_seconds_from_midnight() / 60) as i64;
    if e <= s {
        e += 24 * 60;
    }

    // night windows over two calendar days, in minutes from day-0 midnight
    let windows = [(0, 6 * 60), (22 * 60, 30 * 60), (46 * 60, 48 * 60)];

    windows
        .iter()
        .map(|(ws, we)| (e.min(*we) - s.max(*ws)).max(0))
        .sum()
}

/// Render minutes as decimal hours with two digits ("1.50"); empty for zero.
pub fn hours_label(minutes: i64) -> String {
    if minutes == 0 {
        String::new()
    } else {
        format!("{:.2}", minutes as f64 / 60.0)
    }
}
