use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftKind {
    Regular,
    DayOff,
    HolidayOff,
}

impl ShiftKind {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ShiftKind::Regular => "regular",
            ShiftKind::DayOff => "off",
            ShiftKind::HolidayOff => "hol_off",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "regular" => Some(ShiftKind::Regular),
            "off" => Some(ShiftKind::DayOff),
            "hol_off" => Some(ShiftKind::HolidayOff),
            _ => None,
        }
    }
}

/// A scheduled work interval for one employee on one date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shift {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub kind: ShiftKind,
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
    pub remote: bool,
}

impl Shift {
    pub fn regular(employee_id: i64, date: NaiveDate, start: NaiveTime, end: NaiveTime) -> Self {
        Self {
            id: 0,
            employee_id,
            date,
            kind: ShiftKind::Regular,
            start: Some(start),
            end: Some(end),
            break_start: None,
            break_end: None,
            remote: false,
        }
    }

    pub fn marker(employee_id: i64, date: NaiveDate, kind: ShiftKind) -> Self {
        Self {
            id: 0,
            employee_id,
            date,
            kind,
            start: None,
            end: None,
            break_start: None,
            break_end: None,
            remote: false,
        }
    }
}

/// Named default shift ("Manager Shift", "Mid Shift", ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftTemplate {
    pub id: i64,
    pub name: String,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_start: Option<NaiveTime>,
    pub break_end: Option<NaiveTime>,
}
