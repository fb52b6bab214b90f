use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HolidayKind {
    Regular,
    Special,
}

impl HolidayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayKind::Regular => "Regular",
            HolidayKind::Special => "Special",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "" | "regular" => Some(HolidayKind::Regular),
            "special" => Some(HolidayKind::Special),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Holiday {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub kind: HolidayKind,
}
