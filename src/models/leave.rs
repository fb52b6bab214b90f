use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn to_db_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(LeaveStatus::Pending),
            "approved" => Some(LeaveStatus::Approved),
            "rejected" => Some(LeaveStatus::Rejected),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaveType {
    pub id: i64,
    pub name: String,
    /// Code used in schedule grids and CSV imports (e.g. "VL").
    pub abbreviation: String,
    /// "#RRGGBB"
    pub color: String,
    pub is_work_extension: bool,
}

/// An absence (or work-extension) request spanning one or more dates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leave {
    pub id: i64,
    pub employee_id: i64,
    pub leave_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
    pub reason: String,
    /// Requested hours, only meaningful for work extensions.
    pub hours: Option<f64>,
}

impl Leave {
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_approved(&self) -> bool {
        self.status == LeaveStatus::Approved
    }

    /// Every calendar day covered by the request (inclusive).
    pub fn days(&self) -> Vec<NaiveDate> {
        self.start_date
            .iter_days()
            .take_while(|d| *d <= self.end_date)
            .collect()
    }
}

impl LeaveType {
    /// Accept `#RRGGBB` or `RRGGBB` in any case, returning `#RRGGBB`.
    pub fn normalize_color(raw: &str) -> Option<String> {
        let hex = raw.trim().trim_start_matches('#');
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            Some(format!("#{}", hex.to_uppercase()))
        } else {
            None
        }
    }
}
