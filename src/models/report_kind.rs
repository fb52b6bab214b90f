use clap::ValueEnum;
use serde::Serialize;

/// The report families the generator knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
pub enum ReportKind {
    /// Per-employee, per-day work schedule
    WorkSchedule,
    /// Attendance sheet with leave, holiday and tardiness columns
    Attendance,
    /// Overtime (work extensions) and night differential
    Overtime,
    /// Work-from-home certification grid
    Wfh,
}

impl ReportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::WorkSchedule => "work-schedule",
            ReportKind::Attendance => "attendance",
            ReportKind::Overtime => "overtime",
            ReportKind::Wfh => "wfh",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "work-schedule" | "work_schedule" | "schedule" => Some(ReportKind::WorkSchedule),
            "attendance" => Some(ReportKind::Attendance),
            "overtime" | "overtime-nd" => Some(ReportKind::Overtime),
            "wfh" | "wfh-certification" => Some(ReportKind::Wfh),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReportKind::WorkSchedule => "Work Schedule",
            ReportKind::Attendance => "Attendance Sheet",
            ReportKind::Overtime => "Overtime / Night Differential",
            ReportKind::Wfh => "WFH Certification",
        }
    }

    /// Grid reports substitute indexed tokens in place instead of cloning a row.
    pub fn is_grid(&self) -> bool {
        matches!(self, ReportKind::Wfh)
    }

    /// Token that identifies the template row (or grid) for this kind.
    pub fn anchor_token(&self) -> &'static str {
        if self.is_grid() {
            "{{employee_0}}"
        } else {
            "{{employee_name}}"
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
