use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TardyRecord {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub minutes_late: i32,
    pub remarks: String,
}
