use chrono::NaiveDate;
use serde::Serialize;

/// A to-do attached to an employee's shift on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftTask {
    pub id: i64,
    pub employee_id: i64,
    pub date: NaiveDate,
    pub title: String,
    pub completed: bool,
}
