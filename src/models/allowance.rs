use serde::Serialize;

/// Monthly communication allowance granted to an employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allowance {
    pub id: i64,
    pub employee_id: i64,
    /// "YYYY-MM"
    pub month: String,
    pub amount: f64,
    pub remarks: String,
}
