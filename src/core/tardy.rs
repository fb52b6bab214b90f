use crate::errors::{AppError, AppResult};
use crate::models::domain::{DomainData, next_id};
use crate::models::tardy::TardyRecord;
use chrono::NaiveDate;

pub struct TardyLogic;

impl TardyLogic {
    /// Record minutes late for (employee, date), replacing an earlier record.
    pub fn record(
        data: &mut DomainData,
        employee_id: i64,
        date: NaiveDate,
        minutes_late: i32,
        remarks: &str,
    ) -> AppResult<i64> {
        if data.employee(employee_id).is_none() {
            return Err(AppError::EmployeeNotFound(employee_id.to_string()));
        }
        if minutes_late < 0 {
            return Err(AppError::InvalidNumber(minutes_late.to_string()));
        }

        if let Some(existing) = data
            .tardies
            .iter_mut()
            .find(|t| t.employee_id == employee_id && t.date == date)
        {
            existing.minutes_late = minutes_late;
            existing.remarks = remarks.trim().to_string();
            return Ok(existing.id);
        }

        let id = next_id(&data.tardies, |t| t.id);
        data.tardies.push(TardyRecord {
            id,
            employee_id,
            date,
            minutes_late,
            remarks: remarks.trim().to_string(),
        });
        Ok(id)
    }
}
