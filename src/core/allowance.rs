use crate::errors::{AppError, AppResult};
use crate::models::allowance::Allowance;
use crate::models::domain::{DomainData, next_id};
use crate::utils::date::parse_month;

pub struct AllowanceLogic;

impl AllowanceLogic {
    /// Record (or replace) the allowance of an employee for a `YYYY-MM` month.
    pub fn record(
        data: &mut DomainData,
        employee_id: i64,
        month: &str,
        amount: f64,
        remarks: &str,
    ) -> AppResult<i64> {
        if data.employee(employee_id).is_none() {
            return Err(AppError::EmployeeNotFound(employee_id.to_string()));
        }
        let month = parse_month(month).ok_or_else(|| AppError::InvalidDate(format!("{month} (expected YYYY-MM)")))?;
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::InvalidNumber(amount.to_string()));
        }

        if let Some(existing) = data
            .allowances
            .iter_mut()
            .find(|a| a.employee_id == employee_id && a.month == month)
        {
            existing.amount = amount;
            existing.remarks = remarks.trim().to_string();
            return Ok(existing.id);
        }

        let id = next_id(&data.allowances, |a| a.id);
        data.allowances.push(Allowance {
            id,
            employee_id,
            month,
            amount,
            remarks: remarks.trim().to_string(),
        });
        Ok(id)
    }

    /// Sum of all allowances for a month.
    pub fn monthly_total(data: &DomainData, month: &str) -> AppResult<f64> {
        let month = parse_month(month).ok_or_else(|| AppError::InvalidDate(format!("{month} (expected YYYY-MM)")))?;
        Ok(data
            .allowances
            .iter()
            .filter(|a| a.month == month)
            .map(|a| a.amount)
            .sum())
    }
}
