use crate::errors::{AppError, AppResult};
use crate::models::domain::{DomainData, next_id};
use crate::models::leave::{Leave, LeaveStatus, LeaveType};
use chrono::NaiveDate;

pub struct LeaveLogic;

#[derive(Debug, Clone)]
pub struct LeaveRequest<'a> {
    pub employee_id: i64,
    pub leave_type: &'a str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub reason: &'a str,
    pub hours: Option<f64>,
}

impl LeaveLogic {
    /// Submit a pending request.
    pub fn submit(data: &mut DomainData, req: &LeaveRequest) -> AppResult<i64> {
        if data.employee(req.employee_id).is_none() {
            return Err(AppError::EmployeeNotFound(req.employee_id.to_string()));
        }
        if req.end < req.start {
            return Err(AppError::Validation(format!(
                "end date {} is before start date {}",
                req.end, req.start
            )));
        }

        let (type_name, is_work_extension) = data
            .leave_type(req.leave_type)
            .map(|t| (t.name.clone(), t.is_work_extension))
            .ok_or_else(|| AppError::LeaveTypeNotFound(req.leave_type.to_string()))?;

        let hours = if is_work_extension {
            match req.hours {
                Some(h) if h > 0.0 => Some(h),
                _ => {
                    return Err(AppError::Validation(
                        "work extensions need a positive number of hours".into(),
                    ));
                }
            }
        } else {
            None
        };

        let overlapping = data.leaves.iter().find(|l| {
            l.employee_id == req.employee_id
                && l.status != LeaveStatus::Rejected
                && l.start_date <= req.end
                && req.start <= l.end_date
        });
        if let Some(l) = overlapping {
            return Err(AppError::Validation(format!(
                "overlaps leave #{} ({} to {})",
                l.id, l.start_date, l.end_date
            )));
        }

        let id = next_id(&data.leaves, |l| l.id);
        data.leaves.push(Leave {
            id,
            employee_id: req.employee_id,
            leave_type: type_name,
            start_date: req.start,
            end_date: req.end,
            status: LeaveStatus::Pending,
            reason: req.reason.trim().to_string(),
            hours,
        });
        Ok(id)
    }

    pub fn approve(data: &mut DomainData, leave_id: i64) -> AppResult<()> {
        Self::set_status(data, leave_id, LeaveStatus::Approved)
    }

    pub fn reject(data: &mut DomainData, leave_id: i64) -> AppResult<()> {
        Self::set_status(data, leave_id, LeaveStatus::Rejected)
    }

    fn set_status(data: &mut DomainData, leave_id: i64, status: LeaveStatus) -> AppResult<()> {
        let leave = data
            .leaves
            .iter_mut()
            .find(|l| l.id == leave_id)
            .ok_or(AppError::LeaveNotFound(leave_id))?;

        if leave.status != LeaveStatus::Pending {
            return Err(AppError::Validation(format!(
                "leave #{leave_id} is already {}",
                leave.status.to_db_str()
            )));
        }
        leave.status = status;
        Ok(())
    }

    /// Add or update a leave type.
    pub fn upsert_type(
        data: &mut DomainData,
        name: &str,
        abbreviation: &str,
        color: &str,
        is_work_extension: bool,
    ) -> AppResult<i64> {
        let name = name.trim();
        let abbreviation = abbreviation.trim().to_uppercase();
        if name.is_empty() || abbreviation.is_empty() {
            return Err(AppError::Validation("name and abbreviation are required".into()));
        }
        let color = LeaveType::normalize_color(color)
            .ok_or_else(|| AppError::Validation(format!("invalid color '{color}' (expected #RRGGBB)")))?;

        if let Some(existing) = data
            .leave_types
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(name))
        {
            existing.abbreviation = abbreviation;
            existing.color = color;
            existing.is_work_extension = is_work_extension;
            return Ok(existing.id);
        }

        let id = next_id(&data.leave_types, |t| t.id);
        data.leave_types.push(LeaveType {
            id,
            name: name.to_string(),
            abbreviation,
            color,
            is_work_extension,
        });
        Ok(id)
    }
}
