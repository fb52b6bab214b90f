use crate::errors::{AppError, AppResult};
use crate::import::names::find_employee_by_name;
use crate::models::domain::{DomainData, next_id};
use crate::models::employee::{Employee, Visibility};

/// Roster management.
pub struct RosterLogic;

/// Fields of a new employee as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee<'a> {
    pub first_name: &'a str,
    pub middle_name: Option<&'a str>,
    pub last_name: &'a str,
    pub email: &'a str,
    pub position: &'a str,
    pub group: &'a str,
}

impl RosterLogic {
    pub fn add_employee(data: &mut DomainData, new: &NewEmployee) -> AppResult<i64> {
        if new.first_name.trim().is_empty() || new.last_name.trim().is_empty() {
            return Err(AppError::Validation("first and last name are required".into()));
        }
        if !new.email.contains('@') {
            return Err(AppError::Validation(format!("invalid email '{}'", new.email)));
        }
        if data.employee_by_email(new.email).is_some() {
            return Err(AppError::DuplicateEmail(new.email.trim().to_lowercase()));
        }

        let id = next_id(&data.employees, |e| e.id);
        let mut employee = Employee::new(
            id,
            new.first_name,
            new.last_name,
            new.email,
            new.position,
            new.group,
        );
        employee.middle_name = new
            .middle_name
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);

        data.employees.push(employee);
        Ok(id)
    }

    /// Update visibility flags; `None` leaves a flag untouched.
    pub fn set_visibility(
        data: &mut DomainData,
        employee_id: i64,
        show_in_schedule: Option<bool>,
        show_in_reports: Option<bool>,
    ) -> AppResult<Visibility> {
        let employee = data
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| AppError::EmployeeNotFound(employee_id.to_string()))?;

        if let Some(v) = show_in_schedule {
            employee.visibility.show_in_schedule = v;
        }
        if let Some(v) = show_in_reports {
            employee.visibility.show_in_reports = v;
        }
        Ok(employee.visibility)
    }

    pub fn set_active(data: &mut DomainData, employee_id: i64, active: bool) -> AppResult<()> {
        let employee = data
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| AppError::EmployeeNotFound(employee_id.to_string()))?;
        employee.active = active;
        Ok(())
    }
}

/// Find an employee by numeric id, email, or name ("First Last" / "Last, First").
pub fn resolve_employee<'a>(data: &'a DomainData, key: &str) -> AppResult<&'a Employee> {
    let key = key.trim();

    let found = if let Ok(id) = key.parse::<i64>() {
        data.employee(id)
    } else if key.contains('@') {
        data.employee_by_email(key)
    } else {
        find_employee_by_name(&data.employees, key)
    };

    found.ok_or_else(|| AppError::EmployeeNotFound(key.to_string()))
}
