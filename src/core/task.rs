use crate::errors::{AppError, AppResult};
use crate::models::domain::{DomainData, next_id};
use crate::models::task::ShiftTask;
use chrono::NaiveDate;

pub struct TaskLogic;

impl TaskLogic {
    pub fn add(data: &mut DomainData, employee_id: i64, date: NaiveDate, title: &str) -> AppResult<i64> {
        if data.employee(employee_id).is_none() {
            return Err(AppError::EmployeeNotFound(employee_id.to_string()));
        }
        if title.trim().is_empty() {
            return Err(AppError::Validation("task title is required".into()));
        }

        let id = next_id(&data.tasks, |t| t.id);
        data.tasks.push(ShiftTask {
            id,
            employee_id,
            date,
            title: title.trim().to_string(),
            completed: false,
        });
        Ok(id)
    }

    pub fn complete(data: &mut DomainData, task_id: i64) -> AppResult<()> {
        let task = data
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or(AppError::TaskNotFound(task_id))?;
        task.completed = true;
        Ok(())
    }
}
