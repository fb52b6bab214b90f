use crate::errors::{AppError, AppResult};
use crate::models::domain::{DomainData, next_id};
use crate::models::holiday::{Holiday, HolidayKind};
use chrono::NaiveDate;

pub struct HolidayLogic;

impl HolidayLogic {
    pub fn add(data: &mut DomainData, title: &str, date: NaiveDate, kind: HolidayKind) -> AppResult<i64> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::Validation("holiday title is required".into()));
        }
        if data
            .holidays
            .iter()
            .any(|h| h.date == date && h.title.eq_ignore_ascii_case(title))
        {
            return Err(AppError::Validation(format!("holiday '{title}' on {date} already exists")));
        }

        let id = next_id(&data.holidays, |h| h.id);
        data.holidays.push(Holiday {
            id,
            title: title.to_string(),
            date,
            kind,
        });
        Ok(id)
    }

    /// Remove every holiday on `date`; returns the removed titles.
    pub fn remove(data: &mut DomainData, date: NaiveDate) -> AppResult<Vec<String>> {
        let removed: Vec<String> = data
            .holidays
            .iter()
            .filter(|h| h.date == date)
            .map(|h| h.title.clone())
            .collect();
        if removed.is_empty() {
            return Err(AppError::Validation(format!("no holiday on {date}")));
        }
        data.holidays.retain(|h| h.date != date);
        Ok(removed)
    }
}
