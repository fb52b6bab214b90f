use crate::errors::{AppError, AppResult};
use crate::models::domain::{DomainData, next_id};
use crate::models::shift::{Shift, ShiftKind};
use chrono::{NaiveDate, NaiveTime};

/// What to put on an (employee, date) cell of the schedule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShiftSpec {
    Regular {
        start: NaiveTime,
        end: NaiveTime,
        break_start: Option<NaiveTime>,
        break_end: Option<NaiveTime>,
        remote: bool,
    },
    DayOff,
    HolidayOff,
}

pub struct ScheduleLogic;

impl ScheduleLogic {
    /// Replace whatever is scheduled for (employee, date).
    pub fn set_shift(
        data: &mut DomainData,
        employee_id: i64,
        date: NaiveDate,
        spec: ShiftSpec,
    ) -> AppResult<i64> {
        if data.employee(employee_id).is_none() {
            return Err(AppError::EmployeeNotFound(employee_id.to_string()));
        }

        let mut shift = match spec {
            ShiftSpec::Regular {
                start,
                end,
                break_start,
                break_end,
                remote,
            } => {
                if start == end {
                    return Err(AppError::InvalidTime(format!(
                        "shift start and end are both {}",
                        start.format("%H:%M")
                    )));
                }
                if break_start.is_some() != break_end.is_some() {
                    return Err(AppError::InvalidTime(
                        "a break needs both a start and an end".into(),
                    ));
                }
                let mut s = Shift::regular(employee_id, date, start, end);
                s.break_start = break_start;
                s.break_end = break_end;
                s.remote = remote;
                s
            }
            ShiftSpec::DayOff => Shift::marker(employee_id, date, ShiftKind::DayOff),
            ShiftSpec::HolidayOff => Shift::marker(employee_id, date, ShiftKind::HolidayOff),
        };

        Self::clear_shift(data, employee_id, date);
        shift.id = next_id(&data.shifts, |s| s.id);
        let id = shift.id;
        data.shifts.push(shift);
        Ok(id)
    }

    /// Remove every shift of (employee, date); returns how many were removed.
    pub fn clear_shift(data: &mut DomainData, employee_id: i64, date: NaiveDate) -> usize {
        let before = data.shifts.len();
        data.shifts
            .retain(|s| !(s.employee_id == employee_id && s.date == date));
        before - data.shifts.len()
    }

    /// Apply a named shift template (e.g. "Mid Shift").
    pub fn set_from_template(
        data: &mut DomainData,
        employee_id: i64,
        date: NaiveDate,
        template: &str,
    ) -> AppResult<i64> {
        let t = data
            .shift_template(template)
            .ok_or_else(|| AppError::Validation(format!("unknown shift template '{template}'")))?;
        let spec = ShiftSpec::Regular {
            start: t.start,
            end: t.end,
            break_start: t.break_start,
            break_end: t.break_end,
            remote: false,
        };
        Self::set_shift(data, employee_id, date, spec)
    }
}
