//! In-memory snapshot of every domain table.
//!
//! Commands load a `DomainData` with `db::store::fetch_all`, mutate it
//! through the `core` operations and write it back with `save_all`.

use super::allowance::Allowance;
use super::employee::Employee;
use super::holiday::Holiday;
use super::leave::{Leave, LeaveType};
use super::shift::{Shift, ShiftTemplate};
use super::tardy::TardyRecord;
use super::task::ShiftTask;
use chrono::NaiveDate;

#[derive(Debug, Clone, Default)]
pub struct DomainData {
    pub employees: Vec<Employee>,
    pub shift_templates: Vec<ShiftTemplate>,
    pub shifts: Vec<Shift>,
    pub leave_types: Vec<LeaveType>,
    pub leaves: Vec<Leave>,
    pub holidays: Vec<Holiday>,
    pub tasks: Vec<ShiftTask>,
    pub allowances: Vec<Allowance>,
    pub tardies: Vec<TardyRecord>,
}

/// Next free id for a collection (ids are only unique per table).
pub fn next_id<T>(items: &[T], id_of: impl Fn(&T) -> i64) -> i64 {
    items.iter().map(id_of).max().unwrap_or(0) + 1
}

impl DomainData {
    pub fn employee(&self, id: i64) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn employee_by_email(&self, email: &str) -> Option<&Employee> {
        self.employees
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email.trim()))
    }

    pub fn leave_type(&self, name: &str) -> Option<&LeaveType> {
        self.leave_types
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn leave_type_by_abbreviation(&self, code: &str) -> Option<&LeaveType> {
        self.leave_types
            .iter()
            .find(|t| t.abbreviation.eq_ignore_ascii_case(code.trim()))
    }

    pub fn shift_template(&self, name: &str) -> Option<&ShiftTemplate> {
        self.shift_templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn shifts_on(&self, employee_id: i64, date: NaiveDate) -> impl Iterator<Item = &Shift> {
        self.shifts
            .iter()
            .filter(move |s| s.employee_id == employee_id && s.date == date)
    }

    pub fn holiday_on(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.iter().find(|h| h.date == date)
    }

    pub fn approved_leaves_on(
        &self,
        employee_id: i64,
        date: NaiveDate,
    ) -> impl Iterator<Item = &Leave> {
        self.leaves
            .iter()
            .filter(move |l| l.employee_id == employee_id && l.is_approved() && l.covers(date))
    }

    pub fn tardy_on(&self, employee_id: i64, date: NaiveDate) -> Option<&TardyRecord> {
        self.tardies
            .iter()
            .find(|t| t.employee_id == employee_id && t.date == date)
    }

    /// Active employees of a group (all groups when `None`), sorted by last/first name.
    pub fn roster(&self, group: Option<&str>) -> Vec<&Employee> {
        let mut out: Vec<&Employee> = self
            .employees
            .iter()
            .filter(|e| e.active && e.in_group(group))
            .collect();
        out.sort_by(|a, b| {
            (a.last_name.to_lowercase(), a.first_name.to_lowercase())
                .cmp(&(b.last_name.to_lowercase(), b.first_name.to_lowercase()))
        });
        out
    }
}
