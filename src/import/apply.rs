//! Merge parsed import records into the in-memory domain.

use super::schedule::{ScheduleCode, ScheduleEntry};
use crate::models::allowance::Allowance;
use crate::models::domain::{DomainData, next_id};
use crate::models::employee::Employee;
use crate::models::holiday::Holiday;
use crate::models::leave::{Leave, LeaveStatus, LeaveType};
use crate::models::shift::{Shift, ShiftKind};
use crate::models::tardy::TardyRecord;

/// Counts reported after an import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub updated: usize,
}

/// Reason carried by leaves created from schedule leave codes.
pub const IMPORTED_LEAVE_REASON: &str = "Imported from schedule";

fn is_imported_on(l: &Leave, employee_id: i64, date: chrono::NaiveDate) -> bool {
    l.employee_id == employee_id
        && l.start_date == date
        && l.end_date == date
        && l.status == LeaveStatus::Approved
        && l.reason == IMPORTED_LEAVE_REASON
}

/// Shifts are replaced per (employee, date); leave codes become approved
/// single-day leaves. A leave left by an earlier import on the same day is
/// dropped when the new code is anything else.
pub fn apply_schedule(data: &mut DomainData, entries: Vec<ScheduleEntry>) -> MergeStats {
    let mut stats = MergeStats::default();

    for entry in entries {
        let before = data.shifts.len();
        data.shifts
            .retain(|s| !(s.employee_id == entry.employee_id && s.date == entry.date));
        let mut replaced = before != data.shifts.len();

        let keep = match &entry.code {
            ScheduleCode::Leave(name) => Some(name.as_str()),
            _ => None,
        };
        let leaves_before = data.leaves.len();
        data.leaves.retain(|l| {
            !(is_imported_on(l, entry.employee_id, entry.date) && keep != Some(l.leave_type.as_str()))
        });
        replaced |= leaves_before != data.leaves.len();

        let shift = match entry.code {
            ScheduleCode::Off => Some(Shift::marker(entry.employee_id, entry.date, ShiftKind::DayOff)),
            ScheduleCode::HolidayOff => Some(Shift::marker(
                entry.employee_id,
                entry.date,
                ShiftKind::HolidayOff,
            )),
            ScheduleCode::Shift(start, end) => {
                Some(Shift::regular(entry.employee_id, entry.date, start, end))
            }
            ScheduleCode::Leave(leave_type) => {
                let exists = data.leaves.iter().any(|l| {
                    l.employee_id == entry.employee_id
                        && l.leave_type == leave_type
                        && l.start_date == entry.date
                        && l.end_date == entry.date
                        && l.status != LeaveStatus::Rejected
                });
                if exists {
                    replaced = true;
                } else {
                    let id = next_id(&data.leaves, |l| l.id);
                    data.leaves.push(Leave {
                        id,
                        employee_id: entry.employee_id,
                        leave_type,
                        start_date: entry.date,
                        end_date: entry.date,
                        status: LeaveStatus::Approved,
                        reason: IMPORTED_LEAVE_REASON.to_string(),
                        hours: None,
                    });
                }
                None
            }
        };

        if let Some(mut shift) = shift {
            shift.id = next_id(&data.shifts, |s| s.id);
            data.shifts.push(shift);
        }

        if replaced {
            stats.updated += 1;
        } else {
            stats.added += 1;
        }
    }

    stats
}

/// Merge by (title, date): an existing holiday only has its type updated.
pub fn apply_holidays(data: &mut DomainData, holidays: Vec<Holiday>) -> MergeStats {
    let mut stats = MergeStats::default();

    for h in holidays {
        if let Some(existing) = data
            .holidays
            .iter_mut()
            .find(|x| x.date == h.date && x.title.eq_ignore_ascii_case(&h.title))
        {
            existing.kind = h.kind;
            stats.updated += 1;
        } else {
            let id = next_id(&data.holidays, |x| x.id);
            data.holidays.push(Holiday { id, ..h });
            stats.added += 1;
        }
    }

    stats
}

/// Members are parsed against the current roster, so every record is new.
pub fn apply_members(data: &mut DomainData, members: Vec<Employee>) -> MergeStats {
    let mut stats = MergeStats::default();

    for m in members {
        let id = next_id(&data.employees, |e| e.id);
        data.employees.push(Employee { id, ..m });
        stats.added += 1;
    }

    stats
}

pub fn apply_leave_types(data: &mut DomainData, types: Vec<LeaveType>) -> MergeStats {
    let mut stats = MergeStats::default();

    for t in types {
        if let Some(existing) = data
            .leave_types
            .iter_mut()
            .find(|x| x.name.eq_ignore_ascii_case(&t.name))
        {
            existing.abbreviation = t.abbreviation;
            existing.color = t.color;
            existing.is_work_extension = t.is_work_extension;
            stats.updated += 1;
        } else {
            let id = next_id(&data.leave_types, |x| x.id);
            data.leave_types.push(LeaveType { id, ..t });
            stats.added += 1;
        }
    }

    stats
}

pub fn apply_allowances(data: &mut DomainData, allowances: Vec<Allowance>) -> MergeStats {
    let mut stats = MergeStats::default();

    for a in allowances {
        if let Some(existing) = data
            .allowances
            .iter_mut()
            .find(|x| x.employee_id == a.employee_id && x.month == a.month)
        {
            existing.amount = a.amount;
            existing.remarks = a.remarks;
            stats.updated += 1;
        } else {
            let id = next_id(&data.allowances, |x| x.id);
            data.allowances.push(Allowance { id, ..a });
            stats.added += 1;
        }
    }

    stats
}

pub fn apply_tardy(data: &mut DomainData, records: Vec<TardyRecord>) -> MergeStats {
    let mut stats = MergeStats::default();

    for r in records {
        if let Some(existing) = data
            .tardies
            .iter_mut()
            .find(|x| x.employee_id == r.employee_id && x.date == r.date)
        {
            existing.minutes_late = r.minutes_late;
            existing.remarks = r.remarks;
            stats.updated += 1;
        } else {
            let id = next_id(&data.tardies, |x| x.id);
            data.tardies.push(TardyRecord { id, ..r });
            stats.added += 1;
        }
    }

    stats
}
