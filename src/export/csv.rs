// src/export/csv.rs

use crate::errors::AppResult;
use crate::models::domain::DomainData;
use crate::models::shift::ShiftKind;
use crate::utils::time::fmt_hhmm;
use chrono::NaiveDate;
use csv::Writer;
use std::io::Write;

/// `Title,Date,Type`, sorted by date.
pub fn write_holidays<W: Write>(out: W, data: &DomainData) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(["Title", "Date", "Type"])?;

    let mut holidays: Vec<_> = data.holidays.iter().collect();
    holidays.sort_by_key(|h| (h.date, h.title.clone()));

    for h in holidays {
        let date = h.date.format("%Y-%m-%d").to_string();
        wtr.write_record([h.title.as_str(), date.as_str(), h.kind.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// `Type,Abbreviation,Color,Work Extension`
pub fn write_leave_types<W: Write>(out: W, data: &DomainData) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(["Type", "Abbreviation", "Color", "Work Extension"])?;

    for t in &data.leave_types {
        wtr.write_record([
            t.name.as_str(),
            t.abbreviation.as_str(),
            t.color.as_str(),
            if t.is_work_extension { "yes" } else { "no" },
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Schedule code of one cell, in the notation the schedule importer reads.
pub fn schedule_cell(data: &DomainData, employee_id: i64, date: NaiveDate) -> String {
    let shifts: Vec<_> = data.shifts_on(employee_id, date).collect();

    if shifts.iter().any(|s| s.kind == ShiftKind::DayOff) {
        return "OFF".to_string();
    }
    if shifts.iter().any(|s| s.kind == ShiftKind::HolidayOff) {
        return "HOL-OFF".to_string();
    }

    let leave_code = data.approved_leaves_on(employee_id, date).find_map(|l| {
        data.leave_type(&l.leave_type)
            .filter(|t| !t.is_work_extension)
            .map(|t| t.abbreviation.clone())
    });
    if let Some(code) = leave_code {
        return code;
    }

    shifts
        .iter()
        .find(|s| s.kind == ShiftKind::Regular && s.start.is_some() && s.end.is_some())
        .map(|s| format!("{}-{}", fmt_hhmm(s.start), fmt_hhmm(s.end)))
        .unwrap_or_default()
}

/// `Employees,<yyyy-MM-dd>...` with one line per rostered employee.
pub fn write_schedule_matrix<W: Write>(
    out: W,
    data: &DomainData,
    group: Option<&str>,
    days: &[NaiveDate],
) -> AppResult<()> {
    let mut wtr = Writer::from_writer(out);

    let mut header = vec!["Employees".to_string()];
    header.extend(days.iter().map(|d| d.format("%Y-%m-%d").to_string()));
    wtr.write_record(&header)?;

    for e in data.roster(group) {
        if !e.visibility.show_in_schedule {
            continue;
        }
        let mut record = vec![e.full_name()];
        record.extend(days.iter().map(|d| schedule_cell(data, e.id, *d)));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
