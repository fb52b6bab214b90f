//! Whole-domain fetch/save boundary.
//!
//! `fetch_all` hydrates every table into typed records; `save_all` replaces
//! every table inside one transaction (delete-then-insert), rebuilding the
//! per-day `leave_days` rows from each leave's date range. A save overwrites,
//! it never merges.

use crate::errors::{AppError, AppResult};
use crate::models::allowance::Allowance;
use crate::models::domain::DomainData;
use crate::models::employee::{Employee, Visibility};
use crate::models::holiday::{Holiday, HolidayKind};
use crate::models::leave::{Leave, LeaveStatus, LeaveType};
use crate::models::shift::{Shift, ShiftKind, ShiftTemplate};
use crate::models::tardy::TardyRecord;
use crate::models::task::ShiftTask;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row, params};

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M";

fn conversion_error(err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(err))
}

fn date_col(row: &Row, col: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(col)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT)
        .map_err(|_| conversion_error(AppError::InvalidDate(raw.clone())))
}

fn time_col(row: &Row, col: &str) -> rusqlite::Result<NaiveTime> {
    let raw: String = row.get(col)?;
    NaiveTime::parse_from_str(&raw, TIME_FMT)
        .map_err(|_| conversion_error(AppError::InvalidTime(raw.clone())))
}

fn opt_time_col(row: &Row, col: &str) -> rusqlite::Result<Option<NaiveTime>> {
    let raw: Option<String> = row.get(col)?;
    match raw {
        Some(s) if !s.trim().is_empty() => NaiveTime::parse_from_str(&s, TIME_FMT)
            .map(Some)
            .map_err(|_| conversion_error(AppError::InvalidTime(s.clone()))),
        _ => Ok(None),
    }
}

fn fmt_date(d: &NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

fn fmt_time(t: &Option<NaiveTime>) -> Option<String> {
    t.map(|t| t.format(TIME_FMT).to_string())
}

fn query_all<T>(
    conn: &Connection,
    sql: &str,
    map: impl FnMut(&Row) -> rusqlite::Result<T>,
) -> AppResult<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map([], map)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

fn map_employee(row: &Row) -> rusqlite::Result<Employee> {
    let raw_visibility: String = row.get("visibility")?;
    let visibility: Visibility = serde_json::from_str(&raw_visibility)
        .map_err(|e| conversion_error(AppError::Json(e)))?;

    Ok(Employee {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        middle_name: row.get("middle_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        position: row.get("position")?,
        group: row.get("grp")?,
        visibility,
        active: row.get::<_, i32>("active")? == 1,
    })
}

fn map_shift(row: &Row) -> rusqlite::Result<Shift> {
    let kind_str: String = row.get("kind")?;
    let kind = ShiftKind::from_db_str(&kind_str).ok_or_else(|| {
        conversion_error(AppError::Validation(format!("shift kind '{kind_str}'")))
    })?;

    Ok(Shift {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date: date_col(row, "date")?,
        kind,
        start: opt_time_col(row, "start_time")?,
        end: opt_time_col(row, "end_time")?,
        break_start: opt_time_col(row, "break_start")?,
        break_end: opt_time_col(row, "break_end")?,
        remote: row.get::<_, i32>("remote")? == 1,
    })
}

fn map_shift_template(row: &Row) -> rusqlite::Result<ShiftTemplate> {
    Ok(ShiftTemplate {
        id: row.get("id")?,
        name: row.get("name")?,
        start: time_col(row, "start_time")?,
        end: time_col(row, "end_time")?,
        break_start: opt_time_col(row, "break_start")?,
        break_end: opt_time_col(row, "break_end")?,
    })
}

fn map_leave_type(row: &Row) -> rusqlite::Result<LeaveType> {
    Ok(LeaveType {
        id: row.get("id")?,
        name: row.get("name")?,
        abbreviation: row.get("abbreviation")?,
        color: row.get("color")?,
        is_work_extension: row.get::<_, i32>("is_work_extension")? == 1,
    })
}

fn map_leave(row: &Row) -> rusqlite::Result<Leave> {
    let status_str: String = row.get("status")?;
    let status = LeaveStatus::from_db_str(&status_str).ok_or_else(|| {
        conversion_error(AppError::Validation(format!(
            "leave status '{status_str}'"
        )))
    })?;

    Ok(Leave {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        leave_type: row.get("leave_type")?,
        start_date: date_col(row, "start_date")?,
        end_date: date_col(row, "end_date")?,
        status,
        reason: row.get("reason")?,
        hours: row.get("hours")?,
    })
}

fn map_holiday(row: &Row) -> rusqlite::Result<Holiday> {
    let kind_str: String = row.get("kind")?;
    Ok(Holiday {
        id: row.get("id")?,
        title: row.get("title")?,
        date: date_col(row, "date")?,
        kind: HolidayKind::parse(&kind_str).unwrap_or(HolidayKind::Regular),
    })
}

fn map_task(row: &Row) -> rusqlite::Result<ShiftTask> {
    Ok(ShiftTask {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date: date_col(row, "date")?,
        title: row.get("title")?,
        completed: row.get::<_, i32>("completed")? == 1,
    })
}

fn map_allowance(row: &Row) -> rusqlite::Result<Allowance> {
    Ok(Allowance {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        month: row.get("month")?,
        amount: row.get("amount")?,
        remarks: row.get("remarks")?,
    })
}

fn map_tardy(row: &Row) -> rusqlite::Result<TardyRecord> {
    Ok(TardyRecord {
        id: row.get("id")?,
        employee_id: row.get("employee_id")?,
        date: date_col(row, "date")?,
        minutes_late: row.get("minutes_late")?,
        remarks: row.get("remarks")?,
    })
}

/// Load every domain table into memory.
pub fn fetch_all(conn: &Connection) -> AppResult<DomainData> {
    Ok(DomainData {
        employees: query_all(conn, "SELECT * FROM employees ORDER BY id", map_employee)?,
        shift_templates: query_all(
            conn,
            "SELECT * FROM shift_templates ORDER BY id",
            map_shift_template,
        )?,
        shifts: query_all(conn, "SELECT * FROM shifts ORDER BY date, id", map_shift)?,
        leave_types: query_all(conn, "SELECT * FROM leave_types ORDER BY id", map_leave_type)?,
        leaves: query_all(conn, "SELECT * FROM leaves ORDER BY start_date, id", map_leave)?,
        holidays: query_all(conn, "SELECT * FROM holidays ORDER BY date, id", map_holiday)?,
        tasks: query_all(conn, "SELECT * FROM tasks ORDER BY date, id", map_task)?,
        allowances: query_all(
            conn,
            "SELECT * FROM allowances ORDER BY month, id",
            map_allowance,
        )?,
        tardies: query_all(
            conn,
            "SELECT * FROM tardy_records ORDER BY date, id",
            map_tardy,
        )?,
    })
}

/// Translate constraint violations on employee inserts into user-facing errors.
fn employee_insert_error(e: rusqlite::Error, emp: &Employee) -> AppError {
    match &e {
        rusqlite::Error::SqliteFailure(err, msg)
            if err.code == ErrorCode::ConstraintViolation
                && msg.as_deref().is_some_and(|m| m.contains("employees.email")) =>
        {
            AppError::DuplicateEmail(emp.email.clone())
        }
        _ => AppError::Db(e),
    }
}

/// Replace every domain table with the content of `data`, atomically.
pub fn save_all(conn: &mut Connection, data: &DomainData) -> AppResult<()> {
    let tx = conn.transaction()?;

    tx.execute_batch(
        r#"
        DELETE FROM leave_days;
        DELETE FROM leaves;
        DELETE FROM tasks;
        DELETE FROM allowances;
        DELETE FROM tardy_records;
        DELETE FROM shifts;
        DELETE FROM shift_templates;
        DELETE FROM leave_types;
        DELETE FROM holidays;
        DELETE FROM employees;
        "#,
    )?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO employees (id, first_name, middle_name, last_name, email, position, grp, visibility, active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for e in &data.employees {
            let visibility = serde_json::to_string(&e.visibility)?;
            stmt.execute(params![
                e.id,
                e.first_name,
                e.middle_name,
                e.last_name,
                e.email,
                e.position,
                e.group,
                visibility,
                if e.active { 1 } else { 0 },
            ])
            .map_err(|err| employee_insert_error(err, e))?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO shift_templates (id, name, start_time, end_time, break_start, break_end)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for t in &data.shift_templates {
            stmt.execute(params![
                t.id,
                t.name,
                t.start.format(TIME_FMT).to_string(),
                t.end.format(TIME_FMT).to_string(),
                fmt_time(&t.break_start),
                fmt_time(&t.break_end),
            ])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO shifts (id, employee_id, date, kind, start_time, end_time, break_start, break_end, remote)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )?;
        for s in &data.shifts {
            stmt.execute(params![
                s.id,
                s.employee_id,
                fmt_date(&s.date),
                s.kind.to_db_str(),
                fmt_time(&s.start),
                fmt_time(&s.end),
                fmt_time(&s.break_start),
                fmt_time(&s.break_end),
                if s.remote { 1 } else { 0 },
            ])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO leave_types (id, name, abbreviation, color, is_work_extension)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for t in &data.leave_types {
            stmt.execute(params![
                t.id,
                t.name,
                t.abbreviation,
                t.color,
                if t.is_work_extension { 1 } else { 0 },
            ])?;
        }
    }

    {
        let mut leave_stmt = tx.prepare(
            "INSERT INTO leaves (id, employee_id, leave_type, start_date, end_date, status, reason, hours)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        let mut day_stmt = tx.prepare(
            "INSERT INTO leave_days (leave_id, employee_id, date) VALUES (?1, ?2, ?3)",
        )?;
        for l in &data.leaves {
            leave_stmt.execute(params![
                l.id,
                l.employee_id,
                l.leave_type,
                fmt_date(&l.start_date),
                fmt_date(&l.end_date),
                l.status.to_db_str(),
                l.reason,
                l.hours,
            ])?;
            for day in l.days() {
                day_stmt.execute(params![l.id, l.employee_id, fmt_date(&day)])?;
            }
        }
    }

    {
        let mut stmt =
            tx.prepare("INSERT INTO holidays (id, title, date, kind) VALUES (?1, ?2, ?3, ?4)")?;
        for h in &data.holidays {
            stmt.execute(params![h.id, h.title, fmt_date(&h.date), h.kind.as_str()])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO tasks (id, employee_id, date, title, completed) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for t in &data.tasks {
            stmt.execute(params![
                t.id,
                t.employee_id,
                fmt_date(&t.date),
                t.title,
                if t.completed { 1 } else { 0 },
            ])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO allowances (id, employee_id, month, amount, remarks) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for a in &data.allowances {
            stmt.execute(params![a.id, a.employee_id, a.month, a.amount, a.remarks])?;
        }
    }

    {
        let mut stmt = tx.prepare(
            "INSERT INTO tardy_records (id, employee_id, date, minutes_late, remarks)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;
        for t in &data.tardies {
            stmt.execute(params![
                t.id,
                t.employee_id,
                fmt_date(&t.date),
                t.minutes_late,
                t.remarks,
            ])?;
        }
    }

    tx.commit()?;
    Ok(())
}
