use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info('{table}')"))?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn mark_applied(conn: &Connection, version: &str, message: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    Ok(())
}

/// Base schema: every domain table.
fn create_base_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id           INTEGER PRIMARY KEY,
            first_name   TEXT NOT NULL,
            middle_name  TEXT,
            last_name    TEXT NOT NULL,
            email        TEXT NOT NULL UNIQUE,
            position     TEXT NOT NULL DEFAULT '',
            grp          TEXT NOT NULL DEFAULT '',
            visibility   TEXT NOT NULL DEFAULT '{}',
            active       INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS shift_templates (
            id           INTEGER PRIMARY KEY,
            name         TEXT NOT NULL UNIQUE,
            start_time   TEXT NOT NULL,
            end_time     TEXT NOT NULL,
            break_start  TEXT,
            break_end    TEXT
        );

        CREATE TABLE IF NOT EXISTS shifts (
            id           INTEGER PRIMARY KEY,
            employee_id  INTEGER NOT NULL,
            date         TEXT NOT NULL,
            kind         TEXT NOT NULL CHECK(kind IN ('regular','off','hol_off')),
            start_time   TEXT,
            end_time     TEXT,
            break_start  TEXT,
            break_end    TEXT
        );

        CREATE TABLE IF NOT EXISTS leave_types (
            id                 INTEGER PRIMARY KEY,
            name               TEXT NOT NULL UNIQUE,
            abbreviation       TEXT NOT NULL,
            color              TEXT NOT NULL DEFAULT '#999999',
            is_work_extension  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS leaves (
            id           INTEGER PRIMARY KEY,
            employee_id  INTEGER NOT NULL,
            leave_type   TEXT NOT NULL,
            start_date   TEXT NOT NULL,
            end_date     TEXT NOT NULL,
            status       TEXT NOT NULL CHECK(status IN ('pending','approved','rejected')),
            reason       TEXT NOT NULL DEFAULT '',
            hours        REAL
        );

        CREATE TABLE IF NOT EXISTS leave_days (
            leave_id     INTEGER NOT NULL REFERENCES leaves(id) ON DELETE CASCADE,
            employee_id  INTEGER NOT NULL,
            date         TEXT NOT NULL,
            PRIMARY KEY (leave_id, date)
        );

        CREATE TABLE IF NOT EXISTS holidays (
            id     INTEGER PRIMARY KEY,
            title  TEXT NOT NULL,
            date   TEXT NOT NULL,
            kind   TEXT NOT NULL DEFAULT 'Regular'
        );

        CREATE TABLE IF NOT EXISTS tasks (
            id           INTEGER PRIMARY KEY,
            employee_id  INTEGER NOT NULL,
            date         TEXT NOT NULL,
            title        TEXT NOT NULL,
            completed    INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS allowances (
            id           INTEGER PRIMARY KEY,
            employee_id  INTEGER NOT NULL,
            month        TEXT NOT NULL,
            amount       REAL NOT NULL,
            remarks      TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS tardy_records (
            id            INTEGER PRIMARY KEY,
            employee_id   INTEGER NOT NULL,
            date          TEXT NOT NULL,
            minutes_late  INTEGER NOT NULL,
            remarks       TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS report_templates (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            name         TEXT NOT NULL UNIQUE,
            kind         TEXT NOT NULL,
            file_name    TEXT NOT NULL,
            content      BLOB NOT NULL,
            uploaded_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_shifts_emp_date ON shifts(employee_id, date);
        CREATE INDEX IF NOT EXISTS idx_leave_days_emp_date ON leave_days(employee_id, date);
        CREATE INDEX IF NOT EXISTS idx_holidays_date ON holidays(date);
        "#,
    )?;
    Ok(())
}

fn migrate_add_shift_remote_flag(conn: &Connection) -> Result<()> {
    let version = "20250310_0002_add_shift_remote_flag";

    if is_applied(conn, version)? {
        return Ok(());
    }

    if !table_has_column(conn, "shifts", "remote")? {
        conn.execute(
            "ALTER TABLE shifts ADD COLUMN remote INTEGER NOT NULL DEFAULT 0;",
            [],
        )?;
    }

    mark_applied(conn, version, "Added remote (WFH) flag to shifts")?;
    success(format!(
        "Migration applied: {} → added 'remote' to shifts table",
        version
    ));
    Ok(())
}

fn migrate_seed_default_shift_templates(conn: &Connection) -> Result<()> {
    let version = "20250310_0003_seed_default_shift_templates";

    if is_applied(conn, version)? {
        return Ok(());
    }

    conn.execute_batch(
        r#"
        INSERT OR IGNORE INTO shift_templates (name, start_time, end_time, break_start, break_end)
        VALUES ('Manager Shift', '08:00', '17:00', '12:00', '13:00');
        INSERT OR IGNORE INTO shift_templates (name, start_time, end_time, break_start, break_end)
        VALUES ('Mid Shift', '10:00', '19:00', '14:00', '15:00');
        "#,
    )?;

    mark_applied(conn, version, "Seeded default shift templates")?;
    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    let run = || -> Result<()> {
        ensure_log_table(conn)?;

        let fresh = !table_exists(conn, "employees")?;
        create_base_schema(conn)?;
        if fresh {
            success("Created shiftdesk schema.");
        }

        migrate_add_shift_remote_flag(conn)?;
        migrate_seed_default_shift_templates(conn)?;
        Ok(())
    };

    run().map_err(|e| AppError::Migration(e.to_string()))
}
