//! Uploaded report templates live in their own table; they are not part of
//! the whole-domain save.

use crate::errors::{AppError, AppResult};
use crate::models::report_kind::ReportKind;
use crate::models::report_template::ReportTemplate;
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn map_template(row: &Row) -> rusqlite::Result<ReportTemplate> {
    let kind_str: String = row.get("kind")?;
    let kind = ReportKind::parse(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::Validation(format!("report kind '{kind_str}'"))),
        )
    })?;

    Ok(ReportTemplate {
        id: row.get("id")?,
        name: row.get("name")?,
        kind,
        file_name: row.get("file_name")?,
        content: row.get("content")?,
        uploaded_at: row.get("uploaded_at")?,
    })
}

/// Store a template, replacing any previous template with the same name.
pub fn upsert_template(
    conn: &Connection,
    name: &str,
    kind: ReportKind,
    file_name: &str,
    content: &[u8],
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO report_templates (name, kind, file_name, content, uploaded_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(name) DO UPDATE SET
            kind = excluded.kind,
            file_name = excluded.file_name,
            content = excluded.content,
            uploaded_at = excluded.uploaded_at",
        params![
            name,
            kind.as_str(),
            file_name,
            content,
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(())
}

pub fn load_template(conn: &Connection, name: &str) -> AppResult<ReportTemplate> {
    conn.query_row(
        "SELECT * FROM report_templates WHERE name = ?1",
        [name],
        map_template,
    )
    .optional()?
    .ok_or_else(|| AppError::TemplateNotFound(name.to_string()))
}

pub fn list_templates(conn: &Connection) -> AppResult<Vec<ReportTemplate>> {
    let mut stmt = conn.prepare("SELECT * FROM report_templates ORDER BY kind, name")?;
    let rows = stmt.query_map([], map_template)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn delete_template(conn: &Connection, name: &str) -> AppResult<()> {
    let n = conn.execute("DELETE FROM report_templates WHERE name = ?1", [name])?;
    if n == 0 {
        return Err(AppError::TemplateNotFound(name.to_string()));
    }
    Ok(())
}
