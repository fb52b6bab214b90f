use crate::db::templates::{delete_template, list_templates, upsert_template};
use crate::errors::{AppError, AppResult};
use crate::models::report_kind::ReportKind;
use crate::models::report_template::ReportTemplate;
use crate::report::generate::validate_template;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

pub struct TemplateLogic;

impl TemplateLogic {
    /// Read, validate and store an `.xlsx` template under `name`.
    pub fn upload(conn: &Connection, name: &str, kind: ReportKind, file: &Path) -> AppResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("template name is required".into()));
        }

        let bytes = fs::read(file)?;
        validate_template(&bytes, kind)?;

        let file_name = file
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("{name}.xlsx"));

        upsert_template(conn, name, kind, &file_name, &bytes)
    }

    pub fn list(conn: &Connection) -> AppResult<Vec<ReportTemplate>> {
        list_templates(conn)
    }

    pub fn delete(conn: &Connection, name: &str) -> AppResult<()> {
        delete_template(conn, name)
    }
}
