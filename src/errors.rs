//! Unified application error type.
//! All modules (db, core, import, report, cli) return AppError to keep the
//! error handling consistent and easy to surface to the user.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("An employee with email '{0}' already exists")]
    DuplicateEmail(String),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Invalid value: {0}")]
    Validation(String),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingHeaders(Vec<String>),

    #[error("No valid rows found in {0} import")]
    NoValidRows(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Not-found errors
    // ---------------------------
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    #[error("Leave type not found: {0}")]
    LeaveTypeNotFound(String),

    #[error("Leave request not found: {0}")]
    LeaveNotFound(i64),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("Report template not found: {0}")]
    TemplateNotFound(String),

    // ---------------------------
    // Template / spreadsheet errors
    // ---------------------------
    #[error("Template row not found: no cell contains the anchor token {anchor}")]
    TemplateAnchorMissing { anchor: String },

    #[error("Invalid template: {0}")]
    Template(String),

    #[error("Spreadsheet archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Spreadsheet XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Spreadsheet XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("XLSX writer error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("{0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
