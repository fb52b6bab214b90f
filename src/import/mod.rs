//! CSV importers.
//!
//! Every importer runs the same pipeline: read the table, check the
//! required headers (aborting with the full list of missing ones), turn each
//! line into a [`RowOutcome`], then collect. Skipped lines are reported as
//! warnings; an import with no valid line fails.
//!
//! Parsing never touches the database. `apply` merges parsed records into a
//! [`DomainData`](crate::models::domain::DomainData) which the caller saves.

pub mod allowances;
pub mod apply;
pub mod holidays;
pub mod leave_types;
pub mod members;
pub mod names;
pub mod schedule;
pub mod tardy;

use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ImportKind {
    Schedule,
    Holidays,
    Members,
    LeaveTypes,
    Allowances,
    Tardy,
}

impl ImportKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Schedule => "schedule",
            ImportKind::Holidays => "holidays",
            ImportKind::Members => "members",
            ImportKind::LeaveTypes => "leave-types",
            ImportKind::Allowances => "allowances",
            ImportKind::Tardy => "tardy",
        }
    }
}

/// Result of validating one CSV line (or one schedule cell).
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome<T> {
    Parsed(T),
    Skipped { line: usize, reason: String },
}

impl<T> RowOutcome<T> {
    pub fn skip(line: usize, reason: impl Into<String>) -> Self {
        RowOutcome::Skipped {
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome<T> {
    pub records: Vec<T>,
    /// (line, reason)
    pub skipped: Vec<(usize, String)>,
}

/// A CSV file with normalized headers and line-numbered records.
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<(usize, StringRecord)>,
}

fn normalize(h: &str) -> String {
    h.trim_start_matches('\u{feff}').trim().to_lowercase()
}

impl CsvTable {
    pub fn read<R: Read>(input: R) -> AppResult<Self> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(input);

        let headers = rdr
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for (idx, record) in rdr.records().enumerate() {
            let record = record?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            let line = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);
            rows.push((line, record));
        }

        Ok(Self { headers, rows })
    }

    /// Column index of a header, case-insensitive.
    pub fn column(&self, name: &str) -> Option<usize> {
        let wanted = normalize(name);
        self.headers.iter().position(|h| normalize(h) == wanted)
    }

    pub fn require_headers(&self, required: &[&str]) -> AppResult<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|r| self.column(r).is_none())
            .map(|r| r.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingHeaders(missing))
        }
    }

    /// Value of a named column on a record ("" when absent).
    pub fn value<'r>(&self, record: &'r StringRecord, name: &str) -> &'r str {
        self.column(name)
            .and_then(|i| record.get(i))
            .unwrap_or("")
    }
}

/// Report skipped lines and fail when nothing validated.
pub fn finish<T>(kind: &str, outcomes: Vec<RowOutcome<T>>) -> AppResult<ImportOutcome<T>> {
    let mut records = Vec::new();
    let mut skipped = Vec::new();

    for o in outcomes {
        match o {
            RowOutcome::Parsed(r) => records.push(r),
            RowOutcome::Skipped { line, reason } => {
                warning(format!("{kind} import, line {line}: {reason} (skipped)"));
                skipped.push((line, reason));
            }
        }
    }

    if records.is_empty() {
        return Err(AppError::NoValidRows(kind.to_string()));
    }

    Ok(ImportOutcome { records, skipped })
}

/// Parse a yes/no style flag; empty means `false`.
pub(crate) fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "" | "no" | "n" | "false" | "0" => Some(false),
        "yes" | "y" | "true" | "1" => Some(true),
        _ => None,
    }
}
