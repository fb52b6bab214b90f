// src/export/mod.rs

pub mod csv;
mod excel_date;
pub(crate) mod fs_utils;
pub mod pdf;
pub mod range;
pub mod xlsx;

use crate::ui::messages::success;
use clap::ValueEnum;
use std::path::Path;

pub(crate) fn notify_export_success(label: &str, path: &Path) {
    success(format!("{label} export completed: {}", path.display()));
}

/// Datasets that can be exported in their import format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportTarget {
    Holidays,
    LeaveTypes,
    Schedule,
}

impl ExportTarget {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportTarget::Holidays => "holidays",
            ExportTarget::LeaveTypes => "leave-types",
            ExportTarget::Schedule => "schedule",
        }
    }
}

/// Output format of generated reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Xlsx,
    Pdf,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Xlsx => "xlsx",
            ReportFormat::Pdf => "pdf",
        }
    }
}
