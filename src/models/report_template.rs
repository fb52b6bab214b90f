use super::report_kind::ReportKind;

/// An uploaded spreadsheet template, stored verbatim.
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    pub id: i64,
    pub name: String,
    pub kind: ReportKind,
    pub file_name: String,
    pub content: Vec<u8>,
    pub uploaded_at: String,
}
