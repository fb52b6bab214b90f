//! Report orchestration: data rows → tokens → template or built-in layout.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::export::ReportFormat;
use crate::export::pdf::PdfManager;
use crate::export::xlsx::render_table;
use crate::models::domain::DomainData;
use crate::models::report_kind::ReportKind;
use crate::report::data::{ReportRow, generate};
use crate::report::package::XlsxPackage;
use crate::report::template::{TokenMap, expand_rows, fill_grid, replace_tokens, substitute_globals};
use crate::report::tokens::{ReportContext, columns, global_tokens, grid_data, row_tokens};
use crate::utils::date::days_between;

pub struct ReportOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub rows: usize,
}

pub fn output_file_name(ctx: &ReportContext, format: ReportFormat) -> String {
    format!(
        "{}_{}_{}.{}",
        ctx.kind.as_str(),
        ctx.start.format("%Y-%m-%d"),
        ctx.end.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Fails when the workbook cannot be read or lacks the kind's anchor token.
pub fn validate_template(bytes: &[u8], kind: ReportKind) -> AppResult<()> {
    let package = XlsxPackage::read(bytes)?;
    if !package.sheet.contains_text(kind.anchor_token()) {
        return Err(AppError::TemplateAnchorMissing {
            anchor: kind.anchor_token().to_string(),
        });
    }
    Ok(())
}

/// Fill an uploaded template with already-built token maps.
pub fn render_template(
    template: &[u8],
    kind: ReportKind,
    globals: &TokenMap,
    rows: &[TokenMap],
) -> AppResult<Vec<u8>> {
    let mut package = XlsxPackage::read(template)?;
    substitute_globals(&mut package.sheet, globals);
    expand_rows(&mut package.sheet, kind.anchor_token(), rows)?;
    package.to_bytes()
}

pub fn generate_report(
    data: &DomainData,
    cfg: &Config,
    ctx: &ReportContext,
    template: Option<&[u8]>,
    format: ReportFormat,
) -> AppResult<ReportOutput> {
    cfg.validate()?;
    let rows = generate(data, cfg, ctx.group, ctx.start, ctx.end);
    let globals = global_tokens(cfg, ctx);

    let bytes = match (template, format) {
        (Some(_), ReportFormat::Pdf) => {
            return Err(AppError::Validation(
                "templates render to xlsx only; drop --template for a PDF report".into(),
            ));
        }
        (Some(bytes), ReportFormat::Xlsx) => fill_template(bytes, cfg, ctx, &globals, &rows)?,
        (None, format) => render_builtin(cfg, ctx, &globals, &rows, format)?,
    };

    Ok(ReportOutput {
        file_name: output_file_name(ctx, format),
        bytes,
        rows: rows.len(),
    })
}

fn fill_template(
    template: &[u8],
    cfg: &Config,
    ctx: &ReportContext,
    globals: &TokenMap,
    rows: &[ReportRow],
) -> AppResult<Vec<u8>> {
    if ctx.kind.is_grid() {
        let mut package = XlsxPackage::read(template)?;
        substitute_globals(&mut package.sheet, globals);
        let grid = grid_data(cfg, rows, &days_between(ctx.start, ctx.end));
        fill_grid(&mut package.sheet, ctx.kind.anchor_token(), &grid)?;
        return package.to_bytes();
    }

    let maps: Vec<TokenMap> = rows.iter().map(|r| row_tokens(cfg, ctx.kind, r)).collect();
    render_template(template, ctx.kind, globals, &maps)
}

/// Header and body of the built-in table for a report kind.
pub fn table(cfg: &Config, ctx: &ReportContext, rows: &[ReportRow]) -> (Vec<String>, Vec<Vec<String>>) {
    if ctx.kind.is_grid() {
        let days = days_between(ctx.start, ctx.end);
        let grid = grid_data(cfg, rows, &days);

        let mut headers = vec!["Employee".to_string()];
        headers.extend(days.iter().map(|d| d.format("%m/%d").to_string()));

        let body = grid
            .employees
            .iter()
            .zip(&grid.cells)
            .map(|(name, cells)| {
                let mut line = vec![name.clone()];
                line.extend(cells.iter().cloned());
                line
            })
            .collect();
        return (headers, body);
    }

    let cols = columns(ctx.kind);
    let headers = cols.iter().map(|(h, _)| h.to_string()).collect();
    let body = rows
        .iter()
        .map(|r| {
            let tokens = row_tokens(cfg, ctx.kind, r);
            cols.iter()
                .map(|(_, t)| tokens.get(*t).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    (headers, body)
}

fn render_builtin(
    cfg: &Config,
    ctx: &ReportContext,
    globals: &TokenMap,
    rows: &[ReportRow],
    format: ReportFormat,
) -> AppResult<Vec<u8>> {
    let title = replace_tokens(
        &format!("{} · {{{{company}}}} · {{{{start_date}}}} to {{{{end_date}}}}", ctx.kind.title()),
        globals,
    );
    let (headers, body) = table(cfg, ctx, rows);

    match format {
        ReportFormat::Xlsx => render_table(&title, &headers, &body, &cfg.report_date_format),
        ReportFormat::Pdf => {
            let mut pdf = PdfManager::new(headers.len() > 8);
            pdf.write_table(&title, &headers, &body);
            Ok(pdf.finish())
        }
    }
}
