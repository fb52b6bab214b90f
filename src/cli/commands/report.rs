use super::load;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::templates::load_template;
use crate::errors::{AppError, AppResult};
use crate::export::fs_utils::write_output;
use crate::export::notify_export_success;
use crate::export::range::parse_period;
use crate::report::generate::generate_report;
use crate::report::tokens::ReportContext;
use crate::ui::messages::{detail, info, warning};
use crate::utils::date::today;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Report {
        kind,
        period,
        group,
        template,
        format,
        out,
        force,
    } = cmd
    {
        let (start, end) = parse_period(period)?;
        let (pool, data) = load(cfg)?;

        let stored = match template {
            Some(name) => {
                let t = load_template(&pool.conn, name)?;
                if t.kind != *kind {
                    return Err(AppError::Validation(format!(
                        "template '{name}' is a {} template, not {kind}",
                        t.kind
                    )));
                }
                Some(t)
            }
            None => None,
        };

        let ctx = ReportContext {
            kind: *kind,
            start,
            end,
            group: group.as_deref(),
            generated_on: today(),
        };

        info(format!("Generating {} report for {start} to {end}", kind.title()));
        if let Some(t) = &stored {
            detail(format!("template: {} ({})", t.name, t.file_name));
        }
        let output = generate_report(
            &data,
            cfg,
            &ctx,
            stored.as_ref().map(|t| t.content.as_slice()),
            *format,
        )?;

        if output.rows == 0 {
            warning("No employees or days in the selected period; the report is empty.");
        }

        let path = expand_tilde(out).join(&output.file_name);
        write_output(&path, &output.bytes, *force)?;

        audit_quiet(
            &pool.conn,
            "report",
            kind.as_str(),
            &format!("{} rows written to {}", output.rows, path.display()),
        );
        notify_export_success(kind.title(), &path);
    }

    Ok(())
}
