use super::{load, period_or_current_month};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::errors::AppResult;
use crate::export::csv::{write_holidays, write_leave_types, write_schedule_matrix};
use crate::export::fs_utils::ensure_writable;
use crate::export::{ExportTarget, notify_export_success};
use crate::utils::date::days_between;
use crate::utils::path::expand_tilde;
use std::fs::File;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        target,
        file,
        period,
        group,
        force,
    } = cmd
    {
        let path = expand_tilde(file);
        ensure_writable(&path, *force)?;

        let (pool, data) = load(cfg)?;
        let out = File::create(&path)?;

        match target {
            ExportTarget::Holidays => write_holidays(out, &data)?,
            ExportTarget::LeaveTypes => write_leave_types(out, &data)?,
            ExportTarget::Schedule => {
                let (start, end) = period_or_current_month(period.as_deref())?;
                write_schedule_matrix(out, &data, group.as_deref(), &days_between(start, end))?
            }
        }

        audit_quiet(
            &pool.conn,
            "export",
            target.as_str(),
            &format!("Exported {} to {}", target.as_str(), path.display()),
        );
        notify_export_success(target.as_str(), &path);
    }

    Ok(())
}
