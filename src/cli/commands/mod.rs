//! One handler per subcommand.
//!
//! Domain commands follow the same cycle: open the database, load the whole
//! domain, run one `core` operation, save it back and write an audit line.

pub mod allowance;
pub mod config;
pub mod employee;
pub mod export;
pub mod holiday;
pub mod import;
pub mod init;
pub mod leave;
pub mod list;
pub mod log;
pub mod report;
pub mod shift;
pub mod tardy;
pub mod task;
pub mod template;

use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::store::{fetch_all, save_all};
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_period;
use crate::models::domain::DomainData;
use crate::utils::date::{all_days_of_month, parse_date, today};
use chrono::{Datelike, NaiveDate};

pub(crate) fn load(cfg: &Config) -> AppResult<(DbPool, DomainData)> {
    let pool = DbPool::open_ready(&cfg.database)?;
    let data = fetch_all(&pool.conn)?;
    Ok((pool, data))
}

/// Persist the domain and record the operation in the internal log.
pub(crate) fn save(
    pool: &mut DbPool,
    data: &DomainData,
    operation: &str,
    target: &str,
    message: &str,
) -> AppResult<()> {
    save_all(&mut pool.conn, data)?;
    audit_quiet(&pool.conn, operation, target, message);
    Ok(())
}

pub(crate) fn date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(format!("{s} (expected YYYY-MM-DD or MM/DD/YYYY)")))
}

/// Explicit period, or the current month.
pub(crate) fn period_or_current_month(period: Option<&str>) -> AppResult<(NaiveDate, NaiveDate)> {
    if let Some(p) = period {
        return parse_period(p);
    }
    let now = today();
    let days = all_days_of_month(now.year(), now.month());
    match (days.first(), days.last()) {
        (Some(a), Some(b)) => Ok((*a, *b)),
        _ => Err(AppError::InvalidDate(now.to_string())),
    }
}
