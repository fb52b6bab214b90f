use crate::errors::AppResult;
use crate::import::apply::{
    MergeStats, apply_allowances, apply_holidays, apply_leave_types, apply_members, apply_schedule,
    apply_tardy,
};
use crate::import::allowances::parse_allowances;
use crate::import::holidays::parse_holidays;
use crate::import::leave_types::parse_leave_types;
use crate::import::members::parse_members;
use crate::import::schedule::parse_schedule;
use crate::import::tardy::parse_tardy;
use crate::import::{ImportKind, ImportOutcome};
use crate::models::domain::DomainData;
use std::io::Read;

/// Parse a CSV of the given kind and merge it into `data`.
pub struct ImportLogic;

/// What an import did, for reporting and the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub stats: MergeStats,
    pub skipped: usize,
}

fn merged<T>(parsed: ImportOutcome<T>, merge: impl FnOnce(Vec<T>) -> MergeStats) -> ImportSummary {
    let skipped = parsed.skipped.len();
    ImportSummary {
        stats: merge(parsed.records),
        skipped,
    }
}

impl ImportLogic {
    pub fn run<R: Read>(data: &mut DomainData, kind: ImportKind, input: R) -> AppResult<ImportSummary> {
        let result = match kind {
            ImportKind::Schedule => {
                let parsed = parse_schedule(input, data)?;
                merged(parsed, |r| apply_schedule(data, r))
            }
            ImportKind::Holidays => merged(parse_holidays(input)?, |r| apply_holidays(data, r)),
            ImportKind::Members => {
                let parsed = parse_members(input, data)?;
                merged(parsed, |r| apply_members(data, r))
            }
            ImportKind::LeaveTypes => {
                merged(parse_leave_types(input)?, |r| apply_leave_types(data, r))
            }
            ImportKind::Allowances => {
                let parsed = parse_allowances(input, data)?;
                merged(parsed, |r| apply_allowances(data, r))
            }
            ImportKind::Tardy => {
                let parsed = parse_tardy(input, data)?;
                merged(parsed, |r| apply_tardy(data, r))
            }
        };

        Ok(result)
    }
}
