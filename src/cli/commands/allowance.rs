use super::{load, save};
use crate::cli::parser::{AllowanceAction, Commands};
use crate::config::Config;
use crate::core::allowance::AllowanceLogic;
use crate::core::roster::resolve_employee;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Allowance { action } = cmd else {
        return Ok(());
    };
    let (mut pool, mut data) = load(cfg)?;

    match action {
        AllowanceAction::Record {
            employee,
            month,
            amount,
            remarks,
        } => {
            let emp_id = resolve_employee(&data, employee)?.id;
            AllowanceLogic::record(&mut data, emp_id, month, *amount, remarks)?;
            let msg = format!("Allowance of {amount:.2} recorded for employee #{emp_id} ({month})");
            save(&mut pool, &data, "allowance_set", employee, &msg)?;
            success(msg);
        }
        AllowanceAction::Total { month } => {
            let total = AllowanceLogic::monthly_total(&data, month)?;
            info(format!("Total allowances for {month}: {total:.2}"));
        }
    }

    Ok(())
}
