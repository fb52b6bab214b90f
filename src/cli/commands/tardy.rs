use super::{date_arg, load, save};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::roster::resolve_employee;
use crate::core::tardy::TardyLogic;
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Tardy {
        employee,
        date,
        minutes,
        remarks,
    } = cmd
    {
        let (mut pool, mut data) = load(cfg)?;
        let emp_id = resolve_employee(&data, employee)?.id;
        let d = date_arg(date)?;

        TardyLogic::record(&mut data, emp_id, d, *minutes, remarks)?;

        let msg = format!("Employee #{emp_id} late {minutes} min on {d}");
        save(&mut pool, &data, "tardy_set", employee, &msg)?;
        success(msg);
    }

    Ok(())
}
