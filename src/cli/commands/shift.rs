use super::{date_arg, load, save};
use crate::cli::parser::{Commands, ShiftAction};
use crate::config::Config;
use crate::core::roster::resolve_employee;
use crate::core::schedule::{ScheduleLogic, ShiftSpec};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success};
use crate::utils::time::parse_time_range;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Shift { action } = cmd else {
        return Ok(());
    };
    let (mut pool, mut data) = load(cfg)?;

    match action {
        ShiftAction::Set {
            employee,
            date,
            time,
            break_time,
            template,
            off,
            hol_off,
            remote,
        } => {
            let emp_id = resolve_employee(&data, employee)?.id;
            let d = date_arg(date)?;

            let what = if *off {
                ScheduleLogic::set_shift(&mut data, emp_id, d, ShiftSpec::DayOff)?;
                "OFF".to_string()
            } else if *hol_off {
                ScheduleLogic::set_shift(&mut data, emp_id, d, ShiftSpec::HolidayOff)?;
                "HOL-OFF".to_string()
            } else if let Some(name) = template {
                ScheduleLogic::set_from_template(&mut data, emp_id, d, name)?;
                name.clone()
            } else if let Some(range) = time {
                let (start, end) = parse_time_range(range)
                    .ok_or_else(|| AppError::InvalidTime(range.clone()))?;
                let (break_start, break_end) = match break_time {
                    Some(b) => {
                        let (a, z) = parse_time_range(b).ok_or_else(|| AppError::InvalidTime(b.clone()))?;
                        (Some(a), Some(z))
                    }
                    None => (None, None),
                };
                ScheduleLogic::set_shift(
                    &mut data,
                    emp_id,
                    d,
                    ShiftSpec::Regular {
                        start,
                        end,
                        break_start,
                        break_end,
                        remote: *remote,
                    },
                )?;
                format!(
                    "{}-{}{}",
                    start.format("%H:%M"),
                    end.format("%H:%M"),
                    if *remote { " (WFH)" } else { "" }
                )
            } else {
                return Err(AppError::Validation(
                    "use one of --time, --template, --off or --hol-off".into(),
                ));
            };

            let msg = format!("Employee #{emp_id} on {d}: {what}");
            save(&mut pool, &data, "shift_set", employee, &msg)?;
            success(msg);
        }
        ShiftAction::Clear { employee, date } => {
            let emp_id = resolve_employee(&data, employee)?.id;
            let d = date_arg(date)?;
            let removed = ScheduleLogic::clear_shift(&mut data, emp_id, d);
            if removed == 0 {
                info(format!("Nothing scheduled for employee #{emp_id} on {d}"));
                return Ok(());
            }
            let msg = format!("Cleared schedule of employee #{emp_id} on {d}");
            save(&mut pool, &data, "shift_clear", employee, &msg)?;
            success(msg);
        }
    }

    Ok(())
}
