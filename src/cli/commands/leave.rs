use super::{date_arg, load, save};
use crate::cli::parser::{Commands, LeaveAction, LeaveStatusArg};
use crate::config::Config;
use crate::core::leave::{LeaveLogic, LeaveRequest};
use crate::core::roster::resolve_employee;
use crate::errors::AppResult;
use crate::models::leave::LeaveStatus;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Leave { action } = cmd else {
        return Ok(());
    };
    let (mut pool, mut data) = load(cfg)?;

    match action {
        LeaveAction::Submit {
            employee,
            leave_type,
            start,
            end,
            reason,
            hours,
        } => {
            let emp_id = resolve_employee(&data, employee)?.id;
            let start = date_arg(start)?;
            let end = match end {
                Some(e) => date_arg(e)?,
                None => start,
            };

            let id = LeaveLogic::submit(
                &mut data,
                &LeaveRequest {
                    employee_id: emp_id,
                    leave_type: leave_type.as_str(),
                    start,
                    end,
                    reason: reason.as_str(),
                    hours: *hours,
                },
            )?;

            let msg = format!("Leave #{id} ({leave_type}, {start} to {end}) submitted for employee #{emp_id}");
            save(&mut pool, &data, "leave_submit", employee, &msg)?;
            success(msg);
        }
        LeaveAction::Approve { id } => {
            LeaveLogic::approve(&mut data, *id)?;
            let msg = format!("Leave #{id} approved");
            save(&mut pool, &data, "leave_approve", &id.to_string(), &msg)?;
            success(msg);
        }
        LeaveAction::Reject { id } => {
            LeaveLogic::reject(&mut data, *id)?;
            let msg = format!("Leave #{id} rejected");
            save(&mut pool, &data, "leave_reject", &id.to_string(), &msg)?;
            success(msg);
        }
        LeaveAction::List { status } => {
            let wanted = status.map(|s| match s {
                LeaveStatusArg::Pending => LeaveStatus::Pending,
                LeaveStatusArg::Approved => LeaveStatus::Approved,
                LeaveStatusArg::Rejected => LeaveStatus::Rejected,
            });

            let mut table = Table::new(&["ID", "Employee", "Type", "From", "To", "Hours", "Status", "Reason"]);
            for l in data
                .leaves
                .iter()
                .filter(|l| wanted.is_none_or(|w| l.status == w))
            {
                let name = data
                    .employee(l.employee_id)
                    .map(|e| e.sort_name())
                    .unwrap_or_else(|| format!("#{}", l.employee_id));
                table.add_row(vec![
                    l.id.to_string(),
                    name,
                    l.leave_type.clone(),
                    l.start_date.to_string(),
                    l.end_date.to_string(),
                    l.hours.map(|h| format!("{h:.2}")).unwrap_or_default(),
                    l.status.to_db_str().to_string(),
                    l.reason.clone(),
                ]);
            }

            if table.is_empty() {
                info("No leave requests found.");
            } else {
                print!("{}", table.render());
            }
        }
        LeaveAction::Type {
            name,
            abbreviation,
            color,
            work_extension,
        } => {
            let id = LeaveLogic::upsert_type(&mut data, name, abbreviation, color, *work_extension)?;
            let msg = format!("Leave type '{name}' ({}) saved as #{id}", abbreviation.to_uppercase());
            save(&mut pool, &data, "leave_type_set", name, &msg)?;
            success(msg);
        }
    }

    Ok(())
}
