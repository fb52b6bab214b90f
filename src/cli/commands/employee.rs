use super::{load, save};
use crate::cli::parser::{Commands, EmployeeAction};
use crate::config::Config;
use crate::core::roster::{NewEmployee, RosterLogic, resolve_employee};
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Employee { action } = cmd else {
        return Ok(());
    };
    let (mut pool, mut data) = load(cfg)?;

    match action {
        EmployeeAction::Add {
            first_name,
            last_name,
            email,
            middle,
            position,
            group,
        } => {
            let new = NewEmployee {
                first_name: first_name.as_str(),
                middle_name: middle.as_deref(),
                last_name: last_name.as_str(),
                email: email.as_str(),
                position: position.as_str(),
                group: group.as_str(),
            };
            let id = RosterLogic::add_employee(&mut data, &new)?;
            let msg = format!("Added {first_name} {last_name} <{email}> as #{id}");
            save(&mut pool, &data, "employee_add", email, &msg)?;
            success(msg);
        }
        EmployeeAction::List { group, all } => {
            let mut employees: Vec<_> = data
                .employees
                .iter()
                .filter(|e| (*all || e.active) && e.in_group(group.as_deref()))
                .collect();
            employees.sort_by_key(|e| (e.last_name.to_lowercase(), e.first_name.to_lowercase()));

            if employees.is_empty() {
                info("No employees found.");
                return Ok(());
            }

            let mut table = Table::new(&["ID", "Name", "Email", "Position", "Group", "Schedule", "Reports"]);
            for e in employees {
                let mut name = e.sort_name();
                if !e.active {
                    name.push_str(" (inactive)");
                }
                table.add_row(vec![
                    e.id.to_string(),
                    name,
                    e.email.clone(),
                    e.position.clone(),
                    e.group.clone(),
                    yes_no(e.visibility.show_in_schedule),
                    yes_no(e.visibility.show_in_reports),
                ]);
            }
            print!("{}", table.render());
        }
        EmployeeAction::Visibility {
            employee,
            schedule,
            reports,
        } => {
            let id = resolve_employee(&data, employee)?.id;
            let v = RosterLogic::set_visibility(&mut data, id, *schedule, *reports)?;
            let msg = format!(
                "Visibility of #{id}: schedule={}, reports={}",
                v.show_in_schedule, v.show_in_reports
            );
            save(&mut pool, &data, "employee_edit", employee, &msg)?;
            success(msg);
        }
        EmployeeAction::Deactivate { employee } => {
            let id = resolve_employee(&data, employee)?.id;
            RosterLogic::set_active(&mut data, id, false)?;
            let msg = format!("Employee #{id} deactivated");
            save(&mut pool, &data, "employee_edit", employee, &msg)?;
            success(msg);
        }
    }

    Ok(())
}

fn yes_no(b: bool) -> String {
    (if b { "yes" } else { "no" }).to_string()
}
