use super::{date_arg, load, save};
use crate::cli::parser::{Commands, TaskAction};
use crate::config::Config;
use crate::core::roster::resolve_employee;
use crate::core::task::TaskLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Task { action } = cmd else {
        return Ok(());
    };
    let (mut pool, mut data) = load(cfg)?;

    match action {
        TaskAction::Add {
            employee,
            date,
            title,
        } => {
            let emp_id = resolve_employee(&data, employee)?.id;
            let d = date_arg(date)?;
            let id = TaskLogic::add(&mut data, emp_id, d, title)?;
            let msg = format!("Task #{id} '{title}' added for employee #{emp_id} on {d}");
            save(&mut pool, &data, "task_add", employee, &msg)?;
            success(msg);
        }
        TaskAction::Complete { id } => {
            TaskLogic::complete(&mut data, *id)?;
            let msg = format!("Task #{id} completed");
            save(&mut pool, &data, "task_complete", &id.to_string(), &msg)?;
            success(msg);
        }
        TaskAction::List { date } => {
            let day = date.as_deref().map(date_arg).transpose()?;

            let mut table = Table::new(&["ID", "Date", "Employee", "Task", "Done"]);
            for t in data.tasks.iter().filter(|t| day.is_none_or(|d| t.date == d)) {
                let name = data
                    .employee(t.employee_id)
                    .map(|e| e.sort_name())
                    .unwrap_or_else(|| format!("#{}", t.employee_id));
                table.add_row(vec![
                    t.id.to_string(),
                    t.date.to_string(),
                    name,
                    t.title.clone(),
                    if t.completed { "✔" } else { "" }.to_string(),
                ]);
            }

            if table.is_empty() {
                info("No tasks found.");
            } else {
                print!("{}", table.render());
            }
        }
    }

    Ok(())
}
