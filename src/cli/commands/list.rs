use super::{load, period_or_current_month};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::csv::schedule_cell;
use crate::ui::messages::{header, info};
use crate::utils::colors::RESET;
use crate::utils::date::days_between;
use crate::utils::formatting::{bold, describe_code, pad_right};

const NAME_W: usize = 24;
const CELL_W: usize = 11;

/// Print the schedule grid: one line per employee, one column per day.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, group } = cmd {
        let (start, end) = period_or_current_month(period.as_deref())?;
        let (_pool, data) = load(cfg)?;
        let days = days_between(start, end);

        let roster: Vec<_> = data
            .roster(group.as_deref())
            .into_iter()
            .filter(|e| e.visibility.show_in_schedule)
            .collect();

        if roster.is_empty() || days.is_empty() {
            info("Nothing to show for the selected period.");
            return Ok(());
        }

        header(format!("Schedule {start} to {end}"));

        let mut line = pad_right("", NAME_W);
        for d in &days {
            let label = match data.holiday_on(*d) {
                Some(_) => format!("{}*", d.format("%a %d")),
                None => d.format("%a %d").to_string(),
            };
            line.push_str(&pad_right(&label, CELL_W));
        }
        println!("{}", bold(&line));

        for e in roster {
            let mut name: String = e.sort_name().chars().take(NAME_W - 1).collect();
            name = pad_right(&name, NAME_W);
            let mut line = name;
            for d in &days {
                let code = schedule_cell(&data, e.id, *d);
                let shown = if code.is_empty() { "·".to_string() } else { code.clone() };
                line.push_str(describe_code(&code));
                line.push_str(&pad_right(&shown, CELL_W));
                line.push_str(RESET);
            }
            println!("{line}");
        }

        if days.iter().any(|d| data.holiday_on(*d).is_some()) {
            println!("\n* company holiday");
        }
    }

    Ok(())
}
