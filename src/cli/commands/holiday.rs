use super::{date_arg, load, save};
use crate::cli::parser::{Commands, HolidayAction};
use crate::config::Config;
use crate::core::holiday::HolidayLogic;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_period;
use crate::models::holiday::HolidayKind;
use crate::ui::messages::{info, success};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Holiday { action } = cmd else {
        return Ok(());
    };
    let (mut pool, mut data) = load(cfg)?;

    match action {
        HolidayAction::Add { title, date, kind } => {
            let d = date_arg(date)?;
            let k = HolidayKind::parse(kind)
                .ok_or_else(|| AppError::Validation(format!("holiday kind '{kind}' (Regular or Special)")))?;
            HolidayLogic::add(&mut data, title, d, k)?;
            let msg = format!("Holiday '{title}' ({}) added on {d}", k.as_str());
            save(&mut pool, &data, "holiday_add", title, &msg)?;
            success(msg);
        }
        HolidayAction::Remove { date } => {
            let d = date_arg(date)?;
            let removed = HolidayLogic::remove(&mut data, d)?;
            let msg = format!("Removed {} on {d}", removed.join(", "));
            save(&mut pool, &data, "holiday_del", &d.to_string(), &msg)?;
            success(msg);
        }
        HolidayAction::List { period } => {
            let bounds = period.as_deref().map(parse_period).transpose()?;

            let mut holidays: Vec<_> = data
                .holidays
                .iter()
                .filter(|h| bounds.is_none_or(|(a, b)| a <= h.date && h.date <= b))
                .collect();
            holidays.sort_by_key(|h| h.date);

            if holidays.is_empty() {
                info("No holidays found.");
                return Ok(());
            }

            let mut table = Table::new(&["Date", "Title", "Type"]);
            for h in holidays {
                table.add_row(vec![
                    h.date.format("%Y-%m-%d (%a)").to_string(),
                    h.title.clone(),
                    h.kind.as_str().to_string(),
                ]);
            }
            print!("{}", table.render());
        }
    }

    Ok(())
}
