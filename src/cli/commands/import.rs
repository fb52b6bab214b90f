use super::{load, save};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::import::ImportLogic;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use std::fs::File;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { kind, file } = cmd {
        let path = expand_tilde(file);
        info(format!("Importing {} from {}", kind.as_str(), path.display()));

        let input = File::open(&path)?;
        let (mut pool, mut data) = load(cfg)?;

        let summary = ImportLogic::run(&mut data, *kind, input)?;

        let msg = format!(
            "{} import: {} added, {} updated, {} skipped",
            kind.as_str(),
            summary.stats.added,
            summary.stats.updated,
            summary.skipped
        );
        save(&mut pool, &data, "import", &path.display().to_string(), &msg)?;
        success(msg);
    }

    Ok(())
}
