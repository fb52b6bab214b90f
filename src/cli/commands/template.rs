use crate::cli::parser::{Commands, TemplateAction};
use crate::config::Config;
use crate::core::templates::TemplateLogic;
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::path::expand_tilde;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Template { action } = cmd else {
        return Ok(());
    };
    let pool = DbPool::open_ready(&cfg.database)?;

    match action {
        TemplateAction::Upload { name, kind, file } => {
            let path = expand_tilde(file);
            TemplateLogic::upload(&pool.conn, name, *kind, &path)?;
            let msg = format!("Template '{name}' ({kind}) stored from {}", path.display());
            audit_quiet(&pool.conn, "template_upload", name, &msg);
            success(msg);
        }
        TemplateAction::List => {
            let templates = TemplateLogic::list(&pool.conn)?;
            if templates.is_empty() {
                info("No templates uploaded.");
                return Ok(());
            }

            let mut table = Table::new(&["Name", "Kind", "File", "Size", "Uploaded"]);
            for t in templates {
                table.add_row(vec![
                    t.name,
                    t.kind.to_string(),
                    t.file_name,
                    format!("{} KB", t.content.len().div_ceil(1024)),
                    t.uploaded_at,
                ]);
            }
            print!("{}", table.render());
        }
        TemplateAction::Delete { name } => {
            TemplateLogic::delete(&pool.conn, name)?;
            let msg = format!("Template '{name}' deleted");
            audit_quiet(&pool.conn, "template_del", name, &msg);
            success(msg);
        }
    }

    Ok(())
}
