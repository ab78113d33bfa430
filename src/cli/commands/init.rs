use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::{CommandResult, CommandSummary, InitSummary};
use crate::cli::exit_status::ExitStatus;
use crate::config::{CONFIG_FILE_NAME, default_config_json};

pub fn init(dir: &Path) -> Result<CommandResult> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        return Ok(CommandResult {
            summary: CommandSummary::Init(InitSummary {
                created: false,
                error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
            }),
            status: ExitStatus::Failure,
        });
    }

    fs::write(&config_path, format!("{}\n", default_config_json()?))
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(CommandResult::success(CommandSummary::Init(InitSummary {
        created: true,
        error: None,
    })))
}
