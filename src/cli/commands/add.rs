use anyhow::{Result, bail};

use super::{AddSummary, CommandResult, CommandSummary, ResxContext};
use crate::cli::args::AddCommand;
use crate::core::{CompileReason, LanguageValues};

pub async fn add(ctx: &ResxContext, cmd: AddCommand) -> Result<CommandResult> {
    let values = collect_values(cmd.values)?;
    let languages = values.keys().cloned().collect();

    ctx.store.add_key(&cmd.chunk, &cmd.key, values).await?;
    let report = ctx
        .compiler
        .compile_chunk(&ctx.store, &cmd.chunk, CompileReason::Updated)
        .await?;

    Ok(CommandResult::success(CommandSummary::Add(AddSummary {
        chunk: cmd.chunk,
        key: cmd.key,
        languages,
        report,
    })))
}

fn collect_values(pairs: Vec<(String, String)>) -> Result<LanguageValues> {
    let mut values = LanguageValues::new();
    for (lang, value) in pairs {
        if values.contains_key(&lang) {
            bail!("Language '{}' given more than once", lang);
        }
        values.insert(lang, value);
    }
    Ok(values)
}
