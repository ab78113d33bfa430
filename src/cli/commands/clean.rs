use anyhow::Result;

use super::{CleanSummary, CommandResult, CommandSummary, ResxContext};
use crate::cli::args::CleanCommand;

pub async fn clean(ctx: &ResxContext, cmd: CleanCommand) -> Result<CommandResult> {
    let stale = ctx.compiler.stale_artifacts(&ctx.store).await?;

    let removed_count = if cmd.apply {
        ctx.compiler.prune(&ctx.store, &stale).await?
    } else {
        0
    };

    Ok(CommandResult::success(CommandSummary::Clean(CleanSummary {
        stale,
        removed_count,
        is_apply: cmd.apply,
    })))
}
