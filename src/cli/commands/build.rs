use anyhow::Result;

use super::{BuildSummary, CommandResult, CommandSummary, ResxContext};

pub async fn build(ctx: &ResxContext) -> Result<CommandResult> {
    let summary = rebuild(ctx).await?;
    Ok(CommandResult::success(CommandSummary::Build(summary)))
}

/// Normalize every source, then regenerate every artifact.
pub(crate) async fn rebuild(ctx: &ResxContext) -> Result<BuildSummary> {
    let normalized = ctx.store.normalize_all().await?;
    let report = ctx.compiler.compile_all(&ctx.store).await?;
    Ok(BuildSummary { normalized, report })
}
