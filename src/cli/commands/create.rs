use anyhow::Result;

use super::{CommandResult, CommandSummary, CreateSummary, ResxContext};
use crate::cli::args::CreateCommand;
use crate::core::CompileReason;

pub async fn create(ctx: &ResxContext, cmd: CreateCommand) -> Result<CommandResult> {
    ctx.store.create_empty_chunk(&cmd.name).await?;
    let report = ctx
        .compiler
        .compile_chunk(&ctx.store, &cmd.name, CompileReason::Created)
        .await?;

    Ok(CommandResult::success(CommandSummary::Create(CreateSummary {
        chunk: cmd.name,
        report,
    })))
}
