use anyhow::Result;

use super::{CommandResult, CommandSummary, ListSummary, ResxContext};

pub async fn list(ctx: &ResxContext) -> Result<CommandResult> {
    let mut chunks = Vec::new();
    for name in ctx.store.list_chunk_names().await? {
        let chunk = ctx.store.load_chunk(&name).await?;
        chunks.push((name, chunk.entries.len()));
    }

    Ok(CommandResult::success(CommandSummary::List(ListSummary {
        src_folder: ctx.store.paths().src_folder().to_path_buf(),
        chunks,
    })))
}
