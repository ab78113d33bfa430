use std::io;

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, CommandSummary, ResxContext, add::add, build::build, clean::clean,
        create::create, init::init, list::list,
    },
    exit_status::ExitStatus,
    interactive::Wizard,
};

/// Dispatch to the command handler selected by `args`.
///
/// # Returns
/// - `Ok(CommandResult)` with the summary to report and the exit status
/// - `Err` if the command fails (invalid config, invalid source data, I/O)
pub async fn run(args: &Arguments) -> Result<CommandResult> {
    let path = &args.common.path;
    let verbose = args.verbose();

    match args.resolved_command() {
        Command::Init => init(path),
        Command::Build => build(&ResxContext::new(path, verbose)?).await,
        Command::Create(cmd) => create(&ResxContext::new(path, verbose)?, cmd).await,
        Command::Add(cmd) => add(&ResxContext::new(path, verbose)?, cmd).await,
        Command::List => list(&ResxContext::new(path, verbose)?).await,
        Command::Clean(cmd) => clean(&ResxContext::new(path, verbose)?, cmd).await,
        Command::Interactive => {
            let ctx = ResxContext::new(path, verbose)?;
            let summary = Wizard::new(&ctx, io::stdin().lock(), io::stdout()).run().await?;
            let status = ExitStatus::from_failed_steps(summary.error_count);
            Ok(CommandResult {
                summary: CommandSummary::Interactive(summary),
                status,
            })
        }
    }
}
