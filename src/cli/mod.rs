//! Command-line interface layer.

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod interactive;
mod logging;
pub mod report;
mod run;

use anyhow::Result;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use logging::{LOG_ENV, init_logging};

pub async fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let result = run::run(&args).await?;
    report::print(&result, args.verbose());
    Ok(result.status)
}
