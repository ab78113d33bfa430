use std::process::ExitCode;

use clap::Parser;
use resxgen::cli::{Arguments, ExitStatus, init_logging, run_cli};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging(args.verbose());

    match run_cli(args).await {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
