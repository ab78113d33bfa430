//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Normalize sources and regenerate every artifact (also `--dogood`)
//! - `create`: Create an empty resource and compile it
//! - `add`: Add a key to an existing resource and recompile it
//! - `list`: List resources with their key counts
//! - `clean`: Remove artifacts no resource produces any more
//! - `init`: Initialize resxgen configuration file
//! - `interactive`: Step-by-step wizard (default when no command is given)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Do everything GOOD: regenerate all sources and artifacts
    #[arg(short = 'd', long)]
    pub dogood: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl Arguments {
    /// The command to run. `--dogood` means `build`; no command at all
    /// starts the interactive wizard.
    pub fn resolved_command(&self) -> Command {
        match &self.command {
            Some(command) => command.clone(),
            None if self.dogood => Command::Build,
            None => Command::Interactive,
        }
    }

    pub fn verbose(&self) -> bool {
        self.common.verbose
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Project directory; the config file is searched from here upwards
    #[arg(long, global = true, env = "RESXGEN_PATH", default_value = ".")]
    pub path: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CreateCommand {
    /// Name of the new resource
    pub name: String,
}

#[derive(Debug, Clone, Args)]
pub struct AddCommand {
    /// Resource to add the key to
    pub chunk: String,

    /// Key name
    pub key: String,

    /// Value for one language as LANG=VALUE; the default language is required.
    /// Can be specified multiple times: -l en=Hello -l ru=Привет
    #[arg(short = 'l', long = "value", value_parser = parse_lang_value, required = true)]
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, Args)]
pub struct CleanCommand {
    /// Actually delete stale artifacts (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Normalize resource sources and regenerate every artifact
    Build,
    /// Create a new, empty resource
    Create(CreateCommand),
    /// Add a key to an existing resource
    Add(AddCommand),
    /// List resources and their key counts
    List,
    /// Remove generated files that no resource produces any more
    Clean(CleanCommand),
    /// Initialize a new .resxrc.json configuration file
    Init,
    /// Create resources and add keys step by step
    Interactive,
}

fn parse_lang_value(raw: &str) -> Result<(String, String), String> {
    let (lang, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LANG=VALUE, got \"{}\"", raw))?;
    if lang.is_empty() {
        return Err(format!("missing language in \"{}\"", raw));
    }
    Ok((lang.to_string(), value.to_string()))
}
