use std::path::PathBuf;

use crate::cli::exit_status::ExitStatus;
use crate::core::CompileReport;

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Create(CreateSummary),
    Add(AddSummary),
    List(ListSummary),
    Clean(CleanSummary),
    Init(InitSummary),
    Interactive(InteractiveSummary),
}

#[derive(Debug)]
pub struct BuildSummary {
    /// Resources whose source was rewritten in canonical form.
    pub normalized: Vec<String>,
    pub report: CompileReport,
}

#[derive(Debug)]
pub struct CreateSummary {
    pub chunk: String,
    pub report: CompileReport,
}

#[derive(Debug)]
pub struct AddSummary {
    pub chunk: String,
    pub key: String,
    pub languages: Vec<String>,
    pub report: CompileReport,
}

#[derive(Debug)]
pub struct ListSummary {
    pub src_folder: PathBuf,
    /// (resource name, key count)
    pub chunks: Vec<(String, usize)>,
}

#[derive(Debug)]
pub struct CleanSummary {
    pub stale: Vec<PathBuf>,
    pub removed_count: usize,
    pub is_apply: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

#[derive(Debug, Default)]
pub struct InteractiveSummary {
    pub chunks_created: usize,
    pub keys_added: usize,
    pub rebuilt: bool,
    /// Steps that failed and were reported to the user.
    pub error_count: usize,
}

/// Result of running a resxgen command.
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub status: ExitStatus,
}

impl CommandResult {
    pub fn success(summary: CommandSummary) -> Self {
        Self {
            summary,
            status: ExitStatus::Success,
        }
    }
}
