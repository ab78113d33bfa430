//! Report formatting and printing.
//!
//! Kept apart from the command logic so the core stays usable as a library.
//! Every printer has a `_to` variant taking a writer, used by the tests.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    AddSummary, BuildSummary, CleanSummary, CommandResult, CommandSummary, CreateSummary,
    InitSummary, InteractiveSummary, ListSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::CompileReport;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Build(summary) => print_build_to(summary, verbose, writer),
        CommandSummary::Create(summary) => print_create(summary, verbose, writer),
        CommandSummary::Add(summary) => print_add(summary, verbose, writer),
        CommandSummary::List(summary) => print_list(summary, writer),
        CommandSummary::Clean(summary) => print_clean(summary, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
        CommandSummary::Interactive(summary) => print_interactive(summary, writer),
    }
}

/// Print a failure line, used for errors the CLI recovers from.
pub fn print_failure_to<W: Write>(message: &str, writer: &mut W) {
    let _ = writeln!(writer, "{} {}", FAILURE_MARK.red(), message.red());
}

pub fn print_build_to<W: Write>(summary: &BuildSummary, verbose: bool, writer: &mut W) {
    if verbose {
        for name in &summary.normalized {
            let _ = writeln!(writer, "  {} {}", "normalized".cyan(), name);
        }
        print_written(&summary.report, writer);
    }

    let chunks = summary.report.chunks.len();
    let files = summary.report.written.len();
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Compiled {} {}, wrote {} {}",
            chunks,
            plural(chunks, "resource", "resources"),
            files,
            plural(files, "file", "files")
        )
        .green()
    );
}

fn print_create<W: Write>(summary: &CreateSummary, verbose: bool, writer: &mut W) {
    if verbose {
        print_written(&summary.report, writer);
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created resource '{}'", summary.chunk).green()
    );
}

fn print_add<W: Write>(summary: &AddSummary, verbose: bool, writer: &mut W) {
    if verbose {
        print_written(&summary.report, writer);
    }
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Added '{}' to '{}' ({})",
            summary.key,
            summary.chunk,
            summary.languages.join(", ")
        )
        .green()
    );
}

fn print_written<W: Write>(report: &CompileReport, writer: &mut W) {
    for path in &report.written {
        let _ = writeln!(writer, "  {} {}", "wrote".cyan(), path.display());
    }
}

fn print_list<W: Write>(summary: &ListSummary, writer: &mut W) {
    if summary.chunks.is_empty() {
        let _ = writeln!(
            writer,
            "No resources found in {}",
            summary.src_folder.display()
        );
        return;
    }

    // Align on display width, resource names may be non-ASCII.
    let name_width = summary
        .chunks
        .iter()
        .map(|(name, _)| UnicodeWidthStr::width(name.as_str()))
        .max()
        .unwrap_or(0);

    for (name, count) in &summary.chunks {
        let padding = name_width - UnicodeWidthStr::width(name.as_str());
        let _ = writeln!(
            writer,
            "  {}{:padding$}  {} {}",
            name.bold(),
            "",
            count,
            plural(*count, "key", "keys"),
            padding = padding
        );
    }
}

fn print_clean<W: Write>(summary: &CleanSummary, writer: &mut W) {
    if summary.stale.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            "No stale artifacts".green()
        );
        return;
    }

    if summary.is_apply {
        let _ = writeln!(
            writer,
            "{} {} stale {}.",
            "Deleted".green().bold(),
            summary.removed_count,
            plural(summary.removed_count, "file", "files")
        );
        return;
    }

    for path in &summary.stale {
        let _ = writeln!(writer, "  {} {}", "-".red(), path.display());
    }
    let _ = writeln!(
        writer,
        "{} {} stale {}.",
        "Would delete".yellow().bold(),
        summary.stale.len(),
        plural(summary.stale.len(), "file", "files")
    );
    let _ = writeln!(writer, "Run with {} to delete these files.", "--apply".cyan());
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else if let Some(error) = &summary.error {
        print_failure_to(error, writer);
    }
}

fn print_interactive<W: Write>(summary: &InteractiveSummary, writer: &mut W) {
    if summary.rebuilt {
        return;
    }
    if summary.chunks_created > 0 || summary.keys_added > 0 {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "Created {} {}, added {} {}",
                summary.chunks_created,
                plural(summary.chunks_created, "resource", "resources"),
                summary.keys_added,
                plural(summary.keys_added, "key", "keys")
            )
            .green()
        );
    }
    if summary.error_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} failed",
            FAILURE_MARK.red(),
            summary.error_count,
            plural(summary.error_count, "step", "steps")
        );
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
