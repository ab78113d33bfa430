//! Step-by-step wizard for creating resources and adding keys.
//!
//! The wizard is a state machine over [`Step`]. Each step reads at most a
//! few answers from a line-based [`Prompt`], performs its work and names
//! the next step. End of input ends the session from any step.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use anyhow::Result;
use colored::Colorize;

use super::commands::{InteractiveSummary, ResxContext, build::rebuild};
use super::report::{SUCCESS_MARK, print_build_to, print_failure_to};
use crate::core::chunk::{validate_chunk_name, validate_key_name};
use crate::core::{CompileReason, LanguageValues};

const ACTIONS: [&str; 3] = [
    "Do everything GOOD",
    "Create new resource",
    "Add keys to existing one",
];

/// Line-based question/answer helper.
///
/// Every method returns `Ok(None)` once the input is exhausted.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn question(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{} {} ", "?".cyan().bold(), text.bold())
    }

    /// Print a hint and ask the current question again.
    pub fn warn(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{} {}", ">>".red(), message)
    }

    /// Free-form answer, without the line terminator.
    pub fn ask(&mut self, text: &str) -> io::Result<Option<String>> {
        self.question(text)?;
        self.read_line()
    }

    /// Pick one option by number or by its exact text.
    pub fn select(&mut self, text: &str, options: &[impl AsRef<str>]) -> io::Result<Option<usize>> {
        loop {
            writeln!(self.output, "{} {}", "?".cyan().bold(), text.bold())?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, option.as_ref())?;
            }
            write!(self.output, "  {} ", ">".cyan())?;

            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            let answer = answer.trim();
            let picked = match answer.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => Some(n - 1),
                _ => options.iter().position(|o| o.as_ref() == answer),
            };
            match picked {
                Some(index) => return Ok(Some(index)),
                None => self.warn(format!(
                    "Answer with a number between 1 and {}",
                    options.len()
                ))?,
            }
        }
    }

    /// Pick any number of options as comma- or space-separated numbers. An
    /// empty answer keeps `defaults`.
    pub fn multi_select(
        &mut self,
        text: &str,
        options: &[impl AsRef<str>],
        defaults: &[usize],
    ) -> io::Result<Option<Vec<usize>>> {
        loop {
            writeln!(
                self.output,
                "{} {} {}",
                "?".cyan().bold(),
                text.bold(),
                "(numbers, empty keeps the marked ones)".dimmed()
            )?;
            for (i, option) in options.iter().enumerate() {
                let mark = if defaults.contains(&i) { "x" } else { " " };
                writeln!(self.output, "  [{}] {}) {}", mark, i + 1, option.as_ref())?;
            }
            write!(self.output, "  {} ", ">".cyan())?;

            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            if answer.trim().is_empty() {
                return Ok(Some(defaults.to_vec()));
            }

            match parse_indices(&answer, options.len()) {
                Some(indices) => return Ok(Some(indices)),
                None => self.warn(format!(
                    "Answer with numbers between 1 and {}",
                    options.len()
                ))?,
            }
        }
    }

    pub fn confirm(&mut self, text: &str) -> io::Result<Option<bool>> {
        loop {
            self.question(&format!("{} (y/n)", text))?;
            let Some(answer) = self.read_line()? else {
                return Ok(None);
            };
            match answer.trim().to_lowercase().as_str() {
                "y" | "yes" => return Ok(Some(true)),
                "n" | "no" => return Ok(Some(false)),
                _ => self.warn("Answer y or n")?,
            }
        }
    }
}

/// Sorted, deduplicated zero-based indices, or `None` if any part is not a
/// number in `1..=len`.
fn parse_indices(answer: &str, len: usize) -> Option<Vec<usize>> {
    let mut indices = Vec::new();
    for part in answer.split([',', ' ']).filter(|p| !p.is_empty()) {
        let n: usize = part.parse().ok()?;
        if !(1..=len).contains(&n) {
            return None;
        }
        indices.push(n - 1);
    }
    indices.sort_unstable();
    indices.dedup();
    Some(indices)
}

#[derive(Debug)]
enum Step {
    SelectAction,
    RegenerateAll,
    CreateName,
    AskAddKeys {
        chunk: String,
    },
    SelectChunk,
    CollectKey {
        chunk: String,
    },
    SelectLanguages {
        chunk: String,
        key: String,
    },
    CollectValues {
        chunk: String,
        key: String,
        languages: Vec<String>,
    },
    Persist {
        chunk: String,
        key: String,
        values: LanguageValues,
    },
    AskMoreKeys {
        chunk: String,
    },
    AskRepeat,
    Done,
}

pub struct Wizard<'a, R, W> {
    ctx: &'a ResxContext,
    prompt: Prompt<R, W>,
    summary: InteractiveSummary,
}

impl<'a, R: BufRead, W: Write> Wizard<'a, R, W> {
    pub fn new(ctx: &'a ResxContext, input: R, output: W) -> Self {
        Self {
            ctx,
            prompt: Prompt::new(input, output),
            summary: InteractiveSummary::default(),
        }
    }

    pub async fn run(mut self) -> Result<InteractiveSummary> {
        let mut step = Step::SelectAction;
        loop {
            step = match step {
                Step::Done => break,
                step => self.advance(step).await?,
            };
        }
        Ok(self.summary)
    }

    async fn advance(&mut self, step: Step) -> Result<Step> {
        let next = match step {
            Step::SelectAction => match self.prompt.select("Select operation:", ACTIONS.as_slice())? {
                Some(0) => Step::RegenerateAll,
                Some(1) => Step::CreateName,
                Some(_) => Step::SelectChunk,
                None => Step::Done,
            },
            Step::RegenerateAll => self.regenerate_all().await?,
            Step::CreateName => self.create().await?,
            Step::AskAddKeys { chunk } => match self.prompt.confirm("Add keys?")? {
                Some(true) => Step::CollectKey { chunk },
                Some(false) => Step::AskRepeat,
                None => Step::Done,
            },
            Step::SelectChunk => self.select_chunk().await?,
            Step::CollectKey { chunk } => self.collect_key(chunk).await?,
            Step::SelectLanguages { chunk, key } => self.select_languages(chunk, key)?,
            Step::CollectValues {
                chunk,
                key,
                languages,
            } => self.collect_values(chunk, key, languages)?,
            Step::Persist { chunk, key, values } => self.persist(chunk, key, values).await?,
            Step::AskMoreKeys { chunk } => match self.prompt.confirm("Add one more key?")? {
                Some(true) => Step::CollectKey { chunk },
                Some(false) => Step::AskRepeat,
                None => Step::Done,
            },
            Step::AskRepeat => {
                match self.prompt.confirm("Would you like to do something else?")? {
                    Some(true) => Step::SelectAction,
                    _ => Step::Done,
                }
            }
            Step::Done => Step::Done,
        };
        Ok(next)
    }

    /// Report a failed step and offer to start over.
    fn fail(&mut self, err: impl Display) -> Step {
        print_failure_to(&err.to_string(), self.prompt.output());
        self.summary.error_count += 1;
        Step::AskRepeat
    }

    async fn regenerate_all(&mut self) -> Result<Step> {
        match rebuild(self.ctx).await {
            Ok(summary) => {
                print_build_to(&summary, self.ctx.verbose, self.prompt.output());
                self.summary.rebuilt = true;
                Ok(Step::Done)
            }
            Err(err) => {
                self.fail(format!("{:#}", err));
                Ok(Step::Done)
            }
        }
    }

    async fn create(&mut self) -> Result<Step> {
        let ctx = self.ctx;
        let store = &ctx.store;
        let name = loop {
            let Some(answer) = self.prompt.ask("Give it a name:")? else {
                return Ok(Step::Done);
            };
            let name = answer.trim().to_string();
            if let Err(err) = validate_chunk_name(&name) {
                self.prompt.warn(err)?;
                continue;
            }
            match store.chunk_exists(&name).await {
                Ok(true) => self.prompt.warn("Resource file already exists")?,
                Ok(false) => break name,
                Err(err) => return Ok(self.fail(err)),
            }
        };

        if let Err(err) = store.create_empty_chunk(&name).await {
            return Ok(self.fail(err));
        }
        if let Err(err) = ctx
            .compiler
            .compile_chunk(store, &name, CompileReason::Created)
            .await
        {
            return Ok(self.fail(err));
        }

        self.summary.chunks_created += 1;
        writeln!(
            self.prompt.output(),
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created resource '{}'", name).green()
        )?;
        Ok(Step::AskAddKeys { chunk: name })
    }

    async fn select_chunk(&mut self) -> Result<Step> {
        let names = match self.ctx.store.list_chunk_names().await {
            Ok(names) => names,
            Err(err) => return Ok(self.fail(err)),
        };
        if names.is_empty() {
            let src = self.ctx.store.paths().src_folder().display().to_string();
            print_failure_to(&format!("NO RESOURCES FOUND IN {}", src), self.prompt.output());
            return Ok(Step::AskRepeat);
        }

        Ok(match self.prompt.select("Select resource:", names.as_slice())? {
            Some(index) => Step::CollectKey {
                chunk: names[index].clone(),
            },
            None => Step::Done,
        })
    }

    async fn collect_key(&mut self, chunk: String) -> Result<Step> {
        let existing = match self.ctx.store.read_default_language_entries(&chunk).await {
            Ok(entries) => entries,
            Err(err) => return Ok(self.fail(err)),
        };

        loop {
            let Some(answer) = self.prompt.ask("Key name?")? else {
                return Ok(Step::Done);
            };
            let key = answer.trim().to_string();
            if let Err(err) = validate_key_name(&key) {
                self.prompt.warn(err)?;
            } else if existing.iter().any(|(existing, _)| *existing == key) {
                self.prompt.warn("This key already exists")?;
            } else {
                return Ok(Step::SelectLanguages { chunk, key });
            }
        }
    }

    fn select_languages(&mut self, chunk: String, key: String) -> Result<Step> {
        let ctx = self.ctx;
        let languages = ctx.store.languages();
        let options: Vec<&str> = languages.iter().collect();
        let defaults: Vec<usize> = (0..options.len()).collect();
        let default_lang = languages.default_lang();

        loop {
            let Some(selected) = self
                .prompt
                .multi_select("Select languages:", options.as_slice(), &defaults)?
            else {
                return Ok(Step::Done);
            };
            let selected: Vec<String> = selected.iter().map(|&i| options[i].to_string()).collect();
            if selected.iter().any(|lang| lang == default_lang) {
                return Ok(Step::CollectValues {
                    chunk,
                    key,
                    languages: selected,
                });
            }
            self.prompt.warn(format!(
                "Default language ({}) must be selected",
                default_lang
            ))?;
        }
    }

    fn collect_values(&mut self, chunk: String, key: String, languages: Vec<String>) -> Result<Step> {
        let mut values = LanguageValues::new();
        for lang in languages {
            let value = loop {
                let Some(value) = self
                    .prompt
                    .ask(&format!("'{}' value for '{}'?", lang, key))?
                else {
                    return Ok(Step::Done);
                };
                if !value.is_empty() {
                    break value;
                }
                self.prompt.warn("Can't add empty value")?;
            };
            values.insert(lang, value);
        }
        Ok(Step::Persist { chunk, key, values })
    }

    async fn persist(&mut self, chunk: String, key: String, values: LanguageValues) -> Result<Step> {
        let ctx = self.ctx;
        let store = &ctx.store;
        if let Err(err) = store.add_key(&chunk, &key, values).await {
            return Ok(self.fail(err));
        }
        if let Err(err) = ctx
            .compiler
            .compile_chunk(store, &chunk, CompileReason::Updated)
            .await
        {
            return Ok(self.fail(err));
        }

        self.summary.keys_added += 1;
        writeln!(
            self.prompt.output(),
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Added '{}' to '{}'", key, chunk).green()
        )?;
        Ok(Step::AskMoreKeys { chunk })
    }
}
