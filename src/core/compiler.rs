//! Distribution compiler.
//!
//! Full rebuilds and single-chunk rebuilds share one path: a selection of
//! chunk names is loaded, validated and rendered entirely in memory, and only
//! then written. A failing chunk therefore leaves every artifact untouched.

use std::{collections::HashSet, fmt, path::PathBuf, sync::Arc};

use tracing::{debug, info};

use crate::config::Config;
use crate::core::artifacts::{Artifact, Render, RenderContext};
use crate::core::chunk::{Chunk, LanguageSet, validate_chunk_name};
use crate::core::markup::Markup;
use crate::core::paths::{ArtifactKind, PathResolver};
use crate::core::storage::Storage;
use crate::core::store::ChunkStore;
use crate::error::{ResxError, Result};

/// Why a single chunk is being recompiled. Only affects logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileReason {
    Created,
    Updated,
}

impl fmt::Display for CompileReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileReason::Created => write!(f, "created"),
            CompileReason::Updated => write!(f, "updated"),
        }
    }
}

/// Which chunks a compilation covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChunkSelection {
    All,
    Single(String),
}

/// One rendered, not yet written, artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub chunk: String,
    pub kind: ArtifactKind,
    /// `None` for language-invariant kinds.
    pub lang: Option<String>,
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompileReport {
    pub chunks: Vec<String>,
    pub written: Vec<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DistCompiler {
    config: Arc<Config>,
    languages: LanguageSet,
    markup: Markup,
}

impl DistCompiler {
    pub fn new(config: Arc<Config>) -> Self {
        let languages = LanguageSet::from_config(&config);
        let markup = Markup::new(config.tab_size);
        Self {
            config,
            languages,
            markup,
        }
    }

    /// Regenerate every artifact of every chunk.
    pub async fn compile_all<S: Storage>(&self, store: &ChunkStore<S>) -> Result<CompileReport> {
        self.compile(store, ChunkSelection::All).await
    }

    /// Regenerate the artifacts of one chunk. Other chunks' artifacts are
    /// not touched.
    pub async fn compile_chunk<S: Storage>(
        &self,
        store: &ChunkStore<S>,
        name: &str,
        reason: CompileReason,
    ) -> Result<CompileReport> {
        let report = self
            .compile(store, ChunkSelection::Single(name.to_string()))
            .await?;
        info!(chunk = name, %reason, artifacts = report.written.len(), "resource compiled");
        Ok(report)
    }

    pub async fn compile<S: Storage>(
        &self,
        store: &ChunkStore<S>,
        selection: ChunkSelection,
    ) -> Result<CompileReport> {
        let names = match selection {
            ChunkSelection::All => store.list_chunk_names().await?,
            ChunkSelection::Single(name) => {
                validate_chunk_name(&name)?;
                vec![name]
            }
        };

        let mut rendered = Vec::new();
        for name in &names {
            let chunk = store.load_chunk(name).await?;
            rendered.extend(self.render_chunk(&chunk, store.paths())?);
        }

        let mut written = Vec::with_capacity(rendered.len());
        for artifact in rendered {
            store
                .storage()
                .write(&artifact.path, &artifact.content)
                .await
                .map_err(|err| ResxError::io(&artifact.path, err))?;
            debug!(
                chunk = %artifact.chunk,
                kind = %artifact.kind,
                lang = artifact.lang.as_deref().unwrap_or("-"),
                path = %artifact.path.display(),
                "artifact written"
            );
            written.push(artifact.path);
        }

        Ok(CompileReport {
            chunks: names,
            written,
        })
    }

    /// Render every artifact of `chunk`: kinds in declaration order, languages
    /// in configured order.
    pub fn render_chunk(&self, chunk: &Chunk, paths: &PathResolver) -> Result<Vec<RenderedArtifact>> {
        validate_chunk_name(&chunk.name)?;
        chunk.validate(&self.languages)?;

        let ctx = RenderContext {
            config: &self.config,
            languages: &self.languages,
            markup: self.markup,
        };

        let mut rendered = Vec::new();
        for artifact in Artifact::all() {
            let kind = artifact.kind();
            if kind.is_per_language() {
                for lang in self.languages.iter() {
                    rendered.push(RenderedArtifact {
                        chunk: chunk.name.clone(),
                        kind,
                        lang: Some(lang.to_string()),
                        path: paths.dist_path(&chunk.name, lang, kind),
                        content: artifact.render(chunk, lang, &ctx)?,
                    });
                }
            } else {
                let lang = self.languages.default_lang();
                rendered.push(RenderedArtifact {
                    chunk: chunk.name.clone(),
                    kind,
                    lang: None,
                    path: paths.dist_path(&chunk.name, lang, kind),
                    content: artifact.render(chunk, lang, &ctx)?,
                });
            }
        }
        Ok(rendered)
    }

    /// Every path a full build would produce.
    pub async fn expected_artifacts<S: Storage>(&self, store: &ChunkStore<S>) -> Result<HashSet<PathBuf>> {
        let paths = store.paths();
        let mut expected = HashSet::new();
        for name in store.list_chunk_names().await? {
            for kind in ArtifactKind::ALL {
                if kind.is_per_language() {
                    for lang in self.languages.iter() {
                        expected.insert(paths.dist_path(&name, lang, kind));
                    }
                } else {
                    expected.insert(paths.dist_path(&name, self.languages.default_lang(), kind));
                }
            }
        }
        Ok(expected)
    }

    /// Generated-looking files in the dist folder that no current chunk,
    /// language or kind would produce.
    pub async fn stale_artifacts<S: Storage>(&self, store: &ChunkStore<S>) -> Result<Vec<PathBuf>> {
        let expected = self.expected_artifacts(store).await?;
        let dist = store.paths().dist_folder();
        let files = store
            .storage()
            .list(dist)
            .await
            .map_err(|err| ResxError::io(dist, err))?;

        Ok(files
            .into_iter()
            .filter(|path| is_artifact_path(store.paths(), path))
            .filter(|path| !expected.contains(path))
            .collect())
    }

    /// Delete the given stale artifacts. Returns how many were removed.
    pub async fn prune<S: Storage>(&self, store: &ChunkStore<S>, stale: &[PathBuf]) -> Result<usize> {
        for path in stale {
            store
                .storage()
                .remove(path)
                .await
                .map_err(|err| ResxError::io(path, err))?;
            debug!(path = %path.display(), "stale artifact removed");
        }
        Ok(stale.len())
    }
}

fn is_artifact_path(paths: &PathResolver, path: &std::path::Path) -> bool {
    let Ok(relative) = path.strip_prefix(paths.dist_folder()) else {
        return false;
    };
    let Some(file_name) = relative.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let depth = relative.components().count();

    match relative.components().next().and_then(|c| c.as_os_str().to_str()) {
        Some("js") => depth == 3 && file_name.ends_with(".js"),
        Some("types") => depth == 2 && file_name.ends_with(".d.ts"),
        Some("resx") => depth == 2 && file_name.ends_with(".txt"),
        _ => false,
    }
}
