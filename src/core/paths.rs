//! Source and distribution file locations.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::core::chunk::validate_chunk_name;
use crate::core::storage::Storage;
use crate::error::{ResxError, Result};

pub const SOURCE_EXTENSION: &str = "json";

/// Kind of generated artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ArtifactKind {
    RuntimeObject,
    TypeDeclaration,
    FlatFile,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::RuntimeObject,
        ArtifactKind::TypeDeclaration,
        ArtifactKind::FlatFile,
    ];

    /// Whether one artifact is produced per language (or one per chunk).
    pub fn is_per_language(self) -> bool {
        !matches!(self, ArtifactKind::TypeDeclaration)
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::RuntimeObject => write!(f, "runtime object"),
            ArtifactKind::TypeDeclaration => write!(f, "type declaration"),
            ArtifactKind::FlatFile => write!(f, "flat file"),
        }
    }
}

/// Maps chunk names to source files and (chunk, language, kind) to dist files.
///
/// Layout:
/// - `<src>/<chunk>.json`
/// - `<dist>/js/<lang>/<chunk>.js`
/// - `<dist>/types/<chunk>.d.ts`
/// - `<dist>/resx/<chunk>.<lang>.txt`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    src_folder: PathBuf,
    dist_folder: PathBuf,
}

impl PathResolver {
    pub fn new(src_folder: impl Into<PathBuf>, dist_folder: impl Into<PathBuf>) -> Self {
        Self {
            src_folder: src_folder.into(),
            dist_folder: dist_folder.into(),
        }
    }

    pub fn src_folder(&self) -> &Path {
        &self.src_folder
    }

    pub fn dist_folder(&self) -> &Path {
        &self.dist_folder
    }

    pub fn source_path(&self, chunk: &str) -> PathBuf {
        self.src_folder
            .join(format!("{}.{}", chunk, SOURCE_EXTENSION))
    }

    /// `lang` is ignored for [`ArtifactKind::TypeDeclaration`].
    pub fn dist_path(&self, chunk: &str, lang: &str, kind: ArtifactKind) -> PathBuf {
        match kind {
            ArtifactKind::RuntimeObject => self
                .dist_folder
                .join("js")
                .join(lang)
                .join(format!("{}.js", chunk)),
            ArtifactKind::TypeDeclaration => self
                .dist_folder
                .join("types")
                .join(format!("{}.d.ts", chunk)),
            ArtifactKind::FlatFile => self
                .dist_folder
                .join("resx")
                .join(format!("{}.{}.txt", chunk, lang)),
        }
    }

    /// Names of all chunks found directly in the source folder, sorted.
    ///
    /// A source file whose stem is not a valid chunk name fails with
    /// `InvalidSourceData`, so it is never compiled under a misleading name.
    pub async fn list_chunk_names<S: Storage>(&self, storage: &S) -> Result<Vec<String>> {
        let files = storage
            .list(&self.src_folder)
            .await
            .map_err(|err| ResxError::io(&self.src_folder, err))?;

        let mut names = Vec::new();
        for path in files
            .iter()
            .filter(|path| path.parent() == Some(self.src_folder.as_path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION))
        {
            let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
            validate_chunk_name(&stem)
                .map_err(|err| ResxError::invalid_source(&stem, err.to_string()))?;
            names.push(stem.into_owned());
        }
        names.sort();
        Ok(names)
    }
}
