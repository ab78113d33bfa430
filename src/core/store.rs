//! Source chunk store: canonical persistence and mutation of chunks.

use std::sync::Arc;

use tracing::debug;

use crate::config::Config;
use crate::core::chunk::{
    Chunk, KeyEntry, LanguageSet, LanguageValues, validate_chunk_name, validate_key_name,
};
use crate::core::paths::PathResolver;
use crate::core::storage::Storage;
use crate::error::{ResxError, Result, ValidationError};

/// Owns the source files of all chunks. Every mutation rewrites the
/// affected source file in full.
#[derive(Debug)]
pub struct ChunkStore<S> {
    config: Arc<Config>,
    languages: LanguageSet,
    paths: PathResolver,
    storage: S,
}

impl<S: Storage> ChunkStore<S> {
    pub fn new(config: Arc<Config>, paths: PathResolver, storage: S) -> Self {
        let languages = LanguageSet::from_config(&config);
        Self {
            config,
            languages,
            paths,
            storage,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn languages(&self) -> &LanguageSet {
        &self.languages
    }

    pub fn paths(&self) -> &PathResolver {
        &self.paths
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn chunk_exists(&self, name: &str) -> Result<bool> {
        validate_chunk_name(name)?;
        let path = self.paths.source_path(name);
        self.storage
            .exists(&path)
            .await
            .map_err(|err| ResxError::io(path, err))
    }

    /// Create a chunk with no keys. Fails with `AlreadyExists` if the name is
    /// taken, leaving the existing chunk untouched.
    pub async fn create_empty_chunk(&self, name: &str) -> Result<()> {
        validate_chunk_name(name)?;
        if self.chunk_exists(name).await? {
            return Err(ResxError::AlreadyExists(name.to_string()));
        }

        self.save(&Chunk::empty(name)).await?;
        debug!(chunk = name, "created empty resource");
        Ok(())
    }

    pub async fn load_chunk(&self, name: &str) -> Result<Chunk> {
        validate_chunk_name(name)?;
        let path = self.paths.source_path(name);
        let content = self
            .storage
            .read(&path)
            .await
            .map_err(|err| ResxError::io(&path, err))?
            .ok_or_else(|| ResxError::NotFound(name.to_string()))?;
        let chunk = Chunk::from_source(name, &content)?;
        chunk.validate(&self.languages)?;
        Ok(chunk)
    }

    /// Default-language value of every key, in key order. Keys lacking a
    /// default-language value are skipped.
    pub async fn read_default_language_entries(&self, name: &str) -> Result<Vec<(String, String)>> {
        let chunk = self.load_chunk(name).await?;
        let default_lang = self.languages.default_lang();
        Ok(chunk
            .entries
            .into_iter()
            .filter_map(|mut entry| {
                let value = entry.values.remove(default_lang)?;
                Some((entry.key, value))
            })
            .collect())
    }

    /// Insert a new key into an existing chunk.
    ///
    /// All preconditions are checked before anything is written.
    pub async fn add_key(&self, chunk_name: &str, key: &str, values: LanguageValues) -> Result<()> {
        let mut chunk = self.load_chunk(chunk_name).await?;

        validate_key_name(key)?;
        if chunk.contains_key(key) {
            return Err(ValidationError::DuplicateKey {
                chunk: chunk_name.to_string(),
                key: key.to_string(),
            }
            .into());
        }
        self.validate_values(key, &values)?;

        chunk.entries.push(KeyEntry {
            key: key.to_string(),
            values,
        });
        self.save(&chunk).await?;
        debug!(chunk = chunk_name, key, "added key");
        Ok(())
    }

    fn validate_values(&self, key: &str, values: &LanguageValues) -> Result<(), ValidationError> {
        let default_lang = self.languages.default_lang();
        if !values.contains_key(default_lang) {
            return Err(ValidationError::MissingDefaultLanguage {
                key: key.to_string(),
                lang: default_lang.to_string(),
            });
        }

        for (lang, value) in values {
            if !self.languages.contains(lang) {
                return Err(ValidationError::UnknownLanguage { lang: lang.clone() });
            }
            if value.is_empty() {
                return Err(ValidationError::EmptyValue {
                    key: key.to_string(),
                    lang: lang.clone(),
                });
            }
        }
        Ok(())
    }

    pub async fn list_chunk_names(&self) -> Result<Vec<String>> {
        self.paths.list_chunk_names(&self.storage).await
    }

    /// Rewrite every chunk in canonical form. Returns the names of chunks
    /// whose source actually changed. Every chunk is parsed and validated
    /// before the first write, so an invalid chunk leaves all sources as they
    /// were.
    pub async fn normalize_all(&self) -> Result<Vec<String>> {
        let mut pending = Vec::new();
        for name in self.list_chunk_names().await? {
            let path = self.paths.source_path(&name);
            let current = self
                .storage
                .read(&path)
                .await
                .map_err(|err| ResxError::io(&path, err))?
                .unwrap_or_default();

            let chunk = Chunk::from_source(&name, &current)?;
            chunk.validate(&self.languages)?;
            let canonical = chunk.to_source(&self.languages, self.config.tab_size)?;
            if canonical != current {
                pending.push((name, canonical));
            }
        }

        let mut rewritten = Vec::with_capacity(pending.len());
        for (name, canonical) in pending {
            self.write(&name, &canonical).await?;
            debug!(chunk = %name, "normalized resource source");
            rewritten.push(name);
        }
        Ok(rewritten)
    }

    async fn save(&self, chunk: &Chunk) -> Result<()> {
        let content = chunk.to_source(&self.languages, self.config.tab_size)?;
        self.write(&chunk.name, &content).await
    }

    async fn write(&self, name: &str, content: &str) -> Result<()> {
        let path = self.paths.source_path(name);
        self.storage
            .write(&path, content)
            .await
            .map_err(|err| ResxError::io(path, err))
    }
}
