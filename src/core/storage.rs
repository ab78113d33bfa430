//! Storage backends for source chunks and distribution artifacts.
//!
//! The store and the compiler only talk to storage through [`Storage`], so
//! tests run against [`MemoryStorage`] while the binary uses [`FsStorage`].

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use walkdir::WalkDir;

/// Async key/value file storage addressed by path.
#[allow(async_fn_in_trait)]
pub trait Storage {
    /// Read a whole file. `Ok(None)` if it does not exist.
    async fn read(&self, path: &Path) -> io::Result<Option<String>>;

    /// Replace the whole file. Either the new content is stored or the old
    /// content is left in place.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// All files below `dir` (recursively), sorted. Empty if `dir` is missing.
    async fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    async fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Filesystem storage using `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStorage;

impl Storage for FsStorage {
    async fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match tokio::fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // Write next to the target, then rename over it.
        let tmp_path = temp_path_for(path);
        if let Err(err) = tokio::fs::write(&tmp_path, contents).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(err);
        }
        if let Err(err) = tokio::fs::rename(&tmp_path, path).await {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(err);
        }
        Ok(())
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !tokio::fs::try_exists(dir).await? {
            return Ok(Vec::new());
        }

        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || {
            let mut files = Vec::new();
            for entry in WalkDir::new(&dir).follow_links(true) {
                let entry = entry.map_err(io::Error::from)?;
                if entry.file_type().is_file() && !is_temp_file(entry.path()) {
                    files.push(entry.into_path());
                }
            }
            files.sort();
            Ok::<_, io::Error>(files)
        })
        .await
        .map_err(io::Error::other)?
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }
}

const TEMP_SUFFIX: &str = ".resxgen-tmp";

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(TEMP_SUFFIX);
    path.with_file_name(name)
}

fn is_temp_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(TEMP_SUFFIX))
}

/// In-memory storage. Paths are plain map keys; directories are implied.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored file.
    pub fn snapshot(&self) -> BTreeMap<PathBuf, String> {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.into(), contents.into());
    }
}

impl Storage for MemoryStorage {
    async fn read(&self, path: &Path) -> io::Result<Option<String>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(files.get(path).cloned())
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.insert(path, contents);
        Ok(())
    }

    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(files.contains_key(path))
    }

    async fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(files
            .keys()
            .filter(|path| path.starts_with(dir) && path.as_path() != dir)
            .cloned()
            .collect())
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        match files.remove(path) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )),
        }
    }
}
