use std::{path::Path, sync::Arc};

use anyhow::Result;

use crate::config::load_config;
use crate::core::{ChunkStore, DistCompiler, FsStorage, PathResolver};

/// Store and compiler wired to the configuration found from a project path.
pub struct ResxContext {
    pub store: ChunkStore<FsStorage>,
    pub compiler: DistCompiler,
    pub verbose: bool,
}

impl ResxContext {
    pub fn new(path: &Path, verbose: bool) -> Result<Self> {
        let loaded = load_config(path)?;

        // In verbose mode, inform user if using default config
        if verbose && !loaded.from_file {
            eprintln!("Note: No .resxrc.json found, using default configuration");
        }

        let config = Arc::new(loaded.config);
        let (src_folder, dist_folder) = config.folders(&loaded.root);
        let paths = PathResolver::new(src_folder, dist_folder);

        Ok(Self {
            store: ChunkStore::new(config.clone(), paths, FsStorage),
            compiler: DistCompiler::new(config),
            verbose,
        })
    }
}
