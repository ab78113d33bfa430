//! Core compilation pipeline.
//!
//! - `chunk`: chunk data model and source-file format
//! - `store`: source chunk store (create, add key, list, normalize)
//! - `compiler`: distribution compiler (full and single-chunk rebuilds)
//! - `artifacts`: per-kind renderers (runtime object, type declaration, flat file)
//! - `markup`: tree rendering at a configured tab width
//! - `paths`: source and dist file locations
//! - `storage`: filesystem and in-memory storage backends

pub mod artifacts;
pub mod chunk;
pub mod compiler;
pub mod markup;
pub mod paths;
pub mod storage;
pub mod store;

pub use artifacts::{Artifact, Render, RenderContext};
pub use chunk::{Chunk, KeyEntry, LanguageSet, LanguageValues};
pub use compiler::{ChunkSelection, CompileReason, CompileReport, DistCompiler, RenderedArtifact};
pub use markup::{Markup, Node, Tree};
pub use paths::{ArtifactKind, PathResolver};
pub use storage::{FsStorage, MemoryStorage, Storage};
pub use store::ChunkStore;
