//! resxgen - localization resource compiler
//!
//! resxgen keeps translation "chunks" (named groups of keys with one value per
//! language) as JSON source files and compiles them into distribution
//! artifacts: a JavaScript runtime object per language, a TypeScript
//! declaration of its shape, and flat `prefix.chunk.key=value` files.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (commands, interactive wizard, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Chunk store, distribution compiler and formatters
//! - `error`: Error taxonomy shared by the core

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
