pub mod add;
pub mod build;
pub mod clean;
mod command_result;
mod context;
pub mod create;
pub mod init;
pub mod list;

pub use command_result::*;
pub use context::ResxContext;
