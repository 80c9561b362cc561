//! Scriptforge Core Library
//!
//! Shared data model, error type and the path-confinement boundary used by
//! every scriptforge operation. The operation implementations themselves
//! (scanning, searching, commandlet execution) live in `scriptforge-tools`.

pub mod confine;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use confine::{is_confined, resolve};
pub use error::{ForgeError, ForgeResult};
pub use types::{
    CommandletResult, ContextLine, FileMatches, ResolvedPath, ScriptFile, SearchMatch, SourceFile,
};
