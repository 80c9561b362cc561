//! Operation implementations for scriptforge workspaces
//!
//! Each module implements one workspace operation over a caller-supplied
//! root set: `scan` discovers script files, `search` greps an inventory,
//! `commandlet` runs an external batch process, `source` reads one resolved
//! script. Root sets are inputs, never cached; the dispatch layer that
//! routes named operations to these functions lives outside this crate.

pub mod commandlet;
pub mod scan;
pub mod search;
pub mod source;

// Re-export the operation entry points
pub use commandlet::{run_commandlet, Commandlet};
pub use scan::scan;
pub use search::{search, Search, SearchQuery};
pub use source::read_source;
