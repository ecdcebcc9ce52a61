//! Filesystem scanning
//!
//! - **finder**: repository discovery
//! - **size**: disk usage accounting for before/after snapshots

mod finder;
mod size;

pub use finder::{validate_root, RepositoryFinder, DEFAULT_MARKER};
pub use size::{folder_size, SizeAccountant};
