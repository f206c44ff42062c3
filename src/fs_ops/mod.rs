//! Filesystem operations: in-place renames and post-run folder trimming.

mod helpers;
mod relocate;
mod trim;

pub use helpers::describe_io_error;
pub use relocate::{relocate, Relocation};
pub use trim::{FolderTrimmer, TrimReport};
