/// Data model for the directory view.
///
/// Re-exports the entry row type and its display formatting helpers.
pub mod entry;
pub mod format;

pub use entry::{Entry, EntryKind, PARENT_NAME};
