/// A single row in the directory view.
///
/// Entries are fixed-shape records. Size and modification time are optional
/// because directories, the synthetic parent row, and files whose metadata
/// could not be read all carry no value for them.
use super::format::{format_modified, format_optional_size};
use compact_str::CompactString;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Reserved display name of the synthetic parent row.
pub const PARENT_NAME: &str = "..";

/// What kind of row an [`Entry`] is.
///
/// The declaration order is the group order used by the comparator:
/// the parent row first, then directories, then files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// The synthetic `..` row that leads to the parent directory.
    Parent,
    Directory,
    /// Anything that is not a directory, including symbolic links.
    File,
}

#[derive(Debug, Clone, Serialize)]
pub struct Entry {
    /// File or directory name only (NOT the full path).
    pub name: CompactString,

    /// Absolute path of the entry. For the parent row this is the parent
    /// directory itself.
    pub path: PathBuf,

    pub kind: EntryKind,

    /// Size in bytes. `None` for directories, the parent row, and files
    /// whose metadata could not be read.
    pub size: Option<u64>,

    /// Last-modified timestamp, same absence rule as `size`.
    pub modified: Option<SystemTime>,

    /// Pre-formatted size column, computed once at scan time.
    pub display_size: String,

    /// Pre-formatted modified column, computed once at scan time.
    pub display_modified: String,
}

impl Entry {
    /// Create a directory row. No metadata is collected for directories.
    pub fn directory(name: CompactString, path: PathBuf) -> Self {
        Self {
            name,
            path,
            kind: EntryKind::Directory,
            size: None,
            modified: None,
            display_size: format_optional_size(None),
            display_modified: format_modified(None),
        }
    }

    /// Create a file row. Pass `None` for values that could not be read.
    pub fn file(
        name: CompactString,
        path: PathBuf,
        size: Option<u64>,
        modified: Option<SystemTime>,
    ) -> Self {
        Self {
            name,
            path,
            kind: EntryKind::File,
            size,
            modified,
            display_size: format_optional_size(size),
            display_modified: format_modified(modified),
        }
    }

    /// Create the synthetic `..` row pointing at `parent_dir`.
    ///
    /// Its display columns are blank rather than showing a placeholder.
    pub fn parent(parent_dir: PathBuf) -> Self {
        Self {
            name: CompactString::const_new(PARENT_NAME),
            path: parent_dir,
            kind: EntryKind::Parent,
            size: None,
            modified: None,
            display_size: String::new(),
            display_modified: String::new(),
        }
    }

    /// Build the parent row for `directory`, if one should be shown.
    ///
    /// Returns `None` when a glob pattern is active or when the directory
    /// has no parent distinct from itself (a filesystem root).
    pub fn parent_of(directory: &Path, pattern_active: bool) -> Option<Self> {
        if pattern_active {
            return None;
        }
        let parent = directory.parent()?;
        if parent.as_os_str().is_empty() || parent == directory {
            return None;
        }
        Some(Self::parent(parent.to_path_buf()))
    }

    #[inline]
    pub fn is_parent(&self) -> bool {
        self.kind == EntryKind::Parent
    }

    /// `true` for directories and for the parent row.
    #[inline]
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Parent | EntryKind::Directory)
    }

    /// Label for the "type" column.
    pub fn kind_label(&self) -> &'static str {
        match self.kind {
            EntryKind::Parent => "",
            EntryKind::Directory => "Directory",
            EntryKind::File => "File",
        }
    }
}
