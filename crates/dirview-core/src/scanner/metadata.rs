/// Entry metadata extraction for a single `read_dir` item.
///
/// Directories are classified from the entry's file type alone and never
/// stat-ed. Files are stat-ed without following symbolic links; any failure
/// yields a row with no size or timestamp rather than an error.
use crate::model::Entry;
use compact_str::CompactString;
use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::PathBuf;
use std::time::SystemTime;
use tracing::debug;

/// Result of extracting one row.
pub struct Extracted {
    pub entry: Entry,
    /// `true` if a metadata lookup failed and placeholders were used.
    pub degraded: bool,
}

/// Build the row for `dir_entry`, whose name has already passed the filter.
pub fn extract_entry(dir_entry: &DirEntry, name: CompactString) -> Extracted {
    let path = dir_entry.path();

    // `DirEntry::file_type` does not follow symlinks; on most platforms it
    // comes straight from the directory listing with no extra syscall.
    let file_type = match dir_entry.file_type() {
        Ok(ft) => Some(ft),
        Err(err) => {
            debug!("file type unavailable for {}: {err}", path.display());
            None
        }
    };

    if file_type.is_some_and(|ft| ft.is_dir()) {
        return Extracted {
            entry: Entry::directory(name, path),
            degraded: false,
        };
    }

    let stat = fs::symlink_metadata(&path);
    let mut extracted = from_stat(name, path, stat);
    extracted.degraded |= file_type.is_none();
    extracted
}

/// Build a row from the result of stat-ing a non-directory entry.
///
/// A failed stat yields a file row with neither size nor timestamp.
pub fn from_stat(name: CompactString, path: PathBuf, stat: io::Result<Metadata>) -> Extracted {
    match stat {
        Ok(meta) if meta.is_dir() => Extracted {
            entry: Entry::directory(name, path),
            degraded: false,
        },
        Ok(meta) => file_row(name, path, meta.len(), meta.modified()),
        Err(err) => {
            debug!("metadata unavailable for {}: {err}", path.display());
            unreadable(name, path)
        }
    }
}

/// Size and timestamp are reported together or not at all.
fn file_row(
    name: CompactString,
    path: PathBuf,
    size: u64,
    modified: io::Result<SystemTime>,
) -> Extracted {
    match modified {
        Ok(modified) => Extracted {
            entry: Entry::file(name, path, Some(size), Some(modified)),
            degraded: false,
        },
        Err(err) => {
            debug!("modification time unavailable for {}: {err}", path.display());
            unreadable(name, path)
        }
    }
}

fn unreadable(name: CompactString, path: PathBuf) -> Extracted {
    Extracted {
        entry: Entry::file(name, path, None, None),
        degraded: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntryKind;
    use std::io::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn failed_stat_gives_an_empty_degraded_row() {
        let err = io::Error::from(ErrorKind::PermissionDenied);
        let out = from_stat("locked.bin".into(), PathBuf::from("/d/locked.bin"), Err(err));
        assert!(out.degraded);
        assert_eq!(out.entry.kind, EntryKind::File);
        assert_eq!(out.entry.size, None);
        assert_eq!(out.entry.modified, None);
    }

    #[test]
    fn missing_timestamp_drops_the_size_too() {
        let err = io::Error::from(ErrorKind::Unsupported);
        let out = file_row("a.txt".into(), PathBuf::from("/d/a.txt"), 42, Err(err));
        assert!(out.degraded);
        assert_eq!(out.entry.size, None);
        assert_eq!(out.entry.modified, None);
    }

    #[test]
    fn readable_file_has_size_and_timestamp() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.bin");
        fs::write(&path, [0u8; 10]).unwrap();

        let out = from_stat("data.bin".into(), path.clone(), fs::symlink_metadata(&path));
        assert!(!out.degraded);
        assert_eq!(out.entry.size, Some(10));
        assert!(out.entry.modified.is_some());
    }

    #[test]
    fn directory_stat_gives_a_directory_row() {
        let tmp = TempDir::new().unwrap();
        let out = from_stat("x".into(), tmp.path().to_path_buf(), fs::symlink_metadata(tmp.path()));
        assert!(!out.degraded);
        assert_eq!(out.entry.kind, EntryKind::Directory);
        assert_eq!(out.entry.size, None);
    }
}
