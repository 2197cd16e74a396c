/// Single-directory listing — the body of every scan thread.
///
/// Walks one directory (never recursing) in filesystem order, filters names
/// before touching metadata, and ships rows to the supervisor in fixed-size
/// chunks so the consumer applies a few large updates instead of one per
/// entry.
///
/// # Cancellation
///
/// The cancel flag is read before every entry and again before the final
/// chunk and the completion event. Once it is set the scan returns without
/// sending anything else. There is no "cancelled" message; the supervisor
/// already knows which scan it superseded.
///
/// # Failure policy
///
/// Nothing here fails the scan. An unreadable directory completes with zero
/// rows, an unreadable item is skipped, and an unreadable file is listed
/// without size or timestamp. Each recovery is counted in
/// [`ScanSummary::error_count`].
use super::metadata::extract_entry;
use super::progress::{ScanEvent, ScanMessage, ScanSummary};
use super::ScanId;
use crate::filter::NameFilter;
use crate::model::Entry;
use compact_str::CompactString;
use crossbeam_channel::Sender;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::debug;

/// Upper bound on the capacity reserved up front for one chunk.
const MAX_CHUNK_PREALLOC: usize = 4_096;

/// How a call to [`scan_directory`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every row and the completion event were sent.
    Completed(ScanSummary),
    /// The cancel flag was observed; nothing further was sent.
    Cancelled,
    /// The receiving side was dropped mid-scan.
    Disconnected,
}

/// Enumerate `directory` and stream its rows to `events_tx` tagged as `scan`.
pub fn scan_directory(
    scan: ScanId,
    directory: &Path,
    filter: &NameFilter,
    chunk_size: usize,
    cancel_flag: &AtomicBool,
    events_tx: &Sender<ScanMessage>,
) -> ScanOutcome {
    let start = Instant::now();
    let chunk_size = chunk_size.max(1);
    let send = |event: ScanEvent| events_tx.send(ScanMessage { scan, event }).is_ok();

    let mut entry_count: usize = 0;
    let mut error_count: u64 = 0;
    let mut chunk: Vec<Entry> = Vec::with_capacity(chunk_size.min(MAX_CHUNK_PREALLOC));

    match fs::read_dir(directory) {
        Ok(read_dir) => {
            for item in read_dir {
                if cancel_flag.load(Ordering::Relaxed) {
                    return ScanOutcome::Cancelled;
                }

                let dir_entry = match item {
                    Ok(e) => e,
                    Err(err) => {
                        error_count += 1;
                        debug!("skipping unreadable item in {}: {err}", directory.display());
                        continue;
                    }
                };

                // Filter on the name before any metadata work.
                let file_name = dir_entry.file_name();
                let name = file_name.to_string_lossy();
                if !filter.matches(&name) {
                    continue;
                }

                let extracted = extract_entry(&dir_entry, CompactString::new(name.as_ref()));
                if extracted.degraded {
                    error_count += 1;
                }
                chunk.push(extracted.entry);
                entry_count += 1;

                if chunk.len() >= chunk_size {
                    let full = std::mem::replace(
                        &mut chunk,
                        Vec::with_capacity(chunk_size.min(MAX_CHUNK_PREALLOC)),
                    );
                    if !send(ScanEvent::Chunk(full)) {
                        return ScanOutcome::Disconnected;
                    }
                }
            }
        }
        Err(err) => {
            debug!(
                "cannot enumerate {}: {err}; reporting an empty listing",
                directory.display()
            );
        }
    }

    if cancel_flag.load(Ordering::Relaxed) {
        return ScanOutcome::Cancelled;
    }

    if !chunk.is_empty() && !send(ScanEvent::Chunk(chunk)) {
        return ScanOutcome::Disconnected;
    }

    let summary = ScanSummary {
        entry_count,
        error_count,
        duration: start.elapsed(),
    };
    debug!(
        "Listing of {} complete: {} entries, {} recovered errors in {:?}",
        directory.display(),
        entry_count,
        error_count,
        summary.duration
    );

    if !send(ScanEvent::Complete(summary)) {
        return ScanOutcome::Disconnected;
    }
    ScanOutcome::Completed(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;
    use std::fs::File;
    use tempfile::TempDir;

    fn drain(rx: &crossbeam_channel::Receiver<ScanMessage>) -> Vec<ScanEvent> {
        rx.try_iter().map(|m| m.event).collect()
    }

    #[test]
    fn chunks_are_exactly_chunk_size_until_the_last() {
        let tmp = TempDir::new().unwrap();
        for i in 0..5 {
            File::create(tmp.path().join(format!("f{i}"))).unwrap();
        }
        let (tx, rx) = unbounded();
        let cancel = AtomicBool::new(false);

        let outcome = scan_directory(ScanId(1), tmp.path(), &NameFilter::all(), 2, &cancel, &tx);
        let ScanOutcome::Completed(summary) = outcome else {
            panic!("expected completion, got {outcome:?}");
        };
        assert_eq!(summary.entry_count, 5);

        let sizes: Vec<usize> = drain(&rx)
            .into_iter()
            .filter_map(|e| match e {
                ScanEvent::Chunk(rows) => Some(rows.len()),
                ScanEvent::Complete(_) => None,
            })
            .collect();
        assert_eq!(sizes, [2, 2, 1]);
    }

    #[test]
    fn pre_cancelled_scan_sends_nothing() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a")).unwrap();
        let (tx, rx) = unbounded();
        let cancel = AtomicBool::new(true);

        let outcome = scan_directory(ScanId(1), tmp.path(), &NameFilter::all(), 10, &cancel, &tx);
        assert_eq!(outcome, ScanOutcome::Cancelled);
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn dropped_receiver_stops_the_scan() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a")).unwrap();
        let (tx, rx) = unbounded();
        drop(rx);
        let cancel = AtomicBool::new(false);

        let outcome = scan_directory(ScanId(1), tmp.path(), &NameFilter::all(), 10, &cancel, &tx);
        assert_eq!(outcome, ScanOutcome::Disconnected);
    }

    #[test]
    fn messages_carry_the_scan_id() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a")).unwrap();
        let (tx, rx) = unbounded();
        let cancel = AtomicBool::new(false);

        scan_directory(ScanId(42), tmp.path(), &NameFilter::all(), 10, &cancel, &tx);
        let ids: Vec<ScanId> = rx.try_iter().map(|m| m.scan).collect();
        assert_eq!(ids, [ScanId(42), ScanId(42)]);
    }
}
