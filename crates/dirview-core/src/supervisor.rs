/// Scan supervisor — owns the single active scan and the store it feeds.
///
/// All scans share one channel. Each message carries the [`ScanId`] of its
/// scan, and the supervisor applies only messages from the current scan.
/// Starting a new scan bumps the current id, so anything still in flight
/// from an older scan is discarded on arrival. This holds however late the
/// old thread notices its cancel flag.
///
/// Store mutation happens only inside [`ScanSupervisor::process_events`]
/// and [`ScanSupervisor::wait_for_completion`], on whichever thread owns
/// the supervisor.
use crate::config::ExplorerConfig;
use crate::error::PatternError;
use crate::filter::NameFilter;
use crate::model::Entry;
use crate::scanner::progress::{ScanEvent, ScanMessage, ScanSummary};
use crate::scanner::{self, ScanHandle, ScanId, ScanRequest};
use crate::store::{PresentationStore, SortColumn, SortDirection};
use crossbeam_channel::{Receiver, Sender};
use std::time::{Duration, Instant};
use tracing::{info, trace};

/// Maximum number of scan messages applied per [`ScanSupervisor::process_events`] call.
///
/// Prevents a backlog from blocking the consumer thread for a perceptible
/// duration.
pub const MAX_EVENTS_PER_DRAIN: usize = 300;

/// The current phase of the supervised view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    /// No scan started yet, or the last one was stopped.
    Idle,
    /// Rows are streaming in, in arrival order.
    Scanning,
    /// The scan finished and the rows are ordered.
    Complete,
}

/// What one drain of the channel changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewUpdate {
    /// Rows appended to the store.
    pub appended: usize,
    /// Set when the current scan completed during this drain. The store has
    /// been ordered and may now be re-sorted.
    pub completed: Option<ScanSummary>,
    /// Messages discarded because they came from a superseded scan.
    pub dropped: usize,
}

impl ViewUpdate {
    /// `true` if the store changed and the view should be re-rendered.
    pub fn needs_repaint(&self) -> bool {
        self.appended > 0 || self.completed.is_some()
    }
}

pub struct ScanSupervisor {
    events_tx: Sender<ScanMessage>,
    events_rx: Receiver<ScanMessage>,
    /// The single active (or most recently finished) scan.
    current: Option<ScanHandle>,
    next_id: u64,
    phase: ScanPhase,
    last_summary: Option<ScanSummary>,
    store: PresentationStore,
    chunk_size: usize,
    max_events_per_drain: usize,
}

impl ScanSupervisor {
    pub fn new(config: &ExplorerConfig) -> Self {
        let (events_tx, events_rx) = crossbeam_channel::unbounded();
        Self {
            events_tx,
            events_rx,
            current: None,
            next_id: 1,
            phase: ScanPhase::Idle,
            last_summary: None,
            store: PresentationStore::new(config.default_sort),
            chunk_size: config.chunk_size,
            max_events_per_drain: config.max_events_per_drain.max(1),
        }
    }

    /// Supersede any running scan and start `request`.
    ///
    /// The store is reset and, for an unfiltered listing of a directory that
    /// has a parent, seeded with the `..` row. Fails only if the pattern
    /// does not compile, in which case nothing changes.
    pub fn start_scan(&mut self, request: ScanRequest) -> Result<ScanId, PatternError> {
        let filter = NameFilter::new(request.pattern.as_deref())?;

        self.cancel_current();

        self.store.reset();
        if let Some(parent) = Entry::parent_of(&request.directory, request.has_pattern()) {
            self.store.push(parent);
        }

        let id = ScanId(self.next_id);
        self.next_id += 1;
        self.phase = ScanPhase::Scanning;
        self.last_summary = None;
        self.current = Some(scanner::start_scan(
            id,
            request,
            filter,
            self.chunk_size,
            self.events_tx.clone(),
        ));
        Ok(id)
    }

    /// Cancel the current scan without starting another. Used on teardown.
    ///
    /// Rows already applied stay in the store.
    pub fn stop_scan(&mut self) {
        self.cancel_current();
        self.phase = ScanPhase::Idle;
    }

    fn cancel_current(&mut self) {
        if let Some(old) = self.current.take() {
            old.cancel();
            if self.phase == ScanPhase::Scanning {
                info!(
                    "Superseding scan {} of {}",
                    old.id(),
                    old.request().directory.display()
                );
            }
        }
    }

    /// Apply pending scan messages without blocking. Called once per frame
    /// by the rendering side.
    pub fn process_events(&mut self) -> ViewUpdate {
        let mut update = ViewUpdate::default();
        let mut applied = 0usize;
        while applied < self.max_events_per_drain {
            let msg = match self.events_rx.try_recv() {
                Ok(m) => m,
                Err(_) => break,
            };
            applied += 1;
            self.apply(msg, &mut update);
        }
        update
    }

    /// Block until the current scan completes or `timeout` elapses.
    ///
    /// Returns the completion summary, or `None` on timeout or when no scan
    /// is running. Returns immediately if the current scan already finished.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> Option<ScanSummary> {
        match self.phase {
            ScanPhase::Complete => return self.last_summary,
            ScanPhase::Idle => return None,
            ScanPhase::Scanning => {}
        }

        // A timeout too large for an `Instant` waits without a deadline.
        let deadline = Instant::now().checked_add(timeout);
        let mut update = ViewUpdate::default();
        loop {
            let received = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    self.events_rx.recv_timeout(remaining).ok()
                }
                None => self.events_rx.recv().ok(),
            };
            let msg = received?;
            self.apply(msg, &mut update);
            if let Some(summary) = update.completed {
                return Some(summary);
            }
        }
    }

    fn apply(&mut self, msg: ScanMessage, update: &mut ViewUpdate) {
        let current = self.current.as_ref().map(ScanHandle::id);
        if current != Some(msg.scan) || self.phase != ScanPhase::Scanning {
            trace!("Dropping message from stale scan {}", msg.scan);
            update.dropped += 1;
            return;
        }

        match msg.event {
            ScanEvent::Chunk(rows) => {
                update.appended += rows.len();
                self.store.append(rows);
            }
            ScanEvent::Complete(summary) => {
                self.store.finalize_order();
                self.phase = ScanPhase::Complete;
                self.last_summary = Some(summary);
                update.completed = Some(summary);
            }
        }
    }

    /// Re-order the rows of the view. Does not rescan.
    pub fn resort(&mut self, column: SortColumn, direction: SortDirection) {
        self.store.resort(column, direction);
    }

    pub fn store(&self) -> &PresentationStore {
        &self.store
    }

    pub fn rows(&self) -> &[Entry] {
        self.store.rows()
    }

    pub fn phase(&self) -> ScanPhase {
        self.phase
    }

    pub fn current_id(&self) -> Option<ScanId> {
        self.current.as_ref().map(ScanHandle::id)
    }

    /// Summary of the current scan once it has completed.
    pub fn last_summary(&self) -> Option<ScanSummary> {
        self.last_summary
    }
}

impl Drop for ScanSupervisor {
    fn drop(&mut self) {
        self.stop_scan();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const TIMEOUT: Duration = Duration::from_secs(30);

    fn supervisor() -> ScanSupervisor {
        ScanSupervisor::new(&ExplorerConfig::default())
    }

    #[test]
    fn stale_messages_are_dropped() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("real.txt")).unwrap();

        let mut sup = supervisor();
        let first = sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();
        sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();

        // A chunk tagged with the superseded id, queued while the new scan runs.
        let stale = Entry::file("ghost".into(), PathBuf::from("/ghost"), Some(1), None);
        sup.events_tx
            .send(ScanMessage {
                scan: first,
                event: ScanEvent::Chunk(vec![stale]),
            })
            .unwrap();

        let summary = sup.wait_for_completion(TIMEOUT).expect("scan completes");
        assert_eq!(summary.entry_count, 1);
        assert!(sup.rows().iter().all(|e| e.name != "ghost"));
        assert!(sup.rows().iter().any(|e| e.name == "real.txt"));
    }

    #[test]
    fn messages_after_completion_are_dropped() {
        let tmp = TempDir::new().unwrap();
        let mut sup = supervisor();
        let id = sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();
        sup.wait_for_completion(TIMEOUT).expect("scan completes");

        let late = Entry::file("late".into(), PathBuf::from("/late"), None, None);
        sup.events_tx
            .send(ScanMessage {
                scan: id,
                event: ScanEvent::Chunk(vec![late]),
            })
            .unwrap();
        assert_eq!(sup.process_events().dropped, 1);
    }

    #[test]
    fn stop_scan_returns_to_idle_and_ignores_output() {
        let tmp = TempDir::new().unwrap();
        File::create(tmp.path().join("a.txt")).unwrap();

        let mut sup = supervisor();
        sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();
        sup.stop_scan();
        assert_eq!(sup.phase(), ScanPhase::Idle);
        assert!(sup.current_id().is_none());
        assert!(sup.wait_for_completion(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn unbounded_wait_runs_to_completion() {
        let tmp = TempDir::new().unwrap();
        let mut sup = supervisor();
        sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();

        let summary = sup.wait_for_completion(Duration::MAX).expect("scan completes");
        assert_eq!(summary.entry_count, 0);
        assert_eq!(sup.last_summary(), Some(summary));
        assert_eq!(sup.phase(), ScanPhase::Complete);
    }

    #[test]
    fn ids_increase_per_scan() {
        let tmp = TempDir::new().unwrap();
        let mut sup = supervisor();
        let a = sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();
        let b = sup.start_scan(ScanRequest::listing(tmp.path())).unwrap();
        assert!(b > a);
        assert_eq!(sup.current_id(), Some(b));
    }
}
