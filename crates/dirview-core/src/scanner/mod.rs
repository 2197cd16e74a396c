/// Scanner module — background listing of one directory.
///
/// A scan runs on its own named thread and reports through a crossbeam
/// channel owned by the caller:
///
/// - [`listing`] walks the directory and batches rows into chunks.
/// - [`metadata`] turns one `read_dir` item into an [`Entry`](crate::model::Entry).
/// - [`progress`] defines the tagged messages on the channel.
///
/// The only state shared between the caller and a scan thread is the
/// cancel flag, a single `AtomicBool` that only ever goes from `false`
/// to `true`.
pub mod listing;
pub mod metadata;
pub mod progress;

use crate::filter::NameFilter;
use crossbeam_channel::Sender;
use progress::ScanMessage;
use std::fmt;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Default number of rows per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Identity of one scan. Allocated in increasing order by the supervisor;
/// every message a scan sends carries it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScanId(pub u64);

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What to scan: a directory plus an optional name pattern.
///
/// Two requests describe the same scan only if both fields are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScanRequest {
    pub directory: PathBuf,
    pub pattern: Option<String>,
}

impl ScanRequest {
    pub fn new(directory: impl Into<PathBuf>, pattern: Option<String>) -> Self {
        Self {
            directory: directory.into(),
            pattern,
        }
    }

    /// An unfiltered listing of `directory`.
    pub fn listing(directory: impl Into<PathBuf>) -> Self {
        Self::new(directory, None)
    }

    pub fn has_pattern(&self) -> bool {
        self.pattern.is_some()
    }
}

/// Handle to a running or finished scan. Allows cancellation.
///
/// Dropping the handle does not stop the thread; call [`ScanHandle::cancel`].
pub struct ScanHandle {
    id: ScanId,
    request: ScanRequest,
    /// Flag to request cancellation.
    cancel_flag: Arc<AtomicBool>,
    /// Join handle for the scan thread.
    _thread: Option<thread::JoinHandle<()>>,
}

impl ScanHandle {
    pub fn id(&self) -> ScanId {
        self.id
    }

    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    /// Request the scan to stop as soon as possible. Does not block.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Relaxed)
    }
}

/// Start scanning `request.directory` on a background thread.
///
/// `filter` must be compiled from `request.pattern`. Messages go to
/// `events_tx` tagged with `id`.
pub fn start_scan(
    id: ScanId,
    request: ScanRequest,
    filter: NameFilter,
    chunk_size: usize,
    events_tx: Sender<ScanMessage>,
) -> ScanHandle {
    let cancel_flag = Arc::new(AtomicBool::new(false));
    let cancel_clone = cancel_flag.clone();
    let directory = request.directory.clone();

    let thread = thread::Builder::new()
        .name("dirview-scanner".into())
        .spawn(move || {
            info!("Starting scan {id} of {}", directory.display());
            let outcome = listing::scan_directory(
                id,
                &directory,
                &filter,
                chunk_size,
                &cancel_clone,
                &events_tx,
            );
            tracing::debug!("Scan {id} finished: {outcome:?}");
        })
        .expect("failed to spawn scanner thread");

    ScanHandle {
        id,
        request,
        cancel_flag,
        _thread: Some(thread),
    }
}
