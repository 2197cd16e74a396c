/// Explorer — the entry point the UI layer drives.
///
/// Ties navigation history, path/pattern input, and the scan supervisor
/// together. Every navigation verb returns `true` if it started a scan and
/// `false` if it was ignored. An ignored request changes nothing: no history
/// entry, no reset of the rows on screen.
///
/// A pattern-filtered view is an overlay on the history trail. It moves the
/// current directory but records nothing, and it disables back/forward
/// until the next plain navigation.
use crate::config::ExplorerConfig;
use crate::filter::split_path_pattern;
use crate::history::{resolve_path, NavigationHistory};
use crate::model::Entry;
use crate::scanner::progress::ScanSummary;
use crate::scanner::ScanRequest;
use crate::store::{SortColumn, SortDirection, SortKey};
use crate::supervisor::{ScanPhase, ScanSupervisor, ViewUpdate};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

/// Navigation state reported to the UI after every navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub current_path: PathBuf,
    /// The active name pattern, if the view is filtered.
    pub pattern: Option<String>,
    pub back_enabled: bool,
    pub forward_enabled: bool,
}

pub struct Explorer {
    history: NavigationHistory,
    supervisor: ScanSupervisor,
    /// Pattern of the current view, `None` for a plain listing.
    pattern: Option<String>,
}

impl Explorer {
    /// Create an explorer positioned at `initial` and start listing it.
    ///
    /// A relative `initial` is resolved against the process working
    /// directory. If it is not a directory no scan starts, but it still
    /// becomes the base for later relative navigation.
    pub fn open(initial: &Path, config: &ExplorerConfig) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        let start = resolve_path(initial, &cwd);

        let mut explorer = Self {
            history: NavigationHistory::new(start.clone(), config.history_limit),
            supervisor: ScanSupervisor::new(config),
            pattern: None,
        };
        if start.is_dir() {
            explorer.issue(ScanRequest::listing(start));
        } else {
            debug!("Initial path {} is not a directory", start.display());
        }
        explorer
    }

    /// Navigate to `path` as a new history node. Ignored unless `path`
    /// resolves to an existing directory.
    pub fn navigate_to(&mut self, path: &Path) -> bool {
        let target = resolve_path(path, self.history.current());
        if !target.is_dir() {
            debug!("Ignoring navigation to {}: not a directory", target.display());
            return false;
        }
        if !self.issue(ScanRequest::listing(target.clone())) {
            return false;
        }
        self.history.visit(target);
        self.pattern = None;
        true
    }

    /// Step back in history. Ignored on an empty stack or while a pattern
    /// overlay is active.
    pub fn go_back(&mut self) -> bool {
        if !self.back_enabled() {
            return false;
        }
        let Some(path) = self.history.go_back().map(Path::to_path_buf) else {
            return false;
        };
        self.issue(ScanRequest::listing(path))
    }

    /// Step forward in history. Same rules as [`Explorer::go_back`].
    pub fn go_forward(&mut self) -> bool {
        if !self.forward_enabled() {
            return false;
        }
        let Some(path) = self.history.go_forward().map(Path::to_path_buf) else {
            return false;
        };
        self.issue(ScanRequest::listing(path))
    }

    /// Show `directory` filtered by `pattern` without recording history.
    ///
    /// Ignored if `directory` is not an existing directory or `pattern`
    /// does not compile.
    pub fn navigate_with_pattern(&mut self, directory: &Path, pattern: &str) -> bool {
        let target = resolve_path(directory, self.history.current());
        if !target.is_dir() {
            debug!("Ignoring filtered view of {}: not a directory", target.display());
            return false;
        }
        let request = ScanRequest::new(target.clone(), Some(pattern.to_string()));
        if !self.issue(request) {
            return false;
        }
        self.history.set_current(target);
        self.pattern = Some(pattern.to_string());
        true
    }

    /// Handle text typed into the path box: a directory, or a directory
    /// plus a wildcard pattern (`src/*.rs`, or just `*.rs` for the current
    /// directory).
    pub fn submit_input(&mut self, input: &str) -> bool {
        let input = input.trim();
        if input.is_empty() {
            return false;
        }
        match split_path_pattern(input, self.history.current()) {
            (directory, Some(pattern)) => self.navigate_with_pattern(&directory, &pattern),
            (directory, None) => self.navigate_to(&directory),
        }
    }

    /// Open the row at `index` in the current view. Directories and the
    /// parent row are navigated into; files are ignored.
    pub fn open_entry(&mut self, index: usize) -> bool {
        let target = match self.supervisor.store().get(index) {
            Some(entry) if entry.is_dir() => entry.path.clone(),
            _ => return false,
        };
        self.navigate_to(&target)
    }

    fn issue(&mut self, request: ScanRequest) -> bool {
        match self.supervisor.start_scan(request) {
            Ok(_) => true,
            Err(err) => {
                warn!("Rejected scan request: {err}");
                false
            }
        }
    }

    /// Apply pending scan output. Call once per frame.
    pub fn process_events(&mut self) -> ViewUpdate {
        self.supervisor.process_events()
    }

    /// Block until the current scan completes or `timeout` elapses.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> Option<ScanSummary> {
        self.supervisor.wait_for_completion(timeout)
    }

    /// Summary of the current scan once it has completed.
    pub fn last_summary(&self) -> Option<ScanSummary> {
        self.supervisor.last_summary()
    }

    /// Re-order the current rows. Does not rescan.
    pub fn resort(&mut self, column: SortColumn, direction: SortDirection) {
        self.supervisor.resort(column, direction);
    }

    /// Cancel any running scan. Used on teardown.
    pub fn stop(&mut self) {
        self.supervisor.stop_scan();
    }

    pub fn rows(&self) -> &[Entry] {
        self.supervisor.rows()
    }

    pub fn sort(&self) -> SortKey {
        self.supervisor.store().sort()
    }

    pub fn phase(&self) -> ScanPhase {
        self.supervisor.phase()
    }

    pub fn current_path(&self) -> &Path {
        self.history.current()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    pub fn back_enabled(&self) -> bool {
        self.pattern.is_none() && self.history.can_go_back()
    }

    pub fn forward_enabled(&self) -> bool {
        self.pattern.is_none() && self.history.can_go_forward()
    }

    pub fn nav_state(&self) -> NavState {
        NavState {
            current_path: self.history.current().to_path_buf(),
            pattern: self.pattern.clone(),
            back_enabled: self.back_enabled(),
            forward_enabled: self.forward_enabled(),
        }
    }
}
