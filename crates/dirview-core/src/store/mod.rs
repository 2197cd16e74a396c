/// Ordered presentation store — the rows the UI renders.
///
/// The store is append-only while a scan streams in: chunks are pushed in
/// arrival order and nothing is sorted until the scan completes. On
/// completion [`PresentationStore::finalize_order`] applies the comparator
/// once; later [`PresentationStore::resort`] calls re-order the rows in
/// place without touching the filesystem.
///
/// The store has a single owner (the scan supervisor) and needs no locking.
pub mod sort;

use crate::model::Entry;
pub use sort::{compare_entries, SortColumn, SortDirection, SortKey};

#[derive(Debug, Clone, Default)]
pub struct PresentationStore {
    rows: Vec<Entry>,
    /// Key applied by the next `finalize_order`. Restored on `reset`.
    sort: SortKey,
    /// Key restored by `reset`.
    default_sort: SortKey,
    /// `true` once the rows are in comparator order.
    ordered: bool,
}

impl PresentationStore {
    pub fn new(default_sort: SortKey) -> Self {
        Self {
            rows: Vec::new(),
            sort: default_sort,
            default_sort,
            ordered: true,
        }
    }

    /// Drop every row and restore the default sort key.
    pub fn reset(&mut self) {
        self.rows.clear();
        self.sort = self.default_sort;
        self.ordered = true;
    }

    /// Append one chunk in arrival order.
    pub fn append(&mut self, chunk: Vec<Entry>) {
        if chunk.is_empty() {
            return;
        }
        if self.rows.is_empty() {
            self.rows = chunk;
        } else {
            self.rows.extend(chunk);
        }
        self.ordered = false;
    }

    /// Push a single row (used for the synthetic parent row).
    pub fn push(&mut self, entry: Entry) {
        self.rows.push(entry);
        self.ordered = self.rows.len() <= 1;
    }

    /// Apply the current sort key to all rows. Called once per completed scan.
    pub fn finalize_order(&mut self) {
        sort::sort_entries(&mut self.rows, self.sort);
        self.ordered = true;
    }

    /// Re-order under a new key. No rescan is involved.
    pub fn resort(&mut self, column: SortColumn, direction: SortDirection) {
        self.sort = SortKey::new(column, direction);
        self.finalize_order();
    }

    /// Current snapshot in display order.
    pub fn rows(&self) -> &[Entry] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The key the rows are (or will be, once the scan finishes) sorted by.
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// `false` while streamed rows are still in arrival order.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }
}
