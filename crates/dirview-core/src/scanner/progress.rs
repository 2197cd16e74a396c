/// Scan events — messages sent from a scan thread to the supervisor via a
/// crossbeam channel.
///
/// Every message is tagged with the [`ScanId`] of the scan that produced it
/// so the receiver can discard output from superseded scans.
use super::ScanId;
use crate::model::Entry;
use std::time::Duration;

/// One tagged message on the scan channel.
#[derive(Debug)]
pub struct ScanMessage {
    pub scan: ScanId,
    pub event: ScanEvent,
}

/// What a scan reports. A cancelled scan simply stops sending; there is no
/// cancellation event.
#[derive(Debug)]
pub enum ScanEvent {
    /// A batch of rows in filesystem order. Full batches hold exactly the
    /// configured chunk size; only the last one may be shorter.
    Chunk(Vec<Entry>),
    /// Enumeration finished. No further messages follow for this scan.
    Complete(ScanSummary),
}

/// Totals reported with [`ScanEvent::Complete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// Rows emitted, excluding the synthetic parent row.
    pub entry_count: usize,
    /// Entries whose enumeration or metadata lookup failed and were
    /// recovered (skipped, or emitted without size/modified).
    pub error_count: u64,
    pub duration: Duration,
}
