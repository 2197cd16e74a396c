/// DirView Core — streaming directory listing, filtering, and ordering.
///
/// This crate contains all business logic with zero UI dependencies.
/// A frontend drives an [`Explorer`] and renders its rows after each
/// [`Explorer::process_events`] call.
///
/// # Modules
///
/// - [`model`] — Entry rows and display formatting.
/// - [`filter`] — Glob name filter and path/pattern splitting.
/// - [`scanner`] — Cancellable background listing of one directory.
/// - [`store`] — Ordered presentation store and its comparator.
/// - [`supervisor`] — Single-active-scan ownership and stale-output dropping.
/// - [`history`] — Bounded back/forward navigation history.
/// - [`explorer`] — The navigation verbs a frontend calls.
/// - [`config`] — Tunables loaded from JSON.
/// - [`error`] — Error types for pattern and config failures.
pub mod config;
pub mod error;
pub mod explorer;
pub mod filter;
pub mod history;
pub mod model;
pub mod scanner;
pub mod store;
pub mod supervisor;

pub use config::ExplorerConfig;
pub use explorer::{Explorer, NavState};
pub use model::{Entry, EntryKind};
pub use store::{SortColumn, SortDirection, SortKey};
