/// The row comparator shared by post-scan ordering and user re-sorts.
///
/// Ordering rules, in priority order:
///
/// 1. The parent row (`..`) is always first.
/// 2. Directories come before files.
/// 3. Within a group, rows compare by the requested column.
///
/// Only rule 3 is affected by [`SortDirection`]; rules 1 and 2 hold for
/// every column and direction.
///
/// # Missing values
///
/// A missing size or timestamp compares as smaller than any present value,
/// and the direction inverts the whole column comparison. Ascending puts
/// rows without a value first within their group, descending puts them last.
use crate::model::Entry;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    #[default]
    Name,
    Size,
    Modified,
    /// Type column. Groups are already split by rule 2, so this falls back
    /// to name order.
    #[serde(alias = "type")]
    Kind,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[inline]
    fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// A column plus a direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SortKey {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }
}

/// Compare two rows under `key`. This is a total order over the rows of one
/// directory (names are unique within a directory).
pub fn compare_entries(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    // EntryKind is declared Parent < Directory < File.
    a.kind
        .cmp(&b.kind)
        .then_with(|| compare_within_group(a, b, key))
}

fn compare_within_group(a: &Entry, b: &Entry, key: SortKey) -> Ordering {
    match key.column {
        SortColumn::Name | SortColumn::Kind => key.direction.apply(compare_names(a, b)),
        // Option<T> orders None before Some(_), which is the "missing is
        // smallest" policy.
        SortColumn::Size => key
            .direction
            .apply(a.size.cmp(&b.size))
            .then_with(|| compare_names(a, b)),
        SortColumn::Modified => key
            .direction
            .apply(a.modified.cmp(&b.modified))
            .then_with(|| compare_names(a, b)),
    }
}

/// Case-insensitive name order, with the exact name as tie-break so that
/// `README` and `readme` still have a fixed relative position.
fn compare_names(a: &Entry, b: &Entry) -> Ordering {
    cmp_ignore_case(&a.name, &b.name).then_with(|| a.name.cmp(&b.name))
}

/// Case-insensitive lexicographic comparison without allocating.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Stable-sort `rows` under `key`.
pub fn sort_entries(rows: &mut [Entry], key: SortKey) {
    rows.sort_by(|a, b| compare_entries(a, b, key));
}
