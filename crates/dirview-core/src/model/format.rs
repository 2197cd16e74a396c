/// Display formatting — human-readable byte counts and timestamps.
///
/// All internal sizes are `u64` bytes and all timestamps are `SystemTime`.
/// Formatting happens once per entry at scan time; the strings are cached
/// on the [`Entry`](super::Entry) so rendering never reformats them.
use chrono::{DateTime, Local};
use std::time::SystemTime;

/// Placeholder shown in place of a size or timestamp that could not be read.
pub const MISSING_VALUE: &str = "—";

/// Timestamp layout used for the "modified" column.
pub const MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Size unit labels, smallest first. Each step is a factor of 1024.
const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with one decimal in the largest unit that keeps the
/// value below 1024 (`"512.0 B"`, `"1.5 KB"`). Values past the last unit
/// stay in TB.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < SIZE_UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", SIZE_UNITS[unit])
}

/// Format an optional size; `None` renders as [`MISSING_VALUE`].
pub fn format_optional_size(bytes: Option<u64>) -> String {
    match bytes {
        Some(b) => format_size(b),
        None => MISSING_VALUE.to_string(),
    }
}

/// Format a modification time in the local timezone.
pub fn format_modified(modified: Option<SystemTime>) -> String {
    match modified {
        Some(t) => {
            let local: DateTime<Local> = t.into();
            local.format(MODIFIED_FORMAT).to_string()
        }
        None => MISSING_VALUE.to_string(),
    }
}

/// Format an entry count with comma thousands separators.
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let lead = digits.len() % 3;
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.char_indices() {
        if i > 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn sizes_always_carry_one_decimal() {
        assert_eq!(format_size(0), "0.0 B");
        assert_eq!(format_size(512), "512.0 B");
        assert_eq!(format_size(1023), "1023.0 B");
        assert_eq!(format_size(1024), "1.0 KB");
        assert_eq!(format_size(1536), "1.5 KB");
        assert_eq!(format_size(1_048_576), "1.0 MB");
        assert_eq!(format_size(5 * 1_073_741_824), "5.0 GB");
    }

    #[test]
    fn sizes_beyond_terabytes_stay_in_tb() {
        assert_eq!(format_size(1_099_511_627_776), "1.0 TB");
        assert_eq!(format_size(2048 * 1_099_511_627_776), "2048.0 TB");
    }

    #[test]
    fn optional_size_uses_placeholder() {
        assert_eq!(format_optional_size(None), MISSING_VALUE);
        assert_eq!(format_optional_size(Some(2048)), "2.0 KB");
    }

    #[test]
    fn modified_renders_local_time() {
        assert_eq!(format_modified(None), MISSING_VALUE);

        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let expected = DateTime::<Local>::from(t).format(MODIFIED_FORMAT).to_string();
        let rendered = format_modified(Some(t));
        assert_eq!(rendered, expected);
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(rendered.len(), 19);
    }

    #[test]
    fn counts_are_grouped_by_thousands() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_000), "1,000");
        assert_eq!(format_count(12_345), "12,345");
        assert_eq!(format_count(100_000), "100,000");
        assert_eq!(format_count(1_234_567), "1,234,567");
    }
}
