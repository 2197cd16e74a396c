/// Glob name filtering and path/pattern splitting.
///
/// Pattern syntax is deliberately small: `*` matches any run of characters
/// (including none), `?` matches exactly one character, and everything else
/// is literal. Matching is case-sensitive and anchored to the whole name.
///
/// Compilation goes through the `glob` crate. Literal runs are escaped with
/// [`Pattern::escape`] so bracket expressions are never interpreted, and
/// runs of `*` are collapsed because `glob` reserves `**` for recursive
/// path matching.
use crate::error::PatternError;
use glob::{MatchOptions, Pattern};
use std::path::{Path, PathBuf};

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A compiled name predicate. The default filter matches every name.
#[derive(Debug, Clone, Default)]
pub struct NameFilter {
    pattern: Option<Pattern>,
}

impl NameFilter {
    /// A filter that accepts every name.
    pub fn all() -> Self {
        Self::default()
    }

    /// Compile an optional wildcard pattern. `None` yields a match-all filter.
    pub fn new(pattern: Option<&str>) -> Result<Self, PatternError> {
        let Some(raw) = pattern else {
            return Ok(Self::all());
        };
        let translated = translate(raw);
        let compiled = Pattern::new(&translated).map_err(|e| PatternError::Invalid {
            pattern: raw.to_string(),
            reason: e.msg.to_string(),
        })?;
        Ok(Self {
            pattern: Some(compiled),
        })
    }

    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        match &self.pattern {
            Some(p) => p.matches_with(name, MATCH_OPTIONS),
            None => true,
        }
    }

    /// `true` when this filter accepts every name.
    pub fn is_match_all(&self) -> bool {
        self.pattern.is_none()
    }
}

/// Rewrite a `*`/`?` pattern into `glob` syntax with every other character
/// escaped.
fn translate(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    let mut literal = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '*' | '?' => {
                if !literal.is_empty() {
                    out.push_str(&Pattern::escape(&literal));
                    literal.clear();
                }
                out.push(ch);
                if ch == '*' {
                    while chars.peek() == Some(&'*') {
                        chars.next();
                    }
                }
            }
            _ => literal.push(ch),
        }
    }
    if !literal.is_empty() {
        out.push_str(&Pattern::escape(&literal));
    }
    out
}

/// `true` if `input` contains a wildcard character.
pub fn has_wildcards(input: &str) -> bool {
    input.contains(['*', '?'])
}

/// Split one user-typed string into a directory and an optional pattern.
///
/// - No wildcard: returned unchanged as `(input, None)`.
/// - Wildcard and a separator: split at the last separator. A separator at
///   position 0 yields the filesystem root as the directory.
/// - Wildcard but no separator: `current_dir` with the whole string as
///   the pattern.
///
/// The directory half is returned as typed; resolving relative paths is
/// the caller's job.
pub fn split_path_pattern(input: &str, current_dir: &Path) -> (PathBuf, Option<String>) {
    if !has_wildcards(input) {
        return (PathBuf::from(input), None);
    }

    match input.rfind(std::path::is_separator) {
        Some(idx) => {
            let sep_len = input[idx..].chars().next().map_or(1, char::len_utf8);
            let dir = if idx == 0 {
                &input[..sep_len]
            } else {
                &input[..idx]
            };
            let pattern = &input[idx + sep_len..];
            let pattern = (!pattern.is_empty()).then(|| pattern.to_string());
            (PathBuf::from(dir), pattern)
        }
        None => (current_dir.to_path_buf(), Some(input.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(p: &str) -> NameFilter {
        NameFilter::new(Some(p)).unwrap()
    }

    #[test]
    fn no_pattern_matches_everything() {
        let f = NameFilter::new(None).unwrap();
        assert!(f.is_match_all());
        assert!(f.matches(""));
        assert!(f.matches("anything.txt"));
    }

    #[test]
    fn star_matches_any_run() {
        let f = filter("test_*.py");
        assert!(f.matches("test_a.py"));
        assert!(f.matches("test_.py"));
        assert!(f.matches("test_long_name.py"));
        assert!(!f.matches("other.py"));
        assert!(!f.matches("test_a.pyc"));
    }

    #[test]
    fn question_matches_exactly_one() {
        let f = filter("file?.txt");
        assert!(f.matches("file1.txt"));
        assert!(f.matches("fileé.txt"));
        assert!(!f.matches("file.txt"));
        assert!(!f.matches("file12.txt"));
    }

    #[test]
    fn matching_is_anchored_and_case_sensitive() {
        let f = filter("*.PY");
        assert!(f.matches("A.PY"));
        assert!(!f.matches("a.py"));

        let f = filter("abc");
        assert!(f.matches("abc"));
        assert!(!f.matches("xabc"));
        assert!(!f.matches("abcx"));
    }

    #[test]
    fn brackets_are_literal() {
        let f = filter("[ab]*");
        assert!(f.matches("[ab]file"));
        assert!(!f.matches("afile"));

        let f = filter("x]?");
        assert!(f.matches("x]1"));
    }

    #[test]
    fn repeated_stars_collapse() {
        let f = filter("a**b");
        assert!(f.matches("ab"));
        assert!(f.matches("a-middle-b"));
        assert!(filter("***").matches(".hidden"));
    }

    #[test]
    fn split_without_wildcards_is_unchanged() {
        let cur = Path::new("/home/user");
        assert_eq!(
            split_path_pattern("/var/log", cur),
            (PathBuf::from("/var/log"), None)
        );
    }

    #[test]
    fn split_at_last_separator() {
        let cur = Path::new("/home/user");
        assert_eq!(
            split_path_pattern("/src/project/test_*.py", cur),
            (PathBuf::from("/src/project"), Some("test_*.py".to_string()))
        );
    }

    #[test]
    fn split_without_separator_uses_current_dir() {
        let cur = Path::new("/home/user");
        assert_eq!(
            split_path_pattern("*.rs", cur),
            (PathBuf::from("/home/user"), Some("*.rs".to_string()))
        );
    }

    #[test]
    fn split_leading_separator_is_root() {
        let cur = Path::new("/home/user");
        assert_eq!(
            split_path_pattern("/*.conf", cur),
            (PathBuf::from("/"), Some("*.conf".to_string()))
        );
    }
}
