/// Back/forward navigation history.
///
/// Two bounded stacks around a current path. The history only decides which
/// directory to show next; it knows nothing about scanning.
use std::path::{Component, Path, PathBuf};

/// Maximum entries in each of the back and forward stacks.
///
/// Prevents unbounded growth under rapid or scripted navigation.
pub const MAX_NAV_HISTORY: usize = 50;

#[derive(Debug, Clone)]
pub struct NavigationHistory {
    current: PathBuf,
    /// Most recent last.
    back: Vec<PathBuf>,
    /// Most recent last.
    forward: Vec<PathBuf>,
    limit: usize,
}

impl NavigationHistory {
    pub fn new(initial: PathBuf, limit: usize) -> Self {
        Self {
            current: initial,
            back: Vec::new(),
            forward: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Move to `path` as a new node in the trail.
    ///
    /// If `path` differs from the current path, the current path is pushed
    /// onto the back stack and the forward stack is cleared. Visiting the
    /// current path again leaves both stacks alone.
    pub fn visit(&mut self, path: PathBuf) {
        if path == self.current {
            return;
        }
        let previous = std::mem::replace(&mut self.current, path);
        push_bounded(&mut self.back, previous, self.limit);
        self.forward.clear();
    }

    /// Step back. Returns the new current path, or `None` if the back stack
    /// is empty.
    pub fn go_back(&mut self) -> Option<&Path> {
        let prev = self.back.pop()?;
        let current = std::mem::replace(&mut self.current, prev);
        push_bounded(&mut self.forward, current, self.limit);
        Some(&self.current)
    }

    /// Step forward. Returns the new current path, or `None` if the forward
    /// stack is empty.
    pub fn go_forward(&mut self) -> Option<&Path> {
        let next = self.forward.pop()?;
        let current = std::mem::replace(&mut self.current, next);
        push_bounded(&mut self.back, current, self.limit);
        Some(&self.current)
    }

    /// Replace the current path without recording history.
    pub fn set_current(&mut self, path: PathBuf) {
        self.current = path;
    }

    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    pub fn back_stack(&self) -> &[PathBuf] {
        &self.back
    }

    pub fn forward_stack(&self) -> &[PathBuf] {
        &self.forward
    }
}

/// Push onto a history stack, evicting the oldest entry at capacity.
fn push_bounded(stack: &mut Vec<PathBuf>, path: PathBuf, limit: usize) {
    if stack.len() >= limit {
        stack.remove(0);
    }
    stack.push(path);
}

/// Resolve `path` against `base` and remove `.` and `..` components
/// lexically. Symbolic links are not resolved.
pub fn resolve_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` on a bare root keeps the root.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> PathBuf {
        PathBuf::from(s)
    }

    #[test]
    fn visit_pushes_previous_and_clears_forward() {
        let mut h = NavigationHistory::new(p("/a"), MAX_NAV_HISTORY);
        h.visit(p("/b"));
        h.visit(p("/c"));
        assert_eq!(h.back_stack(), [p("/a"), p("/b")]);

        h.go_back();
        assert!(h.can_go_forward());
        h.visit(p("/d"));
        assert!(!h.can_go_forward());
        assert_eq!(h.current(), Path::new("/d"));
    }

    #[test]
    fn visiting_current_path_is_not_recorded() {
        let mut h = NavigationHistory::new(p("/a"), MAX_NAV_HISTORY);
        h.visit(p("/a"));
        assert!(!h.can_go_back());
    }

    #[test]
    fn back_and_forward_swap_stacks() {
        let mut h = NavigationHistory::new(p("/a"), MAX_NAV_HISTORY);
        h.visit(p("/b"));

        assert_eq!(h.go_back(), Some(Path::new("/a")));
        assert_eq!(h.forward_stack(), [p("/b")]);
        assert!(!h.can_go_back());

        assert_eq!(h.go_forward(), Some(Path::new("/b")));
        assert_eq!(h.back_stack(), [p("/a")]);
        assert!(!h.can_go_forward());
    }

    #[test]
    fn empty_stacks_are_no_ops() {
        let mut h = NavigationHistory::new(p("/a"), MAX_NAV_HISTORY);
        assert_eq!(h.go_back(), None);
        assert_eq!(h.go_forward(), None);
        assert_eq!(h.current(), Path::new("/a"));
    }

    #[test]
    fn stacks_are_bounded() {
        let mut h = NavigationHistory::new(p("/0"), 3);
        for i in 1..=5 {
            h.visit(p(&format!("/{i}")));
        }
        assert_eq!(h.back_stack(), [p("/2"), p("/3"), p("/4")]);
    }

    #[test]
    fn set_current_leaves_stacks_alone() {
        let mut h = NavigationHistory::new(p("/a"), MAX_NAV_HISTORY);
        h.visit(p("/b"));
        h.set_current(p("/c"));
        assert_eq!(h.back_stack(), [p("/a")]);
        assert_eq!(h.current(), Path::new("/c"));
    }

    #[test]
    fn resolve_path_normalizes() {
        let base = Path::new("/home/user");
        assert_eq!(resolve_path(Path::new("docs/../src/./lib"), base), p("/home/user/src/lib"));
        assert_eq!(resolve_path(Path::new("/etc/../var"), base), p("/var"));
        assert_eq!(resolve_path(Path::new("/.."), base), p("/"));
    }
}
