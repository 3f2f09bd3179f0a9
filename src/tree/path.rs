use std::fmt;

use derive_more::{Deref, From};

/// A location inside a [`Tree`](super::Tree), as the sequence of keys walked from the root.
///
/// The empty path addresses the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Deref, From)]
pub struct TreePath(Vec<String>);

impl TreePath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a new path with `segment` appended.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }

    /// The first `len` segments of this path.
    pub fn prefix(&self, len: usize) -> Self {
        Self(self.0.iter().take(len).cloned().collect())
    }

    /// Splits off the last segment, returning the parent path and the name.
    pub fn split_last(&self) -> Option<(Self, &str)> {
        self.0
            .split_last()
            .map(|(last, parent)| (Self(parent.to_vec()), last.as_str()))
    }

    /// Every proper ancestor of this path, root first.
    pub fn ancestors(&self) -> impl Iterator<Item = TreePath> + '_ {
        (0..self.0.len()).map(|len| self.prefix(len))
    }
}

impl From<&str> for TreePath {
    fn from(path: &str) -> Self {
        Self(
            path.split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }
}

impl From<String> for TreePath {
    fn from(path: String) -> Self {
        path.as_str().into()
    }
}

impl From<&[&str]> for TreePath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("/");
        }
        f.write_str(&self.0.join("/"))
    }
}
