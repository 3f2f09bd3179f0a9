use snafu::Snafu;

use super::{NodeKind, TreePath};

/// Why a mutation was refused. The caller's snapshot is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TreeError {
    #[snafu(display("Name must not be empty"))]
    EmptyName,
    #[snafu(display("Nothing found at '{}'", path))]
    PathNotFound { path: TreePath },
    #[snafu(display("Expected a {} at '{}' but found a {}", expected, path, found))]
    TypeMismatch {
        path: TreePath,
        expected: NodeKind,
        found: NodeKind,
    },
    #[snafu(display("'{}' already exists in '{}'", name, path))]
    NameCollision { path: TreePath, name: String },
}
