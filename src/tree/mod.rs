//! The in-memory folder tree.
//!
//! A [`Tree`] maps names to [`Node`]s, which are either nested folders, flat
//! lists of file names, or single files. Locations are addressed by [`TreePath`].

mod error;
mod node;
mod path;

pub use error::TreeError;
pub(crate) use error::{
    EmptyNameSnafu, NameCollisionSnafu, PathNotFoundSnafu, TypeMismatchSnafu,
};
pub use node::{Node, NodeKind, Tree};
pub use path::TreePath;
