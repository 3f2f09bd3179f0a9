//! Expand/collapse state and text rendering for trees.

mod tree_view;

pub use tree_view::TreeView;
