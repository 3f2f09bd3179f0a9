use std::borrow::Cow;
use std::sync::Arc;

use snafu::ensure;
use tracing::debug;

use crate::engine::EngineOptions;
use crate::tree::{
    EmptyNameSnafu, NameCollisionSnafu, Node, NodeKind, PathNotFoundSnafu, Tree, TreeError,
    TreePath, TypeMismatchSnafu,
};

/// Applies single mutations to tree snapshots.
///
/// Every operation takes the current snapshot by reference and returns a new one.
/// Only the folders on the walked path are rebuilt; everything else is shared
/// with the input. On error nothing is returned but the error, so the caller
/// simply keeps the snapshot it already holds.
#[derive(Debug, Clone, Default)]
pub struct TreeEngine {
    options: EngineOptions,
}

/// How a path walk treats what it finds on the way.
#[derive(Debug, Clone, Copy)]
struct Walk {
    create_missing: bool,
    convert_file_lists: bool,
}

impl Walk {
    const READ_ONLY: Walk = Walk {
        create_missing: false,
        convert_file_lists: false,
    };
}

impl TreeEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Adds an empty folder `name` under `parent`, replacing whatever was stored there.
    ///
    /// File lists met on the way, the parent included, are turned into folders of
    /// single files so the new folder has somewhere to live.
    pub fn create_folder(
        &self,
        tree: &Tree,
        parent: &TreePath,
        name: &str,
    ) -> Result<Tree, TreeError> {
        ensure_named(name)?;
        debug!("Creating folder '{}' in '{}'", name, parent);

        let walk = Walk {
            create_missing: self.options.create_intermediate,
            convert_file_lists: true,
        };
        edit_at(tree, parent, walk, |node| {
            let mut folder = open_container(node, parent, true)?.into_owned();
            folder.put(name, Node::empty_folder());
            Ok(Node::Folder(folder))
        })
    }

    /// Appends `name` to the file list stored at `folder`.
    pub fn add_file(&self, tree: &Tree, folder: &TreePath, name: &str) -> Result<Tree, TreeError> {
        ensure_named(name)?;
        debug!("Adding file '{}' to '{}'", name, folder);

        let Some((parent, target)) = folder.split_last() else {
            return TypeMismatchSnafu {
                path: TreePath::root(),
                expected: NodeKind::FileList,
                found: NodeKind::Folder,
            }
            .fail();
        };

        // A freshly created folder can never hold the target list.
        edit_at(tree, &parent, Walk::READ_ONLY, |node| {
            let container = open_container(node, &parent, false)?;
            let files = match container.get(target) {
                Some(Node::FileList(files)) => files,
                Some(other) => {
                    return TypeMismatchSnafu {
                        path: folder.clone(),
                        expected: NodeKind::FileList,
                        found: other.kind(),
                    }
                    .fail();
                }
                None => return PathNotFoundSnafu { path: folder.clone() }.fail(),
            };

            let mut files = files.clone();
            files.push(name.to_string());

            let mut container = container.into_owned();
            container.put(target, Node::FileList(files));
            Ok(Node::Folder(container))
        })
    }

    /// Adds a single file to whatever container lives at `folder`.
    ///
    /// Folders gain a `name` leaf, file lists get `name` appended.
    pub fn create_file(
        &self,
        tree: &Tree,
        folder: &TreePath,
        name: &str,
    ) -> Result<Tree, TreeError> {
        ensure_named(name)?;
        debug!("Creating file '{}' in '{}'", name, folder);

        let walk = Walk {
            create_missing: self.options.create_intermediate,
            convert_file_lists: false,
        };
        edit_at(tree, folder, walk, |node| match node {
            Node::Folder(container) => {
                ensure!(
                    self.options.overwrites() || !container.contains(name),
                    NameCollisionSnafu {
                        path: folder.clone(),
                        name
                    }
                );
                let mut container = container.clone();
                container.put(name, Node::Leaf);
                Ok(Node::Folder(container))
            }
            Node::FileList(files) => {
                let mut files = files.clone();
                files.push(name.to_string());
                Ok(Node::FileList(files))
            }
            Node::Leaf => TypeMismatchSnafu {
                path: folder.clone(),
                expected: NodeKind::Folder,
                found: NodeKind::Leaf,
            }
            .fail(),
        })
    }

    /// Removes `name` from the container at `parent`.
    ///
    /// Anything that does not exist is already deleted, so a missing path or item
    /// yields the input tree rather than an error.
    pub fn delete_item(
        &self,
        tree: &Tree,
        parent: &TreePath,
        name: &str,
    ) -> Result<Tree, TreeError> {
        debug!("Deleting '{}' from '{}'", name, parent);

        let result = edit_at(tree, parent, Walk::READ_ONLY, |node| match node {
            Node::Folder(container) if container.contains(name) => {
                let mut container = container.clone();
                container.remove(name);
                Ok(Node::Folder(container))
            }
            Node::FileList(files) if files.iter().any(|file| file == name) => Ok(Node::FileList(
                files.iter().filter(|file| *file != name).cloned().collect(),
            )),
            _ => PathNotFoundSnafu {
                path: parent.join(name),
            }
            .fail(),
        });

        match result {
            Err(err @ (TreeError::PathNotFound { .. } | TreeError::TypeMismatch { .. })) => {
                debug!("Nothing to delete: {}", err);
                Ok(tree.clone())
            }
            other => other,
        }
    }

    /// Renames `old` to `new` inside the container at `parent`.
    ///
    /// In a folder the entry keeps its content and position. In a file list every
    /// matching name is replaced; duplicates are left as they are.
    pub fn rename_item(
        &self,
        tree: &Tree,
        parent: &TreePath,
        old: &str,
        new: &str,
    ) -> Result<Tree, TreeError> {
        ensure_named(new)?;
        if old == new {
            debug!("Rename of '{}' in '{}' keeps the same name", old, parent);
            return Ok(tree.clone());
        }
        debug!("Renaming '{}' to '{}' in '{}'", old, new, parent);

        edit_at(tree, parent, Walk::READ_ONLY, |node| match node {
            Node::Folder(container) => {
                ensure!(
                    container.contains(old),
                    PathNotFoundSnafu {
                        path: parent.join(old)
                    }
                );
                ensure!(
                    self.options.overwrites() || !container.contains(new),
                    NameCollisionSnafu {
                        path: parent.clone(),
                        name: new
                    }
                );
                Ok(Node::Folder(container.rekey(old, new)))
            }
            Node::FileList(files) => {
                ensure!(
                    files.iter().any(|file| file == old),
                    PathNotFoundSnafu {
                        path: parent.join(old)
                    }
                );
                Ok(Node::FileList(
                    files
                        .iter()
                        .map(|file| {
                            if file == old {
                                new.to_string()
                            } else {
                                file.clone()
                            }
                        })
                        .collect(),
                ))
            }
            Node::Leaf => TypeMismatchSnafu {
                path: parent.clone(),
                expected: NodeKind::Folder,
                found: NodeKind::Leaf,
            }
            .fail(),
        })
    }
}

fn ensure_named(name: &str) -> Result<(), TreeError> {
    ensure!(!name.trim().is_empty(), EmptyNameSnafu);
    Ok(())
}

/// Views `node` as a folder, converting a file list when allowed.
fn open_container<'a>(
    node: &'a Node,
    path: &TreePath,
    convert_file_lists: bool,
) -> Result<Cow<'a, Tree>, TreeError> {
    match node {
        Node::Folder(tree) => Ok(Cow::Borrowed(tree)),
        Node::FileList(files) if convert_file_lists => {
            debug!("Converting file list at '{}' into a folder", path);
            Ok(Cow::Owned(Tree::from_leaves(files)))
        }
        other => TypeMismatchSnafu {
            path: path.clone(),
            expected: NodeKind::Folder,
            found: other.kind(),
        }
        .fail(),
    }
}

/// Runs `edit` on the node at `path` and rebuilds the folders above it.
fn edit_at<F>(tree: &Tree, path: &TreePath, walk: Walk, edit: F) -> Result<Tree, TreeError>
where
    F: FnOnce(&Node) -> Result<Node, TreeError>,
{
    let root = Node::Folder(tree.clone());
    match edit_below(&root, path, 0, walk, edit)? {
        Node::Folder(tree) => Ok(tree),
        other => TypeMismatchSnafu {
            path: TreePath::root(),
            expected: NodeKind::Folder,
            found: other.kind(),
        }
        .fail(),
    }
}

fn edit_below<F>(
    node: &Node,
    path: &TreePath,
    depth: usize,
    walk: Walk,
    edit: F,
) -> Result<Node, TreeError>
where
    F: FnOnce(&Node) -> Result<Node, TreeError>,
{
    let Some(segment) = path.get(depth) else {
        return edit(node);
    };

    let container = open_container(node, &path.prefix(depth), walk.convert_file_lists)?;
    let child = match container.get_shared(segment) {
        Some(child) => child.clone(),
        None if walk.create_missing => {
            debug!("Creating missing folder '{}'", path.prefix(depth + 1));
            Arc::new(Node::empty_folder())
        }
        None => {
            return PathNotFoundSnafu {
                path: path.prefix(depth + 1),
            }
            .fail();
        }
    };

    let updated = edit_below(&child, path, depth + 1, walk, edit)?;
    let mut container = container.into_owned();
    container.put(segment.clone(), updated);
    Ok(Node::Folder(container))
}
