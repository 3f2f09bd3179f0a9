use derive_more::Display;

use crate::engine::TreeEngine;
use crate::tree::{Tree, TreeError, TreePath};

/// A single change requested by whoever holds the current snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Mutation {
    #[display("create folder '{name}' in '{parent}'")]
    CreateFolder { parent: TreePath, name: String },
    #[display("add file '{name}' to '{folder}'")]
    AddFile { folder: TreePath, name: String },
    #[display("create file '{name}' in '{folder}'")]
    CreateFile { folder: TreePath, name: String },
    #[display("delete '{name}' from '{parent}'")]
    DeleteItem { parent: TreePath, name: String },
    #[display("rename '{from}' to '{to}' in '{parent}'")]
    RenameItem {
        parent: TreePath,
        from: String,
        to: String,
    },
}

impl Mutation {
    /// Runs this mutation against `tree`, returning the next snapshot.
    pub fn apply(&self, engine: &TreeEngine, tree: &Tree) -> Result<Tree, TreeError> {
        match self {
            Mutation::CreateFolder { parent, name } => engine.create_folder(tree, parent, name),
            Mutation::AddFile { folder, name } => engine.add_file(tree, folder, name),
            Mutation::CreateFile { folder, name } => engine.create_file(tree, folder, name),
            Mutation::DeleteItem { parent, name } => engine.delete_item(tree, parent, name),
            Mutation::RenameItem { parent, from, to } => {
                engine.rename_item(tree, parent, from, to)
            }
        }
    }
}
