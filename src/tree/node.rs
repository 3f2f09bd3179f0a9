use std::sync::Arc;

use derive_more::Display;
use hashlink::LinkedHashMap;

/// One entry of a [`Tree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A nested tree. May be empty.
    Folder(Tree),
    /// Flat file names stored under a single key. Never nests further.
    FileList(Vec<String>),
    /// A single file.
    Leaf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("folder")]
    Folder,
    #[display("file list")]
    FileList,
    #[display("file")]
    Leaf,
}

impl Node {
    pub fn empty_folder() -> Self {
        Node::Folder(Tree::new())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Folder(_) => NodeKind::Folder,
            Node::FileList(_) => NodeKind::FileList,
            Node::Leaf => NodeKind::Leaf,
        }
    }

    pub fn as_folder(&self) -> Option<&Tree> {
        match self {
            Node::Folder(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn as_file_list(&self) -> Option<&[String]> {
        match self {
            Node::FileList(files) => Some(files),
            _ => None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf)
    }
}

/// A mapping from names to nodes.
///
/// Children live behind [`Arc`], so cloning a tree is shallow and two snapshots
/// produced from one another share every subtree the mutation did not touch.
/// Entries keep their insertion order for display, but equality ignores it.
#[derive(Debug, Clone, Default)]
pub struct Tree {
    entries: LinkedHashMap<String, Arc<Node>>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the folder a file list turns into when something has to be nested under it.
    pub fn from_leaves<'a>(names: impl IntoIterator<Item = &'a String>) -> Self {
        names
            .into_iter()
            .map(|name| (name.clone(), Node::Leaf))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.entries.get(name).map(Arc::as_ref)
    }

    /// The shared handle of a child, for callers that care about subtree identity.
    pub fn get_shared(&self, name: &str) -> Option<&Arc<Node>> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.entries
            .iter()
            .map(|(name, node)| (name.as_str(), node.as_ref()))
    }

    /// Sets `name` to `node`. An existing entry keeps its position.
    pub fn put(&mut self, name: impl Into<String>, node: impl Into<Arc<Node>>) {
        let name = name.into();
        let node = node.into();
        match self.entries.get_mut(&name) {
            Some(slot) => *slot = node,
            None => {
                self.entries.insert(name, node);
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<Arc<Node>> {
        self.entries.remove(name)
    }

    /// Re-keys `old` as `new` in place, dropping any other entry already named `new`.
    pub(crate) fn rekey(&self, old: &str, new: &str) -> Self {
        let entries = self
            .entries
            .iter()
            .filter(|(name, _)| name.as_str() == old || name.as_str() != new)
            .map(|(name, node)| {
                let name = if name == old { new } else { name.as_str() };
                (name.to_string(), node.clone())
            })
            .collect();
        Self { entries }
    }
}

impl PartialEq for Tree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(name, node)| other.entries.get(name) == Some(node))
    }
}

impl Eq for Tree {}

impl<N: Into<Arc<Node>>> FromIterator<(String, N)> for Tree {
    fn from_iter<I: IntoIterator<Item = (String, N)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        for (name, node) in iter {
            tree.put(name, node);
        }
        tree
    }
}
