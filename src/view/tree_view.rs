use std::collections::HashMap;

use colored::Colorize;

use crate::tree::{Node, Tree, TreePath};

const INDENT: &str = "  ";

/// Which containers of a tree are open, keyed by their path.
///
/// This is display state only. It never touches the tree and survives mutations
/// as long as the paths it mentions still exist.
#[derive(Debug, Clone)]
pub struct TreeView {
    open_by_default: bool,
    overrides: HashMap<TreePath, bool>,
    styled: bool,
}

impl TreeView {
    /// Every container open.
    pub fn expanded() -> Self {
        Self {
            open_by_default: true,
            overrides: HashMap::new(),
            styled: false,
        }
    }

    /// Every container closed; only top-level entries are shown.
    pub fn collapsed() -> Self {
        Self {
            open_by_default: false,
            ..Self::expanded()
        }
    }

    /// Enables ANSI colours in [`render`](Self::render).
    pub fn styled(self, styled: bool) -> Self {
        Self { styled, ..self }
    }

    /// Opens `path` and every folder above it.
    pub fn expand(&mut self, path: &TreePath) {
        for ancestor in path.ancestors().filter(|ancestor| !ancestor.is_root()) {
            self.overrides.insert(ancestor, true);
        }
        self.overrides.insert(path.clone(), true);
    }

    pub fn collapse(&mut self, path: &TreePath) {
        self.overrides.insert(path.clone(), false);
    }

    pub fn toggle(&mut self, path: &TreePath) {
        let open = self.is_open(path);
        self.overrides.insert(path.clone(), !open);
    }

    pub fn is_open(&self, path: &TreePath) -> bool {
        self.overrides
            .get(path)
            .copied()
            .unwrap_or(self.open_by_default)
    }

    /// Draws the visible part of `tree`, one entry per line.
    pub fn render(&self, tree: &Tree) -> String {
        let mut out = String::new();
        self.render_folder(tree, &TreePath::root(), 0, &mut out);
        out
    }

    fn render_folder(&self, tree: &Tree, at: &TreePath, depth: usize, out: &mut String) {
        for (name, node) in tree.iter() {
            let path = at.join(name);
            match node {
                Node::Folder(children) => {
                    let open = self.container_line(name, &path, depth, out);
                    if open {
                        self.render_folder(children, &path, depth + 1, out);
                    }
                }
                Node::FileList(files) => {
                    let open = self.container_line(name, &path, depth, out);
                    if open {
                        for file in files {
                            self.file_line(file, depth + 1, out);
                        }
                    }
                }
                Node::Leaf => self.file_line(name, depth, out),
            }
        }
    }

    fn container_line(&self, name: &str, path: &TreePath, depth: usize, out: &mut String) -> bool {
        let open = self.is_open(path);
        let marker = if open { "▼" } else { "▶" };
        let name = if self.styled {
            name.blue().bold().to_string()
        } else {
            name.to_string()
        };
        out.push_str(&format!("{}📁 {} {}\n", INDENT.repeat(depth), name, marker));
        open
    }

    fn file_line(&self, name: &str, depth: usize, out: &mut String) {
        out.push_str(&format!("{}📄 {}\n", INDENT.repeat(depth), name));
    }
}

impl Default for TreeView {
    fn default() -> Self {
        Self::expanded()
    }
}
