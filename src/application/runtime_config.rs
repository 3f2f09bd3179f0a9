use std::path::PathBuf;

use crate::cli::Cli;
use crate::engine::{CollisionPolicy, EngineOptions};
use crate::tree::TreePath;
use crate::view::TreeView;

#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    pub seed: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub strict_paths: bool,
    pub overwrite: bool,
    pub fail_fast: bool,
    pub expand: Vec<TreePath>,
}

impl RuntimeConfig {
    /// Command-line switches win over whatever `base` says.
    pub fn engine_options(&self, base: EngineOptions) -> EngineOptions {
        let mut options = base;
        if self.strict_paths {
            options.create_intermediate = false;
        }
        if self.overwrite {
            options.on_collision = CollisionPolicy::Overwrite;
        }
        options
    }

    pub fn tree_view(&self) -> TreeView {
        if self.expand.is_empty() {
            return TreeView::expanded();
        }
        let mut view = TreeView::collapsed();
        for path in &self.expand {
            view.expand(path);
        }
        view
    }
}

impl From<Cli> for RuntimeConfig {
    fn from(cli: Cli) -> Self {
        Self {
            seed: cli.seed,
            script: cli.script,
            strict_paths: cli.strict_paths,
            overwrite: cli.overwrite,
            fail_fast: cli.fail_fast,
            expand: cli.expand.into_iter().map(TreePath::from).collect(),
        }
    }
}
