use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info, warn};

use crate::application::RuntimeConfig;
use crate::config::{Script, ScriptError, SeedError, read_seed, sample_tree};
use crate::engine::{EngineOptions, Mutation, TreeEngine};
use crate::tree::{Tree, TreeError};

pub struct Application;

impl Application {
    /// Loads the seed, replays the script and prints the resulting tree.
    pub fn run(app_config: impl Into<RuntimeConfig>, styled: bool) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        let tree = Self::process(&app_config)?;

        print!("{}", app_config.tree_view().styled(styled).render(&tree));

        Ok(())
    }

    /// Loads the seed and applies every scripted mutation in order, returning the final snapshot.
    pub fn process(app_config: &RuntimeConfig) -> Result<Tree, ApplicationError> {
        let seed = match &app_config.seed {
            Some(path) => read_seed(path),
            None => {
                debug!("No seed given, starting from the sample tree");
                sample_tree()
            }
        }
        .context(SeedLoadSnafu)?;

        let script = match &app_config.script {
            Some(path) => Script::read(path).context(ScriptLoadSnafu)?,
            None => Script::default(),
        };

        let options = app_config.engine_options(script.options.apply_to(EngineOptions::default()));
        debug!("Using engine options: {:?}", options);
        let engine = TreeEngine::new(options);

        Self::replay(&engine, seed, &script.operations, app_config.fail_fast)
    }

    fn replay(
        engine: &TreeEngine,
        seed: Tree,
        operations: &[Mutation],
        fail_fast: bool,
    ) -> Result<Tree, ApplicationError> {
        let mut tree = seed;
        let mut refused = 0;

        for (position, mutation) in operations.iter().enumerate() {
            let index = position + 1;
            match mutation.apply(engine, &tree) {
                Ok(next) => {
                    debug!("Applied operation #{}: {}", index, mutation);
                    tree = next;
                }
                Err(err) if fail_fast => {
                    return Err(err).context(MutationSnafu {
                        index,
                        mutation: mutation.clone(),
                    });
                }
                Err(err) => {
                    warn!("Skipping operation #{} ({}): {}", index, mutation, err);
                    refused += 1;
                }
            }
        }

        info!(
            "Applied {} of {} operations",
            operations.len() - refused,
            operations.len()
        );
        Ok(tree)
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Failed to load the seed tree"))]
    SeedLoadError { source: SeedError },
    #[snafu(display("Failed to load the mutation script"))]
    ScriptLoadError { source: ScriptError },
    #[snafu(display("Operation #{} ({}) was refused", index, mutation))]
    MutationError {
        index: usize,
        mutation: Mutation,
        source: TreeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Node, TreePath};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::{NamedTempFile, TempDir};

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("Failed to create file");
        write!(file, "{}", contents).expect("Failed to write file");
        path
    }

    const SCRIPT: &str = r#"
operations:
  - op: add_file
    path: Documents
    name: c.jpg
  - op: delete
    path: Downloads
    name: Drivers
  - op: rename
    path: Desktop
    from: x.jpg
    to: y.jpg
  - op: add_file
    path: Downloads
    name: nope.txt
  - op: create_folder
    name: NewFolder
"#;

    const SEED: &str = r#"
Documents: [a.jpg, b.jpg]
Desktop: [x.jpg]
Downloads:
  Drivers: [d1.dmg]
"#;

    #[test]
    fn test_process_without_inputs_returns_sample() {
        let tree = Application::process(&RuntimeConfig::default()).expect("sample should load");

        assert_eq!(tree, sample_tree().unwrap());
    }

    #[test]
    fn test_process_skips_refused_operations() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = RuntimeConfig {
            seed: Some(write_file(&dir, "seed.yaml", SEED)),
            script: Some(write_file(&dir, "ops.yaml", SCRIPT)),
            ..RuntimeConfig::default()
        };

        let tree = Application::process(&config).expect("batch should complete");

        let expected: Tree = r#"
Documents: [a.jpg, b.jpg, c.jpg]
Desktop: [y.jpg]
Downloads: {}
NewFolder: {}
"#
        .try_into()
        .unwrap();
        assert_eq!(tree, expected);
    }

    #[test]
    fn test_process_fail_fast_reports_operation() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = RuntimeConfig {
            seed: Some(write_file(&dir, "seed.yaml", SEED)),
            script: Some(write_file(&dir, "ops.yaml", SCRIPT)),
            fail_fast: true,
            ..RuntimeConfig::default()
        };

        match Application::process(&config) {
            Err(ApplicationError::MutationError {
                index,
                mutation,
                source,
            }) => {
                assert_eq!(index, 4);
                assert_eq!(
                    mutation,
                    Mutation::AddFile {
                        folder: TreePath::from("Downloads"),
                        name: "nope.txt".to_string(),
                    }
                );
                assert!(matches!(source, TreeError::TypeMismatch { .. }));
            }
            other => panic!("Expected MutationError, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_paths_flag_beats_script_option() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let script = "options:\n  create_intermediate: true\noperations:\n  - {op: create_folder, path: Projects/rust, name: x}";
        let config = RuntimeConfig {
            script: Some(write_file(&dir, "ops.yaml", script)),
            strict_paths: true,
            fail_fast: true,
            ..RuntimeConfig::default()
        };

        let result = Application::process(&config);

        assert!(matches!(
            result,
            Err(ApplicationError::MutationError {
                source: TreeError::PathNotFound { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_script_options_are_used() {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let script = "options:\n  on_collision: overwrite\noperations:\n  - {op: rename, from: Desktop, to: Documents}";
        let config = RuntimeConfig {
            script: Some(write_file(&dir, "ops.yaml", script)),
            fail_fast: true,
            ..RuntimeConfig::default()
        };

        let tree = Application::process(&config).expect("overwrite should be allowed");

        assert!(!tree.contains("Desktop"));
        assert_eq!(
            tree.get("Documents").and_then(Node::as_file_list).map(<[String]>::len),
            Some(2)
        );
    }

    #[test]
    fn test_process_reports_bad_seed() {
        let mut seed = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(seed, "- not\n- a map").expect("Failed to write to temp file");
        let config = RuntimeConfig {
            seed: Some(seed.path().to_path_buf()),
            ..RuntimeConfig::default()
        };

        assert!(matches!(
            Application::process(&config),
            Err(ApplicationError::SeedLoadError {
                source: SeedError::TopLevelNotMap
            })
        ));
    }

    #[test]
    fn test_process_reports_missing_script() {
        let config = RuntimeConfig {
            script: Some(PathBuf::from("nonexistent-script.yaml")),
            ..RuntimeConfig::default()
        };

        assert!(matches!(
            Application::process(&config),
            Err(ApplicationError::ScriptLoadError {
                source: ScriptError::ReadError { .. }
            })
        ));
    }
}
