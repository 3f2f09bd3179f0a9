use std::path::Path;

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::config::yaml::{field, is_null, scalar_text, tree_path};
use crate::engine::{CollisionPolicy, EngineOptions, Mutation};
use crate::tree::TreePath;

/// Engine settings a script may carry. Unset values leave the caller's choice alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptOptions {
    pub create_intermediate: Option<bool>,
    pub on_collision: Option<CollisionPolicy>,
}

impl ScriptOptions {
    pub fn apply_to(&self, options: EngineOptions) -> EngineOptions {
        EngineOptions {
            create_intermediate: self
                .create_intermediate
                .unwrap_or(options.create_intermediate),
            on_collision: self.on_collision.unwrap_or(options.on_collision),
        }
    }
}

/// A batch of mutations read from a YAML file, replayed in order against a seed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub options: ScriptOptions,
    pub operations: Vec<Mutation>,
}

impl Script {
    pub fn read(path: &Path) -> Result<Self, ScriptError> {
        debug!("Reading script file: {}", path.display());
        let contents = std::fs::read_to_string(path).context(ReadSnafu {
            file_path: path.display().to_string(),
        })?;
        debug!("Successfully read script file: {} bytes", contents.len());

        contents.as_str().try_into()
    }

    fn parse_options(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<ScriptOptions, ScriptError> {
        let options = match field(top_level, "options") {
            Some(options) if !is_null(options) => options,
            _ => return Ok(ScriptOptions::default()),
        };
        let options = options
            .as_mapping()
            .context(InvalidOptionSnafu { key: "options" })?;

        let create_intermediate = match field(options, "create_intermediate") {
            None => None,
            Some(Yaml::Value(Scalar::Boolean(flag))) => Some(*flag),
            Some(_) => {
                return InvalidOptionSnafu {
                    key: "create_intermediate",
                }
                .fail();
            }
        };

        let on_collision = match field(options, "on_collision") {
            None => None,
            Some(value) => Some(
                value
                    .as_str()
                    .and_then(CollisionPolicy::parse)
                    .context(InvalidOptionSnafu {
                        key: "on_collision",
                    })?,
            ),
        };

        for key in options.keys() {
            match key.as_str() {
                Some("create_intermediate") | Some("on_collision") => {}
                _ => debug!("Ignoring unknown script option: {:?}", key),
            }
        }

        Ok(ScriptOptions {
            create_intermediate,
            on_collision,
        })
    }

    fn parse_operations(top_level: &LinkedHashMap<Yaml, Yaml>) -> Result<Vec<Mutation>, ScriptError> {
        let Some(operations) = field(top_level, "operations") else {
            return Ok(Vec::new());
        };
        if is_null(operations) {
            return Ok(Vec::new());
        }

        operations
            .as_sequence()
            .context(OperationsNotSequenceSnafu)?
            .iter()
            .enumerate()
            .map(|(position, operation)| -> Result<Mutation, ScriptError> {
                let index = position + 1;
                let operation = operation.as_mapping().context(InvalidOperationSnafu {
                    index,
                    reason: "expected a map",
                })?;
                Self::parse_operation(index, operation)
            })
            .collect()
    }

    fn parse_operation(
        index: usize,
        operation: &LinkedHashMap<Yaml, Yaml>,
    ) -> Result<Mutation, ScriptError> {
        let op = field(operation, "op")
            .and_then(|op| op.as_str())
            .context(InvalidOperationSnafu {
                index,
                reason: "missing 'op'",
            })?;

        let text = |name: &'static str| {
            field(operation, name)
                .and_then(scalar_text)
                .with_context(|| InvalidOperationSnafu {
                    index,
                    reason: format!("missing '{}'", name),
                })
        };
        let path = |required: bool| match field(operation, "path") {
            Some(value) => tree_path(value).context(InvalidOperationSnafu {
                index,
                reason: "'path' must be a string or a list of names",
            }),
            None if required => InvalidOperationSnafu {
                index,
                reason: "missing 'path'",
            }
            .fail(),
            None => Ok(TreePath::root()),
        };

        let mutation = match op {
            "create_folder" => Mutation::CreateFolder {
                parent: path(false)?,
                name: text("name")?,
            },
            "add_file" => Mutation::AddFile {
                folder: path(true)?,
                name: text("name")?,
            },
            "create_file" => Mutation::CreateFile {
                folder: path(false)?,
                name: text("name")?,
            },
            "delete" => Mutation::DeleteItem {
                parent: path(false)?,
                name: text("name")?,
            },
            "rename" => Mutation::RenameItem {
                parent: path(false)?,
                from: text("from")?,
                to: text("to")?,
            },
            other => return UnknownOperationSnafu { index, op: other }.fail(),
        };
        debug!("Parsed operation #{}: {}", index, mutation);

        Ok(mutation)
    }
}

impl TryFrom<&str> for Script {
    type Error = ScriptError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let Some(document) = documents.first() else {
            return Ok(Script::default());
        };
        if is_null(document) {
            return Ok(Script::default());
        }

        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        Ok(Script {
            options: Self::parse_options(top_level)?,
            operations: Self::parse_operations(top_level)?,
        })
    }
}

#[derive(Debug, Snafu)]
pub enum ScriptError {
    #[snafu(display("Failed to read the script file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the script file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Top level of the script should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The operations section should be a list"))]
    OperationsNotSequence,
    #[snafu(display("Operation #{} is invalid: {}", index, reason))]
    InvalidOperation { index: usize, reason: String },
    #[snafu(display("Operation #{} has unknown type '{}'", index, op))]
    UnknownOperation { index: usize, op: String },
    #[snafu(display("Invalid value for script option '{}'", key))]
    InvalidOption { key: String },
}
