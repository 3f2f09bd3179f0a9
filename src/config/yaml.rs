use std::borrow::Cow;

use hashlink::LinkedHashMap;
use saphyr::{Scalar, Yaml};

use crate::tree::TreePath;

pub(crate) fn key(name: &str) -> Yaml<'_> {
    Yaml::Value(Scalar::String(Cow::Borrowed(name)))
}

pub(crate) fn field<'a, 'input>(
    mapping: &'a LinkedHashMap<Yaml<'input>, Yaml<'input>>,
    name: &'input str,
) -> Option<&'a Yaml<'input>> {
    mapping.get(&key(name))
}

/// The text of a scalar usable as a name. Numbers and booleans keep their YAML spelling,
/// so a folder called `2024` does not need quoting.
pub(crate) fn scalar_text(value: &Yaml) -> Option<String> {
    match value {
        Yaml::Value(Scalar::String(text)) => Some(text.to_string()),
        Yaml::Value(Scalar::Integer(number)) => Some(number.to_string()),
        Yaml::Value(Scalar::Boolean(flag)) => Some(flag.to_string()),
        _ => None,
    }
}

pub(crate) fn is_null(value: &Yaml) -> bool {
    matches!(value, Yaml::Value(Scalar::Null))
}

/// Reads a path written either as `a/b/c` or as a list of segments.
pub(crate) fn tree_path(value: &Yaml) -> Option<TreePath> {
    match value {
        Yaml::Sequence(segments) => segments
            .iter()
            .map(scalar_text)
            .collect::<Option<Vec<_>>>()
            .map(TreePath::from),
        _ if is_null(value) => Some(TreePath::root()),
        _ => scalar_text(value).map(TreePath::from),
    }
}
