use std::path::Path;

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::config::yaml::{is_null, scalar_text};
use crate::tree::{Node, Tree, TreePath};

/// The tree a session starts with when no seed file is given.
const SAMPLE_SEED: &str = r#"
Documents: [Document1.jpg, Document2.jpg, Document3.jpg]
Desktop: [Screenshot1.jpg, videopal.mp4]
Downloads:
  Drivers: [Printerdriver.dmg, cameradriver.dmg]
  Images: []
Applications: [Webstorm.dmg, Pycharm.dmg, FileZilla.dmg, Mattermost.dmg]
chromedriver.dmg: null
"#;

pub fn sample_tree() -> Result<Tree, SeedError> {
    Tree::try_from(SAMPLE_SEED)
}

/// Reads a seed tree from a YAML or JSON file.
pub fn read_seed(path: &Path) -> Result<Tree, SeedError> {
    debug!("Reading seed file: {}", path.display());
    let contents = std::fs::read_to_string(path).context(ReadSnafu {
        file_path: path.display().to_string(),
    })?;
    debug!("Successfully read seed file: {} bytes", contents.len());

    contents.as_str().try_into()
}

impl TryFrom<&str> for Tree {
    type Error = SeedError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let documents = Yaml::load_from_str(contents).context(ParseSnafu)?;
        let document = documents.first().context(MalformedSeedSnafu)?;
        let top_level = document.as_mapping().context(TopLevelNotMapSnafu)?;

        tree_from_mapping(top_level, &TreePath::root())
    }
}

fn tree_from_mapping(
    mapping: &LinkedHashMap<Yaml, Yaml>,
    at: &TreePath,
) -> Result<Tree, SeedError> {
    mapping
        .iter()
        .map(|(key, value)| -> Result<(String, Node), SeedError> {
            let name = scalar_text(key).context(NonStringKeySnafu { path: at.clone() })?;
            let path = at.join(name.as_str());
            let node = node_from_yaml(value, &path)?;
            Ok((name, node))
        })
        .collect()
}

fn node_from_yaml(value: &Yaml, path: &TreePath) -> Result<Node, SeedError> {
    match value {
        Yaml::Mapping(mapping) => tree_from_mapping(mapping, path).map(Node::Folder),
        Yaml::Sequence(items) => items
            .iter()
            .map(|item| scalar_text(item).context(InvalidNodeSnafu { path: path.clone() }))
            .collect::<Result<Vec<_>, _>>()
            .map(Node::FileList),
        _ if is_null(value) => Ok(Node::Leaf),
        _ => InvalidNodeSnafu { path: path.clone() }.fail(),
    }
}

#[derive(Debug, Snafu)]
pub enum SeedError {
    #[snafu(display("Failed to read the seed file: {}", file_path))]
    ReadError {
        file_path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse the seed file"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted seed"))]
    MalformedSeed,
    #[snafu(display("Top level of the seed should be a map"))]
    TopLevelNotMap,
    #[snafu(display("Entries in '{}' must be named by plain scalars", path))]
    NonStringKey { path: TreePath },
    #[snafu(display("'{}' is neither a folder, a list of file names nor null", path))]
    InvalidNode { path: TreePath },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn files(names: &[&str]) -> Node {
        Node::FileList(names.iter().map(|name| name.to_string()).collect())
    }

    #[test]
    fn test_sample_tree_matches_the_demo_data() {
        let tree = sample_tree().expect("sample seed should parse");

        assert_eq!(
            tree.names().collect::<Vec<_>>(),
            vec![
                "Documents",
                "Desktop",
                "Downloads",
                "Applications",
                "chromedriver.dmg"
            ]
        );
        assert_eq!(
            tree.get("Desktop"),
            Some(&files(&["Screenshot1.jpg", "videopal.mp4"]))
        );
        assert!(tree.get("chromedriver.dmg").is_some_and(Node::is_leaf));

        let downloads = tree.get("Downloads").and_then(Node::as_folder).unwrap();
        assert_eq!(downloads.get("Images"), Some(&files(&[])));
        assert_eq!(
            downloads.get("Drivers"),
            Some(&files(&["Printerdriver.dmg", "cameradriver.dmg"]))
        );
    }

    #[test]
    fn test_seed_accepts_json() {
        let json = r#"{"Documents": ["a.jpg", "b.jpg"], "Downloads": {"Drivers": ["d1.dmg"]}, "x.dmg": null}"#;
        let tree: Tree = json.try_into().expect("json is valid yaml");

        assert_eq!(tree.get("Documents"), Some(&files(&["a.jpg", "b.jpg"])));
        assert!(tree.get("x.dmg").is_some_and(Node::is_leaf));
        assert_eq!(
            tree.get("Downloads")
                .and_then(Node::as_folder)
                .and_then(|downloads| downloads.get("Drivers")),
            Some(&files(&["d1.dmg"]))
        );
    }

    #[test]
    fn test_seed_empty_values_are_leaves() {
        let tree: Tree = "a:\nb: ~\nc: {}".try_into().unwrap();

        assert!(tree.get("a").is_some_and(Node::is_leaf));
        assert!(tree.get("b").is_some_and(Node::is_leaf));
        assert_eq!(tree.get("c"), Some(&Node::empty_folder()));
    }

    #[test]
    fn test_seed_numeric_names_are_kept_as_text() {
        let tree: Tree = "2024: [1, 2]".try_into().unwrap();

        assert_eq!(tree.get("2024"), Some(&files(&["1", "2"])));
    }

    #[test]
    fn test_seed_returns_error_on_empty_document() {
        let result = Tree::try_from("");
        assert!(matches!(result, Err(SeedError::MalformedSeed)));
    }

    #[test]
    fn test_seed_returns_error_on_invalid_yaml() {
        let result = Tree::try_from("invalid: yaml: content: [unclosed");
        assert!(matches!(result, Err(SeedError::ParseError { .. })));
    }

    #[test]
    fn test_seed_returns_error_when_top_level_is_not_map() {
        let result = Tree::try_from("- item1\n- item2");
        assert!(matches!(result, Err(SeedError::TopLevelNotMap)));
    }

    #[test]
    fn test_seed_rejects_nested_lists() {
        let result = Tree::try_from("Downloads:\n  Drivers: [a, [b]]");
        match result {
            Err(SeedError::InvalidNode { path }) => {
                assert_eq!(path, TreePath::from("Downloads/Drivers"))
            }
            other => panic!("Expected InvalidNode, got {:?}", other),
        }
    }

    #[test]
    fn test_seed_rejects_scalar_values() {
        let result = Tree::try_from("readme.txt: some text");
        assert!(matches!(result, Err(SeedError::InvalidNode { .. })));
    }

    #[test]
    fn test_seed_rejects_complex_keys() {
        let result = Tree::try_from("Folder:\n  ? [a, b]\n  : ~");
        match result {
            Err(SeedError::NonStringKey { path }) => assert_eq!(path, TreePath::from("Folder")),
            other => panic!("Expected NonStringKey, got {:?}", other),
        }
    }

    #[test]
    fn test_read_seed_from_file() {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "Desktop: [x.jpg]").expect("Failed to write to temp file");

        let tree = read_seed(file.path()).expect("seed should load");

        assert_eq!(tree.get("Desktop"), Some(&files(&["x.jpg"])));
    }

    #[test]
    fn test_read_seed_returns_error_on_nonexistent_file() {
        let result = read_seed(Path::new("nonexistent-seed.yaml"));

        match result {
            Err(SeedError::ReadError { file_path, .. }) => {
                assert!(file_path.contains("nonexistent-seed.yaml"))
            }
            other => panic!("Expected ReadError, got {:?}", other),
        }
    }
}
