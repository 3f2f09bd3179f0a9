use std::path::PathBuf;

use clap::Parser;

use crate::application::data::LogLevel;

/// Replays folder and file mutations against a tree and prints the result.
#[derive(Parser, Debug, Clone)]
#[command(version)]
pub struct Cli {
    /// Seed tree as YAML or JSON. A built-in sample is used when omitted
    pub seed: Option<PathBuf>,

    /// YAML file listing the operations to apply
    #[clap(long, short)]
    pub script: Option<PathBuf>,

    /// Fail on missing path segments instead of creating folders for them
    #[clap(long)]
    pub strict_paths: bool,

    /// Let renames and new files replace an existing entry of the same name
    #[clap(long)]
    pub overwrite: bool,

    /// Stop at the first refused operation
    #[clap(long)]
    pub fail_fast: bool,

    /// Only open these paths (and their parents) in the printed tree
    #[clap(long, short)]
    pub expand: Vec<String>,

    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["foldertree"]).expect("no arguments are required");

        assert!(cli.seed.is_none());
        assert!(cli.script.is_none());
        assert!(!cli.strict_paths);
        assert!(!cli.overwrite);
        assert!(!cli.fail_fast);
        assert!(cli.expand.is_empty());
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "foldertree",
            "seed.yaml",
            "--script",
            "ops.yaml",
            "--strict-paths",
            "--overwrite",
            "--fail-fast",
            "-e",
            "Downloads",
            "--expand",
            "Desktop",
            "--log-level",
            "debug",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.seed, Some(PathBuf::from("seed.yaml")));
        assert_eq!(cli.script, Some(PathBuf::from("ops.yaml")));
        assert!(cli.strict_paths && cli.overwrite && cli.fail_fast);
        assert_eq!(cli.expand, vec!["Downloads", "Desktop"]);
        assert_eq!(cli.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["foldertree", "--log-level", "loud"]).is_err());
    }
}
