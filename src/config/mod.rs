//! Loading seed trees and mutation scripts from YAML.

mod script;
mod seed;
mod yaml;

pub use script::{Script, ScriptError, ScriptOptions};
pub use seed::{SeedError, read_seed, sample_tree};
