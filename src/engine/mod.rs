//! Path-addressed mutations over immutable [`Tree`](crate::tree::Tree) snapshots.

mod engine;
mod mutation;
mod options;

pub use engine::TreeEngine;
pub use mutation::Mutation;
pub use options::{CollisionPolicy, EngineOptions};
