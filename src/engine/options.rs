use derive_more::Display;

/// What to do when a mutation would reuse a name that already exists next to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum CollisionPolicy {
    #[default]
    #[display("reject")]
    Reject,
    #[display("overwrite")]
    Overwrite,
}

impl CollisionPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "reject" => Some(CollisionPolicy::Reject),
            "overwrite" => Some(CollisionPolicy::Overwrite),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Create missing folders while walking a path instead of failing with `PathNotFound`.
    /// Only the inserting operations honour this; delete and rename never create anything.
    pub create_intermediate: bool,
    pub on_collision: CollisionPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            create_intermediate: true,
            on_collision: CollisionPolicy::default(),
        }
    }
}

impl EngineOptions {
    pub fn strict() -> Self {
        Self {
            create_intermediate: false,
            ..Self::default()
        }
    }

    pub fn with_collision(self, on_collision: CollisionPolicy) -> Self {
        Self {
            on_collision,
            ..self
        }
    }

    pub(crate) fn overwrites(&self) -> bool {
        self.on_collision == CollisionPolicy::Overwrite
    }
}
