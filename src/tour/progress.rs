use serde::{Deserialize, Serialize};

/// Minimal persisted record: whether the walkthrough has been seen to the
/// end, and the last step index reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub seen: bool,
    pub step: usize,
}

/// How long tour progress outlives the process.
///
/// The original app shipped revisions with both behaviors; the choice is
/// left to the integrator instead of baking one in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PersistencePolicy {
    /// Progress lives in memory only; a reload starts clean.
    #[default]
    Session,
    /// Progress is written to disk; a completed tour stays dismissed
    /// across runs until explicitly restarted.
    File,
}

impl PersistencePolicy {
    pub fn id(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::File => "file",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            _ => Self::Session,
        }
    }
}
