use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypesError;

/// How a local variable map is combined into the remote one.
///
/// All strategies are flat: only top-level keys are compared, nested values
/// are never descended into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// Add keys missing from the remote; leave existing keys alone.
    Append,
    /// Overwrite keys present on both sides; ignore local-only keys.
    #[default]
    Update,
    /// Make the remote exactly equal to the local map.
    Replace,
    /// Remove every local key from the remote.
    Delete,
}

impl MergeStrategy {
    pub const ALL: [MergeStrategy; 4] = [Self::Append, Self::Update, Self::Replace, Self::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Update => "update",
            Self::Replace => "replace",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive; surrounding whitespace is ignored.
impl FromStr for MergeStrategy {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == wanted)
            .ok_or_else(|| TypesError::UnknownStrategy(s.to_string()))
    }
}
