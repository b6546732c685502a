//! Which parse representation patterns are generated from and run against.

use serde::{Deserialize, Serialize};

/// Tree representation used for pattern generation and matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Dependency trees serialized as bracketed `lemma_INDEX` nodes.
    #[default]
    Dependency,
    /// Phrase-structure trees.
    Constituency,
}

impl PatternType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Dependency => "dependency",
            Self::Constituency => "constituency",
        }
    }

    /// Matcher flag selecting how matched nodes are printed:
    /// node labels for dependency trees, node numbers for constituency trees.
    pub fn output_flag(self) -> &'static str {
        match self {
            Self::Dependency => "-u",
            Self::Constituency => "-x",
        }
    }
}

impl std::str::FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dependency" => Ok(Self::Dependency),
            "constituency" => Ok(Self::Constituency),
            other => Err(format!("unknown pattern type {other:?}")),
        }
    }
}
