//! Gold-standard causal annotations attached to a sentence.

use serde::{Deserialize, Serialize};

/// An annotated causal relation. All members are token indices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CausationInstance {
    pub connective: Vec<usize>,
    pub cause: Option<Vec<usize>>,
    pub effect: Option<Vec<usize>>,
}

impl CausationInstance {
    pub fn new(connective: Vec<usize>, cause: Option<Vec<usize>>, effect: Option<Vec<usize>>) -> Self {
        Self { connective, cause, effect }
    }

    /// Both arguments are annotated and non-empty.
    pub fn is_pairwise(&self) -> bool {
        let present = |arg: &Option<Vec<usize>>| arg.as_ref().is_some_and(|a| !a.is_empty());
        present(&self.cause) && present(&self.effect)
    }
}
