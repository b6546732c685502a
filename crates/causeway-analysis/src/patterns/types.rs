//! Pattern and pattern-set types.

use std::path::Path;
use std::sync::Arc;

use causeway_core::errors::TaggerError;
use causeway_core::types::collections::FxHashSet;
use causeway_core::PatternId;
use serde::{Deserialize, Serialize};

/// Capture name given to the first Steiner node of a pattern.
const FIRST_STEINER_CAPTURE: &str = "=steiner_0";

/// A tree query extracted from one training instance. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: PatternId,
    pub query: String,
    /// Connective capture names to print, in connective order.
    pub connective_labels: Vec<String>,
    /// Lemmas a sentence must contain for the pattern to possibly match.
    pub connective_lemmas: Vec<String>,
}

impl Pattern {
    /// Whether the query passes through nodes that are neither arguments
    /// nor connective words.
    pub fn relies_on_steiner_nodes(&self) -> bool {
        self.query.contains(FIRST_STEINER_CAPTURE)
    }
}

/// Output of pattern generation for one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPattern {
    pub query: String,
    pub connective_labels: Vec<String>,
}

/// Patterns deduplicated by exact query text, ids in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Arc<Pattern>>,
    seen: FxHashSet<String>,
}

impl PatternSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pattern unless one with the same query exists.
    /// Returns the new id, or `None` for a duplicate.
    pub fn insert(&mut self, generated: GeneratedPattern, connective_lemmas: Vec<String>) -> Option<PatternId> {
        if self.seen.contains(&generated.query) {
            return None;
        }
        let id = PatternId::new(self.patterns.len() as u32);
        self.seen.insert(generated.query.clone());
        self.patterns.push(Arc::new(Pattern {
            id,
            query: generated.query,
            connective_labels: generated.connective_labels,
            connective_lemmas,
        }));
        Some(id)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn get(&self, id: PatternId) -> Option<&Arc<Pattern>> {
        self.patterns.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Pattern>> {
        self.patterns.iter()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let plain: Vec<&Pattern> = self.patterns.iter().map(Arc::as_ref).collect();
        serde_json::to_string_pretty(&plain)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let plain: Vec<Pattern> = serde_json::from_str(json)?;
        let mut set = Self::new();
        for mut pattern in plain {
            if !set.seen.insert(pattern.query.clone()) {
                continue;
            }
            // Ids stay dense even when the file held duplicates.
            pattern.id = PatternId::new(set.patterns.len() as u32);
            set.patterns.push(Arc::new(pattern));
        }
        Ok(set)
    }

    pub fn save(&self, path: &Path) -> Result<(), TaggerError> {
        let json = self.to_json().map_err(|e| TaggerError::PatternStore {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, json).map_err(|e| TaggerError::cache_io(path, e))
    }

    pub fn load(path: &Path) -> Result<Self, TaggerError> {
        let json = std::fs::read_to_string(path).map_err(|e| TaggerError::cache_io(path, e))?;
        Self::from_json(&json).map_err(|e| TaggerError::PatternStore {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(query: &str) -> GeneratedPattern {
        GeneratedPattern {
            query: query.to_string(),
            connective_labels: vec!["connective_0".to_string()],
        }
    }

    #[test]
    fn duplicates_are_rejected() {
        let mut set = PatternSet::new();
        assert_eq!(set.insert(generated("a"), vec!["x".into()]), Some(PatternId(0)));
        assert_eq!(set.insert(generated("a"), vec!["y".into()]), None);
        assert_eq!(set.insert(generated("b"), vec![]), Some(PatternId(1)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(PatternId(0)).unwrap().connective_lemmas, vec!["x".to_string()]);
    }

    #[test]
    fn steiner_detection() {
        let mut set = PatternSet::new();
        set.insert(generated("(/.*_[0-9]+/=steiner_0 < x)"), vec![]);
        set.insert(generated("(/.*_[0-9]+/=cause)"), vec![]);
        let flags: Vec<bool> = set.iter().map(|p| p.relies_on_steiner_nodes()).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patterns.json");
        let mut set = PatternSet::new();
        set.insert(generated("q1"), vec!["because".into()]);
        set.insert(generated("q2"), vec!["cause".into()]);
        set.save(&path).unwrap();

        let loaded = PatternSet::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded.get(PatternId(1)).unwrap().query, "q2");
        assert!(PatternSet::load(&dir.path().join("missing.json")).is_err());
    }
}
