//! Shared constants for the Causeway connective tagger.

/// Causeway version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Maximum number of Steiner nodes allowed in a generated pattern.
pub const DEFAULT_MAX_STEINERS: usize = 6;

/// Maximum number of concurrent matcher workers.
pub const DEFAULT_MAX_THREADS: usize = 30;

/// Interval between progress reports, in milliseconds.
pub const DEFAULT_PROGRESS_INTERVAL_MS: u64 = 4_000;

/// Name of the matcher cache directory under `$HOME`.
pub const DEFAULT_CACHE_DIR_NAME: &str = "tregex_cache";

/// Default install location of the TRegex distribution.
pub const DEFAULT_TREGEX_DIR: &str = "stanford-tregex";

/// Subdirectory of the TRegex dir holding dependency rewrite scripts.
pub const DEFAULT_REWRITE_SCRIPTS_SUBDIR: &str = "tsurgeon_dep";

/// Extension of rewrite script files.
pub const REWRITE_SCRIPT_EXTENSION: &str = "ts";

/// Dependency-tree rewrite scripts, applied once, in this order.
/// Order matters: later scripts assume earlier normalizations.
pub const DEFAULT_REWRITE_SCRIPTS: &[&str] = &[
    "normalize_passives",
    "normalize_acl_passives_1",
    "normalize_acl_passives_2",
    "normalize_acl_no_agent_1",
    "normalize_acl_no_agent_2",
    "normalize_acl_no_agent_3",
];

/// Longest pattern directory name that is written verbatim.
pub const MAX_PATTERN_DIR_LEN: usize = 255;

/// Prefix kept from over-long pattern directory names before the hash suffix.
pub const TRUNCATED_PATTERN_DIR_LEN: usize = 235;

/// Rough output-size multiplier for matched node names (progress estimate).
pub const BYTES_PER_SENTENCE_FACTOR: f64 = 1.85;

/// Progress never reports more than this while work remains.
pub const MAX_REPORTED_PROGRESS: f64 = 0.99;

/// Label and POS of the synthetic root token.
pub const ROOT_LABEL: &str = "ROOT";

/// Dependency labels that are interchangeable in generated patterns.
pub const SUBJECT_LABELS: &[&str] = &["nsubj", "csubj"];
pub const PASSIVE_SUBJECT_LABELS: &[&str] = &["nsubjpass", "csubjpass"];

/// Catch-all dependency label emitted by the parser when unsure.
pub const UNSPECIFIED_DEP_LABEL: &str = "dep";

/// Generalized POS categories. Tags not listed generalize to themselves.
pub const POS_GENERAL: &[(&str, &str)] = &[
    ("JJ", "JJ"),
    ("JJR", "JJ"),
    ("JJS", "JJ"),
    ("NN", "NN"),
    ("NNS", "NN"),
    ("NNP", "NN"),
    ("NNPS", "NN"),
    ("PRP", "NN"),
    ("RB", "RB"),
    ("RBR", "RB"),
    ("RBS", "RB"),
    ("VB", "VB"),
    ("VBD", "VB"),
    ("VBG", "VB"),
    ("VBN", "VB"),
    ("VBP", "VB"),
    ("VBZ", "VB"),
    ("MD", "VB"),
];

/// Map a Penn Treebank tag to its generalized category.
pub fn generalize_pos(pos: &str) -> &str {
    POS_GENERAL
        .iter()
        .find(|(tag, _)| *tag == pos)
        .map(|(_, general)| *general)
        .unwrap_or(pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generalizes_known_tags() {
        assert_eq!(generalize_pos("VBZ"), "VB");
        assert_eq!(generalize_pos("NNS"), "NN");
        assert_eq!(generalize_pos("PRP"), "NN");
    }

    #[test]
    fn unknown_tags_map_to_themselves() {
        assert_eq!(generalize_pos("IN"), "IN");
        assert_eq!(generalize_pos("ROOT"), "ROOT");
    }
}
