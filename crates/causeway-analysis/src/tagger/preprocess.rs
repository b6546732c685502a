//! Serializing sentences for the matcher.

use std::io::Write;

use causeway_core::config::TaggerConfig;
use causeway_core::errors::TaggerError;
use causeway_core::PatternType;
use rayon::prelude::*;
use tracing::info;

use super::matcher::TreeMatcher;
use crate::sentence::ParsedSentence;

/// One tree string per sentence, in order.
///
/// Dependency trees additionally go through the configured rewrite
/// scripts once, as a single batch, to normalize passive constructions.
pub fn preprocess_sentences(
    sentences: &[ParsedSentence],
    config: &TaggerConfig,
    matcher: &dyn TreeMatcher,
) -> Result<Vec<String>, TaggerError> {
    info!(sentences = sentences.len(), "Preprocessing sentences...");
    let pattern_type = config.effective_pattern_type();
    let trees = sentences
        .par_iter()
        .map(|s| s.to_tree_string(pattern_type))
        .collect::<Result<Vec<String>, _>>()?;

    if pattern_type == PatternType::Constituency || trees.is_empty() {
        info!("Done preprocessing.");
        return Ok(trees);
    }

    let mut tree_file = tempfile::Builder::new()
        .prefix("trees")
        .tempfile()
        .map_err(|e| TaggerError::cache_io(std::env::temp_dir(), e))?;
    for tree in &trees {
        writeln!(tree_file, "{tree}").map_err(|e| TaggerError::cache_io(tree_file.path(), e))?;
    }
    tree_file
        .flush()
        .map_err(|e| TaggerError::cache_io(tree_file.path(), e))?;

    let scripts = config.rewrite_script_paths();
    let output = matcher
        .rewrite_trees(tree_file.path(), &scripts)
        .map_err(|e| {
            if e.is_fatal() {
                TaggerError::Matcher(e)
            } else {
                TaggerError::Preprocess { message: e.to_string() }
            }
        })?;

    let rewritten: Vec<String> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();
    if rewritten.len() != trees.len() {
        return Err(TaggerError::Preprocess {
            message: format!(
                "tree rewriting returned {} trees for {} sentences",
                rewritten.len(),
                trees.len()
            ),
        });
    }
    info!("Done preprocessing.");
    Ok(rewritten)
}
