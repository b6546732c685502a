//! A matcher worker: pulls units off the shared queue until it is drained.

use std::fs::File;
use std::io::{BufReader, Write};
use std::sync::Mutex;

use causeway_core::errors::TaggerError;
use causeway_core::{CausewayErrorCode, PatternType};
use crossbeam_channel::Receiver;
use tracing::{debug, warn};

use super::cache::MatchCache;
use super::matcher::{MatchQuery, TreeMatcher};
use super::progress::WorkerProgress;
use super::work::WorkUnit;
use crate::results::{parse_tree_matches, HeadCache, MatchOutputReader, PossibleCausation};
use crate::sentence::ParsedSentence;

/// Everything a worker reads. Shared by all workers of one run.
pub(crate) struct WorkerContext<'a> {
    pub sentences: &'a [ParsedSentence],
    pub trees: &'a [String],
    pub matcher: &'a dyn TreeMatcher,
    pub cache: &'a MatchCache,
    pub pattern_type: PatternType,
    /// One slot per sentence, allocated before any worker starts.
    /// Workers only ever append to a slot.
    pub outputs: &'a [Mutex<Vec<PossibleCausation>>],
}

/// Counters for one worker's run.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerStats {
    pub units: usize,
    pub cache_hits: usize,
    pub skipped: usize,
}

/// Process units until the queue is closed and empty. Returns early only
/// on a failure that would hit every remaining unit too.
pub(crate) fn run_worker(
    ctx: &WorkerContext<'_>,
    progress: &WorkerProgress,
    queue: Receiver<WorkUnit>,
) -> Result<WorkerStats, TaggerError> {
    let mut stats = WorkerStats::default();
    let mut heads = HeadCache::new();
    for unit in queue.iter() {
        stats.units += 1;
        process_unit(ctx, progress, &unit, &mut heads, &mut stats)?;
    }
    Ok(stats)
}

fn process_unit(
    ctx: &WorkerContext<'_>,
    progress: &WorkerProgress,
    unit: &WorkUnit,
    heads: &mut HeadCache,
    stats: &mut WorkerStats,
) -> Result<(), TaggerError> {
    let pattern = &unit.pattern;
    let mut input = String::new();
    for &i in &unit.sentence_indices {
        input.push_str(ctx.trees[i].trim_end());
        input.push('\n');
    }

    let entry = ctx.cache.entry_path(&pattern.query, input.as_bytes());
    if entry.is_file() {
        stats.cache_hits += 1;
        debug!(pattern = %pattern.query, entry = %entry.display(), "Match cache hit");
    } else {
        let mut scratch = tempfile::Builder::new()
            .prefix("trees")
            .tempfile()
            .map_err(|e| TaggerError::cache_io(std::env::temp_dir(), e))?;
        scratch
            .write_all(input.as_bytes())
            .and_then(|()| scratch.flush())
            .map_err(|e| TaggerError::cache_io(scratch.path(), e))?;

        let query = MatchQuery {
            pattern: &pattern.query,
            connective_labels: &pattern.connective_labels,
            pattern_type: ctx.pattern_type,
            tree_file: scratch.path(),
        };
        debug!(pattern = %pattern.query, entry = %entry.display(), "Running pattern");
        match ctx.matcher.run_query(&query) {
            // A successful run prints a header per tree, even without hits.
            Ok(output) if output.is_empty() => {
                warn!(pattern = %pattern.query, "Matcher produced no output; skipping pattern");
                stats.skipped += 1;
                return Ok(());
            }
            Ok(output) => ctx.cache.store(&entry, &output)?,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                warn!(pattern = %pattern.query, error = %e.coded_string(), "Matcher failed; skipping pattern");
                stats.skipped += 1;
                return Ok(());
            }
        }
    }

    let file = File::open(&entry).map_err(|e| TaggerError::cache_io(&entry, e))?;
    let mut reader = MatchOutputReader::new(BufReader::new(file));
    progress.open_output();
    for &sentence_index in &unit.sentence_indices {
        let lines = match reader.next_tree() {
            Ok(lines) => lines,
            Err(e) => {
                warn!(pattern = %pattern.query, error = %e, "Unreadable matcher output");
                break;
            }
        };
        progress.advance(reader.bytes_read());
        let candidates = parse_tree_matches(
            &lines,
            pattern,
            &ctx.sentences[sentence_index],
            sentence_index,
            ctx.pattern_type,
            heads,
        );
        if !candidates.is_empty() {
            let mut slot = ctx.outputs[sentence_index]
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            slot.extend(candidates);
        }
    }
    progress.close_output(reader.bytes_read());
    Ok(())
}
