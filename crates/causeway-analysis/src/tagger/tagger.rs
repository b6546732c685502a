//! ConnectiveTagger: runs a pattern set over a sentence batch.
//!
//! Work units go onto one queue that is filled and closed before any
//! worker starts. A fixed pool of OS threads drains it while a reporter
//! thread logs estimated progress. The call returns after every unit has
//! been processed.

use std::sync::Mutex;
use std::thread;
use std::time::Instant;

use causeway_core::config::TaggerConfig;
use causeway_core::errors::TaggerError;
use tracing::{info, warn};

use super::cache::MatchCache;
use super::matcher::TreeMatcher;
use super::progress::{report_progress, WorkerProgress};
use super::work::{build_work_units, WorkUnit};
use super::worker::{run_worker, WorkerContext, WorkerStats};
use crate::patterns::PatternSet;
use crate::results::PossibleCausation;
use crate::sentence::ParsedSentence;

pub struct ConnectiveTagger<'a> {
    config: &'a TaggerConfig,
    matcher: &'a dyn TreeMatcher,
    cache: MatchCache,
}

impl<'a> ConnectiveTagger<'a> {
    pub fn new(config: &'a TaggerConfig, matcher: &'a dyn TreeMatcher) -> Self {
        Self {
            config,
            matcher,
            cache: MatchCache::new(config.effective_cache_dir()),
        }
    }

    pub fn cache(&self) -> &MatchCache {
        &self.cache
    }

    /// Raw (not yet deduplicated) candidates per sentence, in batch order.
    ///
    /// `trees` are the preprocessed tree strings, one per sentence.
    pub fn tag(
        &self,
        patterns: &PatternSet,
        sentences: &[ParsedSentence],
        trees: &[String],
    ) -> Result<Vec<Vec<PossibleCausation>>, TaggerError> {
        if trees.len() != sentences.len() {
            return Err(TaggerError::Preprocess {
                message: format!("{} trees for {} sentences", trees.len(), sentences.len()),
            });
        }
        info!("Tagging possible connectives...");
        let start = Instant::now();

        let units = build_work_units(patterns, sentences);
        let estimated_bytes: f64 = units.iter().map(WorkUnit::estimated_bytes).sum();
        info!(units = units.len(), patterns = patterns.len(), "patterns in queue");

        let outputs: Vec<Mutex<Vec<PossibleCausation>>> =
            sentences.iter().map(|_| Mutex::new(Vec::new())).collect();
        let thread_count = self.config.effective_max_threads().min(units.len());

        let (queue_tx, queue_rx) = crossbeam_channel::unbounded();
        for unit in units {
            if queue_tx.send(unit).is_err() {
                break;
            }
        }
        drop(queue_tx);

        let ctx = WorkerContext {
            sentences,
            trees,
            matcher: self.matcher,
            cache: &self.cache,
            pattern_type: self.config.effective_pattern_type(),
            outputs: &outputs,
        };
        let progress: Vec<WorkerProgress> = (0..thread_count).map(|_| WorkerProgress::new()).collect();
        let interval = self.config.effective_progress_interval();

        let results = thread::scope(|scope| {
            let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(1);
            let progress = &progress;
            let reporter = thread::Builder::new()
                .name("causeway-progress".to_string())
                .spawn_scoped(scope, move || report_progress(progress, estimated_bytes, interval, done_rx));

            let ctx = &ctx;
            let mut results = Vec::with_capacity(thread_count);
            let mut handles = Vec::with_capacity(thread_count);
            for (i, worker_progress) in progress.iter().enumerate() {
                let queue = queue_rx.clone();
                let name = format!("causeway-matcher-{i}");
                let spawned = thread::Builder::new()
                    .name(name.clone())
                    .spawn_scoped(scope, move || run_worker(ctx, worker_progress, queue));
                match spawned {
                    Ok(handle) => handles.push(handle),
                    Err(e) => results.push(Err(TaggerError::WorkerSpawn {
                        thread: name,
                        message: e.to_string(),
                    })),
                }
            }
            for handle in handles {
                results.push(handle.join().unwrap_or_else(|_| Err(TaggerError::WorkerPanicked)));
            }

            let _ = done_tx.send(());
            match reporter {
                Ok(handle) => {
                    if handle.join().is_err() {
                        warn!("Progress reporter panicked");
                    }
                }
                Err(e) => warn!(error = %e, "Progress reporter could not start"),
            }
            results
        });

        let mut totals = WorkerStats::default();
        for result in results {
            let stats = result?;
            totals.units += stats.units;
            totals.cache_hits += stats.cache_hits;
            totals.skipped += stats.skipped;
        }

        let outputs = outputs
            .into_iter()
            .map(|slot| slot.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()))
            .collect();
        info!(
            units = totals.units,
            cache_hits = totals.cache_hits,
            skipped = totals.skipped,
            "Done tagging possible connectives in {:.2} seconds",
            start.elapsed().as_secs_f64()
        );
        Ok(outputs)
    }
}
