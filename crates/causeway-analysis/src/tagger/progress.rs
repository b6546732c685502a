//! Progress accounting for matcher workers and the periodic reporter.

use std::sync::Mutex;
use std::time::Duration;

use causeway_core::constants::MAX_REPORTED_PROGRESS;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::info;

/// Bytes of matcher output a worker has consumed.
///
/// One lock covers both the finished total and the position within the
/// currently open output, so a reader never sees a closing output counted
/// twice or not at all.
#[derive(Debug, Default)]
pub struct WorkerProgress {
    state: Mutex<ProgressState>,
}

#[derive(Debug, Default)]
struct ProgressState {
    completed: u64,
    open: Option<u64>,
}

impl WorkerProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_output(&self) {
        self.with_state(|s| s.open = Some(0));
    }

    pub fn advance(&self, position: u64) {
        self.with_state(|s| {
            if s.open.is_some() {
                s.open = Some(position);
            }
        });
    }

    /// Fold the final position of the open output into the total.
    pub fn close_output(&self, final_position: u64) {
        self.with_state(|s| {
            if s.open.take().is_some() {
                s.completed += final_position;
            }
        });
    }

    pub fn observed_bytes(&self) -> u64 {
        let mut total = 0;
        self.with_state(|s| total = s.completed + s.open.unwrap_or(0));
        total
    }

    fn with_state(&self, f: impl FnOnce(&mut ProgressState)) {
        // A poisoned lock only means a worker panicked mid-update; the
        // counters are still usable for reporting.
        let mut guard = self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

/// Fraction complete, never above [`MAX_REPORTED_PROGRESS`].
pub fn progress_fraction(observed_bytes: u64, estimated_bytes: f64) -> f64 {
    if estimated_bytes <= 0.0 {
        return 0.0;
    }
    (observed_bytes as f64 / estimated_bytes).min(MAX_REPORTED_PROGRESS)
}

/// Log progress every `interval` until `done` fires or disconnects.
pub(crate) fn report_progress(
    workers: &[WorkerProgress],
    estimated_bytes: f64,
    interval: Duration,
    done: Receiver<()>,
) {
    loop {
        match done.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                let observed: u64 = workers.iter().map(WorkerProgress::observed_bytes).sum();
                let fraction = progress_fraction(observed, estimated_bytes);
                info!("Tagging connectives: {:.0}% complete", fraction * 100.0);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
        }
    }
}
