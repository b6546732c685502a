//! Connective tagging: running the pattern set over sentences through an
//! external tree matcher, with a worker pool, on-disk output cache and
//! progress estimation.

pub mod cache;
pub mod matcher;
pub mod preprocess;
pub mod progress;
pub mod stage;
pub mod tagger;
pub mod work;
pub(crate) mod worker;

pub use cache::MatchCache;
pub use matcher::{MatchQuery, TreeMatcher, TregexProcess};
pub use preprocess::preprocess_sentences;
pub use progress::{progress_fraction, WorkerProgress};
pub use stage::{ConnectiveModel, ConnectiveStage};
pub use tagger::ConnectiveTagger;
pub use work::{build_work_units, estimate_output_bytes, WorkUnit};
