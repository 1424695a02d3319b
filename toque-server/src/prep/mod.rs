//! Prep List Pipeline
//!
//! Three services over the engine primitives:
//! - [`generator`]: builds and persists a list for a (date, service) pair
//! - [`enrich`]: best-effort stage-2 quantity suggestions via the
//!   generation provider, degrading to stage-1 numbers on any failure
//! - [`feedback`]: chef-reported actuals driving modifier calibration

mod enrich;
mod feedback;
mod generator;

pub use enrich::{EnrichmentResult, QuantityPrediction, enrich_prep_list};
pub use feedback::{
    BatchFeedbackOutcome, SingleFeedbackOutcome, submit_batch_feedback, submit_item_feedback,
};
pub use generator::{DEFAULT_SAFETY_BUFFER, LOOKBACK_DAYS, PrepListView, fetch_or_generate, generate_prep_list};
