pub mod models;
pub mod progress;
pub mod snapshot;

pub use models::{MatchDetail, MatchOutcome, MatchRequest, RatingChange};
pub use progress::{build_progress, ProgressPoint};
pub use snapshot::AggregateSnapshot;
