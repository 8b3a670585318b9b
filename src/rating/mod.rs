pub mod elo;
pub mod types;

pub use elo::{compute_delta, compute_match_deltas, expected_score, match_expected_score, DEFAULT_K_FACTOR};
pub use types::{MatchId, MatchRatings, PlayerId, RatingValue, Team};
