use super::types::{MatchRatings, RatingValue, Team};

/// Default K-factor for rating updates
pub const DEFAULT_K_FACTOR: f64 = 32.0;

const LOGISTIC_SCALE: f64 = 400.0;

/// Probability that a player beats a single opponent.
pub fn expected_score(player: RatingValue, opponent: RatingValue) -> f64 {
    let exponent = (opponent as f64 - player as f64) / LOGISTIC_SCALE;
    1.0 / (1.0 + 10f64.powf(exponent))
}

/// Expected score in a 2v2 match: the player faces both opponents and the
/// two pairwise expectations are averaged. The partner's rating plays no part.
pub fn match_expected_score(
    player: RatingValue,
    opponent1: RatingValue,
    opponent2: RatingValue,
) -> f64 {
    (expected_score(player, opponent1) + expected_score(player, opponent2)) / 2.0
}

/// Rating change for one player. `f64::round` rounds halves away from zero.
pub fn compute_delta(
    player: RatingValue,
    opponent1: RatingValue,
    opponent2: RatingValue,
    won: bool,
    k_factor: f64,
) -> RatingValue {
    let expected = match_expected_score(player, opponent1, opponent2);
    let actual = if won { 1.0 } else { 0.0 };
    let new_rating = (player as f64 + k_factor * (actual - expected)).round() as RatingValue;
    new_rating - player
}

/// Deltas for all four participants in A1, A2, B1, B2 order, all computed
/// from the same pre-match snapshot.
pub fn compute_match_deltas(
    ratings: &MatchRatings,
    winning_team: Team,
    k_factor: f64,
) -> [RatingValue; 4] {
    let delta_for = |team: Team, rating: RatingValue| {
        let [opp1, opp2] = ratings.team(team.opponent());
        compute_delta(rating, opp1, opp2, team == winning_team, k_factor)
    };

    [
        delta_for(Team::A, ratings.team_a[0]),
        delta_for(Team::A, ratings.team_a[1]),
        delta_for(Team::B, ratings.team_b[0]),
        delta_for(Team::B, ratings.team_b[1]),
    ]
}
