use serde::Serialize;

use crate::database::models::{LedgerEntry, Match};
use crate::errors::LadderError;
use crate::rating::{MatchId, PlayerId, RatingValue, Team};

/// A validated request to record one 2v2 result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchRequest {
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    pub winning_team: Team,
}

impl MatchRequest {
    pub fn new(
        team_a: [PlayerId; 2],
        team_b: [PlayerId; 2],
        winning_team: Team,
    ) -> Result<Self, LadderError> {
        let request = Self {
            team_a,
            team_b,
            winning_team,
        };
        request.ensure_distinct()?;
        Ok(request)
    }

    /// Builds a request from loosely typed input, checking presence, the
    /// winner label and distinctness before anything touches the store.
    pub fn parse(
        player_ids: [Option<PlayerId>; 4],
        winning_team: Option<&str>,
    ) -> Result<Self, LadderError> {
        let [Some(a1), Some(a2), Some(b1), Some(b2)] = player_ids else {
            return Err(LadderError::Validation("Missing player IDs".to_string()));
        };
        let winning_team = winning_team
            .ok_or_else(|| LadderError::Validation("Missing winning team".to_string()))?
            .parse::<Team>()
            .map_err(LadderError::Validation)?;

        Self::new([a1, a2], [b1, b2], winning_team)
    }

    /// Participants in A1, A2, B1, B2 order.
    pub fn participants(&self) -> [PlayerId; 4] {
        [self.team_a[0], self.team_a[1], self.team_b[0], self.team_b[1]]
    }

    fn ensure_distinct(&self) -> Result<(), LadderError> {
        let ids = self.participants();
        for (i, id) in ids.iter().enumerate() {
            if ids[i + 1..].contains(id) {
                return Err(LadderError::Validation(format!(
                    "Player {} appears more than once in the match",
                    id
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub player_id: PlayerId,
    pub rating_before: RatingValue,
    pub rating_after: RatingValue,
    pub rating_change: RatingValue,
}

impl RatingChange {
    pub fn new(player_id: PlayerId, rating_before: RatingValue, delta: RatingValue) -> Self {
        Self {
            player_id,
            rating_before,
            rating_after: rating_before + delta,
            rating_change: delta,
        }
    }
}

impl From<&LedgerEntry> for RatingChange {
    fn from(entry: &LedgerEntry) -> Self {
        Self {
            player_id: entry.player_id,
            rating_before: entry.rating_before,
            rating_after: entry.rating_after,
            rating_change: entry.rating_change,
        }
    }
}

/// Result of a recorded match; changes are in A1, A2, B1, B2 order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    pub match_id: MatchId,
    pub changes: [RatingChange; 4],
}

impl MatchOutcome {
    pub fn deltas(&self) -> [RatingValue; 4] {
        self.changes.map(|change| change.rating_change)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchDetail {
    pub game: Match,
    pub changes: Vec<RatingChange>,
}
