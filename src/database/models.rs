use chrono::NaiveDateTime;

use crate::domain::AggregateSnapshot;
use crate::rating::{MatchId, PlayerId, RatingValue, Team};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub rating: RatingValue,
    pub matches_played: i64,
    pub wins: i64,
    pub losses: i64,
    pub created_at: NaiveDateTime,
}

impl Player {
    pub fn snapshot(&self) -> AggregateSnapshot {
        AggregateSnapshot {
            rating: self.rating,
            matches_played: self.matches_played,
            wins: self.wins,
            losses: self.losses,
        }
    }

    /// Percentage of decided matches won, 0 when none played.
    pub fn win_rate(&self) -> f64 {
        self.snapshot().win_rate()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: MatchId,
    pub team_a: [PlayerId; 2],
    pub team_b: [PlayerId; 2],
    pub winning_team: Team,
    pub created_at: NaiveDateTime,
}

impl Match {
    /// Participants in A1, A2, B1, B2 order.
    pub fn participants(&self) -> [PlayerId; 4] {
        [self.team_a[0], self.team_a[1], self.team_b[0], self.team_b[1]]
    }

    pub fn team_of(&self, player_id: PlayerId) -> Option<Team> {
        if self.team_a.contains(&player_id) {
            Some(Team::A)
        } else if self.team_b.contains(&player_id) {
            Some(Team::B)
        } else {
            None
        }
    }
}

/// One player's rating transition caused by one match.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub id: i64,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub rating_before: RatingValue,
    pub rating_after: RatingValue,
    pub rating_change: RatingValue,
    pub won: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewLedgerEntry {
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub rating_before: RatingValue,
    pub rating_after: RatingValue,
    pub won: bool,
    pub created_at: NaiveDateTime,
}

impl NewLedgerEntry {
    pub fn rating_change(&self) -> RatingValue {
        self.rating_after - self.rating_before
    }
}
