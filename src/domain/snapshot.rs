use crate::database::models::LedgerEntry;
use crate::rating::RatingValue;

use super::models::RatingChange;

/// A player's cached aggregate state. Always derivable from the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSnapshot {
    pub rating: RatingValue,
    pub matches_played: i64,
    pub wins: i64,
    pub losses: i64,
}

impl AggregateSnapshot {
    pub fn starting(rating: RatingValue) -> Self {
        Self {
            rating,
            matches_played: 0,
            wins: 0,
            losses: 0,
        }
    }

    /// The snapshot after one more recorded match.
    pub fn apply(&self, change: &RatingChange, won: bool) -> Self {
        Self {
            rating: self.rating + change.rating_change,
            matches_played: self.matches_played + 1,
            wins: self.wins + i64::from(won),
            losses: self.losses + i64::from(!won),
        }
    }

    /// Rebuilds the snapshot from a player's surviving ledger entries. The
    /// current rating is the `rating_after` of the latest entry; with no
    /// entries left the player is back at the starting rating.
    pub fn from_ledger(entries: &[LedgerEntry], starting_rating: RatingValue) -> Self {
        let Some(latest) = entries.iter().max_by_key(|e| (e.created_at, e.id)) else {
            return Self::starting(starting_rating);
        };

        let wins = entries.iter().filter(|e| e.won).count() as i64;
        let matches_played = entries.len() as i64;

        Self {
            rating: latest.rating_after,
            matches_played,
            wins,
            losses: matches_played - wins,
        }
    }

    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            self.wins as f64 / decided as f64 * 100.0
        }
    }
}
