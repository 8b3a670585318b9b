use chrono::NaiveDateTime;
use serde::Serialize;

use crate::database::models::LedgerEntry;
use crate::rating::{MatchId, RatingValue};

/// A player's standing right after one of their matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub match_id: MatchId,
    pub played_at: NaiveDateTime,
    pub rating: RatingValue,
    pub cumulative_wins: i64,
    pub cumulative_losses: i64,
    pub win_rate: f64,
}

/// Walks the ledger oldest to newest, accumulating the record as it goes.
pub fn build_progress(entries: &[LedgerEntry]) -> Vec<ProgressPoint> {
    let mut ordered: Vec<&LedgerEntry> = entries.iter().collect();
    ordered.sort_by_key(|e| (e.created_at, e.id));

    let mut wins = 0;
    let mut losses = 0;
    ordered
        .into_iter()
        .map(|entry| {
            if entry.won {
                wins += 1;
            } else {
                losses += 1;
            }
            ProgressPoint {
                match_id: entry.match_id,
                played_at: entry.created_at,
                rating: entry.rating_after,
                cumulative_wins: wins,
                cumulative_losses: losses,
                win_rate: wins as f64 / (wins + losses) as f64 * 100.0,
            }
        })
        .collect()
}
