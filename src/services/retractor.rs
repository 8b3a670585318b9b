use anyhow::{Context, Result};
use log::{debug, info, warn};
use rusqlite::Connection;

use crate::config::RatingSettings;
use crate::database::{self, ledger, matches, players};
use crate::domain::AggregateSnapshot;
use crate::errors::LadderError;
use crate::rating::{MatchId, PlayerId, RatingValue};

const ENTRIES_PER_MATCH: usize = 4;

#[derive(Debug, Clone, PartialEq)]
pub struct RetractedMatch {
    pub match_id: MatchId,
    /// Recomputed snapshot of every participant, in A1, A2, B1, B2 order.
    pub snapshots: Vec<(PlayerId, AggregateSnapshot)>,
}

/// Deletes a match with its ledger entries and rebuilds the participants'
/// snapshots from what is left of their ledgers.
#[derive(Debug, Clone)]
pub struct MatchRetractor {
    settings: RatingSettings,
}

impl MatchRetractor {
    pub fn new(settings: RatingSettings) -> Self {
        Self { settings }
    }

    pub fn retract(
        &self,
        conn: &mut Connection,
        match_id: MatchId,
    ) -> Result<RetractedMatch, LadderError> {
        let tx = database::begin_write(conn)?;

        let game = matches::find_by_id(&tx, match_id)?
            .ok_or_else(|| LadderError::match_not_found(match_id))?;

        let removed = ledger::delete_by_match(&tx, match_id)?;
        if removed != ENTRIES_PER_MATCH {
            warn!(
                "Match {} had {} rating history entries, expected {}",
                match_id, removed, ENTRIES_PER_MATCH
            );
        }
        matches::delete(&tx, match_id)?;

        let mut snapshots = Vec::with_capacity(ENTRIES_PER_MATCH);
        for player_id in game.participants() {
            let snapshot = recompute_player(&tx, player_id, self.settings.starting_rating)?;
            snapshots.push((player_id, snapshot));
        }

        tx.commit()
            .with_context(|| format!("Failed to commit retraction of match {}", match_id))?;

        info!("Retracted match {}", match_id);
        Ok(RetractedMatch {
            match_id,
            snapshots,
        })
    }
}

/// Replays a player's remaining ledger into their cached snapshot.
pub fn recompute_player(
    conn: &Connection,
    player_id: PlayerId,
    starting_rating: RatingValue,
) -> Result<AggregateSnapshot> {
    let entries = ledger::list_by_player(conn, player_id)?;
    let snapshot = AggregateSnapshot::from_ledger(&entries, starting_rating);
    players::update_snapshot(conn, player_id, &snapshot)?;

    debug!(
        "Recomputed player {} from {} entries: rating {}, {}-{}",
        player_id,
        entries.len(),
        snapshot.rating,
        snapshot.wins,
        snapshot.losses
    );
    Ok(snapshot)
}
