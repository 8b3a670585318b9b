use anyhow::Context;
use chrono::Utc;
use log::info;
use rusqlite::Connection;

use crate::config::RatingSettings;
use crate::database::{self, ledger, matches, players, NewLedgerEntry, Player};
use crate::domain::{MatchOutcome, MatchRequest, RatingChange};
use crate::errors::LadderError;
use crate::rating::{compute_match_deltas, MatchRatings, Team};

/// Turns a match result into rating changes and writes the match, its four
/// ledger entries and the four updated snapshots as one transaction.
#[derive(Debug, Clone)]
pub struct MatchRecorder {
    settings: RatingSettings,
}

impl MatchRecorder {
    pub fn new(settings: RatingSettings) -> Self {
        Self { settings }
    }

    pub fn record(
        &self,
        conn: &mut Connection,
        request: &MatchRequest,
    ) -> Result<MatchOutcome, LadderError> {
        let tx = database::begin_write(conn)?;

        // Read under the write lock: every delta comes from this one snapshot.
        let participants = load_participants(&tx, request)?;
        let ratings = MatchRatings {
            team_a: [participants[0].rating, participants[1].rating],
            team_b: [participants[2].rating, participants[3].rating],
        };
        let deltas = compute_match_deltas(&ratings, request.winning_team, self.settings.k_factor);
        let changes: [RatingChange; 4] = std::array::from_fn(|slot| {
            RatingChange::new(participants[slot].id, participants[slot].rating, deltas[slot])
        });

        let created_at = Utc::now().naive_utc();
        let game = matches::insert_match(
            &tx,
            request.team_a,
            request.team_b,
            request.winning_team,
            created_at,
        )?;

        for (slot, (player, change)) in participants.iter().zip(&changes).enumerate() {
            let won = team_for_slot(slot) == request.winning_team;
            ledger::insert_entry(
                &tx,
                &NewLedgerEntry {
                    player_id: player.id,
                    match_id: game.id,
                    rating_before: change.rating_before,
                    rating_after: change.rating_after,
                    won,
                    created_at,
                },
            )?;
            players::update_snapshot(&tx, player.id, &player.snapshot().apply(change, won))?;
        }

        tx.commit()
            .with_context(|| format!("Failed to commit match {}", game.id))?;

        info!(
            "Recorded match {} (team {} won), deltas {:?}",
            game.id,
            request.winning_team,
            deltas
        );

        Ok(MatchOutcome {
            match_id: game.id,
            changes,
        })
    }
}

fn team_for_slot(slot: usize) -> Team {
    if slot < 2 { Team::A } else { Team::B }
}

fn load_participants(
    conn: &Connection,
    request: &MatchRequest,
) -> Result<Vec<Player>, LadderError> {
    let mut participants = Vec::with_capacity(4);
    for player_id in request.participants() {
        let player = players::find_by_id(conn, player_id)?.ok_or_else(|| {
            LadderError::Validation(format!("Player {} does not exist", player_id))
        })?;
        participants.push(player);
    }
    Ok(participants)
}
