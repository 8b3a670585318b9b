use anyhow::Context;
use log::{debug, error, info};
use rusqlite::Connection;

use crate::database::{self, ledger, matches, players};
use crate::errors::LadderError;
use crate::rating::PlayerId;

use super::retractor::MatchRetractor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRemoval {
    pub player_id: PlayerId,
    pub matches_retracted: usize,
}

/// Removes a player after retracting every match they played.
///
/// Each retraction commits on its own, so an interrupted removal leaves some
/// matches retracted and some not. Running it again picks up where it stopped:
/// matches that are already gone are skipped.
#[derive(Debug, Clone)]
pub struct PlayerRemover {
    retractor: MatchRetractor,
}

impl PlayerRemover {
    pub fn new(retractor: MatchRetractor) -> Self {
        Self { retractor }
    }

    pub fn remove(
        &self,
        conn: &mut Connection,
        player_id: PlayerId,
    ) -> Result<PlayerRemoval, LadderError> {
        if players::find_by_id(conn, player_id)?.is_none() {
            return Err(LadderError::player_not_found(player_id));
        }

        let match_ids = matches::list_ids_for_player(conn, player_id)?;
        let mut matches_retracted = 0;
        for match_id in match_ids {
            match self.retractor.retract(conn, match_id) {
                Ok(_) => matches_retracted += 1,
                Err(err) if err.is_not_found() => {
                    debug!("Match {} was already retracted, skipping", match_id);
                }
                Err(err) => {
                    error!(
                        "Removal of player {} stopped after retracting {} matches: {}",
                        player_id, matches_retracted, err
                    );
                    return Err(err);
                }
            }
        }

        let tx = database::begin_write(conn)?;
        if !matches::list_ids_for_player(&tx, player_id)?.is_empty() {
            return Err(LadderError::ConcurrencyConflict(format!(
                "Player {} was entered into a new match during removal",
                player_id
            )));
        }
        let orphaned = ledger::delete_by_player(&tx, player_id)?;
        if orphaned > 0 {
            debug!("Deleted {} orphaned ledger entries of player {}", orphaned, player_id);
        }
        if !players::delete(&tx, player_id)? {
            return Err(LadderError::player_not_found(player_id));
        }
        tx.commit()
            .with_context(|| format!("Failed to commit removal of player {}", player_id))?;

        info!(
            "Removed player {} after retracting {} matches",
            player_id, matches_retracted
        );
        Ok(PlayerRemoval {
            player_id,
            matches_retracted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RatingSettings;
    use crate::database::setup::initialize_schema;
    use crate::domain::{AggregateSnapshot, MatchRequest};
    use crate::errors::ErrorKind;
    use crate::rating::Team;
    use crate::services::recorder::MatchRecorder;
    use chrono::Utc;

    fn setup(count: usize) -> (Connection, Vec<PlayerId>) {
        let conn = Connection::open_in_memory().unwrap();
        initialize_schema(&conn).unwrap();
        let now = Utc::now().naive_utc();
        let ids = (0..count)
            .map(|i| {
                players::insert_player(&conn, &format!("P{}", i), 1500, now)
                    .unwrap()
                    .id
            })
            .collect();
        (conn, ids)
    }

    fn record(conn: &mut Connection, ids: [PlayerId; 4], winner: Team) {
        let request = MatchRequest::new([ids[0], ids[1]], [ids[2], ids[3]], winner).unwrap();
        MatchRecorder::new(RatingSettings::default())
            .record(conn, &request)
            .unwrap();
    }

    fn remover() -> PlayerRemover {
        PlayerRemover::new(MatchRetractor::new(RatingSettings::default()))
    }

    #[test]
    fn test_remove_player_recomputes_co_participants() {
        let (mut conn, p) = setup(6);
        record(&mut conn, [p[0], p[1], p[2], p[3]], Team::A);
        record(&mut conn, [p[2], p[4], p[3], p[5]], Team::A);
        record(&mut conn, [p[0], p[2], p[4], p[5]], Team::B);

        let removal = remover().remove(&mut conn, p[0]).unwrap();
        assert_eq!(removal.matches_retracted, 2);
        assert!(players::find_by_id(&conn, p[0]).unwrap().is_none());
        assert!(ledger::list_by_player(&conn, p[0]).unwrap().is_empty());

        // Only the match without p[0] survives.
        assert_eq!(matches::list_all(&conn).unwrap().len(), 1);
        let p1 = players::find_by_id(&conn, p[1]).unwrap().unwrap();
        assert_eq!(p1.snapshot(), AggregateSnapshot::starting(1500));
        // p[2]'s rating is whatever its surviving entry says, not a replay.
        let p2 = players::find_by_id(&conn, p[2]).unwrap().unwrap();
        let remaining = ledger::list_by_player(&conn, p[2]).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(p2.rating, remaining[0].rating_after);
        assert_eq!((p2.matches_played, p2.wins, p2.losses), (1, 1, 0));
    }

    #[test]
    fn test_remove_player_without_matches() {
        let (mut conn, p) = setup(1);
        let removal = remover().remove(&mut conn, p[0]).unwrap();
        assert_eq!(removal.matches_retracted, 0);
        assert!(players::list_ids(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_player() {
        let (mut conn, _) = setup(0);
        let err = remover().remove(&mut conn, 7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_resumes_after_partial_cascade() {
        let (mut conn, p) = setup(4);
        record(&mut conn, [p[0], p[1], p[2], p[3]], Team::A);
        record(&mut conn, [p[0], p[2], p[1], p[3]], Team::B);

        // Simulate a crash after the first retraction.
        let first = matches::list_ids_for_player(&conn, p[0]).unwrap()[0];
        MatchRetractor::new(RatingSettings::default())
            .retract(&mut conn, first)
            .unwrap();

        let removal = remover().remove(&mut conn, p[0]).unwrap();
        assert_eq!(removal.matches_retracted, 1);
        for id in &p[1..] {
            let player = players::find_by_id(&conn, *id).unwrap().unwrap();
            assert_eq!(player.snapshot(), AggregateSnapshot::starting(1500));
        }
    }
}
