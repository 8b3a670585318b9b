use anyhow::Result;
use chrono::Utc;
use log::{error, info, warn};

use crate::config::AppConfig;
use crate::database::{self, ledger, matches, players, DbConn, DbPool, LedgerEntry, Match, Player};
use crate::domain::{build_progress, AggregateSnapshot, MatchDetail, MatchOutcome, MatchRequest, ProgressPoint};
use crate::errors::{ErrorKind, LadderError};
use crate::rating::{MatchId, PlayerId};

use super::recorder::MatchRecorder;
use super::removal::PlayerRemover;
use super::retractor::{recompute_player, MatchRetractor};

/// The operations the presentation layer consumes. Every call is one
/// request against the store; lock timeouts are retried a bounded number
/// of times before surfacing as a conflict.
pub struct LadderService {
    pool: DbPool,
    config: AppConfig,
    recorder: MatchRecorder,
    retractor: MatchRetractor,
    remover: PlayerRemover,
}

impl LadderService {
    pub fn new(pool: DbPool, config: AppConfig) -> Self {
        let recorder = MatchRecorder::new(config.rating.clone());
        let retractor = MatchRetractor::new(config.rating.clone());
        let remover = PlayerRemover::new(retractor.clone());
        Self {
            pool,
            config,
            recorder,
            retractor,
            remover,
        }
    }

    /// Opens the configured database file and makes sure the schema exists.
    pub fn open(config: AppConfig) -> Result<Self> {
        let pool = database::create_pool(&config.store)?;
        Self::with_schema(pool, config)
    }

    pub fn in_memory(config: AppConfig) -> Result<Self> {
        let pool = database::create_memory_pool()?;
        Self::with_schema(pool, config)
    }

    fn with_schema(pool: DbPool, config: AppConfig) -> Result<Self> {
        let conn = database::get_connection(&pool)?;
        database::setup::initialize_schema(&conn)?;
        drop(conn);
        Ok(Self::new(pool, config))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn connection(&self) -> Result<DbConn, LadderError> {
        Ok(database::get_connection(&self.pool)?)
    }

    fn run<T>(
        &self,
        operation: &str,
        mut op: impl FnMut(&mut DbConn) -> Result<T, LadderError>,
    ) -> Result<T, LadderError> {
        let mut conn = self.connection()?;
        let mut attempt = 0;
        loop {
            match op(&mut conn) {
                Err(err)
                    if err.kind() == ErrorKind::Conflict
                        && attempt < self.config.store.max_conflict_retries =>
                {
                    attempt += 1;
                    warn!("{} hit a lock conflict, retrying ({}): {}", operation, attempt, err);
                }
                Err(err) if err.kind() == ErrorKind::Persistence => {
                    error!("{} failed and was rolled back: {}", operation, err);
                    return Err(err);
                }
                result => return result,
            }
        }
    }

    pub fn list_players(&self) -> Result<Vec<Player>, LadderError> {
        let conn = self.connection()?;
        Ok(players::list_by_rating(&conn)?)
    }

    pub fn get_player(&self, player_id: PlayerId) -> Result<Player, LadderError> {
        let conn = self.connection()?;
        players::find_by_id(&conn, player_id)?
            .ok_or_else(|| LadderError::player_not_found(player_id))
    }

    pub fn create_player(&self, name: &str) -> Result<Player, LadderError> {
        let name = validate_name(name)?;
        let player = self.run("Create player", |conn| {
            Ok(players::insert_player(
                conn,
                name,
                self.config.rating.starting_rating,
                Utc::now().naive_utc(),
            )?)
        })?;

        info!("Created player {} ({})", player.id, player.name);
        Ok(player)
    }

    pub fn rename_player(&self, player_id: PlayerId, new_name: &str) -> Result<(), LadderError> {
        let name = validate_name(new_name)?;
        self.run("Rename player", |conn| {
            if players::update_name(conn, player_id, name)? {
                Ok(())
            } else {
                Err(LadderError::player_not_found(player_id))
            }
        })?;

        info!("Renamed player {} to {}", player_id, name);
        Ok(())
    }

    pub fn record_match(&self, request: &MatchRequest) -> Result<MatchOutcome, LadderError> {
        self.run("Record match", |conn| self.recorder.record(conn, request))
    }

    pub fn list_matches(&self) -> Result<Vec<Match>, LadderError> {
        let conn = self.connection()?;
        Ok(matches::list_all(&conn)?)
    }

    pub fn get_match(&self, match_id: MatchId) -> Result<MatchDetail, LadderError> {
        let conn = self.connection()?;
        let game = matches::find_by_id(&conn, match_id)?
            .ok_or_else(|| LadderError::match_not_found(match_id))?;
        let changes = ledger::list_by_match(&conn, match_id)?
            .iter()
            .map(Into::into)
            .collect();
        Ok(MatchDetail { game, changes })
    }

    /// A player's ledger, most recent first.
    pub fn rating_history(&self, player_id: PlayerId) -> Result<Vec<LedgerEntry>, LadderError> {
        let conn = self.connection()?;
        if players::find_by_id(&conn, player_id)?.is_none() {
            return Err(LadderError::player_not_found(player_id));
        }
        Ok(ledger::list_by_player(&conn, player_id)?)
    }

    pub fn player_progress(&self, player_id: PlayerId) -> Result<Vec<ProgressPoint>, LadderError> {
        let history = self.rating_history(player_id)?;
        Ok(build_progress(&history))
    }

    pub fn delete_match(&self, match_id: MatchId) -> Result<(), LadderError> {
        self.run("Delete match", |conn| self.retractor.retract(conn, match_id))?;
        Ok(())
    }

    pub fn delete_player(&self, player_id: PlayerId) -> Result<(), LadderError> {
        self.run("Delete player", |conn| self.remover.remove(conn, player_id))?;
        Ok(())
    }

    /// Rebuilds every player's snapshot from the ledger and returns the ids
    /// whose cached values had drifted.
    pub fn reconcile(&self) -> Result<Vec<PlayerId>, LadderError> {
        let starting_rating = self.config.rating.starting_rating;
        let corrected = self.run("Reconcile", |conn| {
            let tx = database::begin_write(conn)?;
            let mut corrected = Vec::new();
            for player in players::list_by_rating(&tx)? {
                let before: AggregateSnapshot = player.snapshot();
                let after = recompute_player(&tx, player.id, starting_rating)?;
                if before != after {
                    warn!(
                        "Player {} snapshot drifted from its ledger: {:?} -> {:?}",
                        player.id, before, after
                    );
                    corrected.push(player.id);
                }
            }
            tx.commit()?;
            Ok(corrected)
        })?;

        info!("Reconciled ratings, {} players corrected", corrected.len());
        Ok(corrected)
    }
}

fn validate_name(name: &str) -> Result<&str, LadderError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LadderError::Validation(
            "Player name must not be empty".to_string(),
        ));
    }
    Ok(name)
}
