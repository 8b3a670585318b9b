use rusqlite::ErrorCode;
use thiserror::Error;

use crate::rating::{MatchId, PlayerId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Persistence,
}

#[derive(Debug, Error)]
pub enum LadderError {
    /// Rejected before any write. Covers invalid match requests as well as
    /// empty player names.
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// The operation did not take effect and may be retried.
    #[error("Concurrency conflict: {0}")]
    ConcurrencyConflict(String),

    #[error("Persistence error: {0:#}")]
    Persistence(anyhow::Error),
}

impl LadderError {
    pub fn player_not_found(id: PlayerId) -> Self {
        LadderError::NotFound {
            entity: "Player",
            id,
        }
    }

    pub fn match_not_found(id: MatchId) -> Self {
        LadderError::NotFound { entity: "Match", id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LadderError::Validation(_) => ErrorKind::Validation,
            LadderError::NotFound { .. } => ErrorKind::NotFound,
            LadderError::ConcurrencyConflict(_) => ErrorKind::Conflict,
            LadderError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

impl From<anyhow::Error> for LadderError {
    fn from(err: anyhow::Error) -> Self {
        if is_lock_timeout(&err) {
            LadderError::ConcurrencyConflict(format!("{:#}", err))
        } else {
            LadderError::Persistence(err)
        }
    }
}

impl From<rusqlite::Error> for LadderError {
    fn from(err: rusqlite::Error) -> Self {
        anyhow::Error::from(err).into()
    }
}

fn is_lock_timeout(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|cause| cause.downcast_ref::<rusqlite::Error>())
        .any(|cause| {
            matches!(
                cause.sqlite_error_code(),
                Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
            )
        })
}
