use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use std::sync::Arc;

use crate::api::models::ErrorResponse;
use crate::errors::{ErrorKind, LadderError};
use crate::services::LadderService;

pub mod admin;
pub mod matches;
pub mod players;

pub struct AppState {
    pub ladder: LadderService,
}

/// Runs a ladder call on tokio's blocking pool. Store calls can sit on the
/// SQLite write lock for up to the busy timeout per attempt.
pub async fn with_ladder<T, F>(state: &Arc<AppState>, call: F) -> Result<T, LadderError>
where
    T: Send + 'static,
    F: FnOnce(&LadderService) -> Result<T, LadderError> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || call(&state.ladder))
        .await
        .map_err(|err| LadderError::Persistence(anyhow::anyhow!("Ladder task failed: {}", err)))?
}

impl From<JsonRejection> for LadderError {
    fn from(rejection: JsonRejection) -> Self {
        LadderError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for LadderError {
    fn from(rejection: PathRejection) -> Self {
        LadderError::Validation(rejection.body_text())
    }
}

impl IntoResponse for LadderError {
    fn into_response(self) -> Response {
        let status = match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Persistence => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
