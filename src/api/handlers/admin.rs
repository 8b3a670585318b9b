use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::ReconcileResponse;
use crate::errors::LadderError;
use super::{with_ladder, AppState};

/// Rebuilds every cached rating from the ledger. The repair path after a
/// failed write left snapshots and ledger out of step.
pub async fn reconcile(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, LadderError> {
    log::info!("Admin triggered reconcile");
    let corrected_player_ids = with_ladder(&state, |ladder| ladder.reconcile()).await?;
    Ok(Json(ReconcileResponse {
        corrected_player_ids,
    }))
}
