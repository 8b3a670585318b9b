use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{LedgerEntryResponse, PlayerNameBody, PlayerResponse};
use crate::errors::LadderError;
use crate::rating::PlayerId;
use super::{with_ladder, AppState};

pub async fn list_players(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, LadderError> {
    let players: Vec<PlayerResponse> = with_ladder(&state, |ladder| ladder.list_players())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(players))
}

pub async fn create_player(
    State(state): State<Arc<AppState>>,
    body: Result<Json<PlayerNameBody>, JsonRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Json(body) = body?;
    let player = with_ladder(&state, move |ladder| ladder.create_player(&body.name)).await?;
    Ok((StatusCode::CREATED, Json(PlayerResponse::from(player))))
}

pub async fn get_player(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<PlayerId>, PathRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(player_id) = player_id?;
    let player = with_ladder(&state, move |ladder| ladder.get_player(player_id)).await?;
    Ok(Json(PlayerResponse::from(player)))
}

pub async fn rename_player(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<PlayerId>, PathRejection>,
    body: Result<Json<PlayerNameBody>, JsonRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(player_id) = player_id?;
    let Json(body) = body?;
    with_ladder(&state, move |ladder| ladder.rename_player(player_id, &body.name)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_player(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<PlayerId>, PathRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(player_id) = player_id?;
    with_ladder(&state, move |ladder| ladder.delete_player(player_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_rating_history(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<PlayerId>, PathRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(player_id) = player_id?;
    let history: Vec<LedgerEntryResponse> =
        with_ladder(&state, move |ladder| ladder.rating_history(player_id))
            .await?
            .into_iter()
            .map(Into::into)
            .collect();

    Ok(Json(history))
}

pub async fn get_player_progress(
    State(state): State<Arc<AppState>>,
    player_id: Result<Path<PlayerId>, PathRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(player_id) = player_id?;
    let progress = with_ladder(&state, move |ladder| ladder.player_progress(player_id)).await?;
    Ok(Json(progress))
}
