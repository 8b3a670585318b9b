use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
};
use std::sync::Arc;

use crate::api::models::{MatchDetailResponse, MatchResponse, RecordMatchBody, RecordMatchResponse};
use crate::errors::LadderError;
use crate::rating::MatchId;
use super::{with_ladder, AppState};

pub async fn list_matches(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, LadderError> {
    let matches: Vec<MatchResponse> = with_ladder(&state, |ladder| ladder.list_matches())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(matches))
}

pub async fn record_match(
    State(state): State<Arc<AppState>>,
    body: Result<Json<RecordMatchBody>, JsonRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Json(body) = body?;
    let request = body.into_request()?;
    let outcome = with_ladder(&state, move |ladder| ladder.record_match(&request)).await?;
    Ok(Json(RecordMatchResponse::from(outcome)))
}

pub async fn get_match(
    State(state): State<Arc<AppState>>,
    match_id: Result<Path<MatchId>, PathRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(match_id) = match_id?;
    let detail = with_ladder(&state, move |ladder| ladder.get_match(match_id)).await?;
    Ok(Json(MatchDetailResponse::from(detail)))
}

pub async fn delete_match(
    State(state): State<Arc<AppState>>,
    match_id: Result<Path<MatchId>, PathRejection>,
) -> Result<impl IntoResponse, LadderError> {
    let Path(match_id) = match_id?;
    with_ladder(&state, move |ladder| ladder.delete_match(match_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
