use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::database::models::{LedgerEntry, Match, Player};
use crate::domain::{MatchDetail, MatchOutcome, MatchRequest, RatingChange};
use crate::errors::LadderError;
use crate::rating::{MatchId, PlayerId, RatingValue, Team};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchBody {
    pub team_a_player1_id: Option<PlayerId>,
    pub team_a_player2_id: Option<PlayerId>,
    pub team_b_player1_id: Option<PlayerId>,
    pub team_b_player2_id: Option<PlayerId>,
    pub winning_team: Option<String>,
}

impl RecordMatchBody {
    pub fn into_request(self) -> Result<MatchRequest, LadderError> {
        MatchRequest::parse(
            [
                self.team_a_player1_id,
                self.team_a_player2_id,
                self.team_b_player1_id,
                self.team_b_player2_id,
            ],
            self.winning_team.as_deref(),
        )
    }
}

#[derive(Deserialize)]
pub struct PlayerNameBody {
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: PlayerId,
    pub name: String,
    pub rating: RatingValue,
    pub matches_played: i64,
    pub wins: i64,
    pub losses: i64,
    pub win_rate: f64,
    pub created_at: NaiveDateTime,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            win_rate: player.win_rate(),
            id: player.id,
            name: player.name,
            rating: player.rating,
            matches_played: player.matches_played,
            wins: player.wins,
            losses: player.losses,
            created_at: player.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResponse {
    pub id: MatchId,
    pub team_a_player1_id: PlayerId,
    pub team_a_player2_id: PlayerId,
    pub team_b_player1_id: PlayerId,
    pub team_b_player2_id: PlayerId,
    pub winning_team: Team,
    pub created_at: NaiveDateTime,
}

impl From<Match> for MatchResponse {
    fn from(game: Match) -> Self {
        Self {
            id: game.id,
            team_a_player1_id: game.team_a[0],
            team_a_player2_id: game.team_a[1],
            team_b_player1_id: game.team_b[0],
            team_b_player2_id: game.team_b[1],
            winning_team: game.winning_team,
            created_at: game.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchDetailResponse {
    #[serde(flatten)]
    pub game: MatchResponse,
    pub changes: Vec<RatingChange>,
}

impl From<MatchDetail> for MatchDetailResponse {
    fn from(detail: MatchDetail) -> Self {
        Self {
            game: detail.game.into(),
            changes: detail.changes,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMatchResponse {
    pub success: bool,
    pub match_id: MatchId,
    pub deltas: [RatingValue; 4],
    pub rating_changes: [RatingChange; 4],
}

impl From<MatchOutcome> for RecordMatchResponse {
    fn from(outcome: MatchOutcome) -> Self {
        Self {
            success: true,
            match_id: outcome.match_id,
            deltas: outcome.deltas(),
            rating_changes: outcome.changes,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResponse {
    pub id: i64,
    pub player_id: PlayerId,
    pub match_id: MatchId,
    pub rating_before: RatingValue,
    pub rating_after: RatingValue,
    pub rating_change: RatingValue,
    pub created_at: NaiveDateTime,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id,
            player_id: entry.player_id,
            match_id: entry.match_id,
            rating_before: entry.rating_before,
            rating_after: entry.rating_after,
            rating_change: entry.rating_change,
            created_at: entry.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconcileResponse {
    pub corrected_player_ids: Vec<PlayerId>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
