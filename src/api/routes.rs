use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use crate::api::handlers::{
    admin::reconcile,
    matches::{delete_match, get_match, list_matches, record_match},
    players::{
        create_player, delete_player, get_player, get_player_progress, get_rating_history,
        list_players, rename_player,
    },
    AppState,
};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/players", get(list_players).post(create_player))
        .route(
            "/api/players/:id",
            get(get_player).patch(rename_player).delete(delete_player),
        )
        .route("/api/players/:id/history", get(get_rating_history))
        .route("/api/players/:id/progress", get(get_player_progress))
        .route("/api/matches", get(list_matches).post(record_match))
        .route("/api/matches/:id", get(get_match).delete(delete_match))
        .route("/api/admin/reconcile", post(reconcile))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::services::LadderService;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let ladder = LadderService::in_memory(AppConfig::default()).unwrap();
        create_router(Arc::new(AppState { ladder }))
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(body) => request.body(Body::from(body.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create_four(app: &Router) -> Vec<i64> {
        let mut ids = Vec::new();
        for name in ["A1", "A2", "B1", "B2"] {
            let (status, body) = send(app, "POST", "/api/players", Some(json!({ "name": name }))).await;
            assert_eq!(status, StatusCode::CREATED);
            ids.push(body["id"].as_i64().unwrap());
        }
        ids
    }

    fn match_body(p: &[i64], winner: &str) -> Value {
        json!({
            "teamAPlayer1Id": p[0],
            "teamAPlayer2Id": p[1],
            "teamBPlayer1Id": p[2],
            "teamBPlayer2Id": p[3],
            "winningTeam": winner,
        })
    }

    #[tokio::test]
    async fn test_record_and_list() {
        let app = app();
        let p = create_four(&app).await;

        let (status, body) = send(&app, "POST", "/api/matches", Some(match_body(&p, "A"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        assert_eq!(body["deltas"], json!([16, 16, -16, -16]));
        assert_eq!(body["ratingChanges"][2]["ratingAfter"], json!(1484));

        let (_, players) = send(&app, "GET", "/api/players", None).await;
        let ratings: Vec<_> = players
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["rating"].as_i64().unwrap())
            .collect();
        assert_eq!(ratings, vec![1516, 1516, 1484, 1484]);
        assert_eq!(players[0]["winRate"], json!(100.0));

        let (_, matches) = send(&app, "GET", "/api/matches", None).await;
        assert_eq!(matches.as_array().unwrap().len(), 1);
        assert_eq!(matches[0]["winningTeam"], json!("A"));
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_requests() {
        let app = app();
        let p = create_four(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/matches",
            Some(json!({ "teamAPlayer1Id": p[0], "winningTeam": "A" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], json!("Missing player IDs"));

        let (status, _) = send(&app, "POST", "/api/matches", Some(match_body(&p, "draw"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let duplicate = [p[0], p[1], p[1], p[3]];
        let (status, _) = send(&app, "POST", "/api/matches", Some(match_body(&duplicate, "B"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let unknown = [p[0], p[1], p[2], 999];
        let (status, _) = send(&app, "POST", "/api/matches", Some(match_body(&unknown, "B"))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, "POST", "/api/players", Some(json!({ "name": " " }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, matches) = send(&app, "GET", "/api/matches", None).await;
        assert!(matches.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_requests_get_json_errors() {
        let app = app();

        let (status, body) = send(&app, "GET", "/api/players/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, body) = send(&app, "DELETE", "/api/matches/1.5", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let request = Request::builder()
            .method("POST")
            .uri("/api/matches")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());

        let (status, body) = send(&app, "POST", "/api/players", Some(json!({ "name": 42 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (_, players) = send(&app, "GET", "/api/players", None).await;
        assert!(players.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_match_and_not_found() {
        let app = app();
        let p = create_four(&app).await;
        let (_, recorded) = send(&app, "POST", "/api/matches", Some(match_body(&p, "B"))).await;
        let match_id = recorded["matchId"].as_i64().unwrap();

        let (status, detail) = send(&app, "GET", &format!("/api/matches/{}", match_id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(detail["changes"].as_array().unwrap().len(), 4);

        let uri = format!("/api/matches/{}", match_id);
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));

        let (_, player) = send(&app, "GET", &format!("/api/players/{}", p[2]), None).await;
        assert_eq!(player["rating"], json!(1500));
        assert_eq!(player["matchesPlayed"], json!(0));
    }

    #[tokio::test]
    async fn test_player_lifecycle() {
        let app = app();
        let p = create_four(&app).await;
        send(&app, "POST", "/api/matches", Some(match_body(&p, "A"))).await;

        let uri = format!("/api/players/{}", p[0]);
        let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "name": "Ada" }))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, history) = send(&app, "GET", &format!("{}/history", uri), None).await;
        assert_eq!(history[0]["ratingChange"], json!(16));

        let (_, progress) = send(&app, "GET", &format!("{}/progress", uri), None).await;
        assert_eq!(progress[0]["cumulativeWins"], json!(1));

        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, matches) = send(&app, "GET", "/api/matches", None).await;
        assert!(matches.as_array().unwrap().is_empty());

        let (status, body) = send(&app, "POST", "/api/admin/reconcile", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["correctedPlayerIds"], json!([]));
    }
}
