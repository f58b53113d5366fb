use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use lib::{decode_state, Agent, GameEvent, GameState, MoveDecision, StartResponse};
use tracing::{debug, error, info, instrument};

pub const ALIVE: &str = "Your Battlesnake is alive!";

pub type SharedAgent = Arc<dyn Agent>;

/// Builds the full route table. Called once at startup.
pub fn router(agent: SharedAgent) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/ping", post(ping))
        .route("/start", post(start))
        .route("/move", post(get_move))
        .route("/end", post(end))
        .with_state(agent)
}

/// Any failure while handling a request. Logged, then answered with a bare 500.
pub struct AppError(color_eyre::Report);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = ?self.0, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<color_eyre::Report>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

async fn index() -> &'static str {
    ALIVE
}

async fn ping() -> StatusCode {
    StatusCode::OK
}

#[instrument(skip_all)]
async fn start(body: Bytes) -> Json<StartResponse> {
    log_event("started", &body);
    Json(StartResponse::default())
}

#[instrument(skip_all)]
async fn get_move(
    State(agent): State<SharedAgent>,
    body: String,
) -> Result<Json<MoveDecision>, AppError> {
    let state: GameState = decode_state(body)?;
    let decision = agent.choose_move(&state)?;
    debug!(
        game_id = %state.game.id,
        turn = state.turn,
        agent = agent.name(),
        direction = %decision.direction,
        "Move chosen"
    );
    Ok(Json(decision))
}

#[instrument(skip_all)]
async fn end(body: Bytes) -> StatusCode {
    log_event("ended", &body);
    StatusCode::OK
}

/// `/start` and `/end` payloads are informational, a bad one is not an error.
fn log_event(what: &str, body: &Bytes) {
    match decode_state::<GameEvent>(String::from_utf8_lossy(body).into_owned()) {
        Ok(event) => info!(
            game_id = %event.game.id,
            turn = event.turn,
            snakes = event.snake_count(),
            "Game {what}"
        ),
        Err(err) => debug!(len = body.len(), error = %err, "Game {what} with undecodable payload"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use lib::GreedyAgent;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(method: &str, uri: &str, body: impl Into<Body>) -> (StatusCode, String) {
        let app = router(Arc::new(GreedyAgent::new()));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_index_reports_alive() {
        let (status, body) = send("GET", "/", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Your Battlesnake is alive!");
    }

    #[tokio::test]
    async fn test_ping_is_empty_ok() {
        let (status, body) = send("POST", "/ping", Body::empty()).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_start_is_constant() {
        let expected = r##"{"color":"#00FF00","headType":"regular","tailType":"regular"}"##;
        for payload in [
            r#"{"game":{"id":"abc"},"turn":0,"board":{"width":11,"height":11,"snakes":[{"body":[]}]}}"#,
            "",
            "definitely not json",
        ] {
            let (status, body) = send("POST", "/start", payload.to_string()).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, expected);
        }
    }

    #[tokio::test]
    async fn test_end_is_empty_ok_for_any_payload() {
        for payload in [r#"{"game":{"id":"abc"},"turn":120}"#, "", "[1,2,3]"] {
            let (status, body) = send("POST", "/end", payload.to_string()).await;
            assert_eq!(status, StatusCode::OK);
            assert!(body.is_empty());
        }
    }

    #[tokio::test]
    async fn test_move_heads_for_food() {
        let payload = json!({
            "game": {"id": "game-1"},
            "turn": 3,
            "board": {
                "width": 11,
                "height": 11,
                "food": [{"x": 5, "y": 8}],
                "snakes": [],
            },
            "you": {"id": "me", "body": [{"x": 5, "y": 5}]},
        });
        let (status, body) = send("POST", "/move", payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body, json!({"move": "up", "shout": "I am a python snake!"}));
    }

    #[tokio::test]
    async fn test_move_in_corner_without_food() {
        let payload = json!({
            "board": {"width": 11, "height": 11, "food": [], "snakes": []},
            "you": {"body": [{"x": 0, "y": 0}]},
        });
        let (status, body) = send("POST", "/move", payload.to_string()).await;
        assert_eq!(status, StatusCode::OK);
        let body: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["move"], "up");
    }

    #[tokio::test]
    async fn test_move_without_board_is_server_error() {
        let payload = json!({"you": {"body": [{"x": 0, "y": 0}]}});
        let (status, _) = send("POST", "/move", payload.to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_move_with_headless_snake_is_server_error() {
        let payload = json!({
            "board": {"width": 11, "height": 11},
            "you": {"body": []},
        });
        let (status, _) = send("POST", "/move", payload.to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, _) = send("POST", "/info", Body::empty()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
