//! Per-request orchestration: normalize, gate on store health, dispatch,
//! wrap.

use crate::envelope::{self, CanonicalRequest};
use crate::metrics_defs::{REQUEST_DURATION, REQUESTS_TOTAL};
use crate::response::{self, ApiResponse};
use crate::router;
use serde_json::Value;
use std::time::Instant;
use store::ranking::StoreProvider;

/// Process one inbound envelope end to end.
///
/// The store handle is acquired (and its liveness verified) before any
/// routing happens; an unreachable store turns every request, preflight
/// included, into a 500.
pub async fn handle_event(event: &Value, provider: &dyn StoreProvider) -> ApiResponse {
    let started = Instant::now();
    let request = envelope::normalize(event);
    tracing::info!(method = %request.method, path = %request.path, "handling request");

    let response = match provider.acquire().await {
        Ok(mut store) => {
            let outcome = router::dispatch(&request, store.as_mut()).await;
            response::from_outcome(outcome)
        }
        Err(err) => {
            tracing::error!(error = %err, "store unavailable");
            response::store_unavailable(&err)
        }
    };

    record(&request, &response, started);
    response
}

fn record(request: &CanonicalRequest, response: &ApiResponse, started: Instant) {
    metrics::counter!(
        REQUESTS_TOTAL.name,
        "method" => request.method.to_string(),
        "status" => response.status_code.to_string(),
    )
    .increment(1);
    metrics::histogram!(REQUEST_DURATION.name).record(started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::testutils::{FailingProvider, MemoryBoard, MemoryProvider, UnavailableProvider};

    fn post_score(player: &str, score: i64) -> Value {
        json!({
            "httpMethod": "POST",
            "path": "/score",
            "body": json!({"player": player, "score": score}).to_string(),
        })
    }

    fn get(path: &str) -> Value {
        json!({"httpMethod": "GET", "path": path})
    }

    fn body_json(response: &ApiResponse) -> Value {
        serde_json::from_str(&response.body).unwrap()
    }

    #[tokio::test]
    async fn test_submit_and_rank_scenario() {
        let provider = MemoryProvider::new(MemoryBoard::new());

        for (player, score) in [("alice", 50), ("bob", 75), ("carol", 60)] {
            let response = handle_event(&post_score(player, score), &provider).await;
            assert_eq!(response.status_code, 200, "{player}");
        }

        let response = handle_event(&get("/leaderboard"), &provider).await;
        assert_eq!(response.status_code, 200);
        let body = body_json(&response);
        assert_eq!(
            body["leaderboard"],
            json!([
                {"player": "bob", "score": 75},
                {"player": "carol", "score": 60},
                {"player": "alice", "score": 50},
            ])
        );
    }

    #[tokio::test]
    async fn test_upsert_is_idempotent() {
        let board = MemoryBoard::new();
        let provider = MemoryProvider::new(board.clone());

        handle_event(&post_score("alice", 50), &provider).await;
        let first = body_json(&handle_event(&get("/leaderboard"), &provider).await);

        handle_event(&post_score("alice", 50), &provider).await;
        let second = body_json(&handle_event(&get("/leaderboard"), &provider).await);

        assert_eq!(board.len(), 1);
        assert_eq!(first["leaderboard"], second["leaderboard"]);
    }

    #[tokio::test]
    async fn test_unreachable_store_fails_every_path() {
        let provider = UnavailableProvider;

        for event in [
            get("/health"),
            get("/leaderboard"),
            post_score("alice", 1),
            json!({"httpMethod": "OPTIONS", "path": "/score"}),
            json!({"unrecognized": true}),
        ] {
            let response = handle_event(&event, &provider).await;
            assert_eq!(response.status_code, 500, "{event}");
            let body = body_json(&response);
            let error = body["error"].as_str().unwrap();
            assert!(error.contains("Connection failed"), "{error}");
        }
    }

    #[tokio::test]
    async fn test_operation_failures_stay_scoped() {
        let provider = FailingProvider;

        // health echo never touches the data operations
        let response = handle_event(&get("/health"), &provider).await;
        assert_eq!(response.status_code, 200);

        let response = handle_event(&get("/leaderboard"), &provider).await;
        assert_eq!(response.status_code, 500);

        let response = handle_event(&post_score("alice", 1), &provider).await;
        assert_eq!(response.status_code, 400);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let provider = MemoryProvider::new(MemoryBoard::new());

        let response = handle_event(&get("/unknown"), &provider).await;
        assert_eq!(response.status_code, 404);
        assert_eq!(body_json(&response), json!({"error": "Endpoint not found"}));
    }

    #[tokio::test]
    async fn test_unrecognized_envelope_answers_as_health() {
        let provider = MemoryProvider::new(MemoryBoard::new());

        let response = handle_event(&json!({"Records": []}), &provider).await;
        assert_eq!(response.status_code, 200);
        let body = body_json(&response);
        assert_eq!(body["ping"], "PONG");
        assert_eq!(body["path"], "/health");
    }
}
