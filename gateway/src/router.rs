//! The (method, path) dispatch table.
//!
//! Store failures are scoped to the operation that hit them: a failed read
//! surfaces as a 500-class error, a failed write as a 400-class error, and
//! neither escapes past this module.

use crate::envelope::CanonicalRequest;
use crate::errors::GatewayError;
use crate::response::timestamp;
use http::{Method, StatusCode};
use serde_json::{Value, json};
use store::ranking::{LeaderboardStore, TOP_N};

/// What a dispatched request produced.
#[derive(Debug, PartialEq)]
pub enum Routed {
    /// CORS preflight; the response module short-circuits it.
    Preflight,
    Reply { status: StatusCode, body: Value },
}

/// Dispatch a canonical request against a live store handle.
pub async fn dispatch(
    request: &CanonicalRequest,
    store: &mut dyn LeaderboardStore,
) -> Result<Routed, GatewayError> {
    if request.method == Method::OPTIONS {
        return Ok(Routed::Preflight);
    }

    let path = request.path.as_str();

    if request.method == Method::GET && (path == "/" || path == "/health") {
        return Ok(Routed::Reply {
            status: StatusCode::OK,
            body: json!({
                "success": true,
                "ping": "PONG",
                "timestamp": timestamp(),
                "method": request.method.as_str(),
                "path": request.path.as_str(),
            }),
        });
    }

    if request.method == Method::GET && path == "/leaderboard" {
        return top_scores(store).await;
    }

    if request.method == Method::GET
        && let Some(player) = path.strip_prefix("/rank/")
        && !player.is_empty()
    {
        return rank(store, player).await;
    }

    if request.method == Method::POST && path == "/score" {
        return upsert(store, &request.body).await;
    }

    tracing::debug!(method = %request.method, path = %request.path, "no route matched");
    Err(GatewayError::NotFound)
}

/// Top-10 query: ranks 0-9, score descending, scores truncated to whole
/// numbers for display.
async fn top_scores(store: &mut dyn LeaderboardStore) -> Result<Routed, GatewayError> {
    let entries = store
        .top_scores(TOP_N)
        .await
        .map_err(|e| GatewayError::ReadFailed(format!("Failed to get leaderboard: {e}")))?;

    Ok(Routed::Reply {
        status: StatusCode::OK,
        body: json!({
            "leaderboard": entries,
            "timestamp": timestamp(),
        }),
    })
}

async fn rank(store: &mut dyn LeaderboardStore, player: &str) -> Result<Routed, GatewayError> {
    let info = store
        .rank_of(player)
        .await
        .map_err(|e| GatewayError::ReadFailed(format!("Failed to get rank for {player}: {e}")))?;

    Ok(Routed::Reply {
        status: StatusCode::OK,
        body: json!({
            "player": info.player,
            "rank": info.rank,
            "score": info.score,
            "totalPlayers": info.total_players,
            "timestamp": timestamp(),
        }),
    })
}

/// Upsert: last write wins, replays are idempotent. The score's presence
/// is checked, not its truthiness, so a score of 0 is valid.
async fn upsert(store: &mut dyn LeaderboardStore, body: &str) -> Result<Routed, GatewayError> {
    let fields: Value = if body.is_empty() {
        Value::Object(Default::default())
    } else {
        serde_json::from_str(body).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?
    };

    let player = fields
        .get("player")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let score = fields.get("score").filter(|v| !v.is_null());

    let Some(score) = score else {
        return Err(GatewayError::MissingFields);
    };
    if player.is_empty() {
        return Err(GatewayError::MissingFields);
    }
    let Some(value) = score.as_f64() else {
        return Err(GatewayError::InvalidRequest(
            "score must be a number".to_string(),
        ));
    };

    store
        .upsert_score(player, value)
        .await
        .map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;

    tracing::info!(player, score = value, "score upserted");
    Ok(Routed::Reply {
        status: StatusCode::OK,
        body: json!({
            "success": true,
            "message": format!("Score updated for {player}: {score}"),
            "timestamp": timestamp(),
        }),
    })
}
