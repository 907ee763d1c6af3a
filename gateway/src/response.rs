//! Transport response assembly: status codes, CORS headers, JSON bodies.

use crate::errors::GatewayError;
use crate::router::Routed;
use chrono::{SecondsFormat, Utc};
use http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};
use std::collections::HashMap;
use store::errors::StoreError;

const ALLOW_ORIGIN: (&str, &str) = ("Access-Control-Allow-Origin", "*");
const ALLOW_METHODS: (&str, &str) = ("Access-Control-Allow-Methods", "GET, POST, OPTIONS");
const ALLOW_HEADERS: (&str, &str) = ("Access-Control-Allow-Headers", "Content-Type");
const MAX_AGE: (&str, &str) = ("Access-Control-Max-Age", "86400");
const CONTENT_TYPE_JSON: (&str, &str) = ("Content-Type", "application/json");

/// The transport-neutral response envelope. Serializes to the
/// `{statusCode, headers, body}` shape the hosting front doors consume.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl ApiResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

/// UTC timestamp attached to JSON bodies, ISO-8601 with a Z suffix.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn headers_of(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

/// 200 with an empty body and preflight cache headers. The only response
/// without a content type.
pub fn preflight() -> ApiResponse {
    ApiResponse {
        status_code: StatusCode::OK.as_u16(),
        headers: headers_of(&[ALLOW_ORIGIN, ALLOW_METHODS, ALLOW_HEADERS, MAX_AGE]),
        body: String::new(),
    }
}

/// A JSON response carrying the full CORS header set, error responses
/// included, so browser clients can always read the body.
pub fn json_response(status: StatusCode, body: &Value) -> ApiResponse {
    ApiResponse {
        status_code: status.as_u16(),
        headers: headers_of(&[CONTENT_TYPE_JSON, ALLOW_ORIGIN, ALLOW_METHODS, ALLOW_HEADERS]),
        body: body.to_string(),
    }
}

/// 500 for a store that could not be reached or failed its health probe.
pub fn store_unavailable(err: &StoreError) -> ApiResponse {
    json_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &json!({
            "error": err.to_string(),
            "timestamp": timestamp(),
        }),
    )
}

/// Wrap a router outcome into the transport response.
pub fn from_outcome(outcome: Result<Routed, GatewayError>) -> ApiResponse {
    match outcome {
        Ok(Routed::Preflight) => preflight(),
        Ok(Routed::Reply { status, body }) => json_response(status, &body),
        Err(err) => from_error(&err),
    }
}

/// The 404 and validation bodies carry only the error field; read
/// failures also get a timestamp.
fn from_error(err: &GatewayError) -> ApiResponse {
    let (status, body) = match err {
        GatewayError::NotFound => (StatusCode::NOT_FOUND, json!({"error": err.to_string()})),
        GatewayError::MissingFields | GatewayError::InvalidRequest(_) => {
            (StatusCode::BAD_REQUEST, json!({"error": err.to_string()}))
        }
        GatewayError::ReadFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"error": err.to_string(), "timestamp": timestamp()}),
        ),
    };
    json_response(status, &body)
}
