//! Inbound event normalization.
//!
//! The front door may deliver a request as one of several envelope shapes:
//! a direct invocation carrying `httpMethod`/`path`/`body` at the top
//! level, or an HTTP gateway / function-URL v2 event nesting method and
//! path under `requestContext.http`. This module probes the envelope
//! structurally and produces the one canonical shape the rest of the
//! pipeline operates on. Unrecognized envelopes become a harmless health
//! probe rather than an error, so out-of-band invocations still get a
//! deterministic response.

use http::Method;
use serde_json::Value;

/// The normalized request every downstream component consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRequest {
    pub method: Method,
    pub path: String,
    pub body: String,
}

/// Normalize an inbound envelope into a [`CanonicalRequest`].
///
/// Pure function of the envelope; never fails.
pub fn normalize(event: &Value) -> CanonicalRequest {
    // Direct invocation: everything at the top level.
    if event.get("httpMethod").is_some() {
        return CanonicalRequest {
            method: parse_method(event.get("httpMethod")),
            path: parse_path(event.get("path")),
            body: parse_body(event.get("body")),
        };
    }

    // HTTP gateway v2 and function-URL v2 events nest method and path
    // under the request context; the body stays at the top level.
    if let Some(http) = event.pointer("/requestContext/http") {
        return CanonicalRequest {
            method: parse_method(http.get("method")),
            path: parse_path(http.get("path")),
            body: parse_body(event.get("body")),
        };
    }

    tracing::debug!("unrecognized envelope shape, treating as health probe");
    CanonicalRequest {
        method: Method::GET,
        path: "/health".to_string(),
        body: "{}".to_string(),
    }
}

fn parse_method(value: Option<&Value>) -> Method {
    value
        .and_then(Value::as_str)
        .and_then(|m| Method::from_bytes(m.as_bytes()).ok())
        .unwrap_or(Method::GET)
}

fn parse_path(value: Option<&Value>) -> String {
    match value.and_then(Value::as_str) {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => "/".to_string(),
    }
}

fn parse_body(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(body)) => body.clone(),
        // Some invokers pass the body as a JSON object instead of a string.
        Some(body) if !body.is_null() => body.to_string(),
        _ => "{}".to_string(),
    }
}
