//! HTTP front door: adapts hyper requests to the envelope pipeline.
//!
//! Each HTTP request becomes a direct-invocation envelope (method, path,
//! collected body) and runs through the handler; the resulting
//! [`ApiResponse`] is written back out as status + headers + body. This is
//! the same adaptation the hosting environment performs when the service
//! runs behind a managed front door.

use crate::errors::ServiceError;
use crate::handler;
use crate::response::{self, ApiResponse};
use http_body_util::{BodyExt, Full, combinators::BoxBody};
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Request, Response, StatusCode};
use serde_json::json;
use std::pin::Pin;
use std::sync::Arc;
use store::ranking::StoreProvider;

#[derive(Clone)]
pub struct GatewayService {
    provider: Arc<dyn StoreProvider>,
}

impl GatewayService {
    pub fn new(provider: Arc<dyn StoreProvider>) -> Self {
        Self { provider }
    }
}

impl Service<Request<Incoming>> for GatewayService {
    type Response = Response<BoxBody<Bytes, ServiceError>>;
    type Error = ServiceError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let provider = self.provider.clone();
        Box::pin(async move { handle_http(req, provider.as_ref()).await })
    }
}

/// Convert one HTTP request into an envelope, run it, and convert the
/// result back.
pub async fn handle_http<B>(
    req: Request<B>,
    provider: &dyn StoreProvider,
) -> Result<Response<BoxBody<Bytes, ServiceError>>, ServiceError>
where
    B: hyper::body::Body,
    B::Error: std::fmt::Display,
{
    let (parts, body) = req.into_parts();
    let body = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to read request body");
            let api = response::json_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &json!({"error": "Internal server error"}),
            );
            return into_http(api);
        }
    };

    let event = json!({
        "httpMethod": parts.method.as_str(),
        "path": parts.uri.path(),
        "body": String::from_utf8_lossy(&body),
    });

    let api = handler::handle_event(&event, provider).await;
    into_http(api)
}

fn into_http(api: ApiResponse) -> Result<Response<BoxBody<Bytes, ServiceError>>, ServiceError> {
    let mut builder = Response::builder().status(api.status_code);
    for (name, value) in &api.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
        .body(Full::new(Bytes::from(api.body)).map_err(|e| match e {}).boxed())
        .map_err(|e| ServiceError::Internal(format!("failed to build response: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use store::testutils::{MemoryBoard, MemoryProvider};

    fn test_request(method: &str, path: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn body_json(response: Response<BoxBody<Bytes, ServiceError>>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_post_then_get_roundtrip() {
        let provider = MemoryProvider::new(MemoryBoard::new());

        let response = handle_http(
            test_request("POST", "/score", r#"{"player":"alice","score":50}"#),
            &provider,
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );

        let response = handle_http(test_request("GET", "/leaderboard", ""), &provider)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["leaderboard"][0]["player"], "alice");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let provider = MemoryProvider::new(MemoryBoard::new());

        let response = handle_http(test_request("GET", "/nope", ""), &provider)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Endpoint not found");
    }

    #[tokio::test]
    async fn test_preflight_over_http() {
        let provider = MemoryProvider::new(MemoryBoard::new());

        let response = handle_http(test_request("OPTIONS", "/score", ""), &provider)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("Access-Control-Max-Age").unwrap(),
            "86400"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }
}
