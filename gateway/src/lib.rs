pub mod config;
pub mod envelope;
pub mod errors;
pub mod handler;
pub mod metrics_defs;
pub mod response;
pub mod router;
pub mod service;

use crate::config::Listener;
use crate::errors::ServiceError;
use crate::service::GatewayService;
use std::sync::Arc;
use store::ranking::StoreProvider;

/// Serve the leaderboard API on `listener`, acquiring one store handle per
/// request from `provider`.
pub async fn run(listener: &Listener, provider: Arc<dyn StoreProvider>) -> Result<(), ServiceError> {
    let service = GatewayService::new(provider);
    shared::http::serve(&listener.host, listener.port, service).await
}
