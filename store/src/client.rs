use crate::config::StoreConfig;
use crate::errors::StoreError;
use crate::metrics_defs::{STORE_CONNECT_FAILURES, STORE_OPERATIONS};
use crate::ranking::{LEADERBOARD_KEY, LeaderboardStore, RankInfo, ScoreEntry, StoreProvider};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, ConnectionAddr, ConnectionInfo, RedisConnectionInfo};
use std::time::Duration;

/// Connects to the ordered key-value store. One connection is acquired per
/// request; nothing is cached across requests.
#[derive(Clone)]
pub struct RedisConnector {
    config: StoreConfig,
}

impl RedisConnector {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Establish a TLS connection and verify liveness with a PING.
    ///
    /// Certificate and hostname verification are disabled: the managed
    /// store serves self-issued certificates.
    pub async fn connect(&self) -> Result<RedisStore, StoreError> {
        let client =
            redis::Client::open(connection_info(&self.config)).map_err(StoreError::unavailable)?;

        let conn = client
            .get_multiplexed_async_connection_with_timeouts(
                Duration::from_secs(self.config.operation_timeout_secs),
                Duration::from_secs(self.config.connect_timeout_secs),
            )
            .await
            .map_err(|e| {
                metrics::counter!(STORE_CONNECT_FAILURES.name).increment(1);
                tracing::error!(
                    host = %self.config.host,
                    port = self.config.port,
                    error = %e,
                    "could not connect to store"
                );
                StoreError::unavailable(e)
            })?;

        let mut store = RedisStore { conn };
        store.ping().await?;
        Ok(store)
    }
}

/// Connection descriptor: TCP+TLS with relaxed certificate checks,
/// default database.
fn connection_info(config: &StoreConfig) -> ConnectionInfo {
    ConnectionInfo {
        addr: ConnectionAddr::TcpTls {
            host: config.host.clone(),
            port: config.port,
            insecure: true,
            tls_params: None,
        },
        redis: RedisConnectionInfo::default(),
    }
}

#[async_trait]
impl StoreProvider for RedisConnector {
    async fn acquire(&self) -> Result<Box<dyn LeaderboardStore>, StoreError> {
        Ok(Box::new(self.connect().await?))
    }
}

/// A live connection to the store.
pub struct RedisStore {
    conn: MultiplexedConnection,
}

#[async_trait]
impl LeaderboardStore for RedisStore {
    async fn ping(&mut self) -> Result<(), StoreError> {
        let reply: String = redis::cmd("PING")
            .query_async(&mut self.conn)
            .await
            .map_err(StoreError::unavailable)?;
        if reply != "PONG" {
            return Err(StoreError::Unavailable(format!(
                "unexpected ping reply: {reply}"
            )));
        }
        Ok(())
    }

    async fn upsert_score(&mut self, player: &str, score: f64) -> Result<(), StoreError> {
        metrics::counter!(STORE_OPERATIONS.name, "op" => "zadd").increment(1);
        let _: () = self
            .conn
            .zadd(LEADERBOARD_KEY, player, score)
            .await
            .map_err(StoreError::operation)?;
        Ok(())
    }

    async fn top_scores(&mut self, limit: isize) -> Result<Vec<ScoreEntry>, StoreError> {
        metrics::counter!(STORE_OPERATIONS.name, "op" => "zrevrange").increment(1);
        let rows: Vec<(String, f64)> = self
            .conn
            .zrevrange_withscores(LEADERBOARD_KEY, 0, limit - 1)
            .await
            .map_err(StoreError::operation)?;

        Ok(rows
            .into_iter()
            .map(|(player, score)| ScoreEntry {
                player,
                score: score as i64,
            })
            .collect())
    }

    async fn rank_of(&mut self, player: &str) -> Result<RankInfo, StoreError> {
        metrics::counter!(STORE_OPERATIONS.name, "op" => "zrevrank").increment(1);
        let rank: Option<u64> = self
            .conn
            .zrevrank(LEADERBOARD_KEY, player)
            .await
            .map_err(StoreError::operation)?;
        let score: Option<f64> = self
            .conn
            .zscore(LEADERBOARD_KEY, player)
            .await
            .map_err(StoreError::operation)?;
        let total_players: u64 = self
            .conn
            .zcard(LEADERBOARD_KEY)
            .await
            .map_err(StoreError::operation)?;

        Ok(RankInfo {
            player: player.to_string(),
            // store ranks are 0-based
            rank: rank.map(|r| r + 1),
            score: score.map(|s| s as i64).unwrap_or(0),
            total_players,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_info_uses_relaxed_tls() {
        let config = StoreConfig {
            host: "cache.internal".to_string(),
            port: 6380,
            ..StoreConfig::default()
        };

        let info = connection_info(&config);
        match info.addr {
            ConnectionAddr::TcpTls {
                host,
                port,
                insecure,
                ..
            } => {
                assert_eq!(host, "cache.internal");
                assert_eq!(port, 6380);
                assert!(insecure);
            }
            other => panic!("expected a TLS address, got {other:?}"),
        }
    }
}
