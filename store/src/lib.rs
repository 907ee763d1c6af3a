pub mod client;
pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod ranking;
pub mod testutils;

pub use client::{RedisConnector, RedisStore};
pub use config::StoreConfig;
pub use errors::StoreError;
pub use ranking::{LEADERBOARD_KEY, LeaderboardStore, RankInfo, ScoreEntry, StoreProvider, TOP_N};
