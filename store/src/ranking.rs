use crate::errors::StoreError;
use async_trait::async_trait;
use serde::Serialize;

/// Name of the ordered set holding all player scores.
pub const LEADERBOARD_KEY: &str = "leaderboard";

/// Maximum number of entries a top query returns.
pub const TOP_N: isize = 10;

/// One leaderboard row. Scores live in the store as sorted-set floats and
/// are truncated to whole numbers on the way out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreEntry {
    pub player: String,
    pub score: i64,
}

/// Rank lookup result for a single player.
#[derive(Debug, Clone, PartialEq)]
pub struct RankInfo {
    pub player: String,
    /// 1-based position, `None` when the player has never scored.
    pub rank: Option<u64>,
    pub score: i64,
    pub total_players: u64,
}

/// Operations the router needs from the ranking store.
///
/// Implementations hold a live connection. Methods take `&mut self`: a
/// request drives its own handle strictly sequentially.
#[async_trait]
pub trait LeaderboardStore: Send {
    /// Liveness probe. Runs once per request before any other operation.
    async fn ping(&mut self) -> Result<(), StoreError>;

    /// Insert-or-update `player`'s score. Last write wins.
    async fn upsert_score(&mut self, player: &str, score: f64) -> Result<(), StoreError>;

    /// Highest `limit` entries, score descending.
    async fn top_scores(&mut self, limit: isize) -> Result<Vec<ScoreEntry>, StoreError>;

    /// Rank, score and member count for one player.
    async fn rank_of(&mut self, player: &str) -> Result<RankInfo, StoreError>;
}

/// Acquires a fresh store handle for one request.
///
/// The indirection keeps connection establishment out of the router, so a
/// pooled provider can be swapped in later without touching dispatch
/// logic.
#[async_trait]
pub trait StoreProvider: Send + Sync {
    async fn acquire(&self) -> Result<Box<dyn LeaderboardStore>, StoreError>;
}
