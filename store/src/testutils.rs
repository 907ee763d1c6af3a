//! In-memory doubles for tests that need a store without a server.

use crate::errors::StoreError;
use crate::ranking::{LeaderboardStore, RankInfo, ScoreEntry, StoreProvider};
use async_trait::async_trait;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Scoreboard state shared by every [`MemoryStore`] handle created from it,
/// so state survives across simulated requests.
#[derive(Clone, Default)]
pub struct MemoryBoard {
    entries: Arc<Mutex<HashMap<String, f64>>>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh per-request handle onto this board.
    pub fn handle(&self) -> MemoryStore {
        MemoryStore {
            board: self.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn sorted(&self) -> Vec<(String, f64)> {
        let mut rows: Vec<(String, f64)> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .map(|(player, score)| (player.clone(), *score))
            .collect();
        // ZREVRANGE order: score descending, ties in reverse member order
        rows.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| b.0.cmp(&a.0))
        });
        rows
    }
}

/// One request's handle onto a [`MemoryBoard`].
pub struct MemoryStore {
    board: MemoryBoard,
}

#[async_trait]
impl LeaderboardStore for MemoryStore {
    async fn ping(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn upsert_score(&mut self, player: &str, score: f64) -> Result<(), StoreError> {
        self.board
            .entries
            .lock()
            .unwrap()
            .insert(player.to_string(), score);
        Ok(())
    }

    async fn top_scores(&mut self, limit: isize) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut rows = self.board.sorted();
        rows.truncate(limit.max(0) as usize);
        Ok(rows
            .into_iter()
            .map(|(player, score)| ScoreEntry {
                player,
                score: score as i64,
            })
            .collect())
    }

    async fn rank_of(&mut self, player: &str) -> Result<RankInfo, StoreError> {
        let rows = self.board.sorted();
        let rank = rows
            .iter()
            .position(|(name, _)| name == player)
            .map(|pos| pos as u64 + 1);
        let score = rows
            .iter()
            .find(|(name, _)| name == player)
            .map(|(_, score)| *score as i64)
            .unwrap_or(0);
        Ok(RankInfo {
            player: player.to_string(),
            rank,
            score,
            total_players: rows.len() as u64,
        })
    }
}

/// Provider handing out handles onto one shared board.
pub struct MemoryProvider {
    board: MemoryBoard,
}

impl MemoryProvider {
    pub fn new(board: MemoryBoard) -> Self {
        Self { board }
    }
}

#[async_trait]
impl StoreProvider for MemoryProvider {
    async fn acquire(&self) -> Result<Box<dyn LeaderboardStore>, StoreError> {
        Ok(Box::new(self.board.handle()))
    }
}

/// Store that connects fine but fails every data operation.
#[derive(Default)]
pub struct FailingStore;

#[async_trait]
impl LeaderboardStore for FailingStore {
    async fn ping(&mut self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn upsert_score(&mut self, _player: &str, _score: f64) -> Result<(), StoreError> {
        Err(StoreError::operation("simulated write failure"))
    }

    async fn top_scores(&mut self, _limit: isize) -> Result<Vec<ScoreEntry>, StoreError> {
        Err(StoreError::operation("simulated read failure"))
    }

    async fn rank_of(&mut self, _player: &str) -> Result<RankInfo, StoreError> {
        Err(StoreError::operation("simulated read failure"))
    }
}

/// Provider handing out [`FailingStore`] handles.
#[derive(Default)]
pub struct FailingProvider;

#[async_trait]
impl StoreProvider for FailingProvider {
    async fn acquire(&self) -> Result<Box<dyn LeaderboardStore>, StoreError> {
        Ok(Box::new(FailingStore))
    }
}

/// Provider whose store cannot be reached at all.
#[derive(Default)]
pub struct UnavailableProvider;

#[async_trait]
impl StoreProvider for UnavailableProvider {
    async fn acquire(&self) -> Result<Box<dyn LeaderboardStore>, StoreError> {
        Err(StoreError::unavailable("connection timed out (simulated)"))
    }
}
