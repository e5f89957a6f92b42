//! Filesystem storage for the league.
//!
//! Players and matches live in JSON Lines files under the data directory:
//! - `players.jsonl`
//! - `matches.jsonl`

mod jsonl;
mod league;

pub use jsonl::*;
pub use league::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn entity_path(&self, entity: EntityType) -> PathBuf {
        self.data_dir.join(entity.filename())
    }

    pub fn players_path(&self) -> PathBuf {
        self.entity_path(EntityType::Player)
    }

    pub fn matches_path(&self) -> PathBuf {
        self.entity_path(EntityType::Match)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
