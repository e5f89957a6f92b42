//! Player model — a registered league member.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A registered league member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier
    pub id: PlayerId,

    /// Display name shown in rankings
    pub nickname: String,

    /// Federation licence number (digits only)
    #[serde(default)]
    pub license_number: Option<String>,

    /// Current singles ranking score from the federation, if known
    #[serde(default)]
    pub single_ranking_points: Option<u32>,

    /// When this player registered
    pub created_at: DateTime<Utc>,
}

impl Player {
    /// Create a new Player with no licence or external ranking.
    pub fn new(id: PlayerId, nickname: impl Into<String>) -> Self {
        Self {
            id,
            nickname: nickname.into(),
            license_number: None,
            single_ranking_points: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_license(mut self, license_number: impl Into<String>) -> Self {
        self.license_number = Some(license_number.into());
        self
    }

    pub fn with_single_ranking_points(mut self, points: u32) -> Self {
        self.single_ranking_points = Some(points);
        self
    }
}
