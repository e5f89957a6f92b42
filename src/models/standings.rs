//! Ranking and jersey output models.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// One row of the general ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_id: PlayerId,
    pub nickname: String,
    pub wins: u32,
    pub losses: u32,
    /// One point per win
    pub points: u32,
}

impl RankingEntry {
    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses
    }
}

/// Standing of a player at the start of a month.
///
/// `Placed(1)` is the best rank; players without earlier matches are
/// `Unranked`, which compares worse than any placed rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRank {
    Placed(u32),
    Unranked,
}

impl ReferenceRank {
    pub fn is_better_than(&self, other: &ReferenceRank) -> bool {
        self < other
    }
}

/// Winner of a monthly jersey and the metric that earned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JerseyAward {
    pub player_id: PlayerId,
    pub nickname: String,
    /// Points, upset count, closing-week wins or matches played depending on the jersey
    pub metric: u32,
}

/// The four monthly jerseys. A jersey is `None` when nobody scored in its category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyJerseys {
    /// Top of the general ranking
    pub leader: Option<JerseyAward>,
    /// Most wins against better-ranked opponents
    pub upset: Option<JerseyAward>,
    /// Most wins in the last seven days of the month
    pub closing: Option<JerseyAward>,
    /// Most matches played in the month
    pub activity: Option<JerseyAward>,
}

/// General ranking plus jerseys for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standings {
    pub month: u32,
    pub year: i32,
    pub general_ranking: Vec<RankingEntry>,
    pub jerseys: MonthlyJerseys,
}
