//! Rejection reasons returned by the score validator.

use serde::Serialize;
use thiserror::Error;

use crate::models::{PlayerId, SetScore};

/// Rule a single set's scores violate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SetRule {
    #[error("a set cannot end in a tie")]
    Tie,

    #[error("the maximum score in a set is 30")]
    AboveCap,

    #[error("at 30 points the score must be 30-29 or 30-28")]
    ThirtyPointFinish,

    #[error("when both sides reach 19 points, a set won at 21 needs exactly 2 points of margin")]
    DeuceMargin,

    #[error("above 21 points a set needs exactly 2 points of margin after a 19-all deuce")]
    ExtendedMargin,

    #[error("a set is won with at least 21 points")]
    BelowWinningScore,
}

/// Why a reported match was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchRejection {
    #[error("set {number} ({score}): {rule}", number = .set_index + 1)]
    InvalidSetScore {
        set_index: usize,
        score: SetScore,
        rule: SetRule,
    },

    #[error("a match must have 2 or 3 sets, got {count}")]
    InvalidSetCount { count: usize },

    #[error("a match needs a winner with 2 sets (sets won: {player1_sets}-{player2_sets})")]
    NoDecisiveWinner { player1_sets: u8, player2_sets: u8 },

    #[error("a third set is only played when the first two sets are split 1-1")]
    InconsistentThirdSet,

    #[error("player {player_id} cannot play against themselves")]
    SelfPlay { player_id: PlayerId },
}

impl MatchRejection {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            MatchRejection::InvalidSetScore { .. } => "INVALID_SET_SCORE",
            MatchRejection::InvalidSetCount { .. } => "INVALID_SET_COUNT",
            MatchRejection::NoDecisiveWinner { .. } => "NO_DECISIVE_WINNER",
            MatchRejection::InconsistentThirdSet => "INCONSISTENT_THIRD_SET",
            MatchRejection::SelfPlay { .. } => "SELF_PLAY",
        }
    }

    /// Index of the offending set, when the rejection is about one set.
    pub fn set_index(&self) -> Option<usize> {
        match self {
            MatchRejection::InvalidSetScore { set_index, .. } => Some(*set_index),
            _ => None,
        }
    }
}
