//! Match model — a best-of-three contest between two players.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{MatchId, PlayerId};
use crate::scoring::{validate_submission, MatchRejection};

/// One side of a match. Side 1 is the player who reported the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}

/// Raw scores of a single set, attributed to side 1 and side 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub player1_score: u32,
    pub player2_score: u32,
}

impl SetScore {
    pub fn new(player1_score: u32, player2_score: u32) -> Self {
        Self {
            player1_score,
            player2_score,
        }
    }
}

impl std::fmt::Display for SetScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.player1_score, self.player2_score)
    }
}

/// A match as reported by a player, before validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSubmission {
    pub player1_id: PlayerId,
    pub player2_id: PlayerId,
    pub match_date: NaiveDate,
    pub sets: Vec<SetScore>,
}

/// A validated, recorded match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    /// Unique identifier
    pub id: MatchId,

    /// Player who reported the match (side 1)
    pub player1_id: PlayerId,

    /// Opponent (side 2)
    pub player2_id: PlayerId,

    /// Day the match was played
    pub match_date: NaiveDate,

    /// Set scores in playing order (2 or 3)
    pub sets: Vec<SetScore>,

    /// Sets won by side 1
    pub player1_sets: u8,

    /// Sets won by side 2
    pub player2_sets: u8,

    /// Month of `match_date` (1-12)
    pub month: u32,

    /// Year of `match_date`
    pub year: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Validate a submission and build the match record from it.
    pub fn new(id: MatchId, submission: MatchSubmission) -> Result<Self, MatchRejection> {
        let tally = validate_submission(
            submission.player1_id,
            submission.player2_id,
            &submission.sets,
        )?;
        let now = Utc::now();

        Ok(Self {
            id,
            player1_id: submission.player1_id,
            player2_id: submission.player2_id,
            month: submission.match_date.month(),
            year: submission.match_date.year(),
            match_date: submission.match_date,
            sets: submission.sets,
            player1_sets: tally.player1_sets,
            player2_sets: tally.player2_sets,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replace participants, date and scores. The record is left untouched
    /// when the submission is rejected.
    pub fn amend(&mut self, submission: MatchSubmission) -> Result<(), MatchRejection> {
        let tally = validate_submission(
            submission.player1_id,
            submission.player2_id,
            &submission.sets,
        )?;

        self.player1_id = submission.player1_id;
        self.player2_id = submission.player2_id;
        self.month = submission.match_date.month();
        self.year = submission.match_date.year();
        self.match_date = submission.match_date;
        self.sets = submission.sets;
        self.player1_sets = tally.player1_sets;
        self.player2_sets = tally.player2_sets;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Player holding the given side.
    pub fn player(&self, side: Side) -> PlayerId {
        match side {
            Side::Player1 => self.player1_id,
            Side::Player2 => self.player2_id,
        }
    }

    /// Side played by `player`, if they took part.
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        if self.player1_id == player {
            Some(Side::Player1)
        } else if self.player2_id == player {
            Some(Side::Player2)
        } else {
            None
        }
    }

    pub fn involves(&self, player: PlayerId) -> bool {
        self.side_of(player).is_some()
    }

    /// Player who won two sets.
    pub fn winner(&self) -> Option<PlayerId> {
        if self.player1_sets == 2 {
            Some(self.player1_id)
        } else if self.player2_sets == 2 {
            Some(self.player2_id)
        } else {
            None
        }
    }

    pub fn won_by(&self, player: PlayerId) -> bool {
        self.winner() == Some(player)
    }

    /// Opponent of the winner.
    pub fn loser(&self) -> Option<PlayerId> {
        let winner = self.winner()?;
        self.side_of(winner).map(|side| self.player(side.opposite()))
    }
}
