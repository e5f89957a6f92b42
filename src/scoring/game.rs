use serde::{Deserialize, Serialize};

use crate::models::{PlayerId, SetScore, Side};

use super::{validate_set, MatchRejection};

/// Sets needed to win a match.
pub const SETS_TO_WIN: u8 = 2;

/// Sets won by each side of an accepted match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SetTally {
    pub player1_sets: u8,
    pub player2_sets: u8,
}

impl SetTally {
    fn record(&mut self, side: Side) {
        match side {
            Side::Player1 => self.player1_sets += 1,
            Side::Player2 => self.player2_sets += 1,
        }
    }

    /// Side that reached two sets, if exactly one did.
    pub fn winner(&self) -> Option<Side> {
        match (self.player1_sets == SETS_TO_WIN, self.player2_sets == SETS_TO_WIN) {
            (true, false) => Some(Side::Player1),
            (false, true) => Some(Side::Player2),
            _ => None,
        }
    }
}

/// Check that an ordered list of sets is a completed best-of-three match.
pub fn validate_match(sets: &[SetScore]) -> Result<SetTally, MatchRejection> {
    if !(2..=3).contains(&sets.len()) {
        return Err(MatchRejection::InvalidSetCount { count: sets.len() });
    }

    let mut winners = Vec::with_capacity(sets.len());
    for (set_index, score) in sets.iter().enumerate() {
        let side = validate_set(score.player1_score, score.player2_score).map_err(|rule| {
            MatchRejection::InvalidSetScore {
                set_index,
                score: *score,
                rule,
            }
        })?;
        winners.push(side);
    }

    // A decider is only played at one set all.
    if winners.len() == 3 && winners[0] == winners[1] {
        return Err(MatchRejection::InconsistentThirdSet);
    }

    let mut tally = SetTally::default();
    for side in winners {
        tally.record(side);
    }

    if tally.winner().is_none() {
        return Err(MatchRejection::NoDecisiveWinner {
            player1_sets: tally.player1_sets,
            player2_sets: tally.player2_sets,
        });
    }

    Ok(tally)
}

/// A player cannot be their own opponent.
pub fn validate_participants(player1: PlayerId, player2: PlayerId) -> Result<(), MatchRejection> {
    if player1 == player2 {
        return Err(MatchRejection::SelfPlay { player_id: player1 });
    }
    Ok(())
}

/// Full check run before a match is recorded or amended.
pub fn validate_submission(
    player1: PlayerId,
    player2: PlayerId,
    sets: &[SetScore],
) -> Result<SetTally, MatchRejection> {
    validate_participants(player1, player2)?;
    validate_match(sets)
}
