use crate::models::Side;

use super::SetRule;

/// Points needed to win a set outright.
pub const WINNING_SCORE: u32 = 21;

/// Score from which both sides are in deuce.
pub const DEUCE_SCORE: u32 = 19;

/// Absolute cap: at 29-all the next point wins.
pub const MAX_SCORE: u32 = 30;

/// Check that two scores form a completed badminton set and return the side
/// that won it.
pub fn validate_set(player1_score: u32, player2_score: u32) -> Result<Side, SetRule> {
    if player1_score == player2_score {
        return Err(SetRule::Tie);
    }

    let max = player1_score.max(player2_score);
    let min = player1_score.min(player2_score);
    let diff = max - min;

    if max > MAX_SCORE {
        return Err(SetRule::AboveCap);
    }

    if max == MAX_SCORE {
        if !(28..=29).contains(&min) || !(1..=2).contains(&diff) {
            return Err(SetRule::ThirtyPointFinish);
        }
    } else if max == WINNING_SCORE {
        if min >= DEUCE_SCORE && diff != 2 {
            return Err(SetRule::DeuceMargin);
        }
    } else if max > WINNING_SCORE {
        // Past 21 the set can only have continued from a 19-all deuce.
        if diff != 2 || min < DEUCE_SCORE {
            return Err(SetRule::ExtendedMargin);
        }
    } else {
        return Err(SetRule::BelowWinningScore);
    }

    if player1_score > player2_score {
        Ok(Side::Player1)
    } else {
        Ok(Side::Player2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regular_wins_at_21() {
        assert_eq!(validate_set(21, 0), Ok(Side::Player1));
        assert_eq!(validate_set(21, 18), Ok(Side::Player1));
        assert_eq!(validate_set(10, 21), Ok(Side::Player2));
    }

    #[test]
    fn test_deuce_boundary_at_21() {
        assert_eq!(validate_set(21, 19), Ok(Side::Player1));
        assert_eq!(validate_set(19, 21), Ok(Side::Player2));
        assert_eq!(validate_set(21, 20), Err(SetRule::DeuceMargin));
        assert_eq!(validate_set(20, 21), Err(SetRule::DeuceMargin));
    }

    #[test]
    fn test_extended_deuce() {
        assert_eq!(validate_set(22, 20), Ok(Side::Player1));
        assert_eq!(validate_set(27, 29), Ok(Side::Player2));
        assert_eq!(validate_set(29, 27), Ok(Side::Player1));
        assert_eq!(validate_set(29, 26), Err(SetRule::ExtendedMargin));
        assert_eq!(validate_set(23, 20), Err(SetRule::ExtendedMargin));
        assert_eq!(validate_set(22, 10), Err(SetRule::ExtendedMargin));
        assert_eq!(validate_set(28, 29), Err(SetRule::ExtendedMargin));
    }

    #[test]
    fn test_thirty_point_cap() {
        assert_eq!(validate_set(30, 29), Ok(Side::Player1));
        assert_eq!(validate_set(30, 28), Ok(Side::Player1));
        assert_eq!(validate_set(28, 30), Ok(Side::Player2));
        assert_eq!(validate_set(30, 27), Err(SetRule::ThirtyPointFinish));
        assert_eq!(validate_set(30, 10), Err(SetRule::ThirtyPointFinish));
        assert_eq!(validate_set(31, 29), Err(SetRule::AboveCap));
        assert_eq!(validate_set(29, 31), Err(SetRule::AboveCap));
    }

    #[test]
    fn test_tie_and_short_sets() {
        assert_eq!(validate_set(21, 21), Err(SetRule::Tie));
        assert_eq!(validate_set(0, 0), Err(SetRule::Tie));
        assert_eq!(validate_set(30, 30), Err(SetRule::Tie));
        assert_eq!(validate_set(20, 18), Err(SetRule::BelowWinningScore));
        assert_eq!(validate_set(0, 15), Err(SetRule::BelowWinningScore));
    }

    #[test]
    fn test_accepts_exactly_the_legal_scores() {
        // Independent enumeration of every legal final score.
        let mut legal = Vec::new();
        for loser in 0..DEUCE_SCORE {
            legal.push((21, loser));
        }
        for winner in 21..=29 {
            legal.push((winner, winner - 2));
        }
        legal.push((30, 28));
        legal.push((30, 29));

        for a in 0..=35 {
            for b in 0..=35 {
                let expected = legal.contains(&(a, b)) || legal.contains(&(b, a));
                assert_eq!(
                    validate_set(a, b).is_ok(),
                    expected,
                    "unexpected verdict for {}-{}",
                    a,
                    b
                );
            }
        }
    }
}
