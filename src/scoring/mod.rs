//! Score validation.
//!
//! Pure checks run before a match is recorded or amended:
//! - a single set is a legal badminton outcome (21 points, deuce from 19-all, cap at 30)
//! - the set sequence is a completed best-of-three match
//! - the two participants are different players

pub mod game;
pub mod rejection;
pub mod set;

pub use game::{validate_match, validate_participants, validate_submission, SetTally};
pub use rejection::{MatchRejection, SetRule};
pub use set::validate_set;
