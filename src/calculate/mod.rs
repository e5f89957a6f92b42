//! Ranking engine.
//!
//! Recomputes everything from the full match history on each call:
//! - General ranking (one point per win, season-wide)
//! - Reference ranking at the start of a month
//! - The four monthly jerseys: leader, upset, closing week and activity

mod jerseys;
mod ranking;

pub use jerseys::{
    activity_jersey, closing_jersey, leader_jersey, monthly_jerseys, monthly_standings,
    upset_jersey, MonthView,
};
pub use ranking::{general_ranking, general_ranking_before, reference_ranks, POINTS_PER_WIN};
