//! Core data models for the league.

mod calendar;
mod game;
mod ids;
mod player;
mod standings;

pub use calendar::*;
pub use game::*;
pub use ids::*;
pub use player::*;
pub use standings::*;
