//! # Badminton League
//!
//! Scoring and ranking engine of a monthly amateur badminton league.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, matches, sets, standings)
//! - **scoring**: Set and match score validation
//! - **calculate**: General ranking and monthly jerseys
//! - **storage**: JSONL player directory and match store
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod scoring;
pub mod storage;

pub use models::*;

use anyhow::{anyhow, Context};

/// Parse a set score written as `21-15` (or `21:15`).
pub fn parse_set_score(s: &str) -> anyhow::Result<SetScore> {
    let (a, b) = s
        .trim()
        .split_once(['-', ':'])
        .ok_or_else(|| anyhow!("Set score '{}' must look like 21-15", s))?;
    let player1_score = a
        .trim()
        .parse()
        .with_context(|| format!("Invalid score '{}' in set '{}'", a, s))?;
    let player2_score = b
        .trim()
        .parse()
        .with_context(|| format!("Invalid score '{}' in set '{}'", b, s))?;
    Ok(SetScore::new(player1_score, player2_score))
}
