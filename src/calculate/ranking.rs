use std::collections::HashMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{Match, Player, PlayerId, RankingEntry, ReferenceRank};

/// Points awarded for a win. A loss scores nothing.
pub const POINTS_PER_WIN: u32 = 1;

#[derive(Debug, Default, Clone, Copy)]
struct Record {
    wins: u32,
    losses: u32,
}

/// Season-long standings over every match given.
///
/// Order: points desc, wins desc, losses asc, then player id asc so the
/// result is the same whatever order players are passed in.
pub fn general_ranking(players: &[Player], matches: &[Match]) -> Vec<RankingEntry> {
    general_ranking_of(players, matches.iter())
}

/// General ranking restricted to matches played strictly before `cutoff`.
pub fn general_ranking_before(
    players: &[Player],
    matches: &[Match],
    cutoff: NaiveDate,
) -> Vec<RankingEntry> {
    general_ranking_of(players, matches.iter().filter(|m| m.match_date < cutoff))
}

fn general_ranking_of<'a>(
    players: &[Player],
    matches: impl Iterator<Item = &'a Match>,
) -> Vec<RankingEntry> {
    let mut records: HashMap<PlayerId, Record> = HashMap::new();
    for m in matches {
        for player in [m.player1_id, m.player2_id] {
            let record = records.entry(player).or_default();
            if m.won_by(player) {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
        }
    }

    let mut ranking: Vec<RankingEntry> = players
        .iter()
        .map(|p| {
            let record = records.get(&p.id).copied().unwrap_or_default();
            RankingEntry {
                player_id: p.id,
                nickname: p.nickname.clone(),
                wins: record.wins,
                losses: record.losses,
                points: record.wins * POINTS_PER_WIN,
            }
        })
        .collect();

    ranking.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.wins.cmp(&a.wins))
            .then_with(|| a.losses.cmp(&b.losses))
            .then_with(|| a.player_id.cmp(&b.player_id))
    });

    debug!("Ranked {} players", ranking.len());
    ranking
}

/// Rank of every player in the standings as they stood at `month_start`.
///
/// Only players with at least one earlier match are placed (1, 2, ...);
/// everyone else is `Unranked`.
pub fn reference_ranks(
    players: &[Player],
    matches: &[Match],
    month_start: NaiveDate,
) -> HashMap<PlayerId, ReferenceRank> {
    let mut next_rank = 1;
    general_ranking_before(players, matches, month_start)
        .into_iter()
        .map(|entry| {
            let rank = if entry.matches_played() > 0 {
                let rank = ReferenceRank::Placed(next_rank);
                next_rank += 1;
                rank
            } else {
                ReferenceRank::Unranked
            };
            (entry.player_id, rank)
        })
        .collect()
}
