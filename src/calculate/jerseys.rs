use std::collections::HashMap;

use tracing::debug;

use crate::models::{
    JerseyAward, Match, MonthWindow, MonthlyJerseys, Player, PlayerId, RankingEntry,
    ReferenceRank, Standings,
};

use super::{general_ranking, reference_ranks};

/// Matches recorded in one calendar month.
#[derive(Debug, Clone)]
pub struct MonthView<'a> {
    window: MonthWindow,
    matches: Vec<&'a Match>,
}

impl<'a> MonthView<'a> {
    /// Keep the matches whose stored month/year fall in `window`.
    pub fn new(matches: &'a [Match], window: MonthWindow) -> Self {
        let matches = matches
            .iter()
            .filter(|m| window.matches(m.month, m.year))
            .collect();
        Self { window, matches }
    }

    pub fn window(&self) -> MonthWindow {
        self.window
    }

    pub fn matches(&self) -> &[&'a Match] {
        &self.matches
    }

    /// Matches played in the last seven days of the month.
    pub fn closing_week(&self) -> impl Iterator<Item = &'a Match> + '_ {
        let (start, end) = self.window.closing_week();
        self.matches
            .iter()
            .copied()
            .filter(move |m| m.match_date >= start && m.match_date <= end)
    }
}

/// Pick the player with the highest positive count. Ties go to the lowest
/// player id.
fn award(players: &[Player], counts: &HashMap<PlayerId, u32>) -> Option<JerseyAward> {
    players
        .iter()
        .filter_map(|p| {
            let metric = counts.get(&p.id).copied().unwrap_or(0);
            (metric > 0).then_some((p, metric))
        })
        .max_by(|(a, a_metric), (b, b_metric)| {
            a_metric.cmp(b_metric).then_with(|| b.id.cmp(&a.id))
        })
        .map(|(p, metric)| JerseyAward {
            player_id: p.id,
            nickname: p.nickname.clone(),
            metric,
        })
}

fn count_wins<'a>(matches: impl Iterator<Item = &'a Match>) -> HashMap<PlayerId, u32> {
    let mut counts = HashMap::new();
    for winner in matches.filter_map(Match::winner) {
        *counts.entry(winner).or_insert(0) += 1;
    }
    counts
}

/// Leader of the general ranking, if they have scored.
pub fn leader_jersey(ranking: &[RankingEntry]) -> Option<JerseyAward> {
    ranking
        .first()
        .filter(|entry| entry.points > 0)
        .map(|entry| JerseyAward {
            player_id: entry.player_id,
            nickname: entry.nickname.clone(),
            metric: entry.points,
        })
}

/// Most wins this month against opponents ranked strictly better at the start
/// of the month.
pub fn upset_jersey(
    players: &[Player],
    view: &MonthView<'_>,
    ranks: &HashMap<PlayerId, ReferenceRank>,
) -> Option<JerseyAward> {
    let rank_of = |player: PlayerId| {
        ranks
            .get(&player)
            .copied()
            .unwrap_or(ReferenceRank::Unranked)
    };

    let mut counts = HashMap::new();
    for m in view.matches() {
        let (Some(winner), Some(loser)) = (m.winner(), m.loser()) else {
            continue;
        };
        if rank_of(loser).is_better_than(&rank_of(winner)) {
            *counts.entry(winner).or_insert(0) += 1;
        }
    }

    award(players, &counts)
}

/// Most wins in the closing week of the month.
pub fn closing_jersey(players: &[Player], view: &MonthView<'_>) -> Option<JerseyAward> {
    award(players, &count_wins(view.closing_week()))
}

/// Most matches played during the month, won or lost.
pub fn activity_jersey(players: &[Player], view: &MonthView<'_>) -> Option<JerseyAward> {
    let mut counts = HashMap::new();
    for m in view.matches() {
        for player in [m.player1_id, m.player2_id] {
            *counts.entry(player).or_insert(0) += 1;
        }
    }
    award(players, &counts)
}

/// All four jerseys for `window`.
pub fn monthly_jerseys(players: &[Player], matches: &[Match], window: MonthWindow) -> MonthlyJerseys {
    let ranking = general_ranking(players, matches);
    jerseys_with_ranking(players, matches, window, &ranking)
}

fn jerseys_with_ranking(
    players: &[Player],
    matches: &[Match],
    window: MonthWindow,
    ranking: &[RankingEntry],
) -> MonthlyJerseys {
    let view = MonthView::new(matches, window);
    let ranks = reference_ranks(players, matches, window.first_day());
    debug!(
        "Computing jerseys for {} over {} matches",
        window,
        view.matches().len()
    );

    MonthlyJerseys {
        leader: leader_jersey(ranking),
        upset: upset_jersey(players, &view, &ranks),
        closing: closing_jersey(players, &view),
        activity: activity_jersey(players, &view),
    }
}

/// General ranking together with the jerseys of `window`.
pub fn monthly_standings(players: &[Player], matches: &[Match], window: MonthWindow) -> Standings {
    let general_ranking = general_ranking(players, matches);
    let jerseys = jerseys_with_ranking(players, matches, window, &general_ranking);
    Standings {
        month: window.month(),
        year: window.year(),
        general_ranking,
        jerseys,
    }
}
