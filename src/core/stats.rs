//! Cumulative play statistics

use super::{GameStatus, MAX_GUESSES, Round};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Lifetime statistics across completed rounds
///
/// `guess_distribution` maps the number of guesses used in a win to how
/// often that happened. It serializes with string keys `"1"` to `"6"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsRecord {
    pub played: u32,
    pub won: u32,
    pub current_streak: u32,
    pub max_streak: u32,
    pub guess_distribution: BTreeMap<usize, u32>,
}

impl Default for StatsRecord {
    fn default() -> Self {
        Self {
            played: 0,
            won: 0,
            current_streak: 0,
            max_streak: 0,
            guess_distribution: (1..=MAX_GUESSES).map(|n| (n, 0)).collect(),
        }
    }
}

impl StatsRecord {
    /// Percentage of played rounds that were won, rounded to the nearest integer
    #[must_use]
    pub fn win_percentage(&self) -> u32 {
        if self.played == 0 {
            return 0;
        }
        (f64::from(self.won) / f64::from(self.played) * 100.0).round() as u32
    }

    /// Wins that took exactly `guesses` guesses
    #[must_use]
    pub fn wins_in(&self, guesses: usize) -> u32 {
        self.guess_distribution.get(&guesses).copied().unwrap_or(0)
    }

    /// Largest distribution bucket, at least 1 so it can scale bar charts
    #[must_use]
    pub fn max_bucket(&self) -> u32 {
        self.guess_distribution
            .values()
            .copied()
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// Fold a finished round into the statistics
///
/// Must be applied once per round, when a [`Transition`](super::Transition)
/// reports `completed`. Applying it twice double-counts. A round still in
/// play leaves the statistics unchanged.
#[must_use]
pub fn record_completion(stats: &StatsRecord, round: &Round<'_>) -> StatsRecord {
    let mut next = stats.clone();

    match round.status() {
        GameStatus::Playing => return next,
        GameStatus::Won => {
            next.won = next.won.saturating_add(1);
            next.current_streak = next.current_streak.saturating_add(1);
            next.max_streak = next.max_streak.max(next.current_streak);
            let bucket = next
                .guess_distribution
                .entry(round.guesses().len())
                .or_insert(0);
            *bucket = bucket.saturating_add(1);
        }
        GameStatus::Lost => {
            next.current_streak = 0;
        }
    }
    next.played = next.played.saturating_add(1);

    info!(
        company = round.company().name(),
        status = ?round.status(),
        guesses = round.guesses().len(),
        played = next.played,
        streak = next.current_streak,
        "round recorded"
    );

    next
}
