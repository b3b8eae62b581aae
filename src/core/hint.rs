//! Hint kinds and their disclosure schedule
//!
//! Every round discloses company attributes in the same fixed order:
//! revenue, headquarters, industry, CEO, brand colors, slogan.
//! The first hint is visible from the start; each wrong guess discloses the next.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A company attribute that can be disclosed as a hint
///
/// Founding year and employee count are not hints. They only appear in
/// the post-game reveal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    Revenue,
    Headquarters,
    Industry,
    Ceo,
    Colors,
    #[serde(alias = "hint")]
    Slogan,
}

impl HintKind {
    /// All hint kinds in disclosure order
    pub const CANONICAL: [Self; 6] = [
        Self::Revenue,
        Self::Headquarters,
        Self::Industry,
        Self::Ceo,
        Self::Colors,
        Self::Slogan,
    ];

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Annual Revenue",
            Self::Headquarters => "Headquarters",
            Self::Industry => "Industry",
            Self::Ceo => "CEO",
            Self::Colors => "Brand Colors",
            Self::Slogan => "Slogan/Motto",
        }
    }
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Deterministic hint disclosure order
///
/// Stateless: the order is [`HintKind::CANONICAL`] for every round, so the
/// scheduler only needs to know what has been revealed so far.
#[derive(Debug, Clone, Copy, Default)]
pub struct HintScheduler;

impl HintScheduler {
    /// The hint shown before any guess
    #[inline]
    #[must_use]
    pub const fn initial_hint() -> HintKind {
        HintKind::CANONICAL[0]
    }

    /// The first canonical hint not yet in `revealed`
    ///
    /// Returns `None` once every hint is revealed.
    ///
    /// # Examples
    /// ```
    /// use corpdle::core::{HintKind, HintScheduler};
    ///
    /// assert_eq!(
    ///     HintScheduler::next_hint(&[HintKind::Revenue]),
    ///     Some(HintKind::Headquarters)
    /// );
    /// assert_eq!(HintScheduler::next_hint(&HintKind::CANONICAL), None);
    /// ```
    #[must_use]
    pub fn next_hint(revealed: &[HintKind]) -> Option<HintKind> {
        HintKind::CANONICAL
            .into_iter()
            .find(|kind| !revealed.contains(kind))
    }

    /// Canonical hints not yet in `revealed`, in disclosure order
    #[must_use]
    pub fn remaining(revealed: &[HintKind]) -> Vec<HintKind> {
        HintKind::CANONICAL
            .into_iter()
            .filter(|kind| !revealed.contains(kind))
            .collect()
    }

    /// Check that `revealed` followed by `available` is exactly the canonical order
    #[must_use]
    pub fn is_consistent(revealed: &[HintKind], available: &[HintKind]) -> bool {
        !revealed.is_empty()
            && revealed.len() + available.len() == HintKind::CANONICAL.len()
            && revealed
                .iter()
                .chain(available)
                .zip(HintKind::CANONICAL.iter())
                .all(|(a, b)| a == b)
    }
}
