//! Catalog audit - find answers players could confuse
//!
//! Compares every pair of normalized company names. Pairs that normalize to
//! the same text make one answer unwinnable; pairs within a small edit
//! distance show where typo-tolerant matching would accept the wrong company.

use crate::catalog::Catalog;
use crate::core::matcher::{levenshtein, normalize};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::{Duration, Instant};
use tracing::debug;

/// Two company names within the audit threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearMiss {
    pub first: String,
    pub second: String,
    pub distance: usize,
}

impl NearMiss {
    /// Both names normalize to the same text
    #[must_use]
    pub const fn is_collision(&self) -> bool {
        self.distance == 0
    }
}

/// Result of auditing a catalog
#[derive(Debug)]
pub struct AuditResult {
    pub total_companies: usize,
    pub pairs_checked: usize,
    pub threshold: usize,
    /// Sorted by distance, then by name
    pub near_misses: Vec<NearMiss>,
    pub duration: Duration,
}

impl AuditResult {
    pub fn collisions(&self) -> impl Iterator<Item = &NearMiss> {
        self.near_misses.iter().filter(|miss| miss.is_collision())
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.collisions().next().is_none()
    }
}

/// Audit every pair of company names against `threshold`
#[must_use]
pub fn run_audit(catalog: &Catalog, threshold: usize, show_progress: bool) -> AuditResult {
    let start = Instant::now();

    let names: Vec<(&str, String)> = catalog
        .companies()
        .iter()
        .map(|company| (company.name(), normalize(company.name())))
        .collect();
    let n = names.len();

    let pb = if show_progress {
        ProgressBar::new(n as u64)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) | {msg}",
    ) {
        pb.set_style(style.progress_chars("█▓▒░"));
    }
    pb.set_message("Comparing names");

    let mut near_misses: Vec<NearMiss> = (0..n)
        .into_par_iter()
        .flat_map_iter(|i| {
            let (first, first_norm) = &names[i];
            let row: Vec<NearMiss> = names[i + 1..]
                .iter()
                .filter_map(|(second, second_norm)| {
                    // Length difference is a lower bound on the distance
                    if first_norm.len().abs_diff(second_norm.len()) > threshold {
                        return None;
                    }
                    let distance = levenshtein(first_norm, second_norm);
                    (distance <= threshold).then(|| NearMiss {
                        first: (*first).to_string(),
                        second: (*second).to_string(),
                        distance,
                    })
                })
                .collect();
            pb.inc(1);
            row
        })
        .collect();

    near_misses.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.first.cmp(&b.first))
            .then_with(|| a.second.cmp(&b.second))
    });

    pb.finish_with_message("Complete!");

    let result = AuditResult {
        total_companies: n,
        pairs_checked: n * n.saturating_sub(1) / 2,
        threshold,
        near_misses,
        duration: start.elapsed(),
    };
    debug!(
        pairs = result.pairs_checked,
        found = result.near_misses.len(),
        "audit finished"
    );
    result
}
