//! Random company selection

use super::Catalog;
use crate::core::Company;
use rand::Rng;
use rand::seq::SliceRandom;

/// Pick a company uniformly at random
///
/// Shuffles the catalog order with Fisher–Yates and takes the first entry.
/// Returns `None` for an empty catalog.
pub fn select<'a, R: Rng + ?Sized>(catalog: &'a Catalog, rng: &mut R) -> Option<&'a Company> {
    let mut order: Vec<&Company> = catalog.companies().iter().collect();
    order.shuffle(rng);
    order.first().copied()
}
