//! Company catalog
//!
//! The catalog is built once at start-up, either from the embedded table or
//! from a TSV file, and is read-only afterwards. Rounds borrow companies
//! from it for their whole lifetime.

mod embedded;
pub mod loader;
pub mod selector;

pub use embedded::{COMPANY_ROWS, COMPANY_ROWS_COUNT};
pub use selector::select;

use crate::core::{Company, CompanyId};
use rustc_hash::FxHashMap;
use tracing::warn;

/// Immutable set of candidate companies
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    companies: Vec<Company>,
    by_id: FxHashMap<CompanyId, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the first company for each id
    #[must_use]
    pub fn new(companies: Vec<Company>) -> Self {
        let mut kept = Vec::with_capacity(companies.len());
        let mut by_id = FxHashMap::default();

        for company in companies {
            if by_id.contains_key(&company.id()) {
                warn!(
                    id = company.id(),
                    name = company.name(),
                    "duplicate company id, skipping"
                );
                continue;
            }
            by_id.insert(company.id(), kept.len());
            kept.push(company);
        }

        Self {
            companies: kept,
            by_id,
        }
    }

    /// The catalog bundled with the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(loader::companies_from_rows(COMPANY_ROWS))
    }

    #[inline]
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    #[must_use]
    pub fn get(&self, id: CompanyId) -> Option<&Company> {
        self.by_id.get(&id).map(|&index| &self.companies[index])
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.companies.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}
