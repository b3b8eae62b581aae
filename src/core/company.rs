//! Company records
//!
//! A Company is one immutable row of the catalog. It is built once at
//! start-up and only ever borrowed afterwards.

use super::HintKind;
use super::matcher::normalize;
use thiserror::Error;

/// Unique catalog identifier of a company
pub type CompanyId = u32;

/// Error type for malformed catalog rows
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompanyError {
    #[error("Company row must have 10 fields, got {0}")]
    FieldCount(usize),
    #[error("Invalid company id: {0:?}")]
    InvalidId(String),
    #[error("Company name is empty")]
    EmptyName,
    #[error("Company name {0:?} has no letters or digits to match")]
    UnmatchableName(String),
}

/// A company that can be the answer of a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    id: CompanyId,
    name: String,
    industry: String,
    founded: String,
    headquarters: String,
    ceo: String,
    revenue: String,
    employees: String,
    colors: String,
    slogan: String,
}

impl Company {
    /// Build a company from a catalog row
    ///
    /// Field order: id, name, industry, founded, headquarters, ceo,
    /// revenue, employees, colors, slogan. Fields are trimmed.
    ///
    /// # Errors
    /// Returns `CompanyError` if:
    /// - The row does not have exactly ten fields
    /// - The id is not a non-negative integer
    /// - The name is blank
    /// - The name has no ASCII letters or digits, so any punctuation-only
    ///   guess would match it
    ///
    /// # Examples
    /// ```
    /// use corpdle::core::Company;
    ///
    /// let apple = Company::from_fields(&[
    ///     "2", "Apple", "Technology", "1976", "Cupertino, California, USA",
    ///     "Tim Cook", "$394.3 billion", "164,000", "White, Silver, Black",
    ///     "Think Different",
    /// ]).unwrap();
    /// assert_eq!(apple.name(), "Apple");
    /// assert!(Company::from_fields(&["2", "Apple"]).is_err());
    /// ```
    pub fn from_fields(fields: &[&str]) -> Result<Self, CompanyError> {
        let [
            id,
            name,
            industry,
            founded,
            headquarters,
            ceo,
            revenue,
            employees,
            colors,
            slogan,
        ] = fields
        else {
            return Err(CompanyError::FieldCount(fields.len()));
        };

        let id = id
            .trim()
            .parse::<CompanyId>()
            .map_err(|_| CompanyError::InvalidId((*id).to_string()))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(CompanyError::EmptyName);
        }
        if normalize(name).is_empty() {
            return Err(CompanyError::UnmatchableName(name.to_string()));
        }

        Ok(Self {
            id,
            name: name.to_string(),
            industry: industry.trim().to_string(),
            founded: founded.trim().to_string(),
            headquarters: headquarters.trim().to_string(),
            ceo: ceo.trim().to_string(),
            revenue: revenue.trim().to_string(),
            employees: employees.trim().to_string(),
            colors: colors.trim().to_string(),
            slogan: slogan.trim().to_string(),
        })
    }

    #[inline]
    #[must_use]
    pub const fn id(&self) -> CompanyId {
        self.id
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn industry(&self) -> &str {
        &self.industry
    }

    /// Founding year, only shown in the post-game reveal
    #[inline]
    #[must_use]
    pub fn founded(&self) -> &str {
        &self.founded
    }

    #[inline]
    #[must_use]
    pub fn headquarters(&self) -> &str {
        &self.headquarters
    }

    #[inline]
    #[must_use]
    pub fn ceo(&self) -> &str {
        &self.ceo
    }

    #[inline]
    #[must_use]
    pub fn revenue(&self) -> &str {
        &self.revenue
    }

    /// Employee count, only shown in the post-game reveal
    #[inline]
    #[must_use]
    pub fn employees(&self) -> &str {
        &self.employees
    }

    /// Brand colors as stored, comma separated
    #[inline]
    #[must_use]
    pub fn colors(&self) -> &str {
        &self.colors
    }

    #[inline]
    #[must_use]
    pub fn slogan(&self) -> &str {
        &self.slogan
    }

    /// Individual brand colors, in catalog order
    pub fn brand_colors(&self) -> impl Iterator<Item = &str> {
        self.colors
            .split(',')
            .map(str::trim)
            .filter(|color| !color.is_empty())
    }

    /// The attribute disclosed by a hint
    #[must_use]
    pub fn hint_value(&self, kind: HintKind) -> &str {
        match kind {
            HintKind::Revenue => &self.revenue,
            HintKind::Headquarters => &self.headquarters,
            HintKind::Industry => &self.industry,
            HintKind::Ceo => &self.ceo,
            HintKind::Colors => &self.colors,
            HintKind::Slogan => &self.slogan,
        }
    }
}
