//! Catalog loading utilities
//!
//! Provides functions to build companies from the embedded table or a TSV file.

use crate::core::Company;
use std::fs;
use std::io;
use std::path::Path;
use tracing::warn;

/// Load companies from a tab-separated file
///
/// One company per line with ten columns: id, name, industry, founded,
/// headquarters, ceo, revenue, employees, colors, slogan. Blank lines and
/// lines starting with `#` are ignored; malformed rows are skipped.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
///
/// # Examples
/// ```no_run
/// use corpdle::catalog::loader::load_from_file;
///
/// let companies = load_from_file("data/companies.tsv").unwrap();
/// println!("Loaded {} companies", companies.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Company>> {
    let content = fs::read_to_string(path)?;
    Ok(companies_from_tsv(&content))
}

/// Parse companies from tab-separated text
#[must_use]
pub fn companies_from_tsv(content: &str) -> Vec<Company> {
    content
        .lines()
        .enumerate()
        .filter_map(|(index, line)| {
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.trim().is_empty() || trimmed.starts_with('#') {
                return None;
            }

            let fields: Vec<&str> = trimmed.split('\t').collect();
            match Company::from_fields(&fields) {
                Ok(company) => Some(company),
                Err(err) => {
                    warn!(line = index + 1, %err, "skipping catalog row");
                    None
                }
            }
        })
        .collect()
}

/// Convert embedded rows to companies, skipping invalid rows
#[must_use]
pub fn companies_from_rows<const N: usize>(rows: &[[&str; N]]) -> Vec<Company> {
    rows.iter()
        .filter_map(|row| match Company::from_fields(row) {
            Ok(company) => Some(company),
            Err(err) => {
                warn!(%err, "skipping embedded catalog row");
                None
            }
        })
        .collect()
}
