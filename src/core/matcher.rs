//! Guess normalization and comparison
//!
//! Guesses are compared against the answer after normalization: lower-cased,
//! with whitespace, hyphens, underscores and every other non-alphanumeric
//! character removed. Only exact normalized matches win a round.
//!
//! [`levenshtein`] and [`is_close_enough`] are provided for typo-tolerant
//! comparison but are not part of guess evaluation.

/// Canonical form used for all guess comparisons
///
/// # Examples
/// ```
/// use corpdle::core::matcher::normalize;
///
/// assert_eq!(normalize("  Coca-Cola "), "cocacola");
/// assert_eq!(normalize("AT&T"), "att");
/// assert_eq!(normalize("Procter_&_Gamble"), "proctergamble");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// True iff both strings normalize to the same text
#[must_use]
pub fn is_exact_match(guess: &str, target: &str) -> bool {
    normalize(guess) == normalize(target)
}

/// Edit distance with unit costs for insertion, deletion and substitution
///
/// Operates on `char`s, so multi-byte text is measured per character.
///
/// # Examples
/// ```
/// use corpdle::core::matcher::levenshtein;
///
/// assert_eq!(levenshtein("kitten", "sitting"), 3);
/// assert_eq!(levenshtein("", "abc"), 3);
/// ```
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the DP matrix, indexed by position in `b`
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j]
            } else {
                1 + previous[j].min(previous[j + 1]).min(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// True if the normalized guess equals the normalized target or is within
/// `threshold` edits of it
#[must_use]
pub fn is_close_enough(guess: &str, target: &str, threshold: usize) -> bool {
    let guess = normalize(guess);
    let target = normalize(target);
    guess == target || levenshtein(&guess, &target) <= threshold
}
