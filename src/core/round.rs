//! Round state machine
//!
//! A [`Round`] is an immutable value: every operation returns a new round
//! and leaves the original untouched, so callers always hold the
//! authoritative state and decide when to persist it.
//!
//! ```text
//! Playing ──correct guess──▶ Won
//!    │
//!    ├──last wrong guess──▶ Lost
//!    └──give up───────────▶ Lost
//! ```

use super::matcher::{is_exact_match, normalize};
use super::{Company, CompanyId, HintKind, HintScheduler};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Guesses allowed per round
pub const MAX_GUESSES: usize = 6;

/// Round status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    /// Won or Lost
    #[inline]
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Rejected player actions
///
/// A rejected action never changes the round.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuessError {
    #[error("Please enter a guess")]
    EmptyGuess,
    #[error("You already guessed {0:?}")]
    DuplicateGuess(String),
    #[error("The round is already over")]
    RoundAlreadyOver,
}

/// Result of an accepted action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<'a> {
    /// The round after the action
    pub round: Round<'a>,
    /// True only when this action moved the round from Playing to Won or Lost
    ///
    /// Completion bookkeeping (statistics, last-played marker) should run
    /// exactly when this is set.
    pub completed: bool,
}

/// One play session against a single company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round<'a> {
    company: &'a Company,
    guesses: Vec<String>,
    max_guesses: usize,
    status: GameStatus,
    revealed: Vec<HintKind>,
    available: Vec<HintKind>,
}

impl<'a> Round<'a> {
    /// Start a round with the standard guess limit
    #[must_use]
    pub fn start(company: &'a Company) -> Self {
        Self::with_max_guesses(company, MAX_GUESSES)
    }

    /// Start a round with a custom guess limit (at least one)
    #[must_use]
    pub fn with_max_guesses(company: &'a Company, max_guesses: usize) -> Self {
        let revealed = vec![HintScheduler::initial_hint()];
        let available = HintScheduler::remaining(&revealed);

        Self {
            company,
            guesses: Vec::new(),
            max_guesses: max_guesses.max(1),
            status: GameStatus::Playing,
            revealed,
            available,
        }
    }

    #[inline]
    #[must_use]
    pub const fn company(&self) -> &'a Company {
        self.company
    }

    /// Guesses as typed, in submission order
    #[inline]
    #[must_use]
    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    #[inline]
    #[must_use]
    pub const fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    #[inline]
    #[must_use]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// Disclosed hints, in disclosure order
    #[inline]
    #[must_use]
    pub fn revealed(&self) -> &[HintKind] {
        &self.revealed
    }

    /// Hints still hidden, in disclosure order
    #[inline]
    #[must_use]
    pub fn available(&self) -> &[HintKind] {
        &self.available
    }

    #[inline]
    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    #[must_use]
    pub fn guesses_remaining(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses.len())
    }

    /// Check whether `raw` normalizes to a guess already submitted
    #[must_use]
    pub fn already_guessed(&self, raw: &str) -> bool {
        let normalized = normalize(raw);
        self.guesses.iter().any(|g| normalize(g) == normalized)
    }

    /// Submit a guess
    ///
    /// On a terminal round this is a no-op: the returned transition carries
    /// an unchanged round with `completed == false`.
    ///
    /// A wrong guess discloses the next hint (if any) before the guess limit
    /// is checked, so the final wrong guess still reveals a pending hint.
    ///
    /// # Errors
    /// Returns `GuessError` if:
    /// - The guess is blank after trimming
    /// - The guess normalizes to one already submitted this round
    ///
    /// # Examples
    /// ```
    /// use corpdle::core::{Company, GameStatus, Round};
    ///
    /// let apple = Company::from_fields(&[
    ///     "2", "Apple", "Technology", "1976", "Cupertino", "Tim Cook",
    ///     "$394.3 billion", "164,000", "White", "Think Different",
    /// ]).unwrap();
    ///
    /// let round = Round::start(&apple);
    /// let transition = round.submit_guess("APPLE ").unwrap();
    /// assert_eq!(transition.round.status(), GameStatus::Won);
    /// assert!(transition.completed);
    /// ```
    pub fn submit_guess(&self, raw: &str) -> Result<Transition<'a>, GuessError> {
        if self.is_over() {
            return Ok(self.unchanged());
        }

        if raw.trim().is_empty() {
            return Err(GuessError::EmptyGuess);
        }

        if self.already_guessed(raw) {
            return Err(GuessError::DuplicateGuess(raw.trim().to_string()));
        }

        let mut next = self.clone();
        next.guesses.push(raw.to_string());

        if is_exact_match(raw, self.company.name()) {
            next.status = GameStatus::Won;
        } else {
            if let Some(hint) = HintScheduler::next_hint(&next.revealed) {
                next.revealed.push(hint);
                next.available.retain(|&kind| kind != hint);
            }

            if next.guesses.len() >= next.max_guesses {
                next.status = GameStatus::Lost;
            }
        }

        debug!(
            guess = raw,
            guesses = next.guesses.len(),
            status = ?next.status,
            "guess submitted"
        );

        Ok(Transition {
            completed: next.is_over(),
            round: next,
        })
    }

    /// Forfeit the round, revealing the answer
    ///
    /// No guess is recorded and no hint is disclosed.
    ///
    /// # Errors
    /// Returns `GuessError::RoundAlreadyOver` if the round is not in play.
    pub fn give_up(&self) -> Result<Transition<'a>, GuessError> {
        if self.is_over() {
            return Err(GuessError::RoundAlreadyOver);
        }

        let mut next = self.clone();
        next.status = GameStatus::Lost;
        debug!(guesses = next.guesses.len(), "round forfeited");

        Ok(Transition {
            round: next,
            completed: true,
        })
    }

    fn unchanged(&self) -> Transition<'a> {
        Transition {
            round: self.clone(),
            completed: false,
        }
    }

    /// Persisted form of this round
    #[must_use]
    pub fn to_record(&self) -> RoundRecord {
        RoundRecord {
            company_id: self.company.id(),
            guesses: self.guesses.clone(),
            max_guesses: self.max_guesses,
            status: self.status,
            revealed_hints: self.revealed.clone(),
            available_hints: self.available.clone(),
        }
    }

    /// Rebuild a round from its persisted form
    ///
    /// `lookup` resolves the company id. The stored guesses are replayed
    /// against the company, and the record is accepted only if it matches
    /// the replayed state exactly. A Lost record with guesses to spare is
    /// replayed as a forfeit. Returns `None` when the company is unknown or
    /// the record could not have come from real play; callers treat that as
    /// "no saved round".
    #[must_use]
    pub fn from_record<F>(record: RoundRecord, lookup: F) -> Option<Self>
    where
        F: FnOnce(CompanyId) -> Option<&'a Company>,
    {
        let company = lookup(record.company_id)?;

        if record.max_guesses == 0
            || record.guesses.len() > record.max_guesses
            || !HintScheduler::is_consistent(&record.revealed_hints, &record.available_hints)
        {
            return None;
        }

        let mut replay = Self::with_max_guesses(company, record.max_guesses);
        for guess in &record.guesses {
            // Nothing can follow a finished round
            if replay.is_over() {
                return None;
            }
            replay = replay.submit_guess(guess).ok()?.round;
        }

        if replay.status != record.status {
            if record.status != GameStatus::Lost {
                return None;
            }
            replay = replay.give_up().ok()?.round;
        }

        (replay.revealed == record.revealed_hints && replay.available == record.available_hints)
            .then_some(replay)
    }
}

/// Serialized round, keyed by company id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub company_id: CompanyId,
    pub guesses: Vec<String>,
    pub max_guesses: usize,
    pub status: GameStatus,
    pub revealed_hints: Vec<HintKind>,
    pub available_hints: Vec<HintKind>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn company(id: CompanyId, name: &str) -> Company {
        let id = id.to_string();
        Company::from_fields(&[
            id.as_str(),
            name,
            "Technology",
            "1976",
            "Cupertino, California, USA",
            "Tim Cook",
            "$394.3 billion",
            "164,000",
            "White, Silver, Black",
            "Think Different",
        ])
        .unwrap()
    }

    fn play<'a>(round: &Round<'a>, guesses: &[&str]) -> Round<'a> {
        guesses.iter().fold(round.clone(), |r, g| {
            r.submit_guess(g).unwrap().round
        })
    }

    #[test]
    fn start_reveals_first_hint() {
        let apple = company(2, "Apple");
        let round = Round::start(&apple);

        assert_eq!(round.status(), GameStatus::Playing);
        assert!(round.guesses().is_empty());
        assert_eq!(round.max_guesses(), MAX_GUESSES);
        assert_eq!(round.revealed(), &[HintKind::Revenue]);
        assert_eq!(round.available().len(), 5);
        assert_eq!(round.available(), &HintKind::CANONICAL[1..]);
    }

    #[test]
    fn correct_guess_wins() {
        let apple = company(2, "Apple");
        let transition = Round::start(&apple).submit_guess("apple").unwrap();

        assert!(transition.completed);
        assert_eq!(transition.round.status(), GameStatus::Won);
        assert_eq!(transition.round.guesses(), &["apple".to_string()]);
        // No extra hint on a win
        assert_eq!(transition.round.revealed(), &[HintKind::Revenue]);
    }

    #[test]
    fn correct_guess_wins_after_normalization() {
        let apple = company(2, "Apple");
        let transition = Round::start(&apple).submit_guess("APPLE ").unwrap();
        assert_eq!(transition.round.status(), GameStatus::Won);
        // Stored as typed
        assert_eq!(transition.round.guesses(), &["APPLE ".to_string()]);
    }

    #[test]
    fn wrong_guesses_reveal_hints_in_order() {
        let apple = company(2, "Apple");
        let mut round = Round::start(&apple);

        for (k, guess) in ["Google", "Microsoft", "Amazon", "Meta", "IBM"]
            .iter()
            .enumerate()
        {
            let transition = round.submit_guess(guess).unwrap();
            assert!(!transition.completed);
            round = transition.round;

            assert_eq!(round.revealed().len(), k + 2);
            assert_eq!(round.revealed(), &HintKind::CANONICAL[..k + 2]);
            assert_eq!(round.available(), &HintKind::CANONICAL[k + 2..]);
        }

        assert_eq!(round.status(), GameStatus::Playing);
        assert_eq!(round.revealed(), &HintKind::CANONICAL);
        assert!(round.available().is_empty());
    }

    #[test]
    fn sixth_wrong_guess_loses() {
        let apple = company(2, "Apple");
        let round = play(
            &Round::start(&apple),
            &["Google", "Microsoft", "Amazon", "Meta", "IBM"],
        );

        let transition = round.submit_guess("Intel").unwrap();
        assert!(transition.completed);
        assert_eq!(transition.round.status(), GameStatus::Lost);
        assert_eq!(transition.round.guesses().len(), 6);
        assert_eq!(transition.round.revealed(), &HintKind::CANONICAL);
    }

    #[test]
    fn fewer_than_max_wrong_guesses_never_lose() {
        let apple = company(2, "Apple");
        let mut round = Round::start(&apple);
        for guess in ["a", "b", "c", "d", "e"] {
            round = round.submit_guess(guess).unwrap().round;
            assert_eq!(round.status(), GameStatus::Playing);
        }
        assert_eq!(round.guesses_remaining(), 1);
    }

    #[test]
    fn win_on_last_attempt() {
        let apple = company(2, "Apple");
        let round = play(&Round::start(&apple), &["a", "b", "c", "d", "e"]);
        let transition = round.submit_guess("Apple").unwrap();
        assert_eq!(transition.round.status(), GameStatus::Won);
        assert_eq!(transition.round.guesses().len(), 6);
    }

    #[test]
    fn losing_guess_still_reveals_pending_hint() {
        // With fewer guesses than hints, the final wrong guess must still disclose
        let apple = company(2, "Apple");
        let round = play(&Round::with_max_guesses(&apple, 3), &["a", "b"]);
        assert_eq!(round.revealed().len(), 3);

        let transition = round.submit_guess("c").unwrap();
        assert_eq!(transition.round.status(), GameStatus::Lost);
        assert_eq!(transition.round.revealed(), &HintKind::CANONICAL[..4]);
        assert_eq!(transition.round.available(), &HintKind::CANONICAL[4..]);
    }

    #[test]
    fn more_guesses_than_hints() {
        let apple = company(2, "Apple");
        let round = play(
            &Round::with_max_guesses(&apple, 8),
            &["a", "b", "c", "d", "e", "f", "g"],
        );
        assert_eq!(round.status(), GameStatus::Playing);
        assert_eq!(round.revealed(), &HintKind::CANONICAL);
        assert!(round.available().is_empty());

        let transition = round.submit_guess("h").unwrap();
        assert_eq!(transition.round.status(), GameStatus::Lost);
    }

    #[test]
    fn empty_guess_rejected() {
        let apple = company(2, "Apple");
        let round = Round::start(&apple);
        assert_eq!(round.submit_guess(""), Err(GuessError::EmptyGuess));
        assert_eq!(round.submit_guess("   \t"), Err(GuessError::EmptyGuess));
    }

    #[test]
    fn duplicate_guess_rejected_without_side_effects() {
        let apple = company(2, "Apple");
        let round = play(&Round::start(&apple), &["Google"]);

        for dup in ["google", " GOOGLE ", "Goo-gle"] {
            assert!(matches!(
                round.submit_guess(dup),
                Err(GuessError::DuplicateGuess(_))
            ));
        }
        assert_eq!(round.guesses().len(), 1);
        assert_eq!(round.revealed().len(), 2);
        assert_eq!(round.available().len(), 4);
    }

    #[test]
    fn guess_after_win_is_noop() {
        let apple = company(2, "Apple");
        let won = Round::start(&apple).submit_guess("Apple").unwrap().round;

        let transition = won.submit_guess("Google").unwrap();
        assert!(!transition.completed);
        assert_eq!(transition.round, won);
    }

    #[test]
    fn guess_after_loss_is_noop() {
        let apple = company(2, "Apple");
        let lost = Round::start(&apple).give_up().unwrap().round;

        let transition = lost.submit_guess("Apple").unwrap();
        assert!(!transition.completed);
        assert_eq!(transition.round.status(), GameStatus::Lost);
        assert!(transition.round.guesses().is_empty());
    }

    #[test]
    fn give_up_loses_without_guess_or_hint() {
        let apple = company(2, "Apple");
        let round = play(&Round::start(&apple), &["Google"]);

        let transition = round.give_up().unwrap();
        assert!(transition.completed);
        assert_eq!(transition.round.status(), GameStatus::Lost);
        assert_eq!(transition.round.guesses(), round.guesses());
        assert_eq!(transition.round.revealed(), round.revealed());
    }

    #[test]
    fn give_up_on_finished_round_rejected() {
        let apple = company(2, "Apple");
        let won = Round::start(&apple).submit_guess("Apple").unwrap().round;
        assert_eq!(won.give_up(), Err(GuessError::RoundAlreadyOver));
    }

    #[test]
    fn original_round_untouched() {
        let apple = company(2, "Apple");
        let round = Round::start(&apple);
        let _ = round.submit_guess("Google").unwrap();
        assert!(round.guesses().is_empty());
        assert_eq!(round.revealed().len(), 1);
    }

    #[test]
    fn record_round_trip() {
        let apple = company(2, "Apple");
        let round = play(&Round::start(&apple), &["Google", "Meta"]);

        let json = serde_json::to_string(&round.to_record()).unwrap();
        let record: RoundRecord = serde_json::from_str(&json).unwrap();
        let restored = Round::from_record(record, |id| (id == 2).then_some(&apple)).unwrap();

        assert_eq!(restored, round);
        assert!(std::ptr::eq(restored.company(), &apple));
    }

    #[test]
    fn record_uses_camel_case_fields() {
        let apple = company(2, "Apple");
        let json = serde_json::to_value(Round::start(&apple).to_record()).unwrap();

        assert_eq!(json["companyId"], 2);
        assert_eq!(json["maxGuesses"], 6);
        assert_eq!(json["status"], "playing");
        assert_eq!(json["revealedHints"], serde_json::json!(["revenue"]));
        assert_eq!(json["availableHints"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn record_with_unknown_company_rejected() {
        let apple = company(2, "Apple");
        let record = Round::start(&apple).to_record();
        assert!(Round::from_record(record, |_| None).is_none());
    }

    #[test]
    fn record_with_inconsistent_hints_rejected() {
        let apple = company(2, "Apple");
        let mut record = Round::start(&apple).to_record();
        record.available_hints.pop();
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());

        let mut record = Round::start(&apple).to_record();
        record.revealed_hints = vec![HintKind::Slogan];
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());
    }

    #[test]
    fn record_with_normalized_duplicates_rejected() {
        let apple = company(2, "Apple");
        let mut record = play(&Round::start(&apple), &["Google", "Meta"]).to_record();
        record.guesses = vec!["Google".into(), "google".into(), "Meta".into()];
        record.revealed_hints = HintKind::CANONICAL[..4].to_vec();
        record.available_hints = HintKind::CANONICAL[4..].to_vec();
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());
    }

    #[test]
    fn record_with_too_few_hints_rejected() {
        let apple = company(2, "Apple");
        let mut record = Round::start(&apple).to_record();
        record.guesses = vec!["Google".into(), "Meta".into()];
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());
    }

    #[test]
    fn record_with_unearned_win_rejected() {
        let apple = company(2, "Apple");

        let mut record = Round::start(&apple).to_record();
        record.status = GameStatus::Won;
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());

        let mut record = play(&Round::start(&apple), &["Google"]).to_record();
        record.status = GameStatus::Won;
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());
    }

    #[test]
    fn record_with_guess_after_win_rejected() {
        let apple = company(2, "Apple");
        let mut record = play(&Round::start(&apple), &["Apple"]).to_record();
        record.guesses.push("Google".into());
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());
    }

    #[test]
    fn finished_records_restore() {
        let apple = company(2, "Apple");
        let won = play(&Round::start(&apple), &["Google", "apple"]);
        let lost = play(&Round::start(&apple), &["A", "B", "C", "D", "E", "F"]);
        let forfeited = play(&Round::start(&apple), &["Google"]).give_up().unwrap().round;

        for round in [won, lost, forfeited] {
            let restored = Round::from_record(round.to_record(), |_| Some(&apple));
            assert_eq!(restored, Some(round));
        }
    }

    #[test]
    fn record_with_exhausted_playing_round_rejected() {
        let apple = company(2, "Apple");
        let mut record = Round::start(&apple).to_record();
        record.guesses = (0..6).map(|i| i.to_string()).collect();
        assert!(Round::from_record(record, |_| Some(&apple)).is_none());
    }
}
