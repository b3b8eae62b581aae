//! Game session orchestration
//!
//! A [`Session`] owns the store and the current round. It decides between
//! resuming and starting fresh, persists every accepted action, and applies
//! statistics exactly once per finished round.

use crate::catalog::{self, Catalog};
use crate::core::{
    GameStatus, GuessError, HintKind, Round, RoundRecord, StatsRecord, Transition, format_marker,
    parse_marker, record_completion, should_start_new_round,
};
use crate::storage::{KeyValueStore, StoreError, read_json, write_json};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

/// Store key of the in-progress round
pub const ROUND_KEY: &str = "corpdle-game-state";
/// Store key of the lifetime statistics
pub const STATS_KEY: &str = "corpdle-stats";
/// Store key of the last completion timestamp
pub const LAST_PLAYED_KEY: &str = "corpdle-last-played";

/// Errors surfaced by a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Guess(#[from] GuessError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("The company catalog is empty")]
    EmptyCatalog,
}

/// What a submitted guess did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// The guess named the company
    Correct,
    /// Wrong guess, with the hint it disclosed if any remained
    Wrong { revealed: Option<HintKind> },
    /// Wrong guess that used the last attempt
    OutOfGuesses,
    /// The round was already over; nothing changed
    Ignored,
}

/// A player's game against one store
pub struct Session<'a, S: KeyValueStore> {
    catalog: &'a Catalog,
    store: S,
    round: Round<'a>,
    stats: StatsRecord,
    fresh: bool,
}

impl<'a, S: KeyValueStore> Session<'a, S> {
    /// Resume today's round or start a new one
    ///
    /// A new round starts when the day has rolled over since the last
    /// completed round, or when no usable saved round exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or a fresh round cannot be saved.
    pub fn open<R: Rng + ?Sized>(
        catalog: &'a Catalog,
        mut store: S,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let stats: StatsRecord = recover(&store, STATS_KEY).unwrap_or_default();
        let last_played = store
            .get(LAST_PLAYED_KEY)
            .and_then(|text| parse_marker(&text));

        let saved = if should_start_new_round(last_played, now) {
            None
        } else {
            recover::<RoundRecord, _>(&store, ROUND_KEY).and_then(|record| {
                let company_id = record.company_id;
                let round = Round::from_record(record, |id| catalog.get(id));
                if round.is_none() {
                    warn!(company_id, "discarding saved round that does not replay");
                }
                round
            })
        };

        let (round, fresh) = match saved {
            Some(round) => {
                info!(
                    company_id = round.company().id(),
                    guesses = round.guesses().len(),
                    "resuming round"
                );
                (round, false)
            }
            None => {
                let round = start_round(catalog, rng)?;
                write_json(&mut store, ROUND_KEY, &round.to_record())?;
                (round, true)
            }
        };

        Ok(Self {
            catalog,
            store,
            round,
            stats,
            fresh,
        })
    }

    #[must_use]
    pub const fn round(&self) -> &Round<'a> {
        &self.round
    }

    #[must_use]
    pub const fn stats(&self) -> &StatsRecord {
        &self.stats
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// True when `open` or `new_round` started this round
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Submit a guess for the current round
    ///
    /// # Errors
    ///
    /// Returns an error if the guess is rejected or the new state cannot be saved.
    pub fn submit_guess(
        &mut self,
        raw: &str,
        now: DateTime<Utc>,
    ) -> Result<GuessOutcome, SessionError> {
        if self.round.is_over() {
            return Ok(GuessOutcome::Ignored);
        }

        let before = self.round.revealed().len();
        let transition = self.round.submit_guess(raw)?;
        self.commit(transition, now)?;

        let outcome = match self.round.status() {
            GameStatus::Won => GuessOutcome::Correct,
            GameStatus::Lost => GuessOutcome::OutOfGuesses,
            GameStatus::Playing => GuessOutcome::Wrong {
                revealed: (self.round.revealed().len() > before)
                    .then(|| self.round.revealed().last().copied())
                    .flatten(),
            },
        };
        Ok(outcome)
    }

    /// Forfeit the current round
    ///
    /// # Errors
    ///
    /// Returns an error if the round is already over or the new state cannot be saved.
    pub fn give_up(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        let transition = self.round.give_up()?;
        self.commit(transition, now)
    }

    /// Start another round immediately, ignoring the day marker
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty or the round cannot be saved.
    pub fn new_round<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), SessionError> {
        let round = start_round(self.catalog, rng)?;
        write_json(&mut self.store, ROUND_KEY, &round.to_record())?;
        self.round = round;
        self.fresh = true;
        Ok(())
    }

    /// Give back the underlying store
    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist a transition
    ///
    /// Memory follows each successful write, so a failure part way through
    /// never leaves the session behind the store. Stats already applied in
    /// memory are written again by the next completed round.
    fn commit(
        &mut self,
        transition: Transition<'a>,
        now: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        let Transition { round, completed } = transition;
        write_json(&mut self.store, ROUND_KEY, &round.to_record())?;
        self.round = round;

        if completed {
            self.stats = record_completion(&self.stats, &self.round);
            write_json(&mut self.store, STATS_KEY, &self.stats)?;
            self.store.set(LAST_PLAYED_KEY, &format_marker(now))?;
        }

        Ok(())
    }
}

fn start_round<'a, R: Rng + ?Sized>(
    catalog: &'a Catalog,
    rng: &mut R,
) -> Result<Round<'a>, SessionError> {
    let company = catalog::select(catalog, rng).ok_or(SessionError::EmptyCatalog)?;
    info!(company_id = company.id(), "starting new round");
    Ok(Round::start(company))
}

/// Read a stored value, treating corruption as absence
fn recover<T: DeserializeOwned, S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<T> {
    read_json(store, key).unwrap_or_else(|err| {
        warn!(%err, "discarding stored value");
        None
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Company;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn apple_catalog() -> Catalog {
        Catalog::new(vec![
            Company::from_fields(&[
                "2",
                "Apple",
                "Technology",
                "1976",
                "Cupertino, California, USA",
                "Tim Cook",
                "$394.3 billion",
                "164,000",
                "White, Silver, Black",
                "Think Different",
            ])
            .unwrap(),
        ])
    }

    fn day(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(5)
    }

    #[test]
    fn first_open_starts_and_saves_round() {
        let catalog = apple_catalog();
        let session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();

        assert!(session.is_fresh());
        assert_eq!(session.round().company().name(), "Apple");
        assert_eq!(session.stats(), &StatsRecord::default());

        let store = session.into_store();
        assert!(store.get(ROUND_KEY).is_some());
        assert!(store.get(LAST_PLAYED_KEY).is_none());
    }

    #[test]
    fn empty_catalog_fails_to_open() {
        let catalog = Catalog::default();
        let result = Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng());
        assert!(matches!(result, Err(SessionError::EmptyCatalog)));
    }

    #[test]
    fn wrong_guess_reports_revealed_hint() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();

        let outcome = session.submit_guess("Google", day(1, 9)).unwrap();
        assert_eq!(
            outcome,
            GuessOutcome::Wrong {
                revealed: Some(HintKind::Headquarters)
            }
        );
    }

    #[test]
    fn rejected_guess_leaves_state_unchanged() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();
        session.submit_guess("Google", day(1, 9)).unwrap();
        let before = session.round().clone();

        assert!(matches!(
            session.submit_guess("google", day(1, 9)),
            Err(SessionError::Guess(GuessError::DuplicateGuess(_)))
        ));
        assert!(matches!(
            session.submit_guess("  ", day(1, 9)),
            Err(SessionError::Guess(GuessError::EmptyGuess))
        ));
        assert_eq!(session.round(), &before);
    }

    #[test]
    fn win_records_stats_and_marker_once() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();

        session.submit_guess("Google", day(1, 9)).unwrap();
        let outcome = session.submit_guess("apple", day(1, 10)).unwrap();
        assert_eq!(outcome, GuessOutcome::Correct);
        assert_eq!(session.stats().played, 1);
        assert_eq!(session.stats().wins_in(2), 1);

        // Further input after the win does not count again
        assert_eq!(
            session.submit_guess("Meta", day(1, 11)).unwrap(),
            GuessOutcome::Ignored
        );
        assert!(session.give_up(day(1, 11)).is_err());
        assert_eq!(session.stats().played, 1);

        let store = session.into_store();
        let stored: StatsRecord = read_json(&store, STATS_KEY).unwrap().unwrap();
        assert_eq!(stored.played, 1);
        assert_eq!(stored.current_streak, 1);
        assert_eq!(
            store.get(LAST_PLAYED_KEY).as_deref(),
            Some("2024-05-01T10:00:00.000Z")
        );
    }

    #[test]
    fn sixth_wrong_guess_is_out_of_guesses() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();

        for guess in ["Google", "Microsoft", "Amazon", "Meta", "IBM"] {
            assert!(matches!(
                session.submit_guess(guess, day(1, 9)).unwrap(),
                GuessOutcome::Wrong { .. }
            ));
        }
        // All hints are out, so the fifth wrong guess disclosed the last one
        assert_eq!(session.round().revealed(), &HintKind::CANONICAL);

        assert_eq!(
            session.submit_guess("Intel", day(1, 9)).unwrap(),
            GuessOutcome::OutOfGuesses
        );
        assert_eq!(session.round().status(), GameStatus::Lost);
        assert_eq!(session.stats().played, 1);
        assert_eq!(session.stats().won, 0);
    }

    #[test]
    fn give_up_counts_as_loss() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();

        session.give_up(day(1, 9)).unwrap();
        assert_eq!(session.round().status(), GameStatus::Lost);
        assert_eq!(session.stats().played, 1);
        assert_eq!(session.stats().current_streak, 0);
    }

    #[test]
    fn same_day_resumes_finished_round() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();
        session.submit_guess("Google", day(1, 9)).unwrap();
        session.submit_guess("Apple", day(1, 9)).unwrap();
        let finished = session.round().to_record();
        let store = session.into_store();

        let resumed = Session::open(&catalog, store, day(1, 20), &mut rng()).unwrap();
        assert!(!resumed.is_fresh());
        assert_eq!(resumed.round().to_record(), finished);
        assert_eq!(resumed.stats().played, 1);
    }

    #[test]
    fn next_day_starts_fresh_round() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();
        session.submit_guess("Apple", day(1, 9)).unwrap();
        let store = session.into_store();

        let next = Session::open(&catalog, store, day(2, 0), &mut rng()).unwrap();
        assert!(next.is_fresh());
        assert_eq!(next.round().status(), GameStatus::Playing);
        assert!(next.round().guesses().is_empty());
        assert_eq!(next.stats().played, 1);
    }

    #[test]
    fn unfinished_round_from_previous_day_is_discarded() {
        let catalog = apple_catalog();

        // Yesterday's completion marker plus an in-progress round
        let mut store = MemoryStore::default()
            .with_entry(LAST_PLAYED_KEY, "2024-05-01T12:00:00.000Z");
        let mut session = Session::open(&catalog, store, day(1, 13), &mut rng()).unwrap();
        session.new_round(&mut rng()).unwrap();
        session.submit_guess("Google", day(1, 13)).unwrap();
        store = session.into_store();

        let next = Session::open(&catalog, store, day(2, 8), &mut rng()).unwrap();
        assert!(next.is_fresh());
        assert!(next.round().guesses().is_empty());
    }

    #[test]
    fn in_progress_round_resumes_same_day() {
        let catalog = apple_catalog();
        let store = MemoryStore::default().with_entry(LAST_PLAYED_KEY, "2024-05-01T08:00:00.000Z");
        let mut session = Session::open(&catalog, store, day(1, 9), &mut rng()).unwrap();
        session.submit_guess("Google", day(1, 9)).unwrap();
        let store = session.into_store();

        let resumed = Session::open(&catalog, store, day(1, 10), &mut rng()).unwrap();
        assert!(!resumed.is_fresh());
        assert_eq!(resumed.round().guesses(), &["Google".to_string()]);
        assert_eq!(resumed.round().revealed().len(), 2);
    }

    #[test]
    fn corrupt_values_fall_back_to_fresh_state() {
        let catalog = apple_catalog();
        let store = MemoryStore::default()
            .with_entry(LAST_PLAYED_KEY, "2024-05-01T08:00:00.000Z")
            .with_entry(ROUND_KEY, "{\"companyId\":")
            .with_entry(STATS_KEY, "[1,2,3]");

        let session = Session::open(&catalog, store, day(1, 9), &mut rng()).unwrap();
        assert!(session.is_fresh());
        assert_eq!(session.stats(), &StatsRecord::default());
    }

    #[test]
    fn saved_round_for_unknown_company_is_replaced() {
        let catalog = apple_catalog();
        let stale = r#"{"companyId":404,"guesses":[],"maxGuesses":6,"status":"playing",
            "revealedHints":["revenue"],
            "availableHints":["headquarters","industry","ceo","colors","hint"]}"#;
        let store = MemoryStore::default()
            .with_entry(LAST_PLAYED_KEY, "2024-05-01T08:00:00.000Z")
            .with_entry(ROUND_KEY, stale);

        let session = Session::open(&catalog, store, day(1, 9), &mut rng()).unwrap();
        assert!(session.is_fresh());
        assert_eq!(session.round().company().id(), 2);
    }

    /// Store that refuses writes to one key
    struct RefusingStore {
        inner: MemoryStore,
        refused: &'static str,
    }

    impl KeyValueStore for RefusingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            if key == self.refused {
                return Err(StoreError::Io(std::io::Error::other("disk full")));
            }
            self.inner.set(key, value)
        }
    }

    #[test]
    fn failed_stats_write_keeps_round_in_step_with_store() {
        let catalog = apple_catalog();
        let store = RefusingStore {
            inner: MemoryStore::default(),
            refused: STATS_KEY,
        };
        let mut session = Session::open(&catalog, store, day(1, 9), &mut rng()).unwrap();

        assert!(matches!(
            session.submit_guess("Apple", day(1, 9)),
            Err(SessionError::Store(_))
        ));
        assert_eq!(session.round().status(), GameStatus::Won);
        assert_eq!(session.stats().won, 1);

        // A finished round ignores further guesses, so nothing is counted twice
        assert_eq!(
            session.submit_guess("Apple", day(1, 9)).unwrap(),
            GuessOutcome::Ignored
        );
        assert_eq!(session.stats().won, 1);

        let store = session.into_store();
        let saved: RoundRecord = read_json(&store, ROUND_KEY).unwrap().unwrap();
        assert_eq!(saved.status, GameStatus::Won);
        assert!(store.get(STATS_KEY).is_none());
    }

    #[test]
    fn tampered_saved_rounds_are_replaced() {
        let catalog = apple_catalog();
        let duplicated = r#"{"companyId":2,"guesses":["Google","google","Meta"],
            "maxGuesses":6,"status":"playing","revealedHints":["revenue"],
            "availableHints":["headquarters","industry","ceo","colors","hint"]}"#;
        let unearned = r#"{"companyId":2,"guesses":[],"maxGuesses":6,"status":"won",
            "revealedHints":["revenue"],
            "availableHints":["headquarters","industry","ceo","colors","hint"]}"#;

        for saved in [duplicated, unearned] {
            let store = MemoryStore::default()
                .with_entry(LAST_PLAYED_KEY, "2024-05-01T08:00:00.000Z")
                .with_entry(ROUND_KEY, saved);

            let session = Session::open(&catalog, store, day(1, 9), &mut rng()).unwrap();
            assert!(session.is_fresh());
            assert_eq!(session.round().status(), GameStatus::Playing);
            assert!(session.round().guesses().is_empty());
        }
    }

    #[test]
    fn malformed_marker_starts_new_round() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();
        session.submit_guess("Google", day(1, 9)).unwrap();
        let mut store = session.into_store();
        store.set(LAST_PLAYED_KEY, "not a date").unwrap();

        let next = Session::open(&catalog, store, day(1, 10), &mut rng()).unwrap();
        assert!(next.is_fresh());
    }

    #[test]
    fn play_again_keeps_stats() {
        let catalog = apple_catalog();
        let mut session =
            Session::open(&catalog, MemoryStore::default(), day(1, 9), &mut rng()).unwrap();
        session.submit_guess("Apple", day(1, 9)).unwrap();

        session.new_round(&mut rng()).unwrap();
        assert_eq!(session.round().status(), GameStatus::Playing);
        session.submit_guess("Apple", day(1, 10)).unwrap();

        assert_eq!(session.stats().played, 2);
        assert_eq!(session.stats().current_streak, 2);
        assert_eq!(session.stats().max_streak, 2);
    }
}
