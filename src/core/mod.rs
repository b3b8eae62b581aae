//! Core domain types for Corpdle
//!
//! This module contains the game rules as pure value transformations.
//! Nothing here touches the terminal or the filesystem; persistence and
//! presentation read and write the values produced here.

mod company;
mod hint;
pub mod matcher;
mod rollover;
mod round;
mod stats;

pub use company::{Company, CompanyError, CompanyId};
pub use hint::{HintKind, HintScheduler};
pub use rollover::{format_marker, parse_marker, should_start_new_round, time_until_next_round};
pub use round::{GameStatus, GuessError, MAX_GUESSES, Round, RoundRecord, Transition};
pub use stats::{StatsRecord, record_completion};
