//! Corpdle
//!
//! A daily company guessing game: one company is picked per UTC day, and
//! every wrong guess discloses another fact about it until the player wins
//! or runs out of attempts.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use corpdle::catalog::Catalog;
//! use corpdle::session::Session;
//! use corpdle::storage::MemoryStore;
//!
//! let catalog = Catalog::embedded();
//! let mut session =
//!     Session::open(&catalog, MemoryStore::default(), chrono::Utc::now(), &mut rand::rng())
//!         .unwrap();
//!
//! let outcome = session.submit_guess("Apple", chrono::Utc::now()).unwrap();
//! println!("{outcome:?}");
//! ```

// Core game rules
pub mod core;

// Company catalog and selection
pub mod catalog;

// Durable key/value storage
pub mod storage;

// Round orchestration over a store
pub mod session;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
