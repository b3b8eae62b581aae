//! Simple interactive CLI mode
//!
//! Text-based game without the TUI

use crate::core::{GameStatus, HintKind};
use crate::output::{print_hints, print_reveal};
use crate::session::{GuessOutcome, Session, SessionError};
use crate::storage::KeyValueStore;
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if there's an I/O error reading user input or if the
/// game state cannot be saved.
pub fn run_simple<S: KeyValueStore>(session: &mut Session<'_, S>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                 Corpdle - Guess the Company                  ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!(
        "Guess the company in {} tries. Each wrong guess reveals a new hint.",
        session.round().max_guesses()
    );
    println!("Commands: 'give up' to reveal the answer, 'quit' to exit\n");

    if session.is_fresh() {
        println!("🏢 A new company has been selected. Good luck!\n");
    } else {
        println!("🔄 Resuming today's round.\n");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        if session.round().is_over() {
            print_outcome(session);

            match prompt(&mut input, "Play again? (yes/no)")?.as_deref() {
                Some("yes" | "y") => {
                    session.new_round(&mut rand::rng())?;
                    println!("\n🔄 New company selected! Good luck!\n");
                    continue;
                }
                _ => {
                    println!("\n👋 Thanks for playing!\n");
                    return Ok(());
                }
            }
        }

        let round = session.round();
        println!("────────────────────────────────────────────────────────────");
        println!(
            "Guess {}/{}",
            round.guesses().len() + 1,
            round.max_guesses()
        );
        println!("────────────────────────────────────────────────────────────");
        print_hints(round);

        if !round.guesses().is_empty() {
            println!("\nGuesses so far:");
            for (i, guess) in round.guesses().iter().enumerate() {
                println!("  {}. {} {}", i + 1, "✗".red(), guess);
            }
        }
        println!();

        let Some(line) = prompt(&mut input, "Your guess")? else {
            println!("\n👋 Thanks for playing!\n");
            return Ok(());
        };

        match line.to_lowercase().as_str() {
            "quit" | "q" | "exit" => {
                println!("\n👋 Progress saved. Come back later!\n");
                return Ok(());
            }
            "give up" | "giveup" | "surrender" => {
                session.give_up(Utc::now())?;
                continue;
            }
            _ => {}
        }

        match session.submit_guess(&line, Utc::now()) {
            Ok(GuessOutcome::Correct | GuessOutcome::OutOfGuesses | GuessOutcome::Ignored) => {}
            Ok(GuessOutcome::Wrong { revealed }) => {
                println!("\n{} {} is not the company.", "✗".red().bold(), line.trim());
                if let Some(kind) = revealed {
                    announce_hint(kind);
                }
                println!();
            }
            Err(SessionError::Guess(err)) => {
                println!("\n❌ {err}\n");
            }
            Err(err) => return Err(err.into()),
        }
    }
}

fn announce_hint(kind: HintKind) {
    println!(
        "{} New hint revealed: {}",
        "✨".bright_yellow(),
        kind.label().bright_yellow()
    );
}

fn print_outcome<S: KeyValueStore>(session: &Session<'_, S>) {
    let round = session.round();
    let stats = session.stats();

    println!("\n{}", "═".repeat(70).bright_cyan());
    match round.status() {
        GameStatus::Won => {
            println!(
                "{}",
                "        🎉 🏆  C O M P A N Y   F O U N D !  🏆 🎉        "
                    .bright_green()
                    .bold()
            );
            let count = round.guesses().len();
            println!(
                "\n  Solved in {} {}",
                count.to_string().bright_cyan().bold(),
                if count == 1 { "guess" } else { "guesses" }
            );
        }
        GameStatus::Lost | GameStatus::Playing => {
            println!("{}", "                    ❌  G A M E   O V E R  ❌".red().bold());
        }
    }
    println!("{}", "═".repeat(70).bright_cyan());

    print_reveal(round.company());

    println!(
        "\n  Played {} | Win rate {}% | Streak {} (max {})",
        stats.played,
        stats.win_percentage(),
        stats.current_streak,
        stats.max_streak
    );
    println!();
}

/// Read one trimmed line; `None` on end of input
fn prompt<R: BufRead>(input: &mut R, label: &str) -> Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(line.trim().to_string()))
}
