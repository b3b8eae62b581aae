//! Display functions for game state and command results

use super::formatters::{create_progress_bar, format_countdown, hint_line, locked_hint_line};
use crate::commands::AuditResult;
use crate::core::{Company, MAX_GUESSES, Round, StatsRecord, time_until_next_round};
use chrono::{DateTime, Utc};
use colored::Colorize;

/// Print lifetime statistics with the guess distribution
pub fn print_stats(stats: &StatsRecord, now: DateTime<Utc>) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "YOUR STATISTICS".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    if stats.played == 0 {
        println!("\n  No games played yet. Play your first round to start tracking.");
    } else {
        println!("\n📊 {}", "Performance:".bright_cyan().bold());
        println!("   Played:          {}", stats.played);
        println!(
            "   Win rate:        {}",
            format!("{}%", stats.win_percentage()).bright_yellow().bold()
        );
        println!(
            "   Current streak:  {}",
            format!("{}", stats.current_streak).green()
        );
        println!(
            "   Max streak:      {}",
            format!("{}", stats.max_streak).yellow()
        );

        println!("\n📈 {}", "Guess distribution:".bright_cyan().bold());
        let max = f64::from(stats.max_bucket());
        for guesses in 1..=MAX_GUESSES {
            let count = stats.wins_in(guesses);
            let bar = create_progress_bar(f64::from(count), max, 40);
            println!("   {guesses}: {} {count:4}", bar.green());
        }
    }

    println!(
        "\n⏳ Next company in {}",
        format_countdown(time_until_next_round(now)).bright_white()
    );
}

/// Print disclosed hints, with placeholders for hidden ones
pub fn print_hints(round: &Round<'_>) {
    let company = round.company();
    for &kind in round.revealed() {
        println!("  {} {}", "•".bright_cyan(), hint_line(company, kind));
    }
    for &kind in round.available() {
        println!("  {} {}", "•".bright_black(), locked_hint_line(kind).bright_black());
    }
}

/// Print the full company card shown after a round ends
pub fn print_reveal(company: &Company) {
    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "The company was {}",
        company.name().to_uppercase().bright_yellow().bold()
    );
    println!("{}", "─".repeat(60).cyan());
    println!("  Industry:      {}", company.industry());
    println!("  Founded:       {}", company.founded());
    println!("  Headquarters:  {}", company.headquarters());
    println!("  CEO:           {}", company.ceo());
    println!("  Revenue:       {}", company.revenue());
    println!("  Employees:     {}", company.employees());
    println!(
        "  Brand colors:  {}",
        company.brand_colors().collect::<Vec<_>>().join(" · ")
    );
    println!("  Slogan:        \"{}\"", company.slogan().italic());
}

/// Print the result of a catalog audit
pub fn print_audit_result(result: &AuditResult) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "CATALOG AUDIT".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n   Companies:        {}", result.total_companies);
    println!("   Pairs compared:   {}", result.pairs_checked);
    println!("   Edit threshold:   {}", result.threshold);
    println!("   Time taken:       {:.2}s", result.duration.as_secs_f64());

    let collisions: Vec<_> = result.collisions().collect();
    if !collisions.is_empty() {
        println!("\n❌ {}", "Identical after normalization:".red().bold());
        for miss in collisions {
            println!("   • {} ⇄ {}", miss.first, miss.second);
        }
    }

    let close: Vec<_> = result
        .near_misses
        .iter()
        .filter(|miss| !miss.is_collision())
        .collect();
    if !close.is_empty() {
        println!("\n⚠️  {}", "Within edit threshold:".yellow().bold());
        for miss in close {
            println!("   • {} ⇄ {} (distance {})", miss.first, miss.second, miss.distance);
        }
    }

    println!();
    if result.is_clean() {
        println!("{}", "✅ Every answer is uniquely guessable".green().bold());
    } else {
        println!("{}", "❌ Catalog has ambiguous answers".red().bold());
    }
}
