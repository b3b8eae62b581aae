//! Formatting utilities for terminal output

use crate::core::{Company, HintKind};
use chrono::TimeDelta;

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }

    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Format a countdown as hours and minutes, e.g. `5h 30m`
#[must_use]
pub fn format_countdown(remaining: TimeDelta) -> String {
    let minutes = remaining.num_minutes().max(0);
    format!("{}h {}m", minutes / 60, minutes % 60)
}

/// `Label: value` line for a disclosed hint
#[must_use]
pub fn hint_line(company: &Company, kind: HintKind) -> String {
    format!("{}: {}", kind.label(), company.hint_value(kind))
}

/// Placeholder shown for a hint that is still hidden
#[must_use]
pub fn locked_hint_line(kind: HintKind) -> String {
    format!("{}: ???", kind.label())
}
