//! TUI rendering with ratatui
//!
//! Hint board, guess history and statistics for the game interface.

use super::app::{App, InputMode, MessageStyle};
use crate::core::{GameStatus, MAX_GUESSES, time_until_next_round};
use crate::output::formatters::format_countdown;
use crate::storage::KeyValueStore;
use chrono::Utc;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(12),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Hints and guesses
            Constraint::Percentage(40), // Progress, stats, messages
        ])
        .split(chunks[1]);

    render_main_panel(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);

    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🏢 CORPDLE - Guess the Company")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_main_panel<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Hints or reveal
            Constraint::Percentage(40), // Guesses
        ])
        .split(area);

    if app.session.round().is_over() {
        render_reveal(f, app, chunks[0]);
    } else {
        render_hints(f, app, chunks[0]);
    }
    render_guesses(f, app, chunks[1]);
}

fn render_hints<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let round = app.session.round();
    let company = round.company();

    let mut lines: Vec<Line> = round
        .revealed()
        .iter()
        .map(|&kind| {
            Line::from(vec![
                Span::styled(
                    format!("{:<15}", kind.label()),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    company.hint_value(kind).to_string(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();

    lines.extend(round.available().iter().map(|&kind| {
        Line::from(vec![
            Span::styled(
                format!("{:<15}", kind.label()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled("🔒 locked", Style::default().fg(Color::DarkGray)),
        ])
    }));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Hints ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_reveal<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let round = app.session.round();
    let company = round.company();

    let (title, color) = match round.status() {
        GameStatus::Won => (" 🎉 You got it! ", Color::Green),
        GameStatus::Lost | GameStatus::Playing => (" The answer was ", Color::Red),
    };

    let field = |label: &str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{label:<15}"), Style::default().fg(Color::Cyan)),
            Span::raw(value.to_string()),
        ])
    };

    let content = vec![
        Line::from(Span::styled(
            company.name().to_uppercase(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Industry", company.industry()),
        field("Founded", company.founded()),
        field("Headquarters", company.headquarters()),
        field("CEO", company.ceo()),
        field("Revenue", company.revenue()),
        field("Employees", company.employees()),
        field("Brand Colors", company.colors()),
        field("Slogan", company.slogan()),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

fn render_guesses<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let round = app.session.round();
    let last = round.guesses().len().saturating_sub(1);
    let won = round.status() == GameStatus::Won;

    let items: Vec<ListItem> = round
        .guesses()
        .iter()
        .enumerate()
        .map(|(i, guess)| {
            let (marker, style) = if won && i == last {
                ("✓", Style::default().fg(Color::Green))
            } else {
                ("✗", Style::default().fg(Color::Red))
            };
            ListItem::new(format!("{}. {marker} {guess}", i + 1)).style(style)
        })
        .collect();

    let guesses = List::new(items).block(
        Block::default()
            .title(format!(
                " Guesses ({}/{}) ",
                round.guesses().len(),
                round.max_guesses()
            ))
            .borders(Borders::ALL),
    );

    f.render_widget(guesses, area);
}

fn render_info_panel<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Attempts gauge
            Constraint::Percentage(50), // Statistics
            Constraint::Min(5),         // Messages
        ])
        .split(area);

    render_attempts(f, app, chunks[0]);
    render_stats(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_attempts<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let round = app.session.round();
    let used = round.guesses().len();
    let max = round.max_guesses();
    let percent = (used * 100 / max.max(1)).min(100) as u16;

    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" Attempts ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .percent(percent)
        .label(format!("{used}/{max} used | {} left", round.guesses_remaining()));

    f.render_widget(gauge, area);
}

fn render_stats<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let stats = app.session.stats();
    let max = stats.max_bucket();
    let bar_width = area.width.saturating_sub(12) as u32;

    let mut lines = vec![
        Line::from(format!(
            "Played {} | Win {}% | Streak {} | Max {}",
            stats.played,
            stats.win_percentage(),
            stats.current_streak,
            stats.max_streak
        )),
        Line::from(""),
    ];

    for guesses in 1..=MAX_GUESSES {
        let count = stats.wins_in(guesses);
        let filled = (count * bar_width / max) as usize;
        lines.push(Line::from(vec![
            Span::raw(format!("{guesses} ")),
            Span::styled("█".repeat(filled.max(1)), Style::default().fg(Color::Green)),
            Span::raw(format!(" {count}")),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );

    f.render_widget(paragraph, area);
}

fn render_messages<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Hint => Style::default().fg(Color::Yellow),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_input<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::GameOver => (
            " Round over | Press 'n' for a new company or 'q' to quit ",
            "",
            Color::Green,
        ),
        InputMode::Guessing => (
            " Enter a company name | Ctrl+G to give up ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );

    f.render_widget(input, area);
}

fn render_status<S: KeyValueStore>(f: &mut Frame, app: &App<'_, S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let mode_text = match app.status() {
        GameStatus::Playing => "Status: Playing",
        GameStatus::Won => "Status: Won",
        GameStatus::Lost => "Status: Lost",
    };
    let mode = Paragraph::new(mode_text).alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let catalog_text = format!("{} companies", app.session.catalog().len());
    let catalog = Paragraph::new(catalog_text).alignment(Alignment::Center);
    f.render_widget(catalog, chunks[1]);

    let countdown_text = format!(
        "Next company in {}",
        format_countdown(time_until_next_round(Utc::now()))
    );
    let countdown = Paragraph::new(countdown_text).alignment(Alignment::Center);
    f.render_widget(countdown, chunks[2]);

    let help_text = match app.input_mode {
        InputMode::GameOver => "q: Quit | n: New Company",
        InputMode::Guessing => "Esc: Quit | Enter: Guess | Ctrl+G: Give Up",
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}
