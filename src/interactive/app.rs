//! TUI application state and logic

use crate::core::GameStatus;
use crate::session::{GuessOutcome, Session, SessionError};
use crate::storage::KeyValueStore;
use anyhow::Result;
use chrono::Utc;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Messages kept in the log panel
const MESSAGE_LIMIT: usize = 5;

/// Application state
pub struct App<'a, S: KeyValueStore> {
    pub session: Session<'a, S>,
    pub input_buffer: String,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    pub input_mode: InputMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Guessing,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Hint,
    Success,
    Error,
}

impl<'a, S: KeyValueStore> App<'a, S> {
    #[must_use]
    pub fn new(session: Session<'a, S>) -> Self {
        let mut app = Self {
            session,
            input_buffer: String::new(),
            messages: Vec::new(),
            should_quit: false,
            input_mode: InputMode::Guessing,
        };

        if app.session.is_fresh() {
            app.add_message("A new company has been selected. Good luck!", MessageStyle::Info);
        } else {
            app.add_message("Welcome back! Resuming today's round.", MessageStyle::Info);
        }
        app.sync_mode();
        app
    }

    fn sync_mode(&mut self) {
        self.input_mode = if self.session.round().is_over() {
            InputMode::GameOver
        } else {
            InputMode::Guessing
        };
    }

    pub fn submit_input(&mut self) {
        let guess = self.input_buffer.clone();

        match self.session.submit_guess(&guess, Utc::now()) {
            Ok(GuessOutcome::Correct) => {
                let count = self.session.round().guesses().len();
                let celebration = match count {
                    1 => "🎯 HOLE IN ONE! First try! 🌟",
                    2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                    3 => "✨ SPLENDID! Three guesses! ✨",
                    4 => "👏 GREAT JOB! Four guesses! 👏",
                    5 => "🎉 NICE WORK! Five guesses! 🎉",
                    _ => "😅 PHEW! Got it at the end! 😅",
                };
                self.add_message(celebration, MessageStyle::Success);
                self.add_message("Press 'n' for a new company or 'q' to quit.", MessageStyle::Info);
                self.input_buffer.clear();
            }
            Ok(GuessOutcome::OutOfGuesses) => {
                let name = self.session.round().company().name().to_string();
                self.add_message(
                    &format!("Game over! The company was {name}"),
                    MessageStyle::Error,
                );
                self.input_buffer.clear();
            }
            Ok(GuessOutcome::Wrong { revealed }) => {
                self.add_message(
                    &format!("{} is not the company", guess.trim()),
                    MessageStyle::Error,
                );
                if let Some(kind) = revealed {
                    self.add_message(
                        &format!("New hint revealed: {}", kind.label()),
                        MessageStyle::Hint,
                    );
                }
                self.input_buffer.clear();
            }
            Ok(GuessOutcome::Ignored) => {}
            Err(SessionError::Guess(err)) => {
                self.add_message(&err.to_string(), MessageStyle::Error);
            }
            Err(err) => {
                self.add_message(&format!("Could not save: {err}"), MessageStyle::Error);
            }
        }

        self.sync_mode();
    }

    pub fn give_up(&mut self) {
        match self.session.give_up(Utc::now()) {
            Ok(()) => {
                let name = self.session.round().company().name().to_string();
                self.add_message(
                    &format!("Game over! The company was {name}"),
                    MessageStyle::Error,
                );
                self.input_buffer.clear();
            }
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
        self.sync_mode();
    }

    pub fn new_game(&mut self) {
        self.messages.clear();
        match self.session.new_round(&mut rand::rng()) {
            Ok(()) => self.add_message("New company selected! Good luck!", MessageStyle::Success),
            Err(err) => self.add_message(&err.to_string(), MessageStyle::Error),
        }
        self.input_buffer.clear();
        self.sync_mode();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MESSAGE_LIMIT {
            self.messages.remove(0);
        }
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.session.round().status()
    }
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: KeyValueStore>(app: App<'_, S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    mut app: App<'_, S>,
) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                app.should_quit = true;
            }

            match app.input_mode {
                InputMode::GameOver => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('n') => {
                        app.new_game();
                    }
                    _ => {
                        // Round is over, ignore other keys
                    }
                },
                InputMode::Guessing => match key.code {
                    KeyCode::Esc => {
                        app.should_quit = true;
                    }
                    KeyCode::Char('g') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.give_up();
                    }
                    KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.input_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.input_buffer.pop();
                    }
                    KeyCode::Enter => {
                        app.submit_input();
                    }
                    _ => {}
                },
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
