//! Application state and event handling

pub mod command;
pub mod input;
pub mod state;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{ApiClient, ApiError, TokenStore};
use crate::config::Config;
use crate::deck::{validate_source_text, validate_topic};
use crate::study::HandoffStore;
use crate::ui;
use command::{Command, ParseResult, parse_command};
use input::{Action, list_key_with_modifiers, study_key_with_modifiers};
use state::{AppState, DetailState, PendingRequest, Screen};

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Current application state
    state: AppState,

    /// Flashcard service client
    client: ApiClient,

    /// Handoff slot feeding study mode
    handoff: HandoffStore,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: Config) -> Result<Self> {
        let mut client = ApiClient::from_config(&config)?;
        let mut state = AppState::default();

        match TokenStore::get() {
            Ok(token) => {
                client = client.with_token(token);
                state.authenticated = true;
                state.queue(PendingRequest::LoadSets);
            }
            Err(ApiError::NotAuthenticated) => {
                state.command_line.set_error("Not logged in. Run `flashdeck login` first");
            }
            Err(e) => state.command_line.set_error(e.to_string()),
        }

        let handoff = HandoffStore::default_location()?;
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, state, client, handoff, terminal })
    }

    /// Open straight into study mode on the pending handoff bundle
    pub fn start_in_study(&mut self) {
        // Failure is already on the command line; the sets screen stays up
        let _ = self.state.start_study_from(&self.handoff);
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        let theme = self.config.active_theme();

        loop {
            // Full repaint from state on every pass
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &theme);
            })?;

            // Queued requests run after their loading message has been drawn
            if let Some(request) = self.state.pending.take() {
                self.run_request(request).await;
                continue;
            }

            if event::poll(std::time::Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        match self.handle_key(key) {
                            Ok(true) => break, // Exit requested
                            Ok(false) => {}
                            Err(e) => {
                                tracing::error!("Error handling key: {:#}", e);
                                self.state.command_line.set_error(e.to_string());
                            }
                        }
                    }
                }
            }
        }

        self.restore_terminal()?;
        Ok(())
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool> {
        if self.state.command_line.is_input_mode() {
            return self.handle_command_input(key.code);
        }

        let vim_mode = self.config.vim_mode;
        let action = match self.state.screen {
            Screen::Study => study_key_with_modifiers(key.code, key.modifiers, vim_mode),
            _ => list_key_with_modifiers(key.code, key.modifiers, vim_mode),
        };
        let Some(action) = action else {
            return Ok(false);
        };

        match action {
            Action::Quit => return Ok(true),
            Action::Command => self.state.command_line.enter_command_mode(),
            Action::Help => self.state.show_help(),
            _ => match self.state.screen {
                Screen::Study => {
                    self.state.handle_study_action(action);
                }
                Screen::Sets => self.handle_sets_action(action),
                Screen::Detail => self.handle_detail_action(action),
                Screen::Help => {
                    if action == Action::Back {
                        self.state.close_help();
                    }
                }
            },
        }
        Ok(false)
    }

    fn handle_sets_action(&mut self, action: Action) {
        match action {
            Action::Down => self.state.sets.select_next(),
            Action::Up => self.state.sets.select_previous(),
            Action::Select => {
                if let Some(set) = self.state.sets.selected_set() {
                    let detail = DetailState::from_set(set);
                    self.state.show_detail(detail);
                }
            }
            Action::Study => self.study_current(),
            Action::Refresh => self.state.queue(PendingRequest::LoadSets),
            _ => {}
        }
    }

    fn handle_detail_action(&mut self, action: Action) {
        let Some(detail) = self.state.detail.as_mut() else {
            self.state.screen = Screen::Sets;
            return;
        };

        match action {
            Action::Down => detail.select_next(),
            Action::Up => detail.select_previous(),
            Action::ToggleReveal | Action::Select => detail.toggle_selected(),
            Action::Study => self.study_current(),
            Action::Back => self.state.screen = Screen::Sets,
            _ => {}
        }
    }

    fn study_current(&mut self) {
        match self.state.study_source() {
            Some((cards, topic)) => {
                // Failure is already on the command line
                let _ = self.state.enter_study(&self.handoff, cards, topic);
            }
            None => self.state.command_line.set_error("Nothing selected to study"),
        }
    }

    /// Handle a key while typing a : command
    fn handle_command_input(&mut self, key: KeyCode) -> Result<bool> {
        let line = &mut self.state.command_line;
        match key {
            KeyCode::Esc => line.exit_command_mode(),
            KeyCode::Enter => {
                let input = line.input.clone();
                line.exit_command_mode();
                return self.execute_command(&input);
            }
            KeyCode::Backspace => {
                if line.input.is_empty() {
                    line.exit_command_mode();
                } else {
                    line.delete_char();
                }
            }
            KeyCode::Left => line.move_left(),
            KeyCode::Right => line.move_right(),
            KeyCode::Char(c) => line.insert_char(c),
            _ => {}
        }
        Ok(false)
    }

    /// Run a parsed : command, returns true if should exit
    fn execute_command(&mut self, input: &str) -> Result<bool> {
        let command = match parse_command(input) {
            ParseResult::Ok(command) => command,
            ParseResult::UnknownCommand(cmd) => {
                self.state.command_line.set_error(format!("Unknown command: {}", cmd));
                return Ok(false);
            }
            ParseResult::MissingArgument(cmd) => {
                self.state.command_line.set_error(format!(":{} needs an argument", cmd));
                return Ok(false);
            }
        };

        match command {
            Command::Quit => return Ok(true),
            Command::Nop => self.state.command_line.clear_message(),
            Command::Help => self.state.show_help(),
            Command::Study => self.study_current(),
            Command::Refresh => self.state.queue(PendingRequest::LoadSets),
            Command::Logout => {
                self.logout()?;
                self.state.command_line.set_message("Logged out");
            }
            Command::Generate(text) => match validate_source_text(&text) {
                Ok(text) => self.state.queue(PendingRequest::Generate(text.to_string())),
                Err(e) => self.state.command_line.set_error(e.to_string()),
            },
            Command::Save(topic) => {
                let has_cards =
                    self.state.detail.as_ref().is_some_and(|detail| !detail.cards.is_empty());
                if !has_cards {
                    self.state.command_line.set_error("No flashcards to save");
                    return Ok(false);
                }
                match validate_topic(&topic) {
                    Ok(topic) => self.state.queue(PendingRequest::Save(topic.to_string())),
                    Err(e) => self.state.command_line.set_error(e.to_string()),
                }
            }
        }
        Ok(false)
    }

    /// Run a queued network request and fold its result into state
    async fn run_request(&mut self, request: PendingRequest) {
        let result = match request {
            PendingRequest::LoadSets => self.client.list_sets().await.map(|sets| {
                let count = sets.len();
                self.state.sets.replace(sets);
                format!("{} saved sets", count)
            }),
            PendingRequest::Generate(text) => self.client.generate(&text).await.map(|cards| {
                let count = cards.len();
                self.state.show_detail(DetailState::generated(cards));
                format!("Generated {} flashcards. :save <title> to keep them", count)
            }),
            PendingRequest::Save(topic) => {
                let cards = self.state.detail.as_ref().map(|d| d.cards.clone()).unwrap_or_default();
                self.client.save_set(&topic, &cards).await.map(|saved| {
                    tracing::info!(id = saved.id, "Set saved");
                    if let Some(detail) = self.state.detail.as_mut() {
                        detail.topic = topic;
                    }
                    // Pick the new set up in the list
                    self.state.pending = Some(PendingRequest::LoadSets);
                    "Flashcards saved".to_string()
                })
            }
        };

        match result {
            Ok(message) => self.state.command_line.set_message(message),
            Err(e) => self.handle_api_error(e),
        }
    }

    fn handle_api_error(&mut self, error: ApiError) {
        tracing::warn!("Request failed: {}", error);
        if error.requires_reauth() {
            if let Err(e) = self.logout() {
                tracing::error!("{:#}", e);
            }
        }
        self.state.command_line.set_error(error_message(&error));
    }

    /// Drop the token, any pending handoff and the cached sets
    fn logout(&mut self) -> Result<()> {
        TokenStore::clear()?;
        self.handoff.clear()?;
        self.client = ApiClient::from_config(&self.config)?;
        self.state.authenticated = false;
        self.state.sets = Default::default();
        self.state.detail = None;
        self.state.exit_study();
        self.state.screen = Screen::Sets;
        Ok(())
    }
}

/// Command line text for a failed request, with a hint on what to do next
fn error_message(error: &ApiError) -> String {
    if error.requires_reauth() {
        format!("{}. Run `flashdeck login` to continue", error)
    } else if error.is_recoverable() {
        format!("{}. Try again with :refresh or by repeating the command", error)
    } else {
        error.to_string()
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
