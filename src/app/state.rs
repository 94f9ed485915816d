//! Application state definitions

use crate::deck::{Card, DEFAULT_TOPIC, FlashcardSet};
use crate::study::{HandoffStore, StudyError, StudyHandoff, StudySession};

use super::input::Action;

/// Which screen is currently displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Saved sets list
    #[default]
    Sets,
    /// Cards of one set, or of a fresh generation
    Detail,
    /// Study mode over one set
    Study,
    Help,
}

/// Network work queued by a key press, run after the next redraw
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingRequest {
    /// Reload the saved sets list
    LoadSets,
    /// Generate cards from text
    Generate(String),
    /// Save the cards on the detail screen under a topic
    Save(String),
}

impl PendingRequest {
    /// Message shown while the request runs
    pub fn loading_message(&self) -> &'static str {
        match self {
            Self::LoadSets => "Loading your flashcards...",
            Self::Generate(_) => "Generating flashcards...",
            Self::Save(_) => "Saving flashcards...",
        }
    }
}

/// State for the saved sets list
#[derive(Debug, Clone, Default)]
pub struct SetsState {
    /// Sets as last loaded from the service
    pub sets: Vec<FlashcardSet>,
    /// Selected row
    pub selected: usize,
    /// Whether a load has completed at least once
    pub loaded: bool,
}

impl SetsState {
    /// Replace the list, keeping the selection in range
    pub fn replace(&mut self, sets: Vec<FlashcardSet>) {
        self.sets = sets;
        self.loaded = true;
        self.selected = self.selected.min(self.sets.len().saturating_sub(1));
    }

    pub fn selected_set(&self) -> Option<&FlashcardSet> {
        self.sets.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.sets.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Where the cards on the detail screen came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSource {
    /// A saved set, with its summary line
    Saved { id: i64, summary: String },
    /// Freshly generated and not yet saved
    Generated,
}

/// State for the detail screen: every card listed, each with its own reveal
#[derive(Debug, Clone)]
pub struct DetailState {
    pub topic: String,
    pub cards: Vec<Card>,
    /// Per-card answer visibility
    pub revealed: Vec<bool>,
    pub selected: usize,
    pub source: DetailSource,
}

impl DetailState {
    /// Detail view of a saved set
    pub fn from_set(set: &FlashcardSet) -> Self {
        Self::new(
            set.topic.clone(),
            set.cards.clone(),
            DetailSource::Saved { id: set.id, summary: set.summary() },
        )
    }

    /// Detail view of freshly generated cards
    pub fn generated(cards: Vec<Card>) -> Self {
        Self::new(DEFAULT_TOPIC.to_string(), cards, DetailSource::Generated)
    }

    fn new(topic: String, cards: Vec<Card>, source: DetailSource) -> Self {
        let revealed = vec![false; cards.len()];
        Self { topic, cards, revealed, selected: 0, source }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.cards.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Flip the selected card's face
    pub fn toggle_selected(&mut self) {
        if let Some(revealed) = self.revealed.get_mut(self.selected) {
            *revealed = !*revealed;
        }
    }

    pub fn is_generated(&self) -> bool {
        self.source == DetailSource::Generated
    }
}

/// Command line mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommandMode {
    /// Showing status or a hint
    #[default]
    Normal,
    /// Accepting a : command
    Command,
}

/// State for the command line at the bottom of the screen
#[derive(Debug, Clone, Default)]
pub struct CommandLineState {
    pub mode: CommandMode,
    /// Typed command, without the leading ':'
    pub input: String,
    /// Cursor position in characters
    pub cursor: usize,
    /// Status or error to display in normal mode
    pub message: Option<String>,
    pub is_error: bool,
}

impl CommandLineState {
    pub fn enter_command_mode(&mut self) {
        self.mode = CommandMode::Command;
        self.input.clear();
        self.cursor = 0;
        self.message = None;
    }

    pub fn exit_command_mode(&mut self) {
        self.mode = CommandMode::Normal;
        self.input.clear();
        self.cursor = 0;
    }

    pub fn is_input_mode(&self) -> bool {
        self.mode == CommandMode::Command
    }

    pub fn set_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = false;
    }

    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
        self.is_error = true;
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.input.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.input.len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.input.insert(at, c);
        self.cursor += 1;
    }

    /// Backspace
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.input.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }
}

/// Full application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Current screen
    pub screen: Screen,

    /// Screen to return to when study is closed
    pub return_screen: Screen,

    /// Screen to return to when help is closed
    pub help_return: Screen,

    /// Saved sets list
    pub sets: SetsState,

    /// Detail screen contents (if any)
    pub detail: Option<DetailState>,

    /// Active study session; dropped when study mode is left
    pub study: Option<StudySession>,

    /// Command line state
    pub command_line: CommandLineState,

    /// Request to run after the next redraw
    pub pending: Option<PendingRequest>,

    /// Whether an access token is available
    pub authenticated: bool,
}

impl AppState {
    /// Queue a request and show its loading message
    pub fn queue(&mut self, request: PendingRequest) {
        self.command_line.set_message(request.loading_message());
        self.pending = Some(request);
    }

    /// Open the detail screen
    pub fn show_detail(&mut self, detail: DetailState) {
        self.detail = Some(detail);
        self.screen = Screen::Detail;
    }

    /// Open help over the current screen
    pub fn show_help(&mut self) {
        if self.screen != Screen::Help {
            self.help_return = self.screen;
            self.screen = Screen::Help;
        }
    }

    /// Close help
    pub fn close_help(&mut self) {
        if self.screen == Screen::Help {
            self.screen = self.help_return;
        }
    }

    /// Cards and topic a study session would start from on this screen
    pub fn study_source(&self) -> Option<(Vec<Card>, String)> {
        match self.screen {
            Screen::Sets => {
                self.sets.selected_set().map(|set| (set.cards.clone(), set.topic.clone()))
            }
            Screen::Detail => {
                self.detail.as_ref().map(|detail| (detail.cards.clone(), detail.topic.clone()))
            }
            Screen::Study | Screen::Help => None,
        }
    }

    /// Hand the cards off and enter study mode
    ///
    /// On failure the current screen stays and the error is shown.
    pub fn enter_study(
        &mut self,
        store: &HandoffStore,
        cards: Vec<Card>,
        topic: String,
    ) -> Result<(), StudyError> {
        let handoff = StudyHandoff::new(cards, topic);
        if let Err(e) = store.put(&handoff) {
            tracing::warn!("Studying without handoff: {:#}", e);
            // An older bundle must not be picked up later
            if let Err(e) = store.clear() {
                tracing::warn!("{:#}", e);
            }
            return self.begin_study(StudySession::create(handoff.cards, handoff.topic));
        }
        self.start_study_from(store)
    }

    /// Enter study mode from whatever bundle is pending in the store
    pub fn start_study_from(&mut self, store: &HandoffStore) -> Result<(), StudyError> {
        self.begin_study(StudySession::from_handoff(store))
    }

    fn begin_study(&mut self, session: Result<StudySession, StudyError>) -> Result<(), StudyError> {
        match session {
            Ok(session) => {
                tracing::info!(cards = session.len(), topic = session.topic(), "Entering study mode");
                self.study = Some(session);
                if self.screen != Screen::Study {
                    self.return_screen = self.screen;
                }
                self.screen = Screen::Study;
                self.command_line.clear_message();
                Ok(())
            }
            Err(e) => {
                self.command_line.set_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Leave study mode, discarding the session
    pub fn exit_study(&mut self) {
        self.study = None;
        self.screen = match self.return_screen {
            Screen::Study | Screen::Help => Screen::Sets,
            other => other,
        };
    }

    /// Apply a study-screen action to the session
    ///
    /// Returns true if the session state changed.
    pub fn handle_study_action(&mut self, action: Action) -> bool {
        let Some(session) = self.study.as_mut() else {
            return false;
        };

        match action {
            Action::Previous => session.previous(),
            Action::Next => session.next(),
            Action::ToggleReveal => {
                session.toggle_reveal();
                true
            }
            // Only positions the dots row shows are offered
            Action::Jump(index) if index < session.len() => match session.go_to(index) {
                Ok(moved) => moved,
                Err(e) => {
                    tracing::error!("{}", e);
                    false
                }
            },
            Action::Back => {
                self.exit_study();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn set(id: i64, topic: &str, cards: Vec<Card>) -> FlashcardSet {
        FlashcardSet {
            id,
            topic: topic.into(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap().and_hms_opt(0, 0, 0).unwrap(),
            cards,
            user_id: None,
        }
    }

    fn abc() -> Vec<Card> {
        vec![Card::new("A", "1"), Card::new("B", "2"), Card::new("C", "3")]
    }

    fn store(dir: &TempDir) -> HandoffStore {
        HandoffStore::new(dir.path().join("handoff.json"))
    }

    #[test]
    fn sets_selection_saturates() {
        let mut sets = SetsState::default();
        sets.replace(vec![set(1, "One", abc()), set(2, "Two", abc())]);

        sets.select_previous();
        assert_eq!(sets.selected, 0);
        sets.select_next();
        sets.select_next();
        assert_eq!(sets.selected, 1);
        assert_eq!(sets.selected_set().unwrap().topic, "Two");
    }

    #[test]
    fn replace_clamps_selection() {
        let mut sets = SetsState { selected: 5, ..Default::default() };
        sets.replace(vec![set(1, "One", abc())]);
        assert_eq!(sets.selected, 0);
        assert!(sets.loaded);

        sets.replace(Vec::new());
        assert_eq!(sets.selected, 0);
        assert!(sets.selected_set().is_none());
    }

    #[test]
    fn detail_toggles_each_card_independently() {
        let mut detail = DetailState::from_set(&set(1, "Demo", abc()));
        detail.toggle_selected();
        detail.select_next();
        assert_eq!(detail.revealed, vec![true, false, false]);

        detail.toggle_selected();
        detail.toggle_selected();
        assert_eq!(detail.revealed, vec![true, false, false]);
        assert!(!detail.is_generated());
    }

    #[test]
    fn generated_detail_uses_default_topic() {
        let detail = DetailState::generated(abc());
        assert_eq!(detail.topic, "Flashcards");
        assert!(detail.is_generated());
    }

    #[test]
    fn command_line_editing_handles_unicode() {
        let mut line = CommandLineState::default();
        line.enter_command_mode();
        for c in "save Célula".chars() {
            line.insert_char(c);
        }
        line.move_left();
        line.delete_char();
        assert_eq!(line.input, "save Célua");
        assert_eq!(line.cursor, 9);

        line.exit_command_mode();
        assert!(line.input.is_empty());
        assert!(!line.is_input_mode());
    }

    #[test]
    fn study_from_selected_set() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.sets.replace(vec![set(1, "Demo", abc())]);

        let (cards, topic) = state.study_source().unwrap();
        state.enter_study(&store(&dir), cards, topic).unwrap();

        assert_eq!(state.screen, Screen::Study);
        assert_eq!(state.study.as_ref().unwrap().topic(), "Demo");
        assert!(!store(&dir).is_pending());
    }

    #[test]
    fn empty_set_does_not_enter_study() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.sets.replace(vec![set(1, "Empty", Vec::new())]);

        let (cards, topic) = state.study_source().unwrap();
        assert_eq!(state.enter_study(&store(&dir), cards, topic), Err(StudyError::EmptyCardSet));
        assert_eq!(state.screen, Screen::Sets);
        assert!(state.study.is_none());
        assert!(state.command_line.is_error);
    }

    #[test]
    fn unwritable_handoff_still_studies_given_cards() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = HandoffStore::new(blocker.join("study_handoff.json"));

        let mut state = AppState::default();
        state.enter_study(&store, abc(), "Demo".into()).unwrap();

        assert_eq!(state.screen, Screen::Study);
        let session = state.study.as_ref().unwrap();
        assert_eq!(session.topic(), "Demo");
        assert_eq!(session.len(), 3);
        assert!(!state.command_line.is_error);
    }

    #[test]
    fn study_keys_drive_session() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.show_detail(DetailState::generated(abc()));
        state.enter_study(&store(&dir), abc(), "Demo".into()).unwrap();

        assert!(state.handle_study_action(Action::ToggleReveal));
        assert!(state.study.as_ref().unwrap().is_revealed());
        assert!(state.handle_study_action(Action::Next));
        assert!(!state.study.as_ref().unwrap().is_revealed());
        assert!(state.handle_study_action(Action::Previous));
        assert!(!state.handle_study_action(Action::Previous));

        assert!(state.handle_study_action(Action::Jump(2)));
        assert_eq!(state.study.as_ref().unwrap().cursor(), 2);
        // Positions past the end are not offered
        assert!(!state.handle_study_action(Action::Jump(5)));
        assert_eq!(state.study.as_ref().unwrap().cursor(), 2);
    }

    #[test]
    fn leaving_study_returns_to_launching_screen() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.show_detail(DetailState::generated(abc()));
        state.enter_study(&store(&dir), abc(), "Demo".into()).unwrap();

        state.handle_study_action(Action::Back);
        assert_eq!(state.screen, Screen::Detail);
        assert!(state.study.is_none());
    }

    #[test]
    fn help_returns_to_study_without_losing_origin() {
        let dir = TempDir::new().unwrap();
        let mut state = AppState::default();
        state.show_detail(DetailState::generated(abc()));
        state.enter_study(&store(&dir), abc(), "Demo".into()).unwrap();

        state.show_help();
        state.close_help();
        assert_eq!(state.screen, Screen::Study);

        state.exit_study();
        assert_eq!(state.screen, Screen::Detail);
    }

    #[test]
    fn queue_sets_loading_message() {
        let mut state = AppState::default();
        state.queue(PendingRequest::Generate("some text".into()));
        assert_eq!(state.command_line.message.as_deref(), Some("Generating flashcards..."));
        assert!(state.pending.is_some());
    }
}
