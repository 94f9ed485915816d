//! Study session navigator
//!
//! A session walks a fixed, non-empty card sequence one card at a time. The
//! state is a cursor plus a reveal flag. Navigation saturates at both ends
//! instead of wrapping, and every cursor move shows the new card's question
//! face first.

use thiserror::Error;

use super::handoff::HandoffStore;
use crate::deck::{Card, DEFAULT_TOPIC};

/// Errors raised by a study session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StudyError {
    /// A session needs at least one card
    #[error("There are no flashcards to study")]
    EmptyCardSet,

    /// Direct jump to a position the session does not have
    #[error("Card index {index} out of range for a set of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Everything the study view needs to repaint the current card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardView<'a> {
    /// The card under the cursor
    pub card: &'a Card,
    /// 1-based position of the card
    pub index: usize,
    /// Number of cards in the session
    pub total: usize,
    /// Whether the answer face is showing
    pub revealed: bool,
    /// Cursor is on the first card
    pub at_start: bool,
    /// Cursor is on the last card
    pub at_end: bool,
}

impl<'a> CardView<'a> {
    /// Face label: "Question" or "Answer"
    pub fn label(&self) -> &'static str {
        if self.revealed { "Answer" } else { "Question" }
    }

    /// Text of the visible face
    pub fn body(&self) -> &'a str {
        if self.revealed { &self.card.answer } else { &self.card.question }
    }

    /// Progress line, e.g. "Flashcard 2 of 5"
    pub fn progress(&self) -> String {
        format!("Flashcard {} of {}", self.index, self.total)
    }

    /// Caption for the reveal control
    pub fn reveal_hint(&self) -> &'static str {
        if self.revealed { "Show Question" } else { "Show Answer" }
    }
}

/// An in-memory traversal over an ordered set of cards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudySession {
    cards: Vec<Card>,
    topic: String,
    cursor: usize,
    revealed: bool,
}

impl StudySession {
    /// Start a session on the first card, question face up
    pub fn create(cards: Vec<Card>, topic: impl Into<String>) -> Result<Self, StudyError> {
        if cards.is_empty() {
            return Err(StudyError::EmptyCardSet);
        }
        Ok(Self { cards, topic: topic.into(), cursor: 0, revealed: false })
    }

    /// Start a session from the pending handoff bundle, consuming it
    ///
    /// A missing or unreadable bundle counts as zero cards.
    pub fn from_handoff(store: &HandoffStore) -> Result<Self, StudyError> {
        match store.take() {
            Some(handoff) => Self::create(handoff.cards, handoff.topic),
            None => Self::create(Vec::new(), DEFAULT_TOPIC),
        }
    }

    /// The current card and its render state
    pub fn current(&self) -> CardView<'_> {
        CardView {
            card: &self.cards[self.cursor],
            index: self.cursor + 1,
            total: self.cards.len(),
            revealed: self.revealed,
            at_start: self.at_start(),
            at_end: self.at_end(),
        }
    }

    /// Advance one card; false at the last card
    pub fn next(&mut self) -> bool {
        if self.at_end() {
            return false;
        }
        self.move_to(self.cursor + 1);
        true
    }

    /// Step back one card; false at the first card
    pub fn previous(&mut self) -> bool {
        if self.at_start() {
            return false;
        }
        self.move_to(self.cursor - 1);
        true
    }

    /// Jump straight to a 0-based position
    ///
    /// Returns `Ok(false)` when already there, leaving the reveal state alone.
    pub fn go_to(&mut self, index: usize) -> Result<bool, StudyError> {
        if index >= self.cards.len() {
            return Err(StudyError::IndexOutOfRange { index, len: self.cards.len() });
        }
        if index == self.cursor {
            return Ok(false);
        }
        self.move_to(index);
        Ok(true)
    }

    /// Flip between question and answer; returns the new reveal state
    pub fn toggle_reveal(&mut self) -> bool {
        self.revealed = !self.revealed;
        self.revealed
    }

    pub fn at_start(&self) -> bool {
        self.cursor == 0
    }

    pub fn at_end(&self) -> bool {
        self.cursor == self.cards.len() - 1
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards (always at least one)
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; a session cannot be empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 0-based cursor position
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    fn move_to(&mut self, index: usize) {
        tracing::debug!(from = self.cursor, to = index, "study cursor moved");
        self.cursor = index;
        self.revealed = false;
    }
}
