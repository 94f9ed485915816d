//! Error types for deck decoding and validation

use thiserror::Error;

/// Errors raised while decoding or validating card data
#[derive(Debug, Error)]
pub enum DeckError {
    /// Card payload was not a JSON array of `{question, answer}` objects
    #[error("Malformed flashcard data: {0}")]
    Malformed(#[source] serde_json::Error),

    /// No source text was given
    #[error("Please enter some text to generate flashcards from")]
    EmptyText,

    /// Source text too short to generate from
    #[error("Text is too short ({chars} chars). Enter at least {min} characters")]
    TextTooShort { chars: usize, min: usize },

    /// No topic title was given
    #[error("Please enter a title for the set")]
    EmptyTopic,

    /// Topic title over the length limit
    #[error("Title is too long ({chars} chars, max {max})")]
    TopicTooLong { chars: usize, max: usize },
}
