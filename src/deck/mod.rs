//! Flashcards and saved sets

pub mod error;
pub mod model;

pub use error::DeckError;
pub use model::{
    Card, DEFAULT_TOPIC, FlashcardSet, GenerationResponse, SavedSetRecord, card_count_label,
    decode_cards, encode_cards, validate_source_text, validate_topic,
};
