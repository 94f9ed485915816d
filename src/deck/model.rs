//! Flashcard data model
//!
//! Cards arrive from two producers: a fresh generation call, and a saved set
//! whose cards are stored by the service as a serialized JSON string. Both
//! decode into the same [`Card`] sequence here, so malformed input is rejected
//! before anything downstream sees it.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::error::DeckError;

/// Shortest source text the generator is worth calling with
pub const MIN_SOURCE_TEXT_CHARS: usize = 15;

/// Longest topic title accepted when saving a set
pub const MAX_TOPIC_CHARS: usize = 40;

/// Topic used when the caller did not name one
pub const DEFAULT_TOPIC: &str = "Flashcards";

/// A single question/answer pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    /// Question face
    pub question: String,
    /// Answer face
    pub answer: String,
}

impl Card {
    /// Create a new card
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self { question: question.into(), answer: answer.into() }
    }
}

/// Body of a successful generation call
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationResponse {
    /// Generated cards, in the order the service returned them
    pub flashcards: Vec<Card>,
}

/// A saved set exactly as the service lists it
#[derive(Debug, Clone, Deserialize)]
pub struct SavedSetRecord {
    pub id: i64,
    pub topic: String,
    /// Serialized JSON array of cards
    pub content_json: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub user_id: Option<i64>,
}

/// A saved set with its cards decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlashcardSet {
    /// Server-assigned identifier
    pub id: i64,
    /// Title the set was saved under
    pub topic: String,
    /// When the set was saved (UTC)
    pub created_at: NaiveDateTime,
    /// Cards in saved order
    pub cards: Vec<Card>,
    /// Owning user, when the service reports it
    pub user_id: Option<i64>,
}

impl FlashcardSet {
    /// Number of cards in the set
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the set has no cards
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// One-line description, e.g. "5 flashcards · May 1, 2024"
    pub fn summary(&self) -> String {
        format!("{} · {}", card_count_label(self.len()), self.created_at.format("%b %-d, %Y"))
    }
}

impl TryFrom<SavedSetRecord> for FlashcardSet {
    type Error = DeckError;

    fn try_from(record: SavedSetRecord) -> Result<Self, Self::Error> {
        let cards = decode_cards(&record.content_json)?;
        Ok(Self {
            id: record.id,
            topic: record.topic,
            created_at: record.created_at,
            cards,
            user_id: record.user_id,
        })
    }
}

/// "1 flashcard", "3 flashcards"
pub fn card_count_label(count: usize) -> String {
    if count == 1 { "1 flashcard".to_string() } else { format!("{} flashcards", count) }
}

/// Decode a saved set's serialized card array
pub fn decode_cards(content_json: &str) -> Result<Vec<Card>, DeckError> {
    serde_json::from_str(content_json).map_err(DeckError::Malformed)
}

/// Serialize cards into the string form the service stores
pub fn encode_cards(cards: &[Card]) -> Result<String, DeckError> {
    serde_json::to_string(cards).map_err(DeckError::Malformed)
}

/// Check text before asking the service to generate cards from it
///
/// Returns the trimmed text.
pub fn validate_source_text(text: &str) -> Result<&str, DeckError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DeckError::EmptyText);
    }
    let chars = text.chars().count();
    if chars < MIN_SOURCE_TEXT_CHARS {
        return Err(DeckError::TextTooShort { chars, min: MIN_SOURCE_TEXT_CHARS });
    }
    Ok(text)
}

/// Check a topic title before saving a set under it
///
/// Returns the trimmed topic.
pub fn validate_topic(topic: &str) -> Result<&str, DeckError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(DeckError::EmptyTopic);
    }
    let chars = topic.chars().count();
    if chars > MAX_TOPIC_CHARS {
        return Err(DeckError::TopicTooLong { chars, max: MAX_TOPIC_CHARS });
    }
    Ok(topic)
}
