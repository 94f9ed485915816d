//! Flashdeck - A terminal client for generated flashcards
//!
//! Flashdeck turns free-form text into question/answer cards through a
//! flashcard service, keeps saved sets in your account, and lets you study
//! them one card at a time.

pub mod api;
pub mod app;
pub mod config;
pub mod deck;
pub mod study;
pub mod theme;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use theme::Theme;
