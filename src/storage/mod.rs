//! Deck persistence
//!
//! Decks and their cards are stored together as a single JSON document
//! in the application data directory.

pub mod deck_storage;
pub mod models;

pub use deck_storage::{DeckStorage, DeckStorageError, UNNAMED_DECK};
pub use models::{Deck, Flashcard};
