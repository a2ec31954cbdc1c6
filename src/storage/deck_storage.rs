//! JSON file storage for decks
//!
//! All decks live in a single `decks.json` under the data directory.
//! Loading is forgiving: a missing, empty, or unparsable file yields an
//! empty deck list so the app always starts.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use super::models::Deck;

#[derive(Error, Debug)]
pub enum DeckStorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deck not found: {0}")]
    DeckNotFound(Uuid),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, DeckStorageError>;

const DECKS_FILE: &str = "decks.json";

/// Name given to a deck saved without one
pub const UNNAMED_DECK: &str = "Untitled Deck";

/// Storage manager for deck operations
pub struct DeckStorage {
    base_path: PathBuf,
}

impl DeckStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("recall"))
            .ok_or(DeckStorageError::DataDirNotFound)
    }

    /// Initialize the storage directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path)?;
        Ok(())
    }

    fn decks_path(&self) -> PathBuf {
        self.base_path.join(DECKS_FILE)
    }

    // ==================== Deck Operations ====================

    /// Load all decks. Unreadable or malformed data is treated as empty.
    pub fn list_decks(&self) -> Vec<Deck> {
        let path = self.decks_path();
        if !path.exists() {
            return Vec::new();
        }

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        match serde_json::from_str(&content) {
            Ok(decks) => decks,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Get a specific deck
    pub fn get_deck(&self, deck_id: Uuid) -> Result<Deck> {
        self.list_decks()
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or(DeckStorageError::DeckNotFound(deck_id))
    }

    /// Save a deck, creating or replacing it.
    ///
    /// Blank cards are pruned first. A deck left with no cards is not
    /// persisted and `None` is returned; a blank name falls back to
    /// [`UNNAMED_DECK`].
    pub fn save_deck(&self, mut deck: Deck) -> Result<Option<Deck>> {
        deck.cards.retain(|c| c.is_valid());
        if deck.cards.is_empty() {
            return Ok(None);
        }

        if deck.name.trim().is_empty() {
            deck.name = UNNAMED_DECK.to_string();
        }
        deck.updated_at = Utc::now();

        let mut decks = self.list_decks();
        match decks.iter().position(|d| d.id == deck.id) {
            Some(pos) => decks[pos] = deck.clone(),
            None => decks.push(deck.clone()),
        }
        self.write_decks(&decks)?;

        Ok(Some(deck))
    }

    /// Delete a deck and all its cards
    pub fn delete_deck(&self, deck_id: Uuid) -> Result<()> {
        let mut decks = self.list_decks();
        let before = decks.len();
        decks.retain(|d| d.id != deck_id);
        if decks.len() == before {
            return Err(DeckStorageError::DeckNotFound(deck_id));
        }
        self.write_decks(&decks)
    }

    fn write_decks(&self, decks: &[Deck]) -> Result<()> {
        self.init()?;
        fs::write(self.decks_path(), serde_json::to_string_pretty(decks)?)?;
        Ok(())
    }
}
