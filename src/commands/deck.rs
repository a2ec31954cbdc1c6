//! Tauri commands for deck management

use tauri::State;
use uuid::Uuid;

use crate::storage::{Deck, DeckStorageError, Flashcard};
use crate::AppState;

#[derive(Debug, serde::Serialize)]
pub struct CommandError {
    pub message: String,
}

impl From<DeckStorageError> for CommandError {
    fn from(err: DeckStorageError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

pub(crate) type CommandResult<T> = Result<T, CommandError>;

pub(crate) fn parse_deck_id(deck_id: &str) -> CommandResult<Uuid> {
    Uuid::parse_str(deck_id).map_err(|e| CommandError {
        message: format!("Invalid deck ID: {}", e),
    })
}

/// Card payload from the deck editor; a missing id means a new card
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub front: String,
    #[serde(default)]
    pub back: String,
}

/// List all decks
#[tauri::command]
pub fn list_decks(state: State<AppState>) -> CommandResult<Vec<Deck>> {
    let storage = state.deck_storage.lock().unwrap();
    Ok(storage.list_decks())
}

/// Get a specific deck
#[tauri::command]
pub fn get_deck(state: State<AppState>, deck_id: String) -> CommandResult<Deck> {
    let storage = state.deck_storage.lock().unwrap();
    storage.get_deck(parse_deck_id(&deck_id)?).map_err(Into::into)
}

/// Create or update a deck from the editor.
///
/// Blank cards are dropped before saving; a deck left with no cards is
/// not persisted and `None` is returned.
#[tauri::command]
pub fn save_deck(
    state: State<AppState>,
    deck_id: Option<String>,
    name: String,
    cards: Vec<CardInput>,
) -> CommandResult<Option<Deck>> {
    let storage = state.deck_storage.lock().unwrap();

    let mut deck = match deck_id {
        Some(id) => storage.get_deck(parse_deck_id(&id)?)?,
        None => Deck::new(name.clone()),
    };
    deck.name = name;
    deck.cards = cards
        .into_iter()
        .map(|card| Flashcard {
            id: card.id.unwrap_or_else(Uuid::new_v4),
            front: card.front,
            back: card.back,
        })
        .collect();

    storage.save_deck(deck).map_err(Into::into)
}

/// Delete a deck and all its cards
#[tauri::command]
pub fn delete_deck(state: State<AppState>, deck_id: String) -> CommandResult<()> {
    let storage = state.deck_storage.lock().unwrap();
    storage
        .delete_deck(parse_deck_id(&deck_id)?)
        .map_err(Into::into)
}
