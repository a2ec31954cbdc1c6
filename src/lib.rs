use std::sync::{Arc, Mutex};

mod commands;
mod dictionary;
mod storage;
mod study;

use commands::SessionOutcome;
use dictionary::DictionaryService;
use storage::DeckStorage;
use study::StudySession;

pub struct AppState {
    pub deck_storage: Mutex<DeckStorage>,
    /// Session in progress, if any; one at a time
    pub study: Mutex<Option<StudySession>>,
    /// Terminal result of the last session, set by its callbacks
    pub study_outcome: Arc<Mutex<Option<SessionOutcome>>>,
    pub dictionary: DictionaryService,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize storage
    let data_dir = DeckStorage::default_data_dir().expect("Failed to get data directory");
    let deck_storage = DeckStorage::new(data_dir.clone());
    deck_storage.init().expect("Failed to initialize deck storage");

    let state = AppState {
        deck_storage: Mutex::new(deck_storage),
        study: Mutex::new(None),
        study_outcome: Arc::new(Mutex::new(None)),
        dictionary: DictionaryService::new(data_dir),
    };

    tauri::Builder::default()
        .manage(state)
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Deck commands
            commands::list_decks,
            commands::get_deck,
            commands::save_deck,
            commands::delete_deck,
            // Study commands
            commands::start_study,
            commands::get_study_state,
            commands::flip_card,
            commands::mark_card_known,
            commands::mark_card_unknown,
            commands::undo_review,
            commands::abort_study,
            commands::get_study_outcome,
            // Dictionary commands
            commands::lookup_word,
            commands::word_cache_stats,
            commands::clear_word_cache,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
