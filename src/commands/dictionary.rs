//! Tauri commands for word lookup

use tauri::State;

use crate::dictionary::{CacheStats, DictionaryError, WordLookupResult};
use crate::AppState;

use super::deck::CommandError;

type CommandResult<T> = Result<T, CommandError>;

impl From<DictionaryError> for CommandError {
    fn from(err: DictionaryError) -> Self {
        let message = match &err {
            DictionaryError::NotFound { suggestions } if !suggestions.is_empty() => {
                format!(
                    "Word not found. Did you mean: {}?",
                    suggestions
                        .iter()
                        .take(3)
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            _ => err.to_string(),
        };
        Self { message }
    }
}

/// Look up a word's senses and Traditional Chinese translations
#[tauri::command]
pub async fn lookup_word(
    state: State<'_, AppState>,
    word: String,
) -> CommandResult<WordLookupResult> {
    state.dictionary.lookup(&word).await.map_err(Into::into)
}

/// Entry count and on-disk size of the word cache
#[tauri::command]
pub async fn word_cache_stats(state: State<'_, AppState>) -> CommandResult<CacheStats> {
    Ok(state.dictionary.cache_stats().await)
}

/// Drop all cached word lookups
#[tauri::command]
pub async fn clear_word_cache(state: State<'_, AppState>) -> CommandResult<()> {
    state.dictionary.clear_cache().await;
    Ok(())
}
