//! Tauri commands for study sessions
//!
//! The frontend drives the session through these commands and re-renders
//! from the returned snapshot after every action. When the session ends,
//! its callbacks deposit a [`SessionOutcome`] that the result screen
//! polls with `get_study_outcome`.

use std::sync::Arc;

use serde::Serialize;
use tauri::State;

use crate::storage::Deck;
use crate::study::{StudySession, StudySnapshot, StudyStats};
use crate::AppState;

use super::deck::{parse_deck_id, CommandResult};

/// Terminal result of a session, kept for the result screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SessionOutcome {
    Finished { deck: Deck, stats: StudyStats },
    Aborted,
}

/// Begin studying a deck. Replaces any session in progress.
#[tauri::command]
pub fn start_study(state: State<AppState>, deck_id: String) -> CommandResult<StudySnapshot> {
    let deck = {
        let storage = state.deck_storage.lock().unwrap();
        storage.get_deck(parse_deck_id(&deck_id)?)?
    };

    *state.study_outcome.lock().unwrap() = None;

    let finish_slot = Arc::clone(&state.study_outcome);
    let abort_slot = Arc::clone(&state.study_outcome);
    let mut session = StudySession::new(
        Box::new(move |deck, stats| {
            log::info!(
                "Study session finished: {}/{} cards in {} round(s)",
                stats.known_cards,
                stats.total_cards,
                stats.total_rounds
            );
            *finish_slot.lock().unwrap() = Some(SessionOutcome::Finished {
                deck: deck.clone(),
                stats: stats.clone(),
            });
        }),
        Box::new(move || {
            log::info!("Study session aborted");
            *abort_slot.lock().unwrap() = Some(SessionOutcome::Aborted);
        }),
    );

    // An empty deck finishes during load; the outcome is already set
    // by the time the first snapshot is taken
    session.load_deck(Arc::new(deck));
    let snapshot = session.snapshot();
    *state.study.lock().unwrap() = Some(session);

    Ok(snapshot)
}

/// Observable session state, `None` when no session was started
#[tauri::command]
pub fn get_study_state(state: State<AppState>) -> CommandResult<Option<StudySnapshot>> {
    Ok(state.study.lock().unwrap().as_ref().map(|s| s.snapshot()))
}

/// Mark the presented card as known
#[tauri::command]
pub fn mark_card_known(state: State<AppState>) -> CommandResult<Option<StudySnapshot>> {
    with_session(&state, |session| session.mark_known())
}

/// Mark the presented card as unknown; it returns in the next round
#[tauri::command]
pub fn mark_card_unknown(state: State<AppState>) -> CommandResult<Option<StudySnapshot>> {
    with_session(&state, |session| session.mark_unknown())
}

/// Undo the most recent classification of the current round
#[tauri::command]
pub fn undo_review(state: State<AppState>) -> CommandResult<Option<StudySnapshot>> {
    with_session(&state, |session| session.undo())
}

/// Toggle the presented card's face
#[tauri::command]
pub fn flip_card(state: State<AppState>) -> CommandResult<Option<StudySnapshot>> {
    with_session(&state, |session| session.flip())
}

/// Leave the session without completion stats
#[tauri::command]
pub fn abort_study(state: State<AppState>) -> CommandResult<Option<StudySnapshot>> {
    with_session(&state, |session| session.abort())
}

/// Result of the last session once it finished or was aborted
#[tauri::command]
pub fn get_study_outcome(state: State<AppState>) -> CommandResult<Option<SessionOutcome>> {
    Ok(state.study_outcome.lock().unwrap().clone())
}

fn with_session<F>(state: &State<AppState>, action: F) -> CommandResult<Option<StudySnapshot>>
where
    F: FnOnce(&mut StudySession),
{
    let mut guard = state.study.lock().unwrap();
    match guard.as_mut() {
        Some(session) => {
            action(session);
            Ok(Some(session.snapshot()))
        }
        None => Ok(None),
    }
}
