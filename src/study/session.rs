//! The adaptive study-session engine
//!
//! A session presents a deck's valid cards in random order and asks the
//! user to classify each one as known or unknown. Cards marked unknown
//! come back in a fresh shuffled round; the session finishes once every
//! card has been marked known. The most recent classification of the
//! current round can be undone.
//!
//! The session is a single-threaded state machine: every operation runs
//! to completion and invalid calls (no presented card, empty undo
//! history, terminal phase) are no-ops. Callers must not share one
//! session across threads without external locking.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;

use crate::storage::{Deck, Flashcard};

use super::stats::StudyStats;

/// Invoked once when a session completes with every card known
pub type FinishHandler = Box<dyn FnMut(&Deck, &StudyStats) + Send>;

/// Invoked once when a session is aborted early
pub type AbortHandler = Box<dyn FnMut() + Send>;

/// Lifecycle of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SessionPhase {
    /// No deck loaded yet
    Idle,
    /// Cards are being presented
    Active,
    /// Every card was marked known and stats were emitted
    Finished,
    /// The user left early; no stats
    Aborted,
}

/// One classification, recorded so it can be reversed
#[derive(Debug, Clone, Copy)]
struct StudyAction {
    card: usize,
    was_unknown: bool,
}

/// Observable state for rendering the session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySnapshot {
    pub phase: SessionPhase,
    pub current_card: Option<Flashcard>,
    pub is_flipped: bool,
    pub can_undo: bool,
    pub remaining: usize,
    pub progress: String,
    pub round_info: String,
    pub is_reviewing_missed: bool,
}

/// A study session over one deck.
///
/// Queues hold indices into the deck's card list; card text is never
/// copied into the session.
pub struct StudySession {
    deck: Option<Arc<Deck>>,
    /// Cards awaiting classification in the active round, in presentation order
    queue: VecDeque<usize>,
    /// Cards marked unknown this round; input to the next round
    unknown: Vec<usize>,
    /// Cards marked known at any point, in first-known order
    known: Vec<usize>,
    /// Classifications since the start of the current round
    history: Vec<StudyAction>,
    current: Option<usize>,
    flipped: bool,
    round: u32,
    total_cards: usize,
    reviewing_missed: bool,
    phase: SessionPhase,
    started_at: Option<Instant>,
    elapsed: Duration,
    rng: StdRng,
    on_finish: FinishHandler,
    on_abort: AbortHandler,
}

impl StudySession {
    pub fn new(on_finish: FinishHandler, on_abort: AbortHandler) -> Self {
        Self::with_rng(StdRng::from_entropy(), on_finish, on_abort)
    }

    /// Build a session with an explicit random source; seeded in tests to
    /// make shuffles deterministic
    pub fn with_rng(rng: StdRng, on_finish: FinishHandler, on_abort: AbortHandler) -> Self {
        Self {
            deck: None,
            queue: VecDeque::new(),
            unknown: Vec::new(),
            known: Vec::new(),
            history: Vec::new(),
            current: None,
            flipped: false,
            round: 0,
            total_cards: 0,
            reviewing_missed: false,
            phase: SessionPhase::Idle,
            started_at: None,
            elapsed: Duration::ZERO,
            rng,
            on_finish,
            on_abort,
        }
    }

    /// Load a deck and begin studying.
    ///
    /// Only valid cards take part. A deck with none completes
    /// immediately: the finish callback fires with zero stats and no
    /// card is ever presented.
    pub fn load_deck(&mut self, deck: Arc<Deck>) {
        let mut order: Vec<usize> = deck
            .cards
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_valid())
            .map(|(i, _)| i)
            .collect();

        self.total_cards = order.len();
        self.queue.clear();
        self.unknown.clear();
        self.known.clear();
        self.history.clear();
        self.current = None;
        self.flipped = false;
        self.reviewing_missed = false;
        self.started_at = None;
        self.elapsed = Duration::ZERO;
        self.deck = Some(deck);

        if self.total_cards == 0 {
            self.round = 0;
            self.finish();
            return;
        }

        order.shuffle(&mut self.rng);
        self.queue = order.into();
        self.round = 1;
        self.phase = SessionPhase::Active;
        self.started_at = Some(Instant::now());
        self.advance();
    }

    /// Classify the presented card as known
    pub fn mark_known(&mut self) {
        let Some(card) = self.current else { return };
        self.history.push(StudyAction {
            card,
            was_unknown: false,
        });
        self.known.push(card);
        self.advance();
    }

    /// Classify the presented card as unknown; it returns in the next round
    pub fn mark_unknown(&mut self) {
        let Some(card) = self.current else { return };
        self.history.push(StudyAction {
            card,
            was_unknown: true,
        });
        self.unknown.push(card);
        self.advance();
    }

    /// Reverse the most recent classification of the current round.
    ///
    /// The presented card goes back to the front of the queue and the
    /// undone card is presented again, face front. The history is
    /// cleared at round transitions, so undo never crosses a round
    /// boundary.
    pub fn undo(&mut self) {
        let Some(presented) = self.current else { return };
        let Some(action) = self.history.pop() else { return };

        if action.was_unknown {
            if let Some(pos) = self.unknown.iter().rposition(|&c| c == action.card) {
                self.unknown.remove(pos);
            }
        } else if let Some(pos) = self.known.iter().rposition(|&c| c == action.card) {
            self.known.remove(pos);
        }

        self.queue.push_front(presented);
        self.current = Some(action.card);
        self.flipped = false;
    }

    /// Toggle which face of the presented card is shown
    pub fn flip(&mut self) {
        if self.current.is_some() {
            self.flipped = !self.flipped;
        }
    }

    /// End the session early. The clock stops and the abort consumer is
    /// notified; no stats are produced. Accepted in any phase, but only
    /// an active session transitions.
    pub fn abort(&mut self) {
        if self.phase != SessionPhase::Active {
            return;
        }
        self.stop_clock();
        self.current = None;
        self.phase = SessionPhase::Aborted;
        (self.on_abort)();
    }

    /// Present the next card, starting a new round or finishing as needed
    fn advance(&mut self) {
        self.flipped = false;

        if let Some(next) = self.queue.pop_front() {
            self.current = Some(next);
            return;
        }

        if !self.unknown.is_empty() {
            // Round transition: missed cards come back in a fresh order
            self.round += 1;
            self.reviewing_missed = true;
            let mut order = std::mem::take(&mut self.unknown);
            order.shuffle(&mut self.rng);
            self.queue = order.into();
            self.history.clear();
            self.current = self.queue.pop_front();
            return;
        }

        self.finish();
    }

    fn finish(&mut self) {
        self.stop_clock();
        self.current = None;
        self.phase = SessionPhase::Finished;

        let stats = StudyStats {
            total_cards: self.total_cards,
            known_cards: self.known.len(),
            total_rounds: self.round,
            duration_ms: self.elapsed.as_millis() as u64,
        };

        if let Some(deck) = self.deck.clone() {
            (self.on_finish)(&deck, &stats);
        }
    }

    fn stop_clock(&mut self) {
        if let Some(started) = self.started_at.take() {
            self.elapsed = started.elapsed();
        }
    }

    // ==================== Observable State ====================

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn deck(&self) -> Option<&Arc<Deck>> {
        self.deck.as_ref()
    }

    pub fn current_card(&self) -> Option<&Flashcard> {
        let deck = self.deck.as_deref()?;
        self.current.map(|i| &deck.cards[i])
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn can_undo(&self) -> bool {
        self.current.is_some() && !self.history.is_empty()
    }

    /// Cards left in the round, counting the presented one
    pub fn remaining(&self) -> usize {
        self.queue.len() + usize::from(self.current.is_some())
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_reviewing_missed(&self) -> bool {
        self.reviewing_missed
    }

    /// Running or final session duration
    pub fn elapsed(&self) -> Duration {
        match self.started_at {
            Some(started) => started.elapsed(),
            None => self.elapsed,
        }
    }

    pub fn snapshot(&self) -> StudySnapshot {
        let progress = if self.total_cards == 0 {
            "No cards to study".to_string()
        } else {
            format!("Remaining: {} cards", self.remaining())
        };
        let round_info = if self.reviewing_missed {
            format!("Reviewing missed (round {})", self.round)
        } else {
            format!("Round {}", self.round)
        };

        StudySnapshot {
            phase: self.phase,
            current_card: self.current_card().cloned(),
            is_flipped: self.flipped,
            can_undo: self.can_undo(),
            remaining: self.remaining(),
            progress,
            round_info,
            is_reviewing_missed: self.reviewing_missed,
        }
    }
}
