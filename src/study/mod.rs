//! Adaptive study sessions
//!
//! This module provides:
//! - Session setup from a deck (valid-card filtering, unbiased shuffle)
//! - Round handling: cards marked unknown come back in later rounds until
//!   every card has been marked known once
//! - Single-step undo, scoped to the current round
//! - Session statistics

pub mod session;
pub mod stats;

pub use session::{SessionPhase, StudySession, StudySnapshot};
pub use stats::StudyStats;
