//! Session statistics

use serde::{Deserialize, Serialize};

/// Summary of a completed study session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyStats {
    /// Number of valid cards in the session
    pub total_cards: usize,
    /// Cards that reached "known"; equals `total_cards` on completion
    pub known_cards: usize,
    /// Rounds played, counting the first pass
    pub total_rounds: u32,
    /// Wall-clock time from first card to completion, in milliseconds
    pub duration_ms: u64,
}

impl StudyStats {
    /// Share of cards known at session end, as a whole percentage.
    /// `None` when the session had no cards.
    pub fn accuracy_percent(&self) -> Option<u32> {
        if self.total_cards == 0 {
            return None;
        }
        Some((self.known_cards as f64 / self.total_cards as f64 * 100.0).round() as u32)
    }

    /// Human-readable duration, e.g. "2 min 5 s" or "42 s"
    pub fn duration_text(&self) -> String {
        let total_secs = self.duration_ms / 1000;
        let mins = total_secs / 60;
        let secs = total_secs % 60;
        if mins >= 1 {
            format!("{} min {} s", mins, secs)
        } else {
            format!("{} s", secs)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_percent() {
        let stats = StudyStats {
            total_cards: 8,
            known_cards: 8,
            total_rounds: 2,
            duration_ms: 60_000,
        };
        assert_eq!(stats.accuracy_percent(), Some(100));

        let empty = StudyStats {
            total_cards: 0,
            known_cards: 0,
            total_rounds: 0,
            duration_ms: 0,
        };
        assert_eq!(empty.accuracy_percent(), None);
    }

    #[test]
    fn test_duration_text() {
        let short = StudyStats {
            total_cards: 1,
            known_cards: 1,
            total_rounds: 1,
            duration_ms: 42_500,
        };
        assert_eq!(short.duration_text(), "42 s");

        let long = StudyStats {
            total_cards: 1,
            known_cards: 1,
            total_rounds: 1,
            duration_ms: 125_000,
        };
        assert_eq!(long.duration_text(), "2 min 5 s");
    }
}
