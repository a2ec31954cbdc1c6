//! Data models for decks and flashcards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single two-sided flashcard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flashcard {
    pub id: Uuid,
    /// Front side (the word or question)
    #[serde(default)]
    pub front: String,
    /// Back side (the definition or answer)
    #[serde(default)]
    pub back: String,
}

impl Flashcard {
    pub fn new(front: String, back: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            front,
            back,
        }
    }

    /// A card can be studied when at least one side has visible text
    pub fn is_valid(&self) -> bool {
        !self.front.trim().is_empty() || !self.back.trim().is_empty()
    }
}

/// A named, ordered collection of flashcards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Deck {
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Cards eligible for study
    pub fn valid_cards(&self) -> impl Iterator<Item = &Flashcard> {
        self.cards.iter().filter(|c| c.is_valid())
    }

    pub fn valid_card_count(&self) -> usize {
        self.valid_cards().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_validity() {
        assert!(Flashcard::new("apple".into(), "蘋果".into()).is_valid());
        assert!(Flashcard::new("apple".into(), String::new()).is_valid());
        assert!(Flashcard::new(String::new(), "蘋果".into()).is_valid());
        assert!(!Flashcard::new(String::new(), String::new()).is_valid());
        assert!(!Flashcard::new("  ".into(), "\t".into()).is_valid());
    }

    #[test]
    fn test_valid_card_count_skips_blank_cards() {
        let mut deck = Deck::new("Vocabulary".into());
        deck.cards.push(Flashcard::new("apple".into(), "蘋果".into()));
        deck.cards.push(Flashcard::new(String::new(), String::new()));
        deck.cards.push(Flashcard::new(String::new(), "只有背面".into()));

        assert_eq!(deck.cards.len(), 3);
        assert_eq!(deck.valid_card_count(), 2);
    }
}
