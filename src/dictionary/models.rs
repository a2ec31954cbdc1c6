//! Data models for dictionary lookups

use serde::{Deserialize, Serialize};

/// One sense of a word: a part of speech and its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDefinition {
    pub word: String,
    /// Full part-of-speech name ("noun", "verb", ...)
    pub part_of_speech: String,
    /// Traditional Chinese translation
    pub translation: String,
}

impl WordDefinition {
    pub fn new(word: &str, part_of_speech: &str, translation: &str) -> Self {
        Self {
            word: word.to_string(),
            part_of_speech: part_of_speech.to_string(),
            translation: translation.to_string(),
        }
    }

    /// Abbreviated part of speech ("noun" → "n.")
    pub fn short_part_of_speech(&self) -> &str {
        match self.part_of_speech.as_str() {
            "noun" => "n.",
            "verb" => "v.",
            "adjective" => "adj.",
            "adverb" => "adv.",
            "pronoun" => "pron.",
            "preposition" => "prep.",
            "conjunction" => "conj.",
            "interjection" => "interj.",
            other => other,
        }
    }

    /// Rendering for suggestion lists and card backs, e.g. `(n.) 蘋果`
    pub fn display_text(&self) -> String {
        format!("({}) {}", self.short_part_of_speech(), self.translation)
    }
}

/// All definitions found for a word
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordLookupResult {
    pub word: String,
    pub definitions: Vec<WordDefinition>,
}

impl WordLookupResult {
    /// Combined card-back text, e.g. `(n.) 光、燈; (v.) 點燃`
    pub fn combined_back(&self) -> String {
        self.definitions
            .iter()
            .map(|d| d.display_text())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_part_of_speech() {
        assert_eq!(
            WordDefinition::new("apple", "noun", "蘋果").short_part_of_speech(),
            "n."
        );
        assert_eq!(
            WordDefinition::new("run", "verb", "跑").short_part_of_speech(),
            "v."
        );
        // Unknown names pass through untouched
        assert_eq!(
            WordDefinition::new("ow", "exclamation", "哎喲").short_part_of_speech(),
            "exclamation"
        );
    }

    #[test]
    fn test_display_text() {
        let def = WordDefinition::new("apple", "noun", "蘋果");
        assert_eq!(def.display_text(), "(n.) 蘋果");
    }

    #[test]
    fn test_combined_back_joins_definitions() {
        let result = WordLookupResult {
            word: "light".to_string(),
            definitions: vec![
                WordDefinition::new("light", "noun", "光、燈"),
                WordDefinition::new("light", "verb", "點燃"),
            ],
        };
        assert_eq!(result.combined_back(), "(n.) 光、燈; (v.) 點燃");
    }
}
