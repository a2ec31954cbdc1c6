//! File-backed cache for word lookups
//!
//! Keeps repeat lookups off the network. Entries live in
//! `word_cache.json` under the data directory, expire after 30 days,
//! and the cache is capped at 5000 entries (newest kept). A corrupted
//! cache file starts fresh; save errors are logged and swallowed.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::models::{WordDefinition, WordLookupResult};

const CACHE_FILE: &str = "word_cache.json";
const CACHE_TTL_DAYS: i64 = 30;
const MAX_ENTRIES: usize = 5000;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedWord {
    word: String,
    definitions: Vec<CachedDefinition>,
    cached_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CachedDefinition {
    part_of_speech: String,
    translation: String,
}

impl CachedWord {
    fn from_result(result: &WordLookupResult) -> Self {
        Self {
            word: result.word.clone(),
            definitions: result
                .definitions
                .iter()
                .map(|d| CachedDefinition {
                    part_of_speech: d.part_of_speech.clone(),
                    translation: d.translation.clone(),
                })
                .collect(),
            cached_at: Utc::now(),
        }
    }

    fn to_result(&self) -> WordLookupResult {
        WordLookupResult {
            word: self.word.clone(),
            definitions: self
                .definitions
                .iter()
                .map(|d| WordDefinition::new(&self.word, &d.part_of_speech, &d.translation))
                .collect(),
        }
    }

    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.cached_at > Duration::days(CACHE_TTL_DAYS)
    }
}

/// Cache entry count and on-disk size
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub word_count: usize,
    pub file_size_kb: u64,
}

/// Lazily-loaded word cache backed by one JSON file
pub struct WordCache {
    cache_path: PathBuf,
    entries: HashMap<String, CachedWord>,
    loaded: bool,
}

impl WordCache {
    pub fn new(base_path: PathBuf) -> Self {
        Self {
            cache_path: base_path.join(CACHE_FILE),
            entries: HashMap::new(),
            loaded: false,
        }
    }

    /// Look up a cached result; expired entries are ignored
    pub fn get(&mut self, word: &str) -> Option<WordLookupResult> {
        self.ensure_loaded();
        let cached = self.entries.get(&normalize(word))?;
        if cached.is_expired(Utc::now()) {
            return None;
        }
        Some(cached.to_result())
    }

    /// Store a result. Results without definitions are not cached.
    pub fn set(&mut self, word: &str, result: &WordLookupResult) {
        if result.definitions.is_empty() {
            return;
        }
        self.ensure_loaded();
        self.entries
            .insert(normalize(word), CachedWord::from_result(result));
        self.save();
    }

    pub fn stats(&mut self) -> CacheStats {
        self.ensure_loaded();
        let file_size_kb = fs::metadata(&self.cache_path)
            .map(|m| m.len() / 1024)
            .unwrap_or(0);
        CacheStats {
            word_count: self.entries.len(),
            file_size_kb,
        }
    }

    /// Drop every cached word and remove the cache file
    pub fn clear(&mut self) {
        self.entries.clear();
        self.loaded = true;
        if self.cache_path.exists() {
            if let Err(e) = fs::remove_file(&self.cache_path) {
                log::warn!("Failed to remove word cache: {}", e);
            }
        }
    }

    fn ensure_loaded(&mut self) {
        if self.loaded {
            return;
        }
        self.loaded = true;

        if !self.cache_path.exists() {
            return;
        }

        let entries: HashMap<String, CachedWord> = match fs::read_to_string(&self.cache_path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Word cache is corrupted, starting fresh: {}", e);
                HashMap::new()
            }),
            Err(e) => {
                log::warn!("Failed to read word cache: {}", e);
                HashMap::new()
            }
        };

        // Drop expired entries, then keep the newest MAX_ENTRIES
        let now = Utc::now();
        let mut entries: Vec<(String, CachedWord)> = entries
            .into_iter()
            .filter(|(_, cached)| !cached.is_expired(now))
            .collect();
        entries.sort_by(|a, b| b.1.cached_at.cmp(&a.1.cached_at));
        entries.truncate(MAX_ENTRIES);

        self.entries = entries.into_iter().collect();
    }

    fn save(&self) {
        if let Some(parent) = self.cache_path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                log::warn!("Failed to create cache directory: {}", e);
                return;
            }
        }
        // Compact encoding to keep the file small
        match serde_json::to_string(&self.entries) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.cache_path, json) {
                    log::warn!("Failed to save word cache: {}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize word cache: {}", e),
        }
    }
}

fn normalize(word: &str) -> String {
    word.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lookup_result(word: &str) -> WordLookupResult {
        WordLookupResult {
            word: word.to_string(),
            definitions: vec![WordDefinition::new(word, "noun", "蘋果")],
        }
    }

    #[test]
    fn test_set_and_get_roundtrip() {
        let temp = TempDir::new().unwrap();
        let mut cache = WordCache::new(temp.path().to_path_buf());

        cache.set("apple", &lookup_result("apple"));
        let hit = cache.get("apple").unwrap();
        assert_eq!(hit.word, "apple");
        assert_eq!(hit.definitions[0].translation, "蘋果");

        // A fresh instance reads the same data back from disk
        let mut reopened = WordCache::new(temp.path().to_path_buf());
        assert!(reopened.get("apple").is_some());
    }

    #[test]
    fn test_lookup_is_normalized() {
        let temp = TempDir::new().unwrap();
        let mut cache = WordCache::new(temp.path().to_path_buf());

        cache.set("  Apple ", &lookup_result("apple"));
        assert!(cache.get("APPLE").is_some());
    }

    #[test]
    fn test_expired_entries_are_ignored() {
        let temp = TempDir::new().unwrap();
        let mut cache = WordCache::new(temp.path().to_path_buf());

        cache.set("apple", &lookup_result("apple"));
        if let Some(entry) = cache.entries.get_mut("apple") {
            entry.cached_at = Utc::now() - Duration::days(CACHE_TTL_DAYS + 1);
        }
        assert!(cache.get("apple").is_none());
    }

    #[test]
    fn test_expired_entries_are_pruned_on_load() {
        let temp = TempDir::new().unwrap();
        let mut cache = WordCache::new(temp.path().to_path_buf());
        cache.set("apple", &lookup_result("apple"));
        if let Some(entry) = cache.entries.get_mut("apple") {
            entry.cached_at = Utc::now() - Duration::days(CACHE_TTL_DAYS + 1);
        }
        cache.save();

        let mut reopened = WordCache::new(temp.path().to_path_buf());
        assert_eq!(reopened.stats().word_count, 0);
    }

    #[test]
    fn test_empty_results_are_not_cached() {
        let temp = TempDir::new().unwrap();
        let mut cache = WordCache::new(temp.path().to_path_buf());

        let empty = WordLookupResult {
            word: "ghost".to_string(),
            definitions: Vec::new(),
        };
        cache.set("ghost", &empty);
        assert!(cache.get("ghost").is_none());
        assert_eq!(cache.stats().word_count, 0);
    }

    #[test]
    fn test_corrupt_cache_starts_fresh() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CACHE_FILE), "{broken").unwrap();

        let mut cache = WordCache::new(temp.path().to_path_buf());
        assert!(cache.get("apple").is_none());
        assert_eq!(cache.stats().word_count, 0);
    }

    #[test]
    fn test_clear_removes_file() {
        let temp = TempDir::new().unwrap();
        let mut cache = WordCache::new(temp.path().to_path_buf());

        cache.set("apple", &lookup_result("apple"));
        assert!(temp.path().join(CACHE_FILE).exists());

        cache.clear();
        assert!(!temp.path().join(CACHE_FILE).exists());
        assert_eq!(cache.stats().word_count, 0);
    }
}
