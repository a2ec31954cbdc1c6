//! Word lookup and translation service
//!
//! Uses the Datamuse API (free, no key) to verify words and fetch
//! part-of-speech metadata, and the free Google Translate endpoint for
//! Traditional Chinese translations. Results are cached on disk and all
//! network calls go through one sliding-window rate limiter.
//!
//! The service degrades instead of failing where the original data
//! allows it: a failed existence check assumes the word exists, missing
//! part-of-speech metadata falls back to "noun", and a failed
//! translation falls back to the untranslated query.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;

use super::cache::{CacheStats, WordCache};
use super::models::{WordDefinition, WordLookupResult};
use super::rate_limit::RateLimiter;

const DATAMUSE_API_URL: &str = "https://api.datamuse.com/words";
const TRANSLATE_API_URL: &str = "https://translate.googleapis.com/translate_a/single";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// Free-tier etiquette for the Datamuse and translate endpoints
const MAX_REQUESTS_PER_MINUTE: usize = 60;

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("No word given")]
    EmptyQuery,

    #[error("Word not found")]
    NotFound { suggestions: Vec<String> },

    #[error("Lookup timed out, check the network connection")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, DictionaryError>;

/// One entry of a Datamuse `/words` response
#[derive(Debug, Deserialize)]
struct DatamuseEntry {
    word: String,
    #[serde(default)]
    tags: Vec<String>,
}

/// Dictionary lookups with caching and rate limiting
pub struct DictionaryService {
    client: reqwest::Client,
    cache: Mutex<WordCache>,
    limiter: RateLimiter,
}

impl DictionaryService {
    pub fn new(data_dir: PathBuf) -> Self {
        // One client for every call, per reqwest connection pooling
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("recall/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            cache: Mutex::new(WordCache::new(data_dir)),
            limiter: RateLimiter::new(MAX_REQUESTS_PER_MINUTE, Duration::from_secs(60)),
        }
    }

    /// Look up an English word and return its senses with Traditional
    /// Chinese translations.
    pub async fn lookup(&self, word: &str) -> Result<WordLookupResult> {
        if word.trim().is_empty() {
            return Err(DictionaryError::EmptyQuery);
        }
        let clean = word.trim().to_lowercase();

        if let Some(hit) = self.cache.lock().await.get(&clean) {
            return Ok(hit);
        }

        // Common polysemous words resolve without the network
        if let Some(offline) = offline_lookup(&clean) {
            self.cache.lock().await.set(&clean, &offline);
            return Ok(offline);
        }

        if !self.word_exists(&clean).await? {
            let suggestions = self.spelling_suggestions(&clean).await;
            return Err(DictionaryError::NotFound { suggestions });
        }

        let mut parts = self.parts_of_speech(&clean).await;
        if parts.is_empty() {
            parts.push("noun".to_string());
        }

        let mut definitions = Vec::new();
        for pos in &parts {
            let query = translation_query(&clean, pos);
            let raw = match self.translate(&query).await {
                Ok(translated) => translated,
                Err(DictionaryError::Timeout) => return Err(DictionaryError::Timeout),
                Err(e) => {
                    log::warn!("Translation failed for '{}': {}", query, e);
                    query.clone()
                }
            };
            definitions.push(WordDefinition::new(&clean, pos, &clean_translation(&raw)));
        }

        let result = WordLookupResult {
            word: clean.clone(),
            definitions,
        };
        self.cache.lock().await.set(&clean, &result);
        Ok(result)
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }

    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    /// Check the word exists via an exact spelled-like query. Network
    /// trouble (other than a timeout) assumes it exists so translation
    /// can still be attempted.
    async fn word_exists(&self, word: &str) -> Result<bool> {
        self.limiter.acquire().await;
        let response = self
            .client
            .get(DATAMUSE_API_URL)
            .query(&[("sp", word), ("max", "1")])
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) if e.is_timeout() => return Err(DictionaryError::Timeout),
            Err(e) => {
                log::warn!("Word verification failed for '{}': {}", word, e);
                return Ok(true);
            }
        };

        if !response.status().is_success() {
            return Ok(false);
        }

        let entries: Vec<DatamuseEntry> = match response.json().await {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Bad Datamuse response for '{}': {}", word, e);
                return Ok(true);
            }
        };

        Ok(entries
            .first()
            .map_or(false, |e| e.word.eq_ignore_ascii_case(word)))
    }

    /// Wildcard spelling suggestions for a word that was not found
    async fn spelling_suggestions(&self, word: &str) -> Vec<String> {
        self.limiter.acquire().await;
        let pattern = format!("{}*", word);
        let response = self
            .client
            .get(DATAMUSE_API_URL)
            .query(&[("sp", pattern.as_str()), ("max", "5")])
            .send()
            .await;

        let entries: Vec<DatamuseEntry> = match response {
            Ok(response) if response.status().is_success() => {
                response.json().await.unwrap_or_default()
            }
            _ => Vec::new(),
        };

        entries.into_iter().map(|e| e.word).collect()
    }

    /// Part-of-speech names from Datamuse metadata tags
    async fn parts_of_speech(&self, word: &str) -> Vec<String> {
        self.limiter.acquire().await;
        let response = self
            .client
            .get(DATAMUSE_API_URL)
            .query(&[("sp", word), ("md", "p"), ("max", "1")])
            .send()
            .await;

        let entries: Vec<DatamuseEntry> = match response {
            Ok(response) if response.status().is_success() => {
                response.json().await.unwrap_or_default()
            }
            _ => Vec::new(),
        };

        match entries.first() {
            Some(entry) => parts_from_tags(&entry.tags),
            None => Vec::new(),
        }
    }

    /// Translate text to Traditional Chinese. Upstream trouble falls
    /// back to the original text.
    async fn translate(&self, text: &str) -> Result<String> {
        self.limiter.acquire().await;
        let response = self
            .client
            .get(TRANSLATE_API_URL)
            .query(&[
                ("client", "gtx"),
                ("sl", "en"),
                ("tl", "zh-TW"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(map_reqwest)?;

        if !response.status().is_success() {
            return Ok(text.to_string());
        }

        let value: serde_json::Value = response.json().await.map_err(map_reqwest)?;
        Ok(parse_translation(&value).unwrap_or_else(|| text.to_string()))
    }
}

fn map_reqwest(e: reqwest::Error) -> DictionaryError {
    if e.is_timeout() {
        DictionaryError::Timeout
    } else {
        DictionaryError::Http(e)
    }
}

/// Map a Datamuse tag to a part-of-speech name, in tag order without
/// duplicates
fn parts_from_tags(tags: &[String]) -> Vec<String> {
    let mut parts = Vec::new();
    for tag in tags {
        let Some(pos) = pos_from_tag(tag) else { continue };
        if !parts.iter().any(|p| p == pos) {
            parts.push(pos.to_string());
        }
    }
    parts
}

fn pos_from_tag(tag: &str) -> Option<&'static str> {
    match tag {
        "n" => Some("noun"),
        "v" => Some("verb"),
        "adj" => Some("adjective"),
        "adv" => Some("adverb"),
        "prep" => Some("preposition"),
        "conj" => Some("conjunction"),
        "pron" => Some("pronoun"),
        "interj" => Some("interjection"),
        _ => None,
    }
}

/// Extract the translated string from Google's nested-array response:
/// `[[["翻譯","original",...],...],...]`
fn parse_translation(value: &serde_json::Value) -> Option<String> {
    value
        .get(0)?
        .get(0)?
        .get(0)?
        .as_str()
        .map(|s| s.to_string())
}

/// Wrap a word in context so the translator picks the intended sense
fn translation_query(word: &str, part_of_speech: &str) -> String {
    match part_of_speech {
        "noun" => format!("the {}", word),
        "verb" => format!("to {}", word),
        "adjective" => format!("a {} day", word),
        "adverb" => format!("doing {}", word),
        _ => word.to_string(),
    }
}

/// Strip the context words that `translation_query` added; if nothing
/// is left, return the translation untouched
fn clean_translation(translation: &str) -> String {
    const CONTEXT_FRAGMENTS: [&str; 9] = [
        "該", "的東西", "東西", "做得", "做它", "一個", "一天", "天", "做",
    ];

    let mut cleaned = translation.to_string();
    for fragment in CONTEXT_FRAGMENTS {
        cleaned = cleaned.replace(fragment, "");
    }
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        translation.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Built-in senses for common polysemous words; avoids the network and
/// gives stabler translations than the API
fn offline_lookup(word: &str) -> Option<WordLookupResult> {
    let senses: &[(&str, &str)] = match word {
        "fine" => &[
            ("adjective", "好的、優良的"),
            ("noun", "罰款"),
            ("verb", "處以罰款"),
            ("adverb", "很好地"),
        ],
        "run" => &[("verb", "跑、運行"), ("noun", "跑步、運行")],
        "light" => &[
            ("noun", "光、燈"),
            ("adjective", "輕的、明亮的"),
            ("verb", "點燃"),
        ],
        "book" => &[("noun", "書、書籍"), ("verb", "預訂")],
        "play" => &[("verb", "玩、播放"), ("noun", "戲劇、遊戲")],
        "watch" => &[("verb", "觀看、注視"), ("noun", "手錶")],
        "change" => &[("verb", "改變"), ("noun", "變化、零錢")],
        "present" => &[
            ("noun", "禮物、現在"),
            ("adjective", "出席的、現在的"),
            ("verb", "呈現、贈送"),
        ],
        "right" => &[
            ("adjective", "正確的、右邊的"),
            ("noun", "權利、右邊"),
            ("adverb", "正確地"),
        ],
        "left" => &[
            ("adjective", "左邊的"),
            ("noun", "左邊"),
            ("verb", "離開（過去式）"),
        ],
        "bank" => &[("noun", "銀行、河岸"), ("verb", "存款")],
        "spring" => &[("noun", "春天、彈簧、泉水"), ("verb", "彈跳、湧出")],
        "match" => &[("noun", "比賽、火柴、匹配"), ("verb", "匹配、相符")],
        "lead" => &[("verb", "帶領"), ("noun", "鉛、領先")],
        "train" => &[("noun", "火車"), ("verb", "訓練")],
        "bear" => &[("noun", "熊"), ("verb", "忍受、攜帶")],
        "mean" => &[("verb", "意味著"), ("adjective", "刻薄的、平均的")],
        "date" => &[("noun", "日期、約會、棗子"), ("verb", "約會、註明日期")],
        "apple" => &[("noun", "蘋果")],
        "orange" => &[("noun", "橘子、橙色")],
        _ => return None,
    };

    Some(WordLookupResult {
        word: word.to_string(),
        definitions: senses
            .iter()
            .map(|(pos, translation)| WordDefinition::new(word, pos, translation))
            .collect(),
    })
}
