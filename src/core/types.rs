// src/core/types.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Provenance of a vocabulary entry.
/// Core words are pre-seeded high-frequency AAC vocabulary; imported words
/// come from a frequency file; learned words were typed or spoken by the
/// user. Tie-break priority is Core > Learned > Imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WordOrigin {
    Core,
    Imported,
    Learned,
}

impl WordOrigin {
    /// Lower rank wins ties.
    pub fn tie_break_rank(self) -> u8 {
        match self {
            WordOrigin::Core => 0,
            WordOrigin::Learned => 1,
            WordOrigin::Imported => 2,
        }
    }
}

/// Usage statistics for a single vocabulary word.
/// This is the "value" in the user dictionary; the normalized word is the key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Normalized form: trimmed, lowercase, no whitespace.
    pub word: String,
    /// Total number of times this word has been spoken or selected.
    pub usage_count: u64,
    /// None means never used, only seeded or imported.
    pub last_used_at: Option<DateTime<Utc>>,
    pub origin: WordOrigin,
}

impl VocabularyEntry {
    pub fn new(word: String, origin: WordOrigin) -> Self {
        Self {
            word,
            usage_count: 0,
            last_used_at: None,
            origin,
        }
    }
}

/// Evaluation context for scoring. The clock is always injected so ranking
/// stays deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext {
    pub now: DateTime<Utc>,
    pub recency_window: Duration,
    pub recency_multiplier: f64,
}

/// One prediction cycle's inputs from the UI layer.
#[derive(Debug, Clone, Default)]
pub struct PredictionRequest {
    /// The in-progress input string. The trailing non-whitespace token is
    /// used as the chip prefix; the word wheel ignores it.
    pub current_text: String,
    /// Words already placed in the utterance this cycle; the wheel skips
    /// them to avoid duplicate suggestions.
    pub excluded_words: HashSet<String>,
}

impl PredictionRequest {
    pub fn new(current_text: impl Into<String>) -> Self {
        Self {
            current_text: current_text.into(),
            excluded_words: HashSet::new(),
        }
    }
}

/// Ranked candidates for the two-ring word wheel.
/// Inner ring holds the top-ranked six words, outer ring the next six.
/// Rings are partially filled when the vocabulary is small; no placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordWheel {
    pub inner: Vec<String>,
    pub outer: Vec<String>,
}

impl WordWheel {
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty() && self.outer.is_empty()
    }
}
