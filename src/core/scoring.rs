// File: src/core/scoring.rs
use crate::core::types::{ScoreContext, VocabularyEntry};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

/// Tunable ranking constants. Kept out of the scorer itself so tests can
/// inject arbitrary contexts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Days within which a word counts as recently used.
    pub recency_window_days: i64,
    /// Boost applied to recently-used words.
    pub recency_multiplier: f64,
    /// Word-wheel ring capacity (inner and outer each).
    pub ring_size: usize,
    /// Suggestion-chip row capacity.
    pub chip_count: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            recency_window_days: 7,
            recency_multiplier: 1.2,
            ring_size: 6,
            chip_count: 8,
        }
    }
}

impl ScoringConfig {
    /// Reads overrides from a JSON file; absent fields keep their defaults.
    pub fn from_file(path: &std::path::Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    /// Startup path for the binaries: a missing override file means
    /// defaults; an unreadable one is logged and ignored, never fatal.
    pub fn load_or_default(path: &std::path::Path) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => {
                tracing::warn!(%err, path = %path.display(), "scoring config unreadable; using defaults");
                Self::default()
            }
        }
    }

    pub fn context_at(&self, now: DateTime<Utc>) -> ScoreContext {
        ScoreContext {
            now,
            recency_window: Duration::days(self.recency_window_days),
            recency_multiplier: self.recency_multiplier,
        }
    }

    /// Total word-wheel capacity (both rings).
    pub fn wheel_capacity(&self) -> usize {
        self.ring_size * 2
    }
}

/// Pure usage score: the raw use count, boosted when the word was used
/// inside the recency window. A count of zero stays zero; recency never
/// manufactures score from unused words.
pub fn score(entry: &VocabularyEntry, ctx: &ScoreContext) -> f64 {
    if entry.usage_count == 0 {
        return 0.0;
    }
    let base = entry.usage_count as f64;
    match entry.last_used_at {
        // A timestamp ahead of `now` still qualifies; clock skew should not
        // strip the boost.
        Some(used) if ctx.now - used <= ctx.recency_window => {
            base * ctx.recency_multiplier
        }
        _ => base,
    }
}
