// File: src/core/predict.rs
use crate::core::scoring::{self, ScoringConfig};
use crate::core::store::VocabularyStore;
use crate::core::types::{PredictionRequest, ScoreContext, VocabularyEntry, WordWheel};
use std::cmp::Ordering;

/// Extracts the in-progress token: the longest trailing run of
/// non-whitespace characters, lowercased. Empty when the text is empty or
/// ends in whitespace. Control characters are tolerated; they simply count
/// as part of a run or terminate nothing.
pub fn trailing_token(text: &str) -> String {
    text.rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .to_lowercase()
}

fn rank_descending(candidates: &mut Vec<(f64, &VocabularyEntry)>) {
    candidates.sort_by(|(score_a, a), (score_b, b)| {
        score_b
            .partial_cmp(score_a)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.origin.tie_break_rank().cmp(&b.origin.tie_break_rank()))
            .then_with(|| a.word.cmp(&b.word))
    });
}

/// Both prediction surfaces share one pipeline: score every candidate with
/// the usage scorer, sort descending with the origin/alphabetical
/// tie-break, truncate. The ranking path never errors; malformed input
/// degrades to an empty prefix.
pub struct PredictionEngine {
    config: ScoringConfig,
}

impl PredictionEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Word-wheel candidates: globally top-ranked words ("next likely
    /// word", no prefix filter), minus the request's excluded words. Top
    /// six fill the inner ring, the next six the outer ring.
    pub fn wheel(
        &self,
        store: &VocabularyStore,
        request: &PredictionRequest,
        ctx: &ScoreContext,
    ) -> WordWheel {
        let mut candidates: Vec<(f64, &VocabularyEntry)> = store
            .all()
            .filter(|entry| !request.excluded_words.contains(&entry.word))
            .map(|entry| (scoring::score(entry, ctx), entry))
            .collect();
        rank_descending(&mut candidates);

        let ring_size = self.config.ring_size;
        let mut words = candidates
            .into_iter()
            .take(self.config.wheel_capacity())
            .map(|(_, entry)| entry.word.clone());

        WordWheel {
            inner: words.by_ref().take(ring_size).collect(),
            outer: words.collect(),
        }
    }

    /// Suggestion chips: completions of the trailing token, ranked by the
    /// same pipeline. An empty token means no prefix filter (top words by
    /// score, flattened). A word equal to the token itself stays eligible;
    /// the user may want exactly that completion.
    pub fn chips(
        &self,
        store: &VocabularyStore,
        request: &PredictionRequest,
        ctx: &ScoreContext,
    ) -> Vec<String> {
        let token = trailing_token(&request.current_text);

        let mut candidates: Vec<(f64, &VocabularyEntry)> = store
            .all()
            .filter(|entry| token.is_empty() || entry.word.starts_with(&token))
            .map(|entry| (scoring::score(entry, ctx), entry))
            .collect();
        rank_descending(&mut candidates);

        candidates
            .into_iter()
            .take(self.config.chip_count)
            .map(|(_, entry)| entry.word.clone())
            .collect()
    }
}
