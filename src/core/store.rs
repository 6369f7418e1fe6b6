// File: src/core/store.rs
use crate::core::types::{VocabularyEntry, WordOrigin};
use crate::errors::InvalidWordError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Normalizes a raw word into a dictionary key: trimmed and lowercased.
/// Empty results and interior whitespace are rejected.
pub fn normalize_word(raw: &str) -> Result<String, InvalidWordError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidWordError::Empty);
    }
    if trimmed.chars().any(char::is_whitespace) {
        return Err(InvalidWordError::ContainsWhitespace(trimmed.to_string()));
    }
    Ok(trimmed.to_lowercase())
}

/// The user dictionary: one entry per normalized word. All mutation goes
/// through this type; callers never hold references into the map across
/// mutations. `record_use` is the sole path that increments usage counts
/// (imports strengthen counts in bulk but never reset them).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocabularyStore {
    entries: HashMap<String, VocabularyEntry>,
}

impl VocabularyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: HashMap<String, VocabularyEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&VocabularyEntry> {
        self.entries.get(word)
    }

    /// Unordered snapshot. Callers must re-rank; iteration order carries no
    /// meaning.
    pub fn all(&self) -> impl Iterator<Item = &VocabularyEntry> {
        self.entries.values()
    }

    pub fn snapshot(&self) -> HashMap<String, VocabularyEntry> {
        self.entries.clone()
    }

    /// Inserts the word if absent with a zero usage count. Existing entries
    /// are left untouched; in particular an existing origin is never
    /// downgraded by a later upsert.
    pub fn upsert(&mut self, raw: &str, origin: WordOrigin) -> Result<(), InvalidWordError> {
        let word = normalize_word(raw)?;
        self.entries
            .entry(word.clone())
            .or_insert_with(|| VocabularyEntry::new(word, origin));
        Ok(())
    }

    /// Records a committed use: creates the word as Learned on first sight,
    /// otherwise increments its count and stamps the use time.
    pub fn record_use(
        &mut self,
        raw: &str,
        at: DateTime<Utc>,
    ) -> Result<(), InvalidWordError> {
        let word = normalize_word(raw)?;
        let entry = self
            .entries
            .entry(word.clone())
            .or_insert_with(|| VocabularyEntry::new(word, WordOrigin::Learned));
        entry.usage_count += 1;
        entry.last_used_at = Some(at);
        debug!(word = %entry.word, count = entry.usage_count, "recorded use");
        Ok(())
    }

    /// Ingests stop-word-filtered (word, frequency) pairs from the import
    /// collaborator. Frequencies accumulate onto existing counts; existing
    /// origins are preserved. Words failing normalization are skipped.
    /// Returns the number of pairs applied.
    pub fn bulk_import<I>(&mut self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let mut applied = 0;
        for (raw, frequency) in pairs {
            let word = match normalize_word(&raw) {
                Ok(word) => word,
                Err(err) => {
                    debug!(raw = %raw, %err, "skipping unimportable word");
                    continue;
                }
            };
            let entry = self
                .entries
                .entry(word.clone())
                .or_insert_with(|| VocabularyEntry::new(word, WordOrigin::Imported));
            entry.usage_count += frequency;
            applied += 1;
        }
        applied
    }

    /// No-op when the word is absent.
    pub fn remove(&mut self, word: &str) {
        self.entries.remove(word);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_word("  Water\n"), Ok("water".to_string()));
        assert_eq!(normalize_word("YES"), Ok("yes".to_string()));
    }

    #[test]
    fn normalize_rejects_empty_and_interior_whitespace() {
        assert_eq!(normalize_word(""), Err(InvalidWordError::Empty));
        assert_eq!(normalize_word("   \t"), Err(InvalidWordError::Empty));
        assert!(matches!(
            normalize_word("two words"),
            Err(InvalidWordError::ContainsWhitespace(_))
        ));
    }

    #[test]
    fn upsert_leaves_existing_entries_untouched() {
        let mut store = VocabularyStore::new();
        store.record_use("water", Utc::now()).unwrap();
        store.upsert("Water", WordOrigin::Imported).unwrap();

        let entry = store.get("water").unwrap();
        assert_eq!(entry.usage_count, 1);
        assert_eq!(entry.origin, WordOrigin::Learned);
    }

    #[test]
    fn record_use_increments_exactly_once_per_call() {
        let mut store = VocabularyStore::new();
        let now = Utc::now();
        for _ in 0..5 {
            store.record_use("help", now).unwrap();
        }
        let entry = store.get("help").unwrap();
        assert_eq!(entry.usage_count, 5);
        assert_eq!(entry.last_used_at, Some(now));
        assert_eq!(entry.origin, WordOrigin::Learned);
    }

    #[test]
    fn record_use_on_seeded_word_keeps_origin() {
        let mut store = VocabularyStore::new();
        store.upsert("yes", WordOrigin::Core).unwrap();
        store.record_use("yes", Utc::now()).unwrap();
        assert_eq!(store.get("yes").unwrap().origin, WordOrigin::Core);
    }

    #[test]
    fn bulk_import_accumulates_onto_learned_usage() {
        let mut store = VocabularyStore::new();
        let now = Utc::now();
        for _ in 0..3 {
            store.record_use("water", now).unwrap();
        }

        let applied = store.bulk_import(vec![("Water".to_string(), 10)]);
        assert_eq!(applied, 1);

        let entry = store.get("water").unwrap();
        assert_eq!(entry.usage_count, 13);
        assert_eq!(entry.origin, WordOrigin::Learned);
    }

    #[test]
    fn repeated_import_doubles_contribution() {
        let mut store = VocabularyStore::new();
        let pairs = vec![("banana".to_string(), 4)];
        store.bulk_import(pairs.clone());
        store.bulk_import(pairs);
        assert_eq!(store.get("banana").unwrap().usage_count, 8);
    }

    #[test]
    fn bulk_import_skips_bad_words_without_aborting() {
        let mut store = VocabularyStore::new();
        let applied = store.bulk_import(vec![
            ("  ".to_string(), 5),
            ("ok".to_string(), 2),
            ("two words".to_string(), 9),
        ]);
        assert_eq!(applied, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("ok").unwrap().usage_count, 2);
    }

    #[test]
    fn remove_is_noop_on_absent_word() {
        let mut store = VocabularyStore::new();
        store.remove("ghost");
        store.upsert("real", WordOrigin::Core).unwrap();
        store.remove("real");
        assert!(store.is_empty());
    }
}
