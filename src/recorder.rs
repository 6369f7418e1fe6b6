// File: src/recorder.rs
use crate::persistence::Flusher;
use crate::persistence::SharedStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::debug;

/// The single integration point for word commits. The speak action, the
/// word-wheel tap handler, and the chip tap handler all call `record` when
/// a word actually goes into the utterance; previews and highlights never
/// touch it.
pub struct UsageRecorder {
    store: SharedStore,
    flusher: Arc<Flusher>,
}

impl UsageRecorder {
    pub fn new(store: SharedStore, flusher: Arc<Flusher>) -> Self {
        Self { store, flusher }
    }

    /// Updates the in-memory store synchronously, then signals a background
    /// flush. Words failing normalization are dropped quietly; a stray
    /// empty token from the UI must not surface as an error mid-utterance.
    pub fn record(&self, word: &str, at: DateTime<Utc>) {
        let result = {
            let mut guard = match self.store.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            guard.record_use(word, at)
        };
        match result {
            Ok(()) => self.flusher.signal(),
            Err(err) => debug!(word, %err, "skipped unrecordable word"),
        }
    }

    /// Records every word of a spoken utterance in order.
    pub fn record_utterance(&self, text: &str, at: DateTime<Utc>) {
        for word in text.split_whitespace() {
            self.record(word, at);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::VocabularyStore;
    use crate::persistence::Flusher;
    use std::sync::{Arc, Mutex};

    fn recorder_with_store() -> (UsageRecorder, SharedStore) {
        let dir = tempfile::tempdir().unwrap();
        let store: SharedStore = Arc::new(Mutex::new(VocabularyStore::new()));
        let flusher = Arc::new(Flusher::spawn(
            Arc::clone(&store),
            dir.path().join("dictionary.bin"),
        ));
        (UsageRecorder::new(Arc::clone(&store), flusher), store)
    }

    #[test]
    fn record_updates_store_immediately() {
        let (recorder, store) = recorder_with_store();
        let now = Utc::now();
        recorder.record("Water", now);
        recorder.record("water", now);

        let guard = store.lock().unwrap();
        assert_eq!(guard.get("water").unwrap().usage_count, 2);
    }

    #[test]
    fn invalid_words_are_dropped_not_fatal() {
        let (recorder, store) = recorder_with_store();
        recorder.record("   ", Utc::now());
        assert!(store.lock().unwrap().is_empty());
    }

    #[test]
    fn utterance_records_each_word() {
        let (recorder, store) = recorder_with_store();
        recorder.record_utterance("I want more water", Utc::now());

        let guard = store.lock().unwrap();
        assert_eq!(guard.len(), 4);
        assert_eq!(guard.get("i").unwrap().usage_count, 1);
        assert_eq!(guard.get("water").unwrap().usage_count, 1);
    }
}
