// File: src/core/engine.rs
use crate::core::predict::PredictionEngine;
use crate::core::scoring::ScoringConfig;
use crate::core::seed;
use crate::core::store::VocabularyStore;
use crate::core::types::{PredictionRequest, WordWheel};
use crate::persistence::{load_from_disk, save_to_disk, Flusher, SharedStore};
use crate::recorder::UsageRecorder;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// The constructed-once facade the UI layer holds. Owns the shared store,
/// the ranking pipeline, and the background flusher; hands out
/// `UsageRecorder` handles to the commit paths.
pub struct PredictorEngine {
    store: SharedStore,
    predictor: PredictionEngine,
    flusher: Arc<Flusher>,
    dictionary_path: PathBuf,
}

impl PredictorEngine {
    /// Loads the persisted dictionary, falling back to the core vocabulary
    /// seed when the file is missing, unreadable, or empty. Load failures
    /// are never fatal to startup.
    pub fn from_file_or_new(path: &Path, config: ScoringConfig) -> Self {
        let mut store = match load_from_disk(path) {
            Ok(entries) => VocabularyStore::from_entries(entries),
            Err(err) => {
                warn!(%err, path = %path.display(), "no usable dictionary; starting empty");
                VocabularyStore::new()
            }
        };
        seed::seed_if_empty(&mut store);
        info!(words = store.len(), path = %path.display(), "dictionary ready");

        let store: SharedStore = Arc::new(Mutex::new(store));
        let flusher = Arc::new(Flusher::spawn(Arc::clone(&store), path.to_path_buf()));
        Self {
            store,
            predictor: PredictionEngine::new(config),
            flusher,
            dictionary_path: path.to_path_buf(),
        }
    }

    fn lock_store(&self) -> MutexGuard<'_, VocabularyStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Ranked two-ring candidates for the word wheel.
    pub fn wheel_predictions(
        &self,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> WordWheel {
        let ctx = self.predictor.config().context_at(now);
        self.predictor.wheel(&self.lock_store(), request, &ctx)
    }

    /// Ranked prefix-filtered suggestion chips.
    pub fn chip_suggestions(
        &self,
        request: &PredictionRequest,
        now: DateTime<Utc>,
    ) -> Vec<String> {
        let ctx = self.predictor.config().context_at(now);
        self.predictor.chips(&self.lock_store(), request, &ctx)
    }

    /// Commit-path handle for the speak action and tap handlers.
    pub fn recorder(&self) -> UsageRecorder {
        UsageRecorder::new(Arc::clone(&self.store), Arc::clone(&self.flusher))
    }

    /// Ingests stop-word-filtered (word, frequency) pairs from the import
    /// collaborator. Returns how many were applied.
    pub fn import_words<I>(&self, pairs: I) -> usize
    where
        I: IntoIterator<Item = (String, u64)>,
    {
        let applied = self.lock_store().bulk_import(pairs);
        if applied > 0 {
            self.flusher.signal();
        }
        info!(applied, "vocabulary import finished");
        applied
    }

    pub fn word_count(&self) -> usize {
        self.lock_store().len()
    }

    /// Synchronous flush for teardown paths that cannot wait on the
    /// debounce.
    pub fn save(&self) -> Result<(), crate::errors::PersistenceError> {
        let snapshot = self.lock_store().snapshot();
        save_to_disk(&snapshot, &self.dictionary_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::CORE_VOCABULARY;
    use crate::core::types::WordOrigin;

    fn engine_in(dir: &tempfile::TempDir) -> PredictorEngine {
        PredictorEngine::from_file_or_new(
            &dir.path().join("dictionary.bin"),
            ScoringConfig::default(),
        )
    }

    #[test]
    fn missing_dictionary_seeds_core_vocabulary() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(&dir);
        assert_eq!(engine.word_count(), CORE_VOCABULARY.len());
    }

    #[test]
    fn corrupt_dictionary_never_fails_startup() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("dictionary.bin"), b"not a dictionary").unwrap();

        let engine = engine_in(&dir);
        assert_eq!(engine.word_count(), CORE_VOCABULARY.len());
    }

    #[test]
    fn recorded_words_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now();
        {
            let engine = engine_in(&dir);
            engine.recorder().record_utterance("I want water", now);
            engine.save().unwrap();
        }

        let engine = engine_in(&dir);
        let guard = engine.lock_store();
        assert_eq!(guard.get("water").unwrap().usage_count, 1);
        assert_eq!(guard.get("want").unwrap().origin, WordOrigin::Core);
    }

    #[test]
    fn predictions_reflect_recorded_use_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(&dir);
        let now = Utc::now();

        let recorder = engine.recorder();
        recorder.record("bathroom", now);
        recorder.record("bathroom", now);
        recorder.record("water", now);

        let wheel = engine.wheel_predictions(&PredictionRequest::default(), now);
        assert_eq!(wheel.inner[0], "bathroom");
        assert_eq!(wheel.inner[1], "water");

        let chips = engine.chip_suggestions(&PredictionRequest::new("ba"), now);
        assert_eq!(chips[0], "bathroom");
        assert!(chips.contains(&"bad".to_string()));
    }

    #[test]
    fn import_strengthens_existing_counts() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine_in(&dir);
        let now = Utc::now();
        for _ in 0..3 {
            engine.recorder().record("water", now);
        }

        let applied = engine.import_words(vec![("water".to_string(), 10)]);
        assert_eq!(applied, 1);
        assert_eq!(engine.lock_store().get("water").unwrap().usage_count, 13);
    }
}
