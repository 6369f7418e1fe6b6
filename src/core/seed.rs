// File: src/core/seed.rs
use crate::core::store::VocabularyStore;
use crate::core::types::WordOrigin;
use tracing::info;

/// High-frequency AAC core vocabulary, loaded once when no persisted
/// dictionary exists. Counts start at zero so seeded words never outrank
/// anything the user has actually said.
pub const CORE_VOCABULARY: &[&str] = &[
    "yes", "no", "help", "want", "more", "stop", "go", "please", "thanks",
    "hello", "goodbye", "i", "you", "we", "it", "me", "my", "your", "that",
    "this", "what", "who", "where", "when", "why", "how", "not", "like",
    "love", "need", "have", "get", "give", "make", "do", "eat", "drink",
    "water", "food", "bathroom", "tired", "hurt", "happy", "sad", "hot",
    "cold", "good", "bad", "big", "little", "now", "later", "again", "done",
    "open", "close", "come", "look", "listen", "wait",
];

/// Inserts the core vocabulary into an empty store. Non-empty stores are
/// left alone so a seeded word never reappears after the user removes it.
pub fn seed_if_empty(store: &mut VocabularyStore) {
    if !store.is_empty() {
        return;
    }
    for word in CORE_VOCABULARY {
        // Seed words are static valid tokens; normalization cannot fail.
        let _ = store.upsert(word, WordOrigin::Core);
    }
    info!(words = store.len(), "seeded core vocabulary");
}
