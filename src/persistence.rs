// File: src/persistence.rs
use crate::core::store::VocabularyStore;
use crate::core::types::VocabularyEntry;
use crate::errors::PersistenceError;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use bincode::Options;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// The vocabulary store shared between the engine, the recorder, and the
/// flusher thread. One writer at a time; lock scopes stay short.
pub type SharedStore = Arc<Mutex<VocabularyStore>>;

/// On-disk snapshot of the user dictionary.
#[derive(serde::Serialize, serde::Deserialize)]
struct SerializableState {
    entries: HashMap<String, VocabularyEntry>,
}

/// Upper bound on a plausible dictionary file. A corrupt file whose length
/// prefix decodes to something enormous must come back as `Err`, not abort
/// the process trying to preallocate it.
const MAX_DICTIONARY_BYTES: u64 = 64 * 1024 * 1024;

fn codec() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .allow_trailing_bytes()
        .with_limit(MAX_DICTIONARY_BYTES)
}

/// Writes the snapshot atomically: bincode into a temp file next to the
/// target, then rename over it. A crash mid-write never corrupts the
/// previous dictionary.
pub fn save_to_disk(
    entries: &HashMap<String, VocabularyEntry>,
    path: &Path,
) -> Result<(), PersistenceError> {
    let parent_dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState {
        entries: entries.clone(),
    };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    let writer = BufWriter::new(&temp_file);
    codec().serialize_into(writer, &state)?;
    temp_file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<HashMap<String, VocabularyEntry>, PersistenceError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState = codec().deserialize_from(reader)?;
    Ok(state.entries)
}

enum FlushMessage {
    Flush,
    Shutdown,
}

/// Debounced background persistence. Mutating paths signal the flusher and
/// return immediately; the worker coalesces pending signals, snapshots the
/// store under the lock, and writes off the interactive path. A failed
/// write is logged and retried on the next signal.
pub struct Flusher {
    tx: Sender<FlushMessage>,
    worker: Option<JoinHandle<()>>,
}

const DEBOUNCE: Duration = Duration::from_millis(500);

impl Flusher {
    pub fn spawn(store: SharedStore, path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        let worker = std::thread::Builder::new()
            .name("dictionary-flush".to_string())
            .spawn(move || flush_loop(rx, store, path))
            .ok();
        if worker.is_none() {
            warn!("could not spawn flush thread; dictionary saves only at teardown");
        }
        Self { tx, worker }
    }

    /// Fire-and-forget; never blocks or fails the mutation that caused it.
    pub fn signal(&self) {
        let _ = self.tx.send(FlushMessage::Flush);
    }
}

impl Drop for Flusher {
    fn drop(&mut self) {
        let _ = self.tx.send(FlushMessage::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

fn flush_loop(rx: Receiver<FlushMessage>, store: SharedStore, path: PathBuf) {
    loop {
        match rx.recv() {
            Ok(FlushMessage::Flush) => {
                // Debounce: absorb the burst of signals a rapid typing
                // sequence produces, then write once.
                loop {
                    match rx.recv_timeout(DEBOUNCE) {
                        Ok(FlushMessage::Flush) => continue,
                        Ok(FlushMessage::Shutdown) => {
                            write_snapshot(&store, &path);
                            return;
                        }
                        Err(RecvTimeoutError::Timeout) => break,
                        Err(RecvTimeoutError::Disconnected) => {
                            write_snapshot(&store, &path);
                            return;
                        }
                    }
                }
                write_snapshot(&store, &path);
            }
            Ok(FlushMessage::Shutdown) | Err(_) => {
                write_snapshot(&store, &path);
                return;
            }
        }
    }
}

fn write_snapshot(store: &SharedStore, path: &Path) {
    let snapshot = match store.lock() {
        Ok(guard) => guard.snapshot(),
        Err(poisoned) => poisoned.into_inner().snapshot(),
    };
    match save_to_disk(&snapshot, path) {
        Ok(()) => debug!(words = snapshot.len(), path = %path.display(), "dictionary flushed"),
        Err(err) => warn!(%err, "dictionary flush failed; will retry on next mutation"),
    }
}
