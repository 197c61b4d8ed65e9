use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use shared::rating::{Score, VoteMap};
use thiserror::Error;
use tracing::{debug, error, info, warn};

const LEDGER_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("ledger I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("ledger document is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("ledger lock poisoned")]
    Poisoned,
}

/// On-disk layout: `{"version": 1, "votes": {from: {to: score}}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerDoc {
    pub version: u32,
    pub votes: VoteMap,
}

impl LedgerDoc {
    fn empty() -> Self {
        Self {
            version: LEDGER_VERSION,
            votes: BTreeMap::new(),
        }
    }
}

/// Owns the single shared ledger document: the in-memory map behind a
/// mutex, plus the file it is flushed to. Every write is a serialized
/// lock -> mutate -> persist sequence, so concurrent votes by the same
/// voter cannot lose each other's updates.
#[derive(Debug)]
pub struct LedgerStore {
    path: PathBuf,
    doc: Mutex<LedgerDoc>,
}

impl LedgerStore {
    /// Loads the ledger from `path`, creating any missing parent directory
    /// and an empty version-1 document on first use.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let doc = if path.exists() {
            let raw = fs::read_to_string(path)?;
            let doc: LedgerDoc = serde_json::from_str(&raw)?;
            if doc.version != LEDGER_VERSION {
                warn!("ledger at {} has version {}, expected {LEDGER_VERSION}", path.display(), doc.version);
            }
            doc
        } else {
            let doc = LedgerDoc::empty();
            write_doc(path, &doc)?;
            doc
        };

        info!("📒 Ledger loaded from {} ({} voters)", path.display(), doc.votes.len());
        Ok(Self {
            path: path.to_path_buf(),
            doc: Mutex::new(doc),
        })
    }

    /// Upserts the `(from, to)` edge and flushes the whole document before
    /// returning. If the flush fails the in-memory entry is rolled back, so
    /// memory and disk never diverge and no partial write is observable.
    pub fn record(&self, from: &str, to: &str, score: Score) -> Result<(), StoreError> {
        let mut doc = self.doc.lock().map_err(|_| StoreError::Poisoned)?;

        let prior = doc
            .votes
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), score.get());

        if let Err(e) = write_doc(&self.path, &doc) {
            error!("Failed to persist vote {from} -> {to}: {e}");
            if let Some(targets) = doc.votes.get_mut(from) {
                match prior {
                    Some(old) => {
                        targets.insert(to.to_string(), old);
                    }
                    None => {
                        targets.remove(to);
                        if targets.is_empty() {
                            doc.votes.remove(from);
                        }
                    }
                }
            }
            return Err(e);
        }

        debug!("Recorded vote {from} -> {to} = {}", score.get());
        Ok(())
    }

    /// Consistent snapshot of the vote map for aggregation.
    pub fn snapshot(&self) -> Result<VoteMap, StoreError> {
        let doc = self.doc.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(doc.votes.clone())
    }
}

/// Write-to-temp-then-rename so a crashed flush never leaves a torn
/// document behind.
fn write_doc(path: &Path, doc: &LedgerDoc) -> Result<(), StoreError> {
    let raw = serde_json::to_string_pretty(doc)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, raw)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
