//! Pending transaction queue
//!
//! The queue is the single source of truth for candidates the foreground
//! application has not collected yet. Every operation runs under one mutex, so
//! an append can never interleave with a drain and be cleared unseen.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::candidate::TransactionCandidate;
use crate::error::StorageResult;
use crate::key_value::KeyValueStore;

/// Key the queue is stored under unless configured otherwise
pub const DEFAULT_PENDING_KEY: &str = "pending";

/// Upper bound on queued candidates unless configured otherwise
pub const DEFAULT_MAX_ENTRIES: usize = 1000;

/// Configuration for the pending queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQueueConfig {
    /// Key holding the serialized queue
    pub key: String,
    /// Maximum number of queued candidates; the oldest are evicted beyond it.
    /// `None` leaves the queue unbounded.
    pub max_entries: Option<NonZeroUsize>,
}

impl Default for PendingQueueConfig {
    fn default() -> Self {
        Self {
            key: DEFAULT_PENDING_KEY.to_string(),
            max_entries: NonZeroUsize::new(DEFAULT_MAX_ENTRIES),
        }
    }
}

/// Durable FIFO of transaction candidates with a destructive, total drain
pub struct PendingQueueStorage {
    store: Arc<dyn KeyValueStore>,
    config: PendingQueueConfig,
    lock: Mutex<()>,
}

impl PendingQueueStorage {
    /// Creates a new pending queue over a key-value store
    ///
    /// # Arguments
    ///
    /// * `store` - Durable slot backend
    /// * `config` - Queue key and capacity
    #[must_use]
    pub const fn new(store: Arc<dyn KeyValueStore>, config: PendingQueueConfig) -> Self {
        Self {
            store,
            config,
            lock: Mutex::new(()),
        }
    }

    /// Returns the queue configuration
    #[must_use]
    pub const fn config(&self) -> &PendingQueueConfig {
        &self.config
    }

    /// Appends a candidate, logging instead of failing
    ///
    /// # Returns
    ///
    /// `true` once the candidate is durably stored, `false` if it could not be
    pub fn append(&self, candidate: &TransactionCandidate) -> bool {
        match self.try_append(candidate) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!("Failed to append transaction candidate: {e}");
                false
            }
        }
    }

    /// Appends a candidate to the end of the queue
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the queue cannot be read, serialized or written
    pub fn try_append(&self, candidate: &TransactionCandidate) -> StorageResult<()> {
        let _guard = self.guard();

        let mut pending = self.load()?;
        pending.push(candidate.clone());

        if let Some(max) = self.config.max_entries {
            let overflow = pending.len().saturating_sub(max.get());
            if overflow > 0 {
                pending.drain(..overflow);
                tracing::warn!(
                    "Pending queue reached {} entries, evicted {} oldest",
                    max,
                    overflow
                );
            }
        }

        self.persist(&pending)?;
        tracing::debug!("Stored transaction candidate, {} pending", pending.len());
        Ok(())
    }

    /// Returns every queued candidate in insertion order and empties the queue
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the queue cannot be read or cleared. On error
    /// the stored candidates are left in place.
    pub fn drain_all(&self) -> StorageResult<Vec<TransactionCandidate>> {
        let _guard = self.guard();

        let Some(pending) = self.load_stored()? else {
            return Ok(Vec::new());
        };
        self.persist(&[])?;

        tracing::debug!("Drained {} transaction candidates", pending.len());
        Ok(pending)
    }

    /// Number of candidates currently queued
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the queue cannot be read
    pub fn pending_count(&self) -> StorageResult<usize> {
        let _guard = self.guard();
        Ok(self.load()?.len())
    }

    // The mutex protects no in-memory data, so a panic elsewhere leaves
    // nothing inconsistent behind and the poison flag can be ignored.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> StorageResult<Vec<TransactionCandidate>> {
        Ok(self.load_stored()?.unwrap_or_default())
    }

    /// Reads the stored queue; `None` when the slot has never been written
    fn load_stored(&self) -> StorageResult<Option<Vec<TransactionCandidate>>> {
        let Some(raw) = self.store.get(&self.config.key)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(pending) => Ok(Some(pending)),
            Err(e) => {
                tracing::warn!(
                    "Discarding unreadable pending queue under key '{}': {e}",
                    self.config.key
                );
                Ok(Some(Vec::new()))
            }
        }
    }

    fn persist(&self, pending: &[TransactionCandidate]) -> StorageResult<()> {
        let value = serde_json::to_string(pending)?;
        self.store.put(&self.config.key, &value)
    }
}
