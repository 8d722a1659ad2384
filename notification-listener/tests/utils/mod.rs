#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::Arc;

use notification_listener::NotificationListener;
use tempfile::TempDir;
use transaction_storage::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, PendingQueueConfig,
    PendingQueueStorage, StorageError, StorageResult,
};

/// Initialize tracing for tests
fn setup_test_tracing() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

pub struct TestContext {
    pub storage: Arc<PendingQueueStorage>,
    pub listener: Arc<NotificationListener>,
    // Keep the directory alive for file-backed contexts
    _dir: Option<TempDir>,
}

impl TestContext {
    /// Listener over an in-memory queue
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryKeyValueStore::new()), None, None)
    }

    /// Listener over a file-backed queue in a fresh temp directory
    pub fn file_backed() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileKeyValueStore::open(dir.path(), "com.myfinances.app.transactions")
            .expect("Failed to open store");
        Self::with_store(Arc::new(store), Some(dir), None)
    }

    /// Listener over an in-memory queue holding at most `max_entries`
    pub fn bounded(max_entries: usize) -> Self {
        Self::with_store(
            Arc::new(MemoryKeyValueStore::new()),
            None,
            NonZeroUsize::new(max_entries),
        )
    }

    /// Listener whose storage rejects every write
    pub fn failing() -> Self {
        Self::with_store(Arc::new(FailingStore), None, None)
    }

    fn with_store(
        store: Arc<dyn KeyValueStore>,
        dir: Option<TempDir>,
        max_entries: Option<NonZeroUsize>,
    ) -> Self {
        setup_test_tracing();

        let storage = Arc::new(PendingQueueStorage::new(
            store,
            PendingQueueConfig {
                max_entries,
                ..PendingQueueConfig::default()
            },
        ));
        let listener = Arc::new(NotificationListener::new(Arc::clone(&storage)));

        Self {
            storage,
            listener,
            _dir: dir,
        }
    }
}

struct FailingStore;

impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn put(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::InvalidSlotName("read-only".to_string()))
    }
}
