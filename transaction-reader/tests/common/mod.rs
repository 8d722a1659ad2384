// Not every helper is used in every test, so we allow dead code
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;
use transaction_reader::{server, settings::SettingsLauncher, types::Environment};
use transaction_storage::{
    KeyValueStore, MemoryKeyValueStore, PendingQueueConfig, PendingQueueStorage, StorageError,
    StorageResult, TransactionCandidate,
};

/// Initialize tracing for tests
pub fn setup_test_env() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .ok();
}

/// Settings launcher that records calls instead of starting anything
#[derive(Default)]
pub struct RecordingLauncher {
    pub calls: AtomicUsize,
    pub fail: bool,
}

impl SettingsLauncher for RecordingLauncher {
    fn open_notification_access_settings(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("no settings activity available");
        }
        Ok(())
    }
}

/// Store whose reads always fail
pub struct UnreadableStore;

impl KeyValueStore for UnreadableStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Io {
            path: format!("{key}.json").into(),
            source: std::io::Error::other("read failed"),
        })
    }

    fn put(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Ok(())
    }
}

/// Store that reads fine but never accepts writes
pub struct ReadOnlyStore {
    inner: MemoryKeyValueStore,
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.inner.get(key)
    }

    fn put(&self, key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Io {
            path: format!("{key}.json").into(),
            source: std::io::Error::other("disk full"),
        })
    }
}

/// Store whose reads block for `delay`, like a queue waiting behind an fsync
pub struct SlowStore {
    inner: MemoryKeyValueStore,
    delay: Duration,
}

impl KeyValueStore for SlowStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        std::thread::sleep(self.delay);
        self.inner.get(key)
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        self.inner.put(key, value)
    }
}

pub struct TestContext {
    pub router: Router,
    pub storage: Arc<PendingQueueStorage>,
    pub launcher: Arc<RecordingLauncher>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_store(Arc::new(MemoryKeyValueStore::new()), false)
    }

    pub fn with_failing_launcher() -> Self {
        Self::with_store(Arc::new(MemoryKeyValueStore::new()), true)
    }

    pub fn unreadable() -> Self {
        Self::with_store(Arc::new(UnreadableStore), false)
    }

    /// Store preloaded with `seed` candidates that rejects every write
    pub fn read_only(seed: &[TransactionCandidate]) -> Self {
        let inner = MemoryKeyValueStore::new();
        let config = PendingQueueConfig::default();
        inner
            .put(&config.key, &serde_json::to_string(seed).unwrap())
            .unwrap();
        Self::with_store(Arc::new(ReadOnlyStore { inner }), false)
    }

    /// Store preloaded with `seed` candidates whose reads take `delay`
    pub fn slow(seed: &[TransactionCandidate], delay: Duration) -> Self {
        let inner = MemoryKeyValueStore::new();
        let config = PendingQueueConfig::default();
        inner
            .put(&config.key, &serde_json::to_string(seed).unwrap())
            .unwrap();
        Self::with_store(Arc::new(SlowStore { inner, delay }), false)
    }

    fn with_store(store: Arc<dyn KeyValueStore>, fail_launcher: bool) -> Self {
        setup_test_env();

        let storage = Arc::new(PendingQueueStorage::new(
            store,
            PendingQueueConfig::default(),
        ));
        let launcher = Arc::new(RecordingLauncher {
            fail: fail_launcher,
            ..RecordingLauncher::default()
        });

        let router = server::router(
            Environment::Development,
            storage.clone(),
            launcher.clone(),
        );

        Self {
            router,
            storage,
            launcher,
        }
    }

    pub fn launcher_calls(&self) -> usize {
        self.launcher.calls.load(Ordering::SeqCst)
    }

    pub async fn send_post_request(&self, route: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("POST")
            .body(Body::empty())
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn send_get_request(&self, route: &str) -> Response {
        let request = Request::builder()
            .uri(route)
            .method("GET")
            .body(Body::empty())
            .unwrap();

        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}
