//! Environment configuration for different deployment stages

use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroUsize;
use std::path::PathBuf;

use transaction_storage::pending_queue::{DEFAULT_MAX_ENTRIES, DEFAULT_PENDING_KEY};
use transaction_storage::PendingQueueConfig;

/// Namespace the pending queue lives in unless `PENDING_QUEUE_NAMESPACE` is set
const DEFAULT_NAMESPACE: &str = "com.myfinances.app.transactions";

/// Command that opens the notification-access screen on Android
const DEFAULT_SETTINGS_COMMAND: &str =
    "am start -a android.settings.ACTION_NOTIFICATION_LISTENER_SETTINGS";

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (local data directory, API docs enabled)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development | Self::Staging)
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the directory holding the pending queue namespace
    ///
    /// # Panics
    ///
    /// Panics if `PENDING_QUEUE_DIR` is not set outside development
    #[must_use]
    pub fn pending_queue_dir(&self) -> PathBuf {
        match self {
            Self::Production | Self::Staging => env::var("PENDING_QUEUE_DIR")
                .expect("PENDING_QUEUE_DIR environment variable is not set")
                .into(),
            Self::Development => env::var("PENDING_QUEUE_DIR")
                .unwrap_or_else(|_| ".transaction-relay".to_string())
                .into(),
        }
    }

    /// Returns the pending queue namespace
    #[must_use]
    pub fn pending_queue_namespace(&self) -> String {
        env::var("PENDING_QUEUE_NAMESPACE").unwrap_or_else(|_| DEFAULT_NAMESPACE.to_string())
    }

    /// Returns the pending queue configuration
    ///
    /// `PENDING_QUEUE_MAX_ENTRIES=0` disables the size bound.
    #[must_use]
    pub fn pending_queue_config(&self) -> PendingQueueConfig {
        let key =
            env::var("PENDING_QUEUE_KEY").unwrap_or_else(|_| DEFAULT_PENDING_KEY.to_string());
        let max_entries = env::var("PENDING_QUEUE_MAX_ENTRIES")
            .ok()
            .and_then(|v| v.trim().parse::<usize>().ok())
            .map_or(NonZeroUsize::new(DEFAULT_MAX_ENTRIES), NonZeroUsize::new);

        PendingQueueConfig { key, max_entries }
    }

    /// Returns the address the retrieval endpoint binds to
    ///
    /// Defaults to loopback so the queue is only reachable from the device.
    ///
    /// # Errors
    ///
    /// Returns an error if `HOST` or `PORT` cannot be parsed
    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        let host = env::var("HOST").map_or(Ok(IpAddr::V4(Ipv4Addr::LOCALHOST)), |h| h.parse())?;
        let port = env::var("PORT").map_or(Ok(8000), |p| p.parse())?;
        Ok(SocketAddr::new(host, port))
    }

    /// Returns the command line that opens the notification-access settings
    #[must_use]
    pub fn notification_settings_command(&self) -> Vec<String> {
        env::var("NOTIFICATION_SETTINGS_COMMAND")
            .unwrap_or_else(|_| DEFAULT_SETTINGS_COMMAND.to_string())
            .split_whitespace()
            .map(ToString::to_string)
            .collect()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Staging => write!(f, "staging"),
            Self::Development => write!(f, "development"),
        }
    }
}
