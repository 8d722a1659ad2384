use std::env;

/// Default capacity of the channel between the feed and the processor
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Configuration for the listener worker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Number of decoded notifications buffered ahead of the processor
    pub channel_capacity: usize,
}

impl ListenerConfig {
    /// Creates a `ListenerConfig` from environment variables
    ///
    /// `LISTENER_CHANNEL_CAPACITY` overrides the channel capacity; zero or
    /// unparsable values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let channel_capacity = env::var("LISTENER_CHANNEL_CAPACITY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|capacity| *capacity > 0)
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY);

        Self { channel_capacity }
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}
