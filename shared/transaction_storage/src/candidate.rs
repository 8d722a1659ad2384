use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// A notification judged likely to be a financial transaction
///
/// Serialized as `{"title": ..., "text": ..., "date": <epoch ms>}`, which is the
/// shape the foreground application reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TransactionCandidate {
    /// Notification title, possibly empty
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    /// Notification text (primary text, or the expanded text when that is empty)
    #[serde(rename = "text", default, deserialize_with = "null_as_empty")]
    pub body: String,
    /// Capture time in milliseconds since the Unix epoch
    #[serde(rename = "date")]
    pub observed_at_ms: i64,
}

impl TransactionCandidate {
    /// Creates a candidate stamped with an explicit capture time
    #[must_use]
    pub fn new(title: impl Into<String>, body: impl Into<String>, observed_at_ms: i64) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            observed_at_ms,
        }
    }

    /// Creates a candidate stamped with the current time
    #[must_use]
    pub fn observed_now(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body, Utc::now().timestamp_millis())
    }
}

// Older payloads store a JSON null when the notification had no title.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
