use serde::{Deserialize, Serialize};

/// A notification as posted by the platform
///
/// Every text field is optional; the platform omits whatever the posting app
/// did not set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    /// Identifier of the posting app (package name)
    #[serde(default)]
    pub source: String,
    /// Notification title
    #[serde(default)]
    pub title: Option<String>,
    /// Primary notification text
    #[serde(default)]
    pub text: Option<String>,
    /// Expanded ("big text") notification body
    #[serde(default)]
    pub big_text: Option<String>,
}

impl NotificationEvent {
    /// Title, or the empty string when absent
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Primary text, or the empty string when absent
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Expanded text, or the empty string when absent
    #[must_use]
    pub fn big_text(&self) -> &str {
        self.big_text.as_deref().unwrap_or_default()
    }
}
