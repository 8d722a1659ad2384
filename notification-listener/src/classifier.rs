//! Heuristic detection of financial transaction notifications
//!
//! Everything here is a pure function of the notification text so it can be
//! exercised without storage.

use std::sync::LazyLock;

use regex::Regex;
use strum::{Display, EnumIter};

/// Currency symbols that mark a notification as a transaction
const CURRENCY_SYMBOLS: &[&str] = &["€"];

const EURO_WORD: &str = "euro";

const PURCHASE_WORD: &str = "purchase";

/// Greek for "purchase" and "charge". All-caps alerts lose the tonos when
/// lower-cased, so the unaccented spellings are listed too.
const LOCALIZED_KEYWORDS: &[&str] = &["αγορά", "χρέωση", "αγορα", "χρεωση"];

/// Digits, a `.` or `,` separator, then two digits. Not anchored on word
/// boundaries, so fragments of longer numbers also match.
static DECIMAL_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+[.,][0-9]{2}").expect("Invalid regex"));

/// The rule that identified a notification as a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum MatchReason {
    /// A currency symbol such as `€`
    CurrencySymbol,
    /// The word "euro"
    EuroWord,
    /// The word "purchase"
    PurchaseWord,
    /// A Greek purchase or charge keyword
    LocalizedKeyword,
    /// A two-decimal amount such as `12.50` or `3,99`
    DecimalAmount,
}

/// Picks the notification body: the primary text, falling back to the
/// expanded text when the primary text is empty
#[must_use]
pub fn select_text<'a>(main_text: &'a str, expanded_text: &'a str) -> &'a str {
    if main_text.is_empty() {
        expanded_text
    } else {
        main_text
    }
}

/// Joins title and body with a single space and lower-cases the result
///
/// Lower-casing uses the locale-independent Unicode mapping, which folds Greek
/// (including final sigma) the same way on every device.
#[must_use]
pub fn normalize(title: &str, text: &str) -> String {
    format!("{title} {text}").to_lowercase()
}

/// Returns the first rule matching the normalized text, if any
#[must_use]
pub fn classify(normalized: &str) -> Option<MatchReason> {
    if CURRENCY_SYMBOLS.iter().any(|s| normalized.contains(s)) {
        Some(MatchReason::CurrencySymbol)
    } else if normalized.contains(EURO_WORD) {
        Some(MatchReason::EuroWord)
    } else if normalized.contains(PURCHASE_WORD) {
        Some(MatchReason::PurchaseWord)
    } else if LOCALIZED_KEYWORDS.iter().any(|k| normalized.contains(k)) {
        Some(MatchReason::LocalizedKeyword)
    } else if DECIMAL_AMOUNT.is_match(normalized) {
        Some(MatchReason::DecimalAmount)
    } else {
        None
    }
}
