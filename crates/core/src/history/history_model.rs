//! Search history domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One remembered selection.
///
/// `count` only grows; `last_searched` never moves backwards for a key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Uppercase base-asset ticker
    pub symbol: String,

    /// How many times the user has picked this symbol
    pub count: u64,

    /// When the symbol was last picked
    pub last_searched: DateTime<Utc>,
}
