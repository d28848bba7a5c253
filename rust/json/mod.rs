//! JSON conversion for resolved calendar output, via ``serde_json``.
//!
//! Resolved years are consumed by rendering and export code outside this crate, which is why
//! the output types implement [`JSON`]. Calendar definitions hold `fn` rules and are not
//! serializable; only their [`CalendarSettings`](crate::calendar::CalendarSettings) are.

use serde::{Deserialize, Serialize};

/// Handles the `to` and `from` JSON conversion.
pub trait JSON: Serialize + for<'de> Deserialize<'de> {
    /// Return a compact JSON string representing the object.
    fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Return an indented JSON string, for inspection of resolved tables.
    fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Create an object from a JSON string representation.
    fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
