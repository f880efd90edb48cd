use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A tiny URL entry: one identifier mapped to its target URL.
///
/// The creation timestamp is encoded as integer Unix seconds, both on disk
/// and in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TinyUrl {
    /// The short identifier users are redirected through.
    pub id: String,
    /// The target URL.
    pub url: String,
    /// When the entry was created. Never changed by updates.
    #[serde(with = "jiff::fmt::serde::timestamp::second::required")]
    pub created: Timestamp,
}

impl TinyUrl {
    /// Creates an entry stamped with the current time.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            created: now(),
        }
    }

    /// Returns a copy of this entry pointing at another URL.
    ///
    /// The identifier and creation timestamp are kept.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            url: url.into(),
            created: self.created,
        }
    }
}

/// The current time truncated to whole seconds, the precision entries are stored with.
pub fn now() -> Timestamp {
    let now = Timestamp::now();
    Timestamp::from_second(now.as_second()).unwrap_or(now)
}
