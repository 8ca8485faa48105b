//! Selection keys naming the configured choice for an audio target.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Sentinel selection meaning "use the engine's own audio".
pub const DEFAULT_SELECTION: &str = "Default";

/// Case-insensitive key identifying either the `Default` sentinel or a named
/// custom profile/file.
///
/// Comparison, hashing, and ordering fold case; surrounding whitespace is
/// trimmed on construction. The original casing is preserved for display and
/// persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SelectionKey(String);

impl SelectionKey {
    pub fn new(raw: impl AsRef<str>) -> Self {
        Self(raw.as_ref().trim().to_string())
    }

    /// The sentinel key meaning "engine baseline".
    pub fn default_sentinel() -> Self {
        Self(DEFAULT_SELECTION.to_string())
    }

    /// Original casing, for display and persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used for comparison and map lookups.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn is_default(&self) -> bool {
        self.0.eq_ignore_ascii_case(DEFAULT_SELECTION)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SelectionKey {
    fn default() -> Self {
        Self::default_sentinel()
    }
}

impl From<String> for SelectionKey {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<SelectionKey> for String {
    fn from(key: SelectionKey) -> Self {
        key.0
    }
}

impl From<&str> for SelectionKey {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl PartialEq for SelectionKey {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for SelectionKey {}

impl Hash for SelectionKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl PartialOrd for SelectionKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SelectionKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.normalized().cmp(&other.normalized())
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
