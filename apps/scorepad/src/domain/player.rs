use std::fmt;

use ulid::Ulid;
use unicode_normalization::UnicodeNormalization;

/// Stable player identity; survives renames and is the key of bets and results.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(String);

impl PlayerId {
    /// Fresh, unique id.
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    /// New player with a generated id and a normalized name.
    pub fn new(name: &str) -> Self {
        Self {
            id: PlayerId::generate(),
            name: normalize_name(name),
        }
    }
}

/// Trim and NFKC-normalize a display name so visually equal names compare equal.
pub fn normalize_name(name: &str) -> String {
    name.trim().nfkc().collect()
}
