/// ID types for Cadence entities
use serde::{Deserialize, Serialize};
use std::fmt;

/// Song identifier
///
/// Stable and unique within a catalog. Playlists may still hold the same id
/// more than once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
    /// Create a new song ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SongId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SongId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SongId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn song_id_serializes_as_plain_string() {
        let id = SongId::new("song-42");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"song-42\"");

        let back: SongId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "song-42");
    }
}
