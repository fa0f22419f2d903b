//! Song catalog
//!
//! The catalog is read-only from the player's point of view: it supplies
//! ordered song collections and resolves ids and titles back to songs.

use crate::error::{CadenceError, Result};
use crate::recommend::CatalogMetadata;
use crate::types::{Song, SongId};
use std::path::Path;

/// Read-only ordered collection of songs
pub trait SongCatalog {
    /// All songs in catalog order
    fn songs(&self) -> &[Song];

    /// Look up a song by id (first match)
    fn get(&self, id: &SongId) -> Option<&Song> {
        self.songs().iter().find(|song| &song.id == id)
    }

    /// Look up a song by title (first match)
    ///
    /// Matching ignores surrounding whitespace and letter case, which is how
    /// titles come back from the recommendation service.
    fn find_by_title(&self, title: &str) -> Option<&Song> {
        let wanted = normalize_title(title);
        if wanted.is_empty() {
            return None;
        }
        self.songs()
            .iter()
            .find(|song| normalize_title(&song.title) == wanted)
    }

    /// Metadata sent to the recommendation service
    fn metadata(&self) -> Vec<CatalogMetadata> {
        self.songs().iter().map(CatalogMetadata::from).collect()
    }
}

fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    songs: Vec<Song>,
}

impl Catalog {
    /// Create a catalog from songs in catalog order
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Parse a catalog from a JSON array of song records
    pub fn from_json(json: &str) -> Result<Self> {
        let songs: Vec<Song> = serde_json::from_str(json)
            .map_err(|e| CadenceError::catalog(format!("invalid catalog JSON: {e}")))?;
        Ok(Self::new(songs))
    }

    /// Load a catalog from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

impl SongCatalog for Catalog {
    fn songs(&self) -> &[Song] {
        &self.songs
    }
}

impl From<Vec<Song>> for Catalog {
    fn from(songs: Vec<Song>) -> Self {
        Self::new(songs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Song::new("1", "Morning Light", "Ana").with_genre("folk"),
            Song::new("2", "Night Drive", "Bo").with_theme("city"),
            Song::new("1", "Duplicate Id", "Cy"),
        ])
    }

    #[test]
    fn get_resolves_first_match() {
        let catalog = catalog();
        let song = catalog.get(&SongId::new("1")).unwrap();
        assert_eq!(song.title, "Morning Light");
        assert!(catalog.get(&SongId::new("9")).is_none());
    }

    #[test]
    fn find_by_title_ignores_case_and_whitespace() {
        let catalog = catalog();
        let song = catalog.find_by_title("  night DRIVE ").unwrap();
        assert_eq!(song.id.as_str(), "2");
        assert!(catalog.find_by_title("").is_none());
        assert!(catalog.find_by_title("Unknown").is_none());
    }

    #[test]
    fn metadata_keeps_catalog_order() {
        let metadata = catalog().metadata();
        assert_eq!(metadata.len(), 3);
        assert_eq!(metadata[0].title, "Morning Light");
        assert_eq!(metadata[0].genre, "folk");
        assert_eq!(metadata[1].theme, "city");
    }

    #[test]
    fn malformed_json_is_a_catalog_error() {
        let err = Catalog::from_json("{not json").unwrap_err();
        assert!(matches!(err, CadenceError::Catalog(_)));
    }
}
