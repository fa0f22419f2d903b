//! Recommendation service contract
//!
//! The recommendation service receives the listening history plus catalog
//! metadata and answers with an ordered list of song titles. How it arrives at
//! them is not our concern; the player only maps the titles back onto catalog
//! entries.

use crate::error::{CadenceError, Result};
use crate::types::Song;
use serde::{Deserialize, Serialize};

/// Catalog fields the recommendation service sees for each song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMetadata {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub theme: String,
}

impl From<&Song> for CatalogMetadata {
    fn from(song: &Song) -> Self {
        Self {
            title: song.title.clone(),
            artist: song.artist.clone(),
            genre: song.genre.clone(),
            theme: song.theme.clone(),
        }
    }
}

/// Request sent to the recommendation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    /// Titles of recently played songs, oldest first
    pub listening_history: Vec<String>,

    /// Metadata for every song in the catalog
    pub catalog_metadata: Vec<CatalogMetadata>,
}

/// Ordered suggestions returned by the recommendation service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommended_titles: Vec<String>,
}

impl RecommendationResponse {
    pub fn new(titles: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            recommended_titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a response body produced by a text-generation service
    ///
    /// Such services frequently wrap the JSON object in a Markdown code fence
    /// (```` ```json ... ``` ````); the fence is stripped before parsing.
    pub fn from_model_text(text: &str) -> Result<Self> {
        let body = strip_code_fence(text.trim());
        serde_json::from_str(body)
            .map_err(|e| CadenceError::recommendation(format!("unparseable response: {e}")))
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Language tag, e.g. "json"
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Source of song recommendations
pub trait Recommender {
    fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse>;
}
