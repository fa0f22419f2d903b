/// Recommendations read from a saved service response
use cadence_core::{RecommendationRequest, RecommendationResponse, Recommender, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`Recommender`] that answers every request with the contents of a file
///
/// The file holds a recommendation service response body, optionally wrapped
/// in a Markdown code fence.
#[derive(Debug, Clone)]
pub struct ResponseFileRecommender {
    path: PathBuf,
}

impl ResponseFileRecommender {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse the response file
    pub fn read(&self) -> Result<RecommendationResponse> {
        let text = std::fs::read_to_string(&self.path)?;
        RecommendationResponse::from_model_text(&text)
    }
}

impl Recommender for ResponseFileRecommender {
    fn recommend(&self, request: &RecommendationRequest) -> Result<RecommendationResponse> {
        debug!(
            history = request.listening_history.len(),
            catalog = request.catalog_metadata.len(),
            path = %self.path.display(),
            "Answering recommendation request from file"
        );
        self.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::CadenceError;
    use std::io::Write;

    #[test]
    fn reads_fenced_response() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "```json").unwrap();
        writeln!(file, r#"{{"recommendedTitles": ["Night Drive"]}}"#).unwrap();
        writeln!(file, "```").unwrap();

        let recommender = ResponseFileRecommender::new(file.path());
        let response = recommender
            .recommend(&RecommendationRequest {
                listening_history: Vec::new(),
                catalog_metadata: Vec::new(),
            })
            .unwrap();
        assert_eq!(response.recommended_titles, vec!["Night Drive"]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let recommender = ResponseFileRecommender::new("/nonexistent/response.json");
        assert!(matches!(recommender.read(), Err(CadenceError::Io(_))));
    }
}
