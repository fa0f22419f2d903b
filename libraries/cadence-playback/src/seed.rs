//! Mapping recommendation results onto catalog songs

use cadence_core::{RecommendationResponse, Song, SongCatalog};
use tracing::debug;

/// Catalog songs named by a recommendation, in recommendation order
///
/// Titles without a catalog match are dropped. Repeated titles are kept, as
/// playlists allow duplicates.
pub fn resolve_recommendations<C: SongCatalog + ?Sized>(
    catalog: &C,
    response: &RecommendationResponse,
) -> Vec<Song> {
    response
        .recommended_titles
        .iter()
        .filter_map(|title| {
            let song = catalog.find_by_title(title);
            if song.is_none() {
                debug!(title = %title, "Dropping recommended title with no catalog match");
            }
            song.cloned()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Catalog;

    #[test]
    fn resolves_in_recommendation_order_and_drops_unknown() {
        let catalog = Catalog::new(vec![
            Song::new("1", "Alpha", "X"),
            Song::new("2", "Beta", "Y"),
            Song::new("3", "Gamma", "Z"),
        ]);
        let response = RecommendationResponse::new(["gamma", "Nope", "Alpha", "Alpha"]);

        let ids: Vec<String> = resolve_recommendations(&catalog, &response)
            .into_iter()
            .map(|song| song.id.to_string())
            .collect();
        assert_eq!(ids, vec!["3", "1", "1"]);
    }

    #[test]
    fn empty_response_resolves_to_nothing() {
        let catalog = Catalog::new(vec![Song::new("1", "Alpha", "X")]);
        assert!(resolve_recommendations(&catalog, &RecommendationResponse::default()).is_empty());
    }
}
