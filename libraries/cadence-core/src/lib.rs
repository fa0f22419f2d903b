//! Cadence Core
//!
//! Platform-agnostic domain types and external-service contracts for Cadence.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `SongId`, `SongDuration`
//! - **Catalog**: the read-only `SongCatalog` trait and an in-memory `Catalog`
//! - **Recommendations**: the `Recommender` trait and its request/response types
//! - **Error Handling**: Unified `CadenceError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{Catalog, Song, SongCatalog};
//!
//! let catalog = Catalog::new(vec![
//!     Song::new("1", "Morning Light", "Ana").with_media_url("https://cdn.example/1.mp3"),
//!     Song::new("2", "Night Drive", "Bo"),
//! ]);
//!
//! let song = catalog.find_by_title("night drive").unwrap();
//! assert_eq!(song.id.as_str(), "2");
//! assert!(song.playable_url().is_none());
//! ```

#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod recommend;
pub mod types;

pub use catalog::{Catalog, SongCatalog};
pub use error::{CadenceError, Result};
pub use recommend::{CatalogMetadata, RecommendationRequest, RecommendationResponse, Recommender};
pub use types::{Song, SongDuration, SongId};
