//! Cadence - Playback Management
//!
//! Platform-agnostic playlist and playback state machine for Cadence.
//!
//! This crate provides:
//! - Playlist with a wraparound cursor (front insertion, first-match lookup)
//! - Playback controller (`Idle`/`Loading`/`Playing`/`Paused`/`Error`)
//! - Device notification adapter with stale-source and stale-request guards
//! - Derived UI state (is-playing, progress fraction, duration)
//! - Listening history and recommendation-based playlist seeding
//! - Event queue for UI synchronization
//!
//! # Architecture
//!
//! `cadence-playback` performs no I/O. The one audio output device is supplied
//! by the host through the [`AudioOutput`] trait; everything the device
//! reports comes back as a [`DeviceNotification`] passed to
//! [`PlaybackController::handle_notification`]. All calls happen on one logical
//! thread, so no locking is involved.
//!
//! # Example: Basic Playback
//!
//! ```rust
//! use cadence_core::Song;
//! use cadence_playback::{
//!     AudioOutput, DeviceNotification, PlayTicket, PlaybackController, PlayerConfig,
//!     PlayerState, SourceId,
//! };
//!
//! // Minimal device that remembers the last play request
//! #[derive(Default)]
//! struct Output {
//!     last_ticket: Option<PlayTicket>,
//! }
//!
//! impl AudioOutput for Output {
//!     fn set_source(&mut self, _source: SourceId, _url: &str) {}
//!     fn play(&mut self, ticket: PlayTicket) {
//!         self.last_ticket = Some(ticket);
//!     }
//!     fn pause(&mut self) {}
//!     fn seek(&mut self, _seconds: f64) {}
//!     fn current_time(&self) -> f64 {
//!         0.0
//!     }
//!     fn duration(&self) -> f64 {
//!         f64::NAN
//!     }
//! }
//!
//! let mut player = PlaybackController::new(Output::default(), PlayerConfig::default());
//!
//! let song = Song::new("1", "Morning Light", "Ana").with_media_url("https://cdn.example/1.mp3");
//! player.select_song(song).unwrap();
//! assert_eq!(player.state(), PlayerState::Loading);
//!
//! // The device confirms playback asynchronously
//! let ticket = player.output().last_ticket.unwrap();
//! player.handle_notification(DeviceNotification::play_resolved(ticket, Ok(())));
//! assert!(player.is_playing());
//! ```

mod controller;
mod device;
mod error;
mod events;
mod history;
mod notify;
mod playlist;
mod seed;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use device::{AudioOutput, PlayTicket, SourceId};
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use history::ListeningHistory;
pub use notify::{DeviceNotification, NotificationKind, NotificationOutcome};
pub use playlist::Playlist;
pub use seed::resolve_recommendations;
pub use types::{
    known_duration, progress_fraction, FailureKind, PlaybackSnapshot, PlayerConfig, PlayerState,
};
