//! Core types for playback management

use cadence_core::Song;
use serde::{Deserialize, Serialize};

/// Playback controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// No song loaded
    Idle,

    /// Source set and play requested, waiting for the device to confirm
    Loading,

    /// Device confirmed playback
    Playing,

    /// Paused mid-song
    Paused,

    /// Device failed to load or play the current song (song is retained)
    Error,
}

impl PlayerState {
    /// Whether the UI should show the song as playing
    pub fn is_playing(self) -> bool {
        self == PlayerState::Playing
    }
}

/// User-visible failure that put the controller in [`PlayerState::Error`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureKind {
    /// Song has no playable URL
    SourceMissing,

    /// Device rejected `play()` or reported a media error
    PlaybackRejected { reason: String },
}

impl FailureKind {
    /// Short message suitable for a toast
    pub fn message(&self) -> String {
        match self {
            FailureKind::SourceMissing => "This song has no playable source".to_string(),
            FailureKind::PlaybackRejected { reason } => format!("Playback failed: {reason}"),
        }
    }
}

/// UI-observable playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSnapshot {
    pub state: PlayerState,
    pub current_song: Option<Song>,
    pub is_playing: bool,

    /// Position over duration, always within `[0, 1]`
    pub progress_fraction: f64,

    /// Device duration in seconds, `0` while unknown
    pub duration_seconds: f64,

    /// Set while in [`PlayerState::Error`]
    pub failure: Option<FailureKind>,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Maximum listening history size (default: 50)
    pub history_size: usize,

    /// Start the first song after seeding the playlist from recommendations
    /// (default: false)
    pub autoplay_seeded: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            history_size: 50,
            autoplay_seeded: false,
        }
    }
}

/// Device duration as a usable number of seconds
///
/// Media devices report `NaN` before metadata is loaded and `+inf` for live
/// streams; both count as unknown.
pub fn known_duration(duration: f64) -> Option<f64> {
    (duration.is_finite() && duration > 0.0).then_some(duration)
}

/// Playback progress in `[0, 1]`
///
/// Returns `0` whenever the duration is unknown or zero, or the position is not
/// a finite number.
pub fn progress_fraction(current_time: f64, duration: f64) -> f64 {
    match known_duration(duration) {
        Some(duration) if current_time.is_finite() => (current_time / duration).clamp(0.0, 1.0),
        _ => 0.0,
    }
}
