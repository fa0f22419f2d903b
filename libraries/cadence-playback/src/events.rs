//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! controller and drained by the host after each command or notification:
//! - State changes (loading/playing/paused/error/idle)
//! - Song changes
//! - Progress updates (one per applied time update)
//! - Playlist changes
//! - User-visible failures

use crate::types::{FailureKind, PlayerState};
use cadence_core::SongId;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: PlayerState,
    },

    /// A different song became current
    SongChanged {
        /// ID of the new song (`None` when cleared)
        song_id: Option<SongId>,
        /// ID of the previous song (if any)
        previous_song_id: Option<SongId>,
    },

    /// Position update from the device
    Progress {
        /// Position over duration, within `[0, 1]`
        fraction: f64,
        /// Position in seconds
        current_time: f64,
        /// Duration in seconds, `0` while unknown
        duration: f64,
    },

    /// Playlist contents or cursor changed
    PlaylistChanged {
        /// New playlist length
        length: usize,
        /// New cursor (`None` for an empty playlist)
        cursor: Option<usize>,
    },

    /// Failure the user should be told about (e.g. as a toast)
    Error {
        /// Song that failed
        song_id: SongId,
        /// What went wrong
        kind: FailureKind,
    },
}

impl PlaybackEvent {
    /// Human-readable message for error events
    pub fn error_message(&self) -> Option<String> {
        match self {
            PlaybackEvent::Error { kind, .. } => Some(kind.message()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_event_carries_toast_message() {
        let event = PlaybackEvent::Error {
            song_id: SongId::new("s1"),
            kind: FailureKind::PlaybackRejected {
                reason: "NotAllowedError".into(),
            },
        };
        assert_eq!(
            event.error_message().as_deref(),
            Some("Playback failed: NotAllowedError")
        );

        let state = PlaybackEvent::StateChanged {
            state: PlayerState::Paused,
        };
        assert!(state.error_message().is_none());
    }

    #[test]
    fn events_serialize_for_ui_bridges() {
        let event = PlaybackEvent::PlaylistChanged {
            length: 3,
            cursor: Some(0),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"PlaylistChanged":{"length":3,"cursor":0}}"#);
    }
}
