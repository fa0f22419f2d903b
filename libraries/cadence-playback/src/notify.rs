//! Device notification adapter
//!
//! Translates asynchronous output-device notifications into controller events
//! and drops the ones that no longer apply.
//!
//! Two kinds of staleness are guarded against:
//! - **Replaced source**: a notification tagged with a [`SourceId`] other than
//!   the one currently loaded (e.g. a late "ended" from the previous song).
//! - **Superseded play request**: a `PlayResolved` whose [`PlayTicket`] is no
//!   longer pending because the user paused, cleared or reloaded before the
//!   device answered.

use crate::device::{PlayTicket, SourceId};
use crate::error::{PlaybackError, Result};
use serde::{Deserialize, Serialize};

/// Notification emitted by the output device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceNotification {
    /// Source the notification was produced for
    pub source: SourceId,
    pub kind: NotificationKind,
}

/// What the device is reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationKind {
    /// Periodic position report
    TimeUpdate { current_time: f64, duration: f64 },

    /// Playback reached the end of the source
    Ended,

    /// Media failed to load or decode
    Error { message: String },

    /// Answer to a `play()` request
    PlayResolved {
        ticket: PlayTicket,
        outcome: std::result::Result<(), String>,
    },
}

impl DeviceNotification {
    pub fn time_update(source: SourceId, current_time: f64, duration: f64) -> Self {
        Self {
            source,
            kind: NotificationKind::TimeUpdate {
                current_time,
                duration,
            },
        }
    }

    pub fn ended(source: SourceId) -> Self {
        Self {
            source,
            kind: NotificationKind::Ended,
        }
    }

    pub fn error(source: SourceId, message: impl Into<String>) -> Self {
        Self {
            source,
            kind: NotificationKind::Error {
                message: message.into(),
            },
        }
    }

    pub fn play_resolved(ticket: PlayTicket, outcome: std::result::Result<(), String>) -> Self {
        Self {
            source: ticket.source,
            kind: NotificationKind::PlayResolved { ticket, outcome },
        }
    }
}

/// Whether a notification changed controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationOutcome {
    Applied,
    /// Current, but meaningless in the present state (e.g. "ended" while paused)
    Ignored,
    /// Discarded because it refers to a replaced source or cancelled request
    Stale,
}

/// Notification that passed the staleness guard
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DeviceEvent {
    Progress { current_time: f64, duration: f64 },
    Ended,
    Failed(String),
    PlayStarted,
    PlayRejected(String),
}

/// Tracks the loaded source and the pending play request
#[derive(Debug, Default)]
pub(crate) struct SourceGuard {
    last_source: u64,
    last_seq: u64,
    loaded: Option<SourceId>,
    pending_play: Option<PlayTicket>,
}

impl SourceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue an id for a new source; everything tagged with older ids is stale
    pub fn load(&mut self) -> SourceId {
        self.last_source += 1;
        let source = SourceId::new(self.last_source);
        self.loaded = Some(source);
        self.pending_play = None;
        source
    }

    /// Forget the loaded source
    pub fn unload(&mut self) {
        self.loaded = None;
        self.pending_play = None;
    }

    pub fn loaded(&self) -> Option<SourceId> {
        self.loaded
    }

    /// Issue a ticket for a play request on the loaded source
    ///
    /// Replaces any pending ticket. `None` if nothing is loaded.
    pub fn request_play(&mut self) -> Option<PlayTicket> {
        let source = self.loaded?;
        self.last_seq += 1;
        let ticket = PlayTicket {
            source,
            seq: self.last_seq,
        };
        self.pending_play = Some(ticket);
        Some(ticket)
    }

    /// Make the pending play request stale
    pub fn cancel_play(&mut self) {
        self.pending_play = None;
    }

    pub fn is_play_pending(&self) -> bool {
        self.pending_play.is_some()
    }

    /// Check a notification against the current source and pending request
    pub fn admit(&mut self, notification: &DeviceNotification) -> Result<DeviceEvent> {
        if self.loaded != Some(notification.source) {
            return Err(PlaybackError::StaleNotification);
        }

        let event = match &notification.kind {
            NotificationKind::TimeUpdate {
                current_time,
                duration,
            } => DeviceEvent::Progress {
                current_time: *current_time,
                duration: *duration,
            },
            NotificationKind::Ended => DeviceEvent::Ended,
            NotificationKind::Error { message } => {
                self.pending_play = None;
                DeviceEvent::Failed(message.clone())
            }
            NotificationKind::PlayResolved { ticket, outcome } => {
                if self.pending_play != Some(*ticket) {
                    return Err(PlaybackError::StaleNotification);
                }
                self.pending_play = None;
                match outcome {
                    Ok(()) => DeviceEvent::PlayStarted,
                    Err(reason) => DeviceEvent::PlayRejected(reason.clone()),
                }
            }
        };

        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_stale(result: &Result<DeviceEvent>) -> bool {
        matches!(result, Err(PlaybackError::StaleNotification))
    }

    #[test]
    fn nothing_loaded_means_everything_is_stale() {
        let mut guard = SourceGuard::new();
        let result = guard.admit(&DeviceNotification::ended(SourceId::new(1)));
        assert!(is_stale(&result));
    }

    #[test]
    fn ended_from_replaced_source_is_stale() {
        let mut guard = SourceGuard::new();
        let first = guard.load();
        let second = guard.load();
        assert_ne!(first, second);

        assert!(is_stale(&guard.admit(&DeviceNotification::ended(first))));
        assert_eq!(
            guard.admit(&DeviceNotification::ended(second)).unwrap(),
            DeviceEvent::Ended
        );
    }

    #[test]
    fn play_resolution_is_applied_once() {
        let mut guard = SourceGuard::new();
        guard.load();
        let ticket = guard.request_play().unwrap();
        let resolved = DeviceNotification::play_resolved(ticket, Ok(()));

        assert_eq!(guard.admit(&resolved).unwrap(), DeviceEvent::PlayStarted);
        assert!(!guard.is_play_pending());
        assert!(is_stale(&guard.admit(&resolved)));
    }

    #[test]
    fn cancelled_play_resolution_is_stale() {
        let mut guard = SourceGuard::new();
        guard.load();
        let ticket = guard.request_play().unwrap();
        guard.cancel_play();

        let result = guard.admit(&DeviceNotification::play_resolved(ticket, Ok(())));
        assert!(is_stale(&result));
    }

    #[test]
    fn newer_play_request_supersedes_older() {
        let mut guard = SourceGuard::new();
        guard.load();
        let older = guard.request_play().unwrap();
        let newer = guard.request_play().unwrap();

        assert!(is_stale(
            &guard.admit(&DeviceNotification::play_resolved(older, Ok(())))
        ));
        assert_eq!(
            guard
                .admit(&DeviceNotification::play_resolved(newer, Err("codec".into())))
                .unwrap(),
            DeviceEvent::PlayRejected("codec".into())
        );
    }

    #[test]
    fn request_play_without_source_is_none() {
        let mut guard = SourceGuard::new();
        assert!(guard.request_play().is_none());
        guard.load();
        guard.unload();
        assert!(guard.request_play().is_none());
    }

    #[test]
    fn device_error_cancels_pending_play() {
        let mut guard = SourceGuard::new();
        let source = guard.load();
        guard.request_play();

        let event = guard
            .admit(&DeviceNotification::error(source, "network"))
            .unwrap();
        assert_eq!(event, DeviceEvent::Failed("network".into()));
        assert!(!guard.is_play_pending());
    }
}
