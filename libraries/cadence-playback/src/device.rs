//! Platform-agnostic audio output device trait
//!
//! Abstracts the single media output the player owns (an HTML audio element,
//! a native media player, a simulated device in tests).

use serde::{Deserialize, Serialize};

/// Identity of one `set_source` call
///
/// Every load gets a fresh id. Device notifications carry the id of the source
/// they were produced for, which is how late notifications from a replaced
/// source are recognised and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(u64);

impl SourceId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

/// Identity of one `play()` request
///
/// The device answers each request with exactly one
/// [`NotificationKind::PlayResolved`](crate::NotificationKind::PlayResolved)
/// carrying the same ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayTicket {
    pub source: SourceId,
    pub seq: u64,
}

/// Single audio output device
///
/// Commands are fire-and-forget. Everything the device has to say comes back
/// asynchronously as a [`DeviceNotification`](crate::DeviceNotification),
/// which the host feeds to
/// [`PlaybackController::handle_notification`](crate::PlaybackController::handle_notification).
pub trait AudioOutput {
    /// Point the device at a new media URL
    ///
    /// Implementors stop whatever was playing and tag all later notifications
    /// with `source`.
    fn set_source(&mut self, source: SourceId, url: &str);

    /// Start or resume playback of the current source
    ///
    /// The outcome is reported later through a `PlayResolved` notification.
    fn play(&mut self, ticket: PlayTicket);

    /// Pause playback
    fn pause(&mut self);

    /// Set playback position in seconds
    fn seek(&mut self, seconds: f64);

    /// Current position in seconds
    fn current_time(&self) -> f64;

    /// Duration in seconds (`NaN` while unknown, `+inf` for live streams)
    fn duration(&self) -> f64;
}

/// Dummy output for unit tests
///
/// Records commands; notifications are built by the test itself.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct DummyOutput {
    pub source: Option<(SourceId, String)>,
    pub play_requests: Vec<PlayTicket>,
    pub paused: usize,
    pub position: f64,
    pub duration: f64,
}

#[cfg(test)]
impl DummyOutput {
    pub fn new() -> Self {
        Self {
            duration: f64::NAN,
            ..Self::default()
        }
    }

    pub fn last_ticket(&self) -> PlayTicket {
        *self.play_requests.last().expect("no play request issued")
    }
}

#[cfg(test)]
impl AudioOutput for DummyOutput {
    fn set_source(&mut self, source: SourceId, url: &str) {
        self.source = Some((source, url.to_string()));
        self.position = 0.0;
        self.duration = f64::NAN;
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.play_requests.push(ticket);
    }

    fn pause(&mut self) {
        self.paused += 1;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}
