//! Simulated audio output device
//!
//! Stands in for a real media element. Nothing is decoded; the device keeps a
//! clock that only moves on [`SimulatedOutput::tick`] and queues the
//! notifications a real device would deliver asynchronously. The host pumps
//! them into the controller with [`SimulatedOutput::poll`].

use crate::config::DeviceSettings;
use cadence_playback::{AudioOutput, DeviceNotification, PlayTicket, SourceId};
use std::collections::{HashSet, VecDeque};
use tracing::trace;

#[derive(Debug)]
pub struct SimulatedOutput {
    source: Option<(SourceId, String)>,
    playing: bool,
    position: f64,
    duration: f64,

    default_duration: f64,
    failing_urls: HashSet<String>,

    outbox: VecDeque<DeviceNotification>,
}

impl SimulatedOutput {
    pub fn new(settings: &DeviceSettings) -> Self {
        Self {
            source: None,
            playing: false,
            position: 0.0,
            duration: f64::NAN,
            default_duration: settings.default_duration_secs,
            failing_urls: settings.failing_urls.iter().cloned().collect(),
            outbox: VecDeque::new(),
        }
    }

    /// Next queued notification, oldest first
    pub fn poll(&mut self) -> Option<DeviceNotification> {
        self.outbox.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.outbox.len()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// URL of the loaded source
    pub fn url(&self) -> Option<&str> {
        self.source.as_ref().map(|(_, url)| url.as_str())
    }

    /// Advance the clock while playing
    ///
    /// Queues a time update, and `Ended` once the position reaches the
    /// duration.
    pub fn tick(&mut self, seconds: f64) {
        let Some((source, _)) = &self.source else {
            return;
        };
        let source = *source;
        if !self.playing || !seconds.is_finite() || seconds <= 0.0 {
            return;
        }

        self.position += seconds;
        let ended = self.duration.is_finite() && self.position >= self.duration;
        if ended {
            self.position = self.duration;
            self.playing = false;
        }

        self.outbox.push_back(DeviceNotification::time_update(
            source,
            self.position,
            self.duration,
        ));
        if ended {
            self.outbox.push_back(DeviceNotification::ended(source));
        }
    }
}

impl AudioOutput for SimulatedOutput {
    fn set_source(&mut self, source: SourceId, url: &str) {
        trace!(source = source.get(), url, "Simulated device loading source");
        self.source = Some((source, url.to_string()));
        self.playing = false;
        self.position = 0.0;
        self.duration = f64::NAN;
    }

    fn play(&mut self, ticket: PlayTicket) {
        let outcome = match &self.source {
            Some((source, url)) if *source == ticket.source => {
                if self.failing_urls.contains(url) {
                    Err(format!("NotSupportedError: cannot play {url}"))
                } else {
                    self.playing = true;
                    if !self.duration.is_finite() {
                        self.duration = self.default_duration;
                    }
                    Ok(())
                }
            }
            _ => Err("AbortError: source was replaced".to_string()),
        };
        self.outbox
            .push_back(DeviceNotification::play_resolved(ticket, outcome));
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn seek(&mut self, seconds: f64) {
        self.position = if self.duration.is_finite() {
            seconds.clamp(0.0, self.duration)
        } else {
            seconds.max(0.0)
        };
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}
