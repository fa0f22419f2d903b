//! Shared test infrastructure for playback integration tests

#![allow(dead_code)]

use cadence_core::Song;
use cadence_playback::{
    AudioOutput, DeviceNotification, NotificationOutcome, PlayTicket, PlaybackController,
    PlayerConfig, SourceId,
};

/// Command received by the mock device
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceCall {
    SetSource { source: SourceId, url: String },
    Play(PlayTicket),
    Pause,
    Seek(f64),
}

/// Recording mock audio output
///
/// Keeps a log of every command and exposes position/duration the test can
/// set directly, the way a media element would update them.
#[derive(Debug)]
pub struct MockOutput {
    pub calls: Vec<DeviceCall>,
    pub position: f64,
    pub duration: f64,
}

impl Default for MockOutput {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            position: 0.0,
            duration: f64::NAN,
        }
    }
}

impl MockOutput {
    pub fn last_ticket(&self) -> Option<PlayTicket> {
        self.calls.iter().rev().find_map(|call| match call {
            DeviceCall::Play(ticket) => Some(*ticket),
            _ => None,
        })
    }

    pub fn current_source(&self) -> Option<(SourceId, String)> {
        self.calls.iter().rev().find_map(|call| match call {
            DeviceCall::SetSource { source, url } => Some((*source, url.clone())),
            _ => None,
        })
    }

    pub fn set_source_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::SetSource { .. }))
            .count()
    }

    pub fn pause_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, DeviceCall::Pause))
            .count()
    }
}

impl AudioOutput for MockOutput {
    fn set_source(&mut self, source: SourceId, url: &str) {
        self.calls.push(DeviceCall::SetSource {
            source,
            url: url.to_string(),
        });
        self.position = 0.0;
        self.duration = f64::NAN;
    }

    fn play(&mut self, ticket: PlayTicket) {
        self.calls.push(DeviceCall::Play(ticket));
    }

    fn pause(&mut self) {
        self.calls.push(DeviceCall::Pause);
    }

    fn seek(&mut self, seconds: f64) {
        self.calls.push(DeviceCall::Seek(seconds));
        self.position = seconds;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn duration(&self) -> f64 {
        self.duration
    }
}

pub type Player = PlaybackController<MockOutput>;

pub fn player() -> Player {
    PlaybackController::new(MockOutput::default(), PlayerConfig::default())
}

pub fn player_with(config: PlayerConfig) -> Player {
    PlaybackController::new(MockOutput::default(), config)
}

pub fn create_song(id: &str) -> Song {
    Song::new(id, format!("Song {id}"), "Test Artist")
        .with_album("Test Album")
        .with_media_url(format!("https://cdn.example/{id}.mp3"))
}

pub fn create_songs(ids: &[&str]) -> Vec<Song> {
    ids.iter().map(|id| create_song(id)).collect()
}

/// Song the catalog lists without a media URL
pub fn create_unplayable_song(id: &str) -> Song {
    Song::new(id, format!("Song {id}"), "Test Artist")
}

/// Resolve the most recent play request
pub fn resolve_play(player: &mut Player, outcome: Result<(), String>) -> NotificationOutcome {
    let ticket = player
        .output()
        .last_ticket()
        .expect("no play request was issued");
    player.handle_notification(DeviceNotification::play_resolved(ticket, outcome))
}

/// Resolve the most recent play request successfully
pub fn confirm_play(player: &mut Player) -> NotificationOutcome {
    resolve_play(player, Ok(()))
}

/// Source id of the most recent `set_source`
pub fn loaded_source(player: &Player) -> SourceId {
    player
        .output()
        .current_source()
        .expect("no source was loaded")
        .0
}

pub fn current_id(player: &Player) -> Option<String> {
    player.current_song().map(|song| song.id.to_string())
}

pub fn playlist_ids(player: &Player) -> Vec<String> {
    player
        .playlist()
        .songs()
        .iter()
        .map(|song| song.id.to_string())
        .collect()
}
