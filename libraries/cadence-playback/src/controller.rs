//! Playback controller - core orchestration
//!
//! Owns the playlist and the single audio output device and keeps playback,
//! progress and UI state consistent across user commands and asynchronous
//! device notifications.
//!
//! ```text
//!            select(s)                 play ok
//!   Idle ─────────────────> Loading ───────────> Playing
//!    ^                        │  ^                 │
//!    │ clear                  │  │ toggle          │ toggle
//!    │                play err│  └──── Paused <────┘
//!    │                        v
//!    └──────────────────── Error   (song retained, retry or skip)
//! ```

use crate::{
    device::{AudioOutput, SourceId},
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    history::ListeningHistory,
    notify::{DeviceEvent, DeviceNotification, NotificationOutcome, SourceGuard},
    playlist::Playlist,
    seed::resolve_recommendations,
    types::{
        known_duration, progress_fraction, FailureKind, PlaybackSnapshot, PlayerConfig,
        PlayerState,
    },
};
use cadence_core::{
    RecommendationRequest, RecommendationResponse, Recommender, Song, SongCatalog, SongId,
};
use tracing::{debug, trace, warn};

/// Central playback management
///
/// All methods run on one logical thread. Device answers arrive later through
/// [`handle_notification`](Self::handle_notification), which discards anything
/// that refers to a replaced source or a cancelled play request.
pub struct PlaybackController<O: AudioOutput> {
    output: O,
    config: PlayerConfig,

    // State
    state: PlayerState,
    current_song: Option<Song>,
    failure: Option<FailureKind>,

    // Playlist and history
    playlist: Playlist,
    history: ListeningHistory,

    // Current song is not in the playlist; the cursor names the song to play next
    cursor_detached: bool,

    // Async staleness tracking
    guard: SourceGuard,
    recorded_source: Option<SourceId>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<O: AudioOutput> PlaybackController<O> {
    /// Create a controller that owns `output` for its whole lifetime
    pub fn new(output: O, config: PlayerConfig) -> Self {
        Self {
            output,
            history: ListeningHistory::new(config.history_size),
            config,
            state: PlayerState::Idle,
            current_song: None,
            failure: None,
            playlist: Playlist::new(),
            cursor_detached: false,
            guard: SourceGuard::new(),
            recorded_source: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Playlist Management =====

    /// Replace the playlist
    ///
    /// The current song (if any) keeps playing. If the new list contains it,
    /// the cursor points at it. Otherwise the cursor goes to the first song,
    /// which is what `next()` plays once the current song is done.
    pub fn replace_playlist(&mut self, songs: Vec<Song>) {
        self.playlist.set_playlist(songs);
        self.cursor_detached = false;

        if let Some(id) = self.current_song_id() {
            match self.playlist.index_of(&id) {
                Some(index) => {
                    self.playlist.select(index);
                }
                None => self.cursor_detached = !self.playlist.is_empty(),
            }
        }
        self.emit_playlist_changed();
    }

    /// Drop everything: playback, playlist and listening history
    ///
    /// Used on logout.
    pub fn reset(&mut self) {
        self.clear();
        self.playlist.clear();
        self.cursor_detached = false;
        self.history.clear();
        self.recorded_source = None;
        self.emit_playlist_changed();
    }

    // ===== Playback Control =====

    /// Play `song`
    ///
    /// Selecting the song that is already current toggles play/pause instead
    /// of restarting it. A song missing from the playlist is inserted at the
    /// front; one already present is selected where it is.
    pub fn select_song(&mut self, song: Song) -> Result<()> {
        if self
            .current_song
            .as_ref()
            .is_some_and(|current| current.id == song.id)
        {
            return self.toggle_play_pause();
        }

        match self.playlist.index_of(&song.id) {
            Some(index) => {
                self.playlist.select(index);
            }
            None => self.playlist.insert_front(song),
        }
        self.emit_playlist_changed();
        self.load_current()
    }

    /// Play the song at `index` in the playlist
    ///
    /// Re-selecting the current entry toggles play/pause.
    pub fn select_index(&mut self, index: usize) -> Result<()> {
        if index >= self.playlist.len() {
            return Err(PlaybackError::IndexOutOfBounds(index));
        }
        if self.current_song.is_some() && self.playlist.cursor() == Some(index) {
            return self.toggle_play_pause();
        }

        self.playlist.select(index);
        self.emit_playlist_changed();
        self.load_current()
    }

    /// Toggle between playing and paused
    ///
    /// - `Playing`/`Loading`: pause (a pending play request is cancelled)
    /// - `Paused`: resume
    /// - `Error`: retry the current song
    /// - `Idle`: start the song at the cursor, no-op on an empty playlist
    pub fn toggle_play_pause(&mut self) -> Result<()> {
        match self.state {
            PlayerState::Playing | PlayerState::Loading => {
                self.pause();
                Ok(())
            }
            PlayerState::Paused | PlayerState::Error => self.resume(),
            PlayerState::Idle => {
                if self.playlist.is_empty() {
                    Ok(())
                } else {
                    self.load_current()
                }
            }
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        if matches!(self.state, PlayerState::Playing | PlayerState::Loading) {
            self.output.pause();
            self.guard.cancel_play();
            self.set_state(PlayerState::Paused);
        }
    }

    /// Resume a paused song or retry a failed one
    ///
    /// Playback is requested again on the loaded source, keeping its
    /// position. The song is reloaded only when no source is loaded (no media
    /// URL, or the device reported the media as failed).
    pub fn resume(&mut self) -> Result<()> {
        match self.state {
            PlayerState::Paused | PlayerState::Error => {
                if self.guard.loaded().is_some() {
                    self.failure = None;
                    self.request_play();
                    Ok(())
                } else {
                    self.retry_current()
                }
            }
            PlayerState::Idle | PlayerState::Loading | PlayerState::Playing => Ok(()),
        }
    }

    /// Skip to the next song, wrapping to the start
    ///
    /// Returns the new current song, or `None` (nothing changes) when the
    /// playlist is empty.
    pub fn next(&mut self) -> Result<Option<Song>> {
        let song = if std::mem::take(&mut self.cursor_detached) {
            self.playlist.current().cloned()
        } else {
            self.playlist.next().cloned()
        };
        let Some(song) = song else {
            return Ok(None);
        };
        self.emit_playlist_changed();
        self.start(song.clone())?;
        Ok(Some(song))
    }

    /// Go back to the previous song, wrapping to the end
    ///
    /// Returns the new current song, or `None` (nothing changes) when the
    /// playlist is empty.
    pub fn previous(&mut self) -> Result<Option<Song>> {
        self.cursor_detached = false;
        let Some(song) = self.playlist.previous().cloned() else {
            return Ok(None);
        };
        self.emit_playlist_changed();
        self.start(song.clone())?;
        Ok(Some(song))
    }

    /// Seek to `seconds` in the current song
    ///
    /// Positions past the end are clamped to the duration. Does not change
    /// whether the song is playing.
    pub fn seek(&mut self, seconds: f64) -> Result<()> {
        if self.current_song.is_none() {
            return Err(PlaybackError::NoSongLoaded);
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(PlaybackError::InvalidSeekPosition(seconds));
        }
        let duration = self.seekable_duration()?;

        self.output.seek(seconds.min(duration));
        Ok(())
    }

    /// Seek to a fraction of the current song (progress bar click)
    pub fn seek_to_fraction(&mut self, fraction: f64) -> Result<()> {
        if self.current_song.is_none() {
            return Err(PlaybackError::NoSongLoaded);
        }
        if fraction.is_nan() {
            return Err(PlaybackError::InvalidSeekPosition(fraction));
        }
        let duration = self.seekable_duration()?;

        self.output.seek(fraction.clamp(0.0, 1.0) * duration);
        Ok(())
    }

    /// Stop playback and forget the current song
    ///
    /// The playlist is kept.
    pub fn clear(&mut self) {
        self.output.pause();
        self.guard.unload();
        self.failure = None;
        if let Some(previous) = self.current_song.take() {
            self.pending_events.push(PlaybackEvent::SongChanged {
                song_id: None,
                previous_song_id: Some(previous.id),
            });
        }
        self.set_state(PlayerState::Idle);
    }

    // ===== Device Notifications =====

    /// Apply a notification from the output device
    ///
    /// Notifications for a replaced source, or answers to a play request that
    /// was cancelled or superseded, are discarded and reported as
    /// [`NotificationOutcome::Stale`].
    pub fn handle_notification(&mut self, notification: DeviceNotification) -> NotificationOutcome {
        let event = match self.guard.admit(&notification) {
            Ok(event) => event,
            Err(_) => {
                trace!(
                    source = notification.source.get(),
                    kind = ?notification.kind,
                    "Discarding stale device notification"
                );
                return NotificationOutcome::Stale;
            }
        };

        match event {
            DeviceEvent::Progress {
                current_time,
                duration,
            } => {
                self.pending_events.push(PlaybackEvent::Progress {
                    fraction: progress_fraction(current_time, duration),
                    current_time: if current_time.is_finite() {
                        current_time.max(0.0)
                    } else {
                        0.0
                    },
                    duration: known_duration(duration).unwrap_or(0.0),
                });
                NotificationOutcome::Applied
            }
            DeviceEvent::Ended => {
                if self.state != PlayerState::Playing {
                    return NotificationOutcome::Ignored;
                }
                debug!("Song ended, advancing");
                if let Err(e) = self.next() {
                    // Already surfaced through state and events
                    debug!("Advancing after end failed: {}", e);
                }
                NotificationOutcome::Applied
            }
            DeviceEvent::PlayStarted => {
                if self.state != PlayerState::Loading {
                    return NotificationOutcome::Ignored;
                }
                self.set_state(PlayerState::Playing);
                self.record_listen();
                NotificationOutcome::Applied
            }
            DeviceEvent::PlayRejected(reason) => {
                let Some(song_id) = self.current_song_id() else {
                    return NotificationOutcome::Ignored;
                };
                self.fail(song_id, FailureKind::PlaybackRejected { reason });
                NotificationOutcome::Applied
            }
            DeviceEvent::Failed(message) => {
                let Some(song_id) = self.current_song_id() else {
                    return NotificationOutcome::Ignored;
                };
                // The media itself failed; a retry has to reload it
                self.output.pause();
                self.guard.unload();
                self.fail(song_id, FailureKind::PlaybackRejected { reason: message });
                NotificationOutcome::Applied
            }
        }
    }

    // ===== Recommendations =====

    /// Build a recommendation request from the listening history and catalog
    pub fn recommendation_request<C: SongCatalog + ?Sized>(
        &self,
        catalog: &C,
    ) -> RecommendationRequest {
        RecommendationRequest {
            listening_history: self.history.titles(),
            catalog_metadata: catalog.metadata(),
        }
    }

    /// Replace the playlist with the catalog songs a recommendation names
    ///
    /// Titles with no catalog match are dropped. When nothing matches the
    /// playlist is left untouched. Returns the number of songs seeded.
    pub fn seed_from_recommendations<C: SongCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        response: &RecommendationResponse,
    ) -> Result<usize> {
        let songs = resolve_recommendations(catalog, response);
        let count = songs.len();
        if count == 0 {
            debug!("No recommended title matched the catalog");
            return Ok(0);
        }

        self.replace_playlist(songs);
        if self.config.autoplay_seeded {
            self.load_current()?;
        }
        Ok(count)
    }

    /// Ask `recommender` for suggestions and seed the playlist with them
    pub fn recommend_and_seed<R, C>(&mut self, recommender: &R, catalog: &C) -> Result<usize>
    where
        R: Recommender + ?Sized,
        C: SongCatalog + ?Sized,
    {
        let request = self.recommendation_request(catalog);
        let response = recommender.recommend(&request)?;
        self.seed_from_recommendations(catalog, &response)
    }

    // ===== State Queries =====

    /// Snapshot of the UI-observable playback state
    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            state: self.state,
            current_song: self.current_song.clone(),
            is_playing: self.is_playing(),
            progress_fraction: self.progress_fraction(),
            duration_seconds: self.duration_seconds(),
            failure: self.failure.clone(),
        }
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.current_song.as_ref()
    }

    /// Failure that put the controller in [`PlayerState::Error`]
    pub fn failure(&self) -> Option<&FailureKind> {
        self.failure.as_ref()
    }

    /// Progress within `[0, 1]`, read live from the device
    pub fn progress_fraction(&self) -> f64 {
        if self.guard.loaded().is_none() {
            return 0.0;
        }
        progress_fraction(self.output.current_time(), self.output.duration())
    }

    /// Duration of the loaded source in seconds, `0` while unknown
    pub fn duration_seconds(&self) -> f64 {
        if self.guard.loaded().is_none() {
            return 0.0;
        }
        known_duration(self.output.duration()).unwrap_or(0.0)
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn history(&self) -> &ListeningHistory {
        &self.history
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable access to the device, for hosts that pump its notifications
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    /// Load and play the song at the playlist cursor
    fn load_current(&mut self) -> Result<()> {
        self.cursor_detached = false;
        let song = self
            .playlist
            .current()
            .cloned()
            .ok_or(PlaybackError::EmptyPlaylist)?;
        self.start(song)
    }

    /// Reload the current song from scratch
    fn retry_current(&mut self) -> Result<()> {
        match self.current_song.clone() {
            Some(song) => self.start(song),
            None => Ok(()),
        }
    }

    /// Make `song` current, point the device at it and request playback
    fn start(&mut self, song: Song) -> Result<()> {
        let previous = self.current_song.replace(song.clone());
        let previous_id = previous.map(|s| s.id);
        if previous_id.as_ref() != Some(&song.id) {
            self.pending_events.push(PlaybackEvent::SongChanged {
                song_id: Some(song.id.clone()),
                previous_song_id: previous_id,
            });
        }
        self.failure = None;

        let Some(url) = song.playable_url() else {
            // Never hand the device an empty source; silence the old one
            self.output.pause();
            self.guard.unload();
            return Err(self.fail(song.id.clone(), FailureKind::SourceMissing));
        };

        let source = self.guard.load();
        debug!(song = %song.id, source = source.get(), "Loading source");
        self.output.set_source(source, url);
        self.request_play();
        Ok(())
    }

    fn request_play(&mut self) {
        if let Some(ticket) = self.guard.request_play() {
            self.output.play(ticket);
            self.set_state(PlayerState::Loading);
        }
    }

    /// Enter the error state, keeping the current song
    fn fail(&mut self, song_id: SongId, kind: FailureKind) -> PlaybackError {
        warn!(song = %song_id, "{}", kind.message());

        self.guard.cancel_play();
        self.failure = Some(kind.clone());
        self.set_state(PlayerState::Error);
        self.pending_events.push(PlaybackEvent::Error {
            song_id: song_id.clone(),
            kind: kind.clone(),
        });

        match kind {
            FailureKind::SourceMissing => PlaybackError::SourceMissing(song_id),
            FailureKind::PlaybackRejected { reason } => {
                PlaybackError::PlaybackRejected { song_id, reason }
            }
        }
    }

    fn current_song_id(&self) -> Option<SongId> {
        self.current_song.as_ref().map(|song| song.id.clone())
    }

    fn seekable_duration(&self) -> Result<f64> {
        if self.guard.loaded().is_none() {
            return Err(PlaybackError::SeekUnavailable);
        }
        known_duration(self.output.duration()).ok_or(PlaybackError::SeekUnavailable)
    }

    /// Append the current song to the listening history once per load
    fn record_listen(&mut self) {
        let loaded = self.guard.loaded();
        if loaded.is_none() || loaded == self.recorded_source {
            return;
        }
        if let Some(song) = &self.current_song {
            self.history.push(song.clone());
            self.recorded_source = loaded;
        }
    }

    fn set_state(&mut self, state: PlayerState) {
        if self.state == state {
            return;
        }
        debug!("Playback state {:?} -> {:?}", self.state, state);
        self.state = state;
        debug_assert!(!self.state.is_playing() || self.current_song.is_some());
        self.pending_events.push(PlaybackEvent::StateChanged { state });
    }

    fn emit_playlist_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::PlaylistChanged {
            length: self.playlist.len(),
            cursor: self.playlist.cursor(),
        });
    }
}

impl<O: AudioOutput + Default> Default for PlaybackController<O> {
    fn default() -> Self {
        Self::new(O::default(), PlayerConfig::default())
    }
}
