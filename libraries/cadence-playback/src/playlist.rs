//! Playlist with a playback cursor
//!
//! Insertion order is playback order. The cursor names the current entry and
//! moves with wraparound:
//!
//! ```text
//!   [A] [B] [C] [D]
//!        ^ cursor = 1
//!
//! next:     cursor = (1 + 1) % 4 = 2
//! previous: cursor = (1 - 1 + 4) % 4 = 0
//! ```
//!
//! Duplicate ids are allowed; id lookups resolve to the first match. Navigation
//! is by position, so duplicates never confuse next/previous.

use cadence_core::{Song, SongId};

/// Ordered, mutable list of songs plus the current position
#[derive(Debug, Clone, Default)]
pub struct Playlist {
    songs: Vec<Song>,

    /// Index of the current song; only meaningful while `songs` is non-empty
    cursor: usize,
}

impl Playlist {
    /// Create new empty playlist
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a playlist seeded with songs, cursor at the first one
    pub fn from_songs(songs: Vec<Song>) -> Self {
        Self { songs, cursor: 0 }
    }

    /// Replace contents and reset the cursor to the first song
    pub fn set_playlist(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.cursor = 0;
    }

    /// Prepend a song and make it current
    pub fn insert_front(&mut self, song: Song) {
        self.songs.insert(0, song);
        self.cursor = 0;
    }

    /// Position of the first song with this id
    pub fn index_of(&self, id: &SongId) -> Option<usize> {
        self.songs.iter().position(|song| &song.id == id)
    }

    /// Move the cursor to `index`
    ///
    /// Returns the song now current, or `None` (cursor unchanged) if the index
    /// is out of bounds.
    pub fn select(&mut self, index: usize) -> Option<&Song> {
        if index >= self.songs.len() {
            return None;
        }
        self.cursor = index;
        self.songs.get(index)
    }

    /// Advance the cursor, wrapping to the start
    ///
    /// No-op returning `None` on an empty playlist.
    pub fn next(&mut self) -> Option<&Song> {
        let len = self.songs.len();
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % len;
        self.songs.get(self.cursor)
    }

    /// Move the cursor back, wrapping to the end
    ///
    /// No-op returning `None` on an empty playlist.
    pub fn previous(&mut self) -> Option<&Song> {
        let len = self.songs.len();
        if len == 0 {
            return None;
        }
        self.cursor = (self.cursor + len - 1) % len;
        self.songs.get(self.cursor)
    }

    /// Song at the cursor
    pub fn current(&self) -> Option<&Song> {
        self.songs.get(self.cursor)
    }

    /// Cursor position, `None` for an empty playlist
    pub fn cursor(&self) -> Option<usize> {
        (!self.songs.is_empty()).then_some(self.cursor)
    }

    /// Get song at index
    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// All songs in playback order
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Total number of songs
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// Check if playlist is empty
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// Remove every song
    pub fn clear(&mut self) {
        self.songs.clear();
        self.cursor = 0;
    }
}
