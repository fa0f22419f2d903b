//! Listening history tracking
//!
//! Maintains a bounded record of songs that actually started playing. The
//! titles are what the recommendation service receives as listening history.

use cadence_core::Song;
use std::collections::VecDeque;

/// Listening history with bounded size
///
/// Oldest entries are discarded once `max_size` is reached.
#[derive(Debug, Clone)]
pub struct ListeningHistory {
    /// History buffer (most recent = back)
    songs: VecDeque<Song>,

    /// Maximum history size
    max_size: usize,
}

impl ListeningHistory {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            songs: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a song that started playing
    ///
    /// If history is full, the oldest song is discarded
    pub fn push(&mut self, song: Song) {
        if self.max_size == 0 {
            return;
        }
        if self.songs.len() >= self.max_size {
            self.songs.pop_front();
        }
        self.songs.push_back(song);
    }

    /// Most recently played song
    pub fn last(&self) -> Option<&Song> {
        self.songs.back()
    }

    /// All songs, oldest first
    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.songs.iter()
    }

    /// Titles, oldest first
    pub fn titles(&self) -> Vec<String> {
        self.songs.iter().map(|song| song.title.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn clear(&mut self) {
        self.songs.clear();
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for ListeningHistory {
    fn default() -> Self {
        Self::new(50)
    }
}
