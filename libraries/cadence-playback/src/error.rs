//! Error types for playback management

use cadence_core::{CadenceError, SongId};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Song has no playable media URL; the device was never asked to load it
    #[error("Song {0} has no playable source")]
    SourceMissing(SongId),

    /// Output device refused to start playback
    #[error("Playback of {song_id} rejected: {reason}")]
    PlaybackRejected { song_id: SongId, reason: String },

    /// Device notification refers to a source that has since been replaced
    #[error("Stale device notification")]
    StaleNotification,

    /// Playlist is empty
    #[error("Playlist is empty")]
    EmptyPlaylist,

    /// No song is currently loaded
    #[error("No song loaded")]
    NoSongLoaded,

    /// Device duration is unknown or infinite, so position cannot be set
    #[error("Seeking is unavailable until the duration is known")]
    SeekUnavailable,

    /// Invalid seek position
    #[error("Invalid seek position: {0}")]
    InvalidSeekPosition(f64),

    /// Index out of bounds
    #[error("Index out of bounds: {0}")]
    IndexOutOfBounds(usize),

    /// Catalog or recommendation failure
    #[error(transparent)]
    Core(#[from] CadenceError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
