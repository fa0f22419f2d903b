/// Song types
use super::SongId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A playable track as supplied by the song catalog
///
/// Songs are immutable values. The playlist and the playback controller hold
/// copies and never modify them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: SongId,
    pub title: String,
    pub artist: String,

    #[serde(default)]
    pub album: String,

    #[serde(default)]
    pub duration: Option<SongDuration>,

    #[serde(default)]
    pub genre: String,

    #[serde(default)]
    pub theme: String,

    /// Media URL handed to the audio output device. May be empty.
    #[serde(default)]
    pub media_url: Option<String>,

    /// Cover art URL. May be empty.
    #[serde(default)]
    pub art_url: Option<String>,
}

impl Song {
    /// Create a song with the required fields; everything else is empty
    pub fn new(id: impl Into<SongId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            album: String::new(),
            duration: None,
            genre: String::new(),
            theme: String::new(),
            media_url: None,
            art_url: None,
        }
    }

    pub fn with_album(mut self, album: impl Into<String>) -> Self {
        self.album = album.into();
        self
    }

    pub fn with_duration(mut self, duration: SongDuration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = genre.into();
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        self
    }

    pub fn with_media_url(mut self, url: impl Into<String>) -> Self {
        self.media_url = Some(url.into());
        self
    }

    pub fn with_art_url(mut self, url: impl Into<String>) -> Self {
        self.art_url = Some(url.into());
        self
    }

    /// Media URL, if the song has a non-blank one
    ///
    /// A song without a playable URL must never be handed to the output device.
    pub fn playable_url(&self) -> Option<&str> {
        self.media_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Cover art URL, if present and non-blank
    pub fn art(&self) -> Option<&str> {
        self.art_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Song length as the catalog reports it
///
/// Catalog entries carry either a number of seconds or a display string such
/// as `"3:45"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SongDuration {
    Seconds(f64),
    Display(String),
}

impl SongDuration {
    /// Length in seconds, if it can be determined
    ///
    /// Display strings are parsed as `ss`, `m:ss` or `h:mm:ss`.
    pub fn as_seconds(&self) -> Option<f64> {
        match self {
            SongDuration::Seconds(secs) => (secs.is_finite() && *secs >= 0.0).then_some(*secs),
            SongDuration::Display(text) => parse_clock(text),
        }
    }
}

impl fmt::Display for SongDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SongDuration::Display(text) => f.write_str(text),
            SongDuration::Seconds(_) => match self.as_seconds() {
                Some(secs) => {
                    let total = secs.round() as u64;
                    write!(f, "{}:{:02}", total / 60, total % 60)
                }
                None => f.write_str("--:--"),
            },
        }
    }
}

fn parse_clock(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let mut total = 0.0;
    let mut parts = 0;
    for part in text.split(':') {
        let value: f64 = part.trim().parse().ok()?;
        if !value.is_finite() || value < 0.0 {
            return None;
        }
        total = total * 60.0 + value;
        parts += 1;
    }

    (parts <= 3).then_some(total)
}
