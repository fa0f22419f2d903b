//! Interactive player session
//!
//! Reads one command per line, applies it to the playback controller, then
//! delivers every notification the simulated device queued before the next
//! prompt.

use crate::error::{CliError, Result};
use crate::sim::SimulatedOutput;
use cadence_core::{CadenceError, Catalog, Song, SongCatalog};
use cadence_playback::{PlaybackController, PlaybackError, PlaybackEvent, PlayerState};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

pub type Player = PlaybackController<SimulatedOutput>;

const HELP: &str = "\
commands:
  list            songs in the catalog
  playlist        current playlist (> marks the cursor)
  select <id>     play a catalog song, or pause/resume it if current
  toggle          play/pause
  next | prev     skip forward/back (wraps around)
  seek <secs>     jump within the current song
  tick <secs>     let the device play for a while
  clear           stop and forget the current song
  status          playback state
  help            this text
  quit            leave";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    List,
    Playlist,
    Select(String),
    Toggle,
    Next,
    Prev,
    Seek(f64),
    Tick(f64),
    Clear,
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "list" | "ls" => Command::List,
            "playlist" | "pl" => Command::Playlist,
            "select" | "play" => {
                if rest.is_empty() {
                    return Err(CliError::BadArgument("select needs a song id".to_string()));
                }
                Command::Select(rest.join(" "))
            }
            "toggle" | "p" => Command::Toggle,
            "next" | "n" => Command::Next,
            "prev" | "previous" => Command::Prev,
            "seek" => Command::Seek(seconds_arg("seek", &rest)?),
            "tick" => Command::Tick(seconds_arg("tick", &rest)?),
            "clear" | "stop" => Command::Clear,
            "status" | "st" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CliError::UnknownCommand(other.to_string())),
        };
        Ok(command)
    }
}

fn seconds_arg(command: &str, args: &[&str]) -> Result<f64> {
    let [value] = args else {
        return Err(CliError::BadArgument(format!(
            "{command} needs one number of seconds"
        )));
    };
    value
        .parse::<f64>()
        .map_err(|_| CliError::BadArgument(format!("not a number: {value}")))
}

/// Result of one command
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Continue(Vec<String>),
    Quit,
}

/// A player bound to a catalog
pub struct Session {
    player: Player,
    catalog: Catalog,
}

impl Session {
    pub fn new(player: Player, catalog: Catalog) -> Self {
        Self { player, catalog }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Run commands from `input` until `quit` or end of input
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        // Seeding may already have queued device work
        self.pump();
        for line in self.render_events() {
            writeln!(output, "{line}")?;
        }

        for line in input.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let step = line
                .parse::<Command>()
                .and_then(|command| self.execute(command));
            match step {
                Ok(Step::Quit) => break,
                Ok(Step::Continue(lines)) => {
                    for line in lines {
                        writeln!(output, "{line}")?;
                    }
                }
                Err(e) => writeln!(output, "error: {e}")?,
            }
        }
        Ok(())
    }

    /// Apply one command and deliver the device notifications it caused
    pub fn execute(&mut self, command: Command) -> Result<Step> {
        debug!(?command, "Executing command");
        let show_status = !matches!(command, Command::Help | Command::List | Command::Playlist);
        let mut lines = Vec::new();

        match command {
            Command::Quit => return Ok(Step::Quit),
            Command::Help => lines.push(HELP.to_string()),
            Command::List => {
                lines.extend(self.catalog.songs().iter().map(describe_catalog_entry));
            }
            Command::Playlist => lines.extend(self.describe_playlist()),
            Command::Status => {}
            Command::Select(id) => {
                let song = self
                    .catalog
                    .get(&id.as_str().into())
                    .cloned()
                    .ok_or_else(|| CadenceError::not_found("song", id))?;
                surfaced(self.player.select_song(song))?;
            }
            Command::Toggle => surfaced(self.player.toggle_play_pause())?,
            Command::Next => surfaced(self.player.next().map(|_| ()))?,
            Command::Prev => surfaced(self.player.previous().map(|_| ()))?,
            Command::Seek(seconds) => self.player.seek(seconds)?,
            Command::Tick(seconds) => self.player.output_mut().tick(seconds),
            Command::Clear => self.player.clear(),
        }

        self.pump();
        lines.extend(self.render_events());
        if show_status {
            lines.push(self.status_line());
        }
        Ok(Step::Continue(lines))
    }

    /// Deliver queued device notifications until the device is quiet
    fn pump(&mut self) {
        while let Some(notification) = self.player.output_mut().poll() {
            let outcome = self.player.handle_notification(notification);
            debug!(?outcome, "Delivered device notification");
        }
    }

    fn render_events(&mut self) -> Vec<String> {
        let mut lines = Vec::new();
        for event in self.player.drain_events() {
            match event {
                PlaybackEvent::SongChanged {
                    song_id: Some(_), ..
                } => {
                    if let Some(song) = self.player.current_song() {
                        lines.push(format!("~ {} - {}", song.title, song.artist));
                    }
                }
                PlaybackEvent::Error { kind, .. } => lines.push(format!("! {}", kind.message())),
                _ => {}
            }
        }
        lines
    }

    fn describe_playlist(&self) -> Vec<String> {
        let playlist = self.player.playlist();
        if playlist.is_empty() {
            return vec!["(playlist is empty)".to_string()];
        }
        playlist
            .songs()
            .iter()
            .enumerate()
            .map(|(index, song)| {
                let marker = if playlist.cursor() == Some(index) { ">" } else { " " };
                format!("{marker} {:>3}. {} - {}", index + 1, song.title, song.artist)
            })
            .collect()
    }

    /// One-line summary of the playback state
    pub fn status_line(&self) -> String {
        let snapshot = self.player.snapshot();
        let state = match snapshot.state {
            PlayerState::Idle => "idle",
            PlayerState::Loading => "loading",
            PlayerState::Playing => "playing",
            PlayerState::Paused => "paused",
            PlayerState::Error => "error",
        };

        let Some(song) = &snapshot.current_song else {
            return format!("[{state}]");
        };

        let mut line = format!("[{state}] {} - {}", song.title, song.artist);
        if snapshot.duration_seconds > 0.0 {
            let position = snapshot.progress_fraction * snapshot.duration_seconds;
            line.push_str(&format!(
                " {} / {} ({:.0}%)",
                clock(position),
                clock(snapshot.duration_seconds),
                snapshot.progress_fraction * 100.0
            ));
        }
        if let Some(failure) = &snapshot.failure {
            line.push_str(&format!(" | {}", failure.message()));
        }
        line
    }
}

/// Keep failures the player already reported through its event queue out of
/// the command result
fn surfaced(result: cadence_playback::Result<()>) -> Result<()> {
    match result {
        Ok(()) | Err(PlaybackError::SourceMissing(_) | PlaybackError::PlaybackRejected { .. }) => {
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn describe_catalog_entry(song: &Song) -> String {
    let duration = song
        .duration
        .as_ref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();
    let playable = if song.playable_url().is_some() { "" } else { " [no media]" };
    format!(
        "{:<8} {} - {}{duration}{playable}",
        song.id.as_str(),
        song.title,
        song.artist
    )
}

fn clock(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
