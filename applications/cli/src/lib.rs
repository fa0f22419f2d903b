//! Cadence terminal player
//!
//! Drives the playback controller against a simulated output device, which
//! makes the state machine observable from a shell without any audio stack.

pub mod config;
pub mod error;
pub mod recommend;
pub mod repl;
pub mod sim;

pub use config::CliConfig;
pub use error::{CliError, Result};
pub use recommend::ResponseFileRecommender;
pub use repl::{Command, Session, Step};
pub use sim::SimulatedOutput;
