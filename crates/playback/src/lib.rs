//! Playback of sorting traces: input normalization, the run/pause/step state
//! machine and the tokio driver that paces it.

pub mod config;
pub mod controller;
pub mod input;
pub mod session;

pub use config::{ConfigError, PlaybackConfig};
pub use controller::{PlaybackController, TimerTicket};
pub use session::PlaybackSession;
