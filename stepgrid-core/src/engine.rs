//! Boundary to the live-coding audio engine.
//!
//! The engine itself (sample playback, scheduling, effects) lives outside this
//! crate. Hosts implement [`AudioEngine`] to connect a session to it.

use std::fmt;

/// Failures reported by an audio engine
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EngineError {
    /// The audio backend could not be started
    Initialization(String),
    /// The engine rejected the program text
    Evaluation(String),
    /// Writing to or talking with the engine failed
    Io(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Initialization(msg) => write!(f, "Audio initialization failed: {}", msg),
            EngineError::Evaluation(msg) => write!(f, "Pattern evaluation failed: {}", msg),
            EngineError::Io(msg) => write!(f, "Engine I/O error: {}", msg),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::Io(err.to_string())
    }
}

/// A live-coding engine that can play pattern text.
///
/// `initialize` must be idempotent. `evaluate` replaces whatever is playing.
pub trait AudioEngine {
    fn initialize(&mut self) -> Result<(), EngineError>;

    /// Start (or restart) playback of `pattern` at `bpm`
    fn evaluate(&mut self, pattern: &str, bpm: f32) -> Result<(), EngineError>;

    fn stop(&mut self);

    /// Output gain for subsequent evaluations (0.0-1.0)
    fn set_volume(&mut self, volume: f32);
}

impl<E: AudioEngine + ?Sized> AudioEngine for Box<E> {
    fn initialize(&mut self) -> Result<(), EngineError> {
        (**self).initialize()
    }

    fn evaluate(&mut self, pattern: &str, bpm: f32) -> Result<(), EngineError> {
        (**self).evaluate(pattern, bpm)
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume)
    }
}

/// The full program an engine evaluates: tempo as cycles per second
/// (four beats per cycle) and the pattern with its output gain.
pub fn compose_program(pattern: &str, bpm: f32, volume: f32) -> String {
    let cps = bpm / 60.0 / 4.0;
    format!("setcps({})\n{}.gain({})", cps, pattern, volume)
}

/// Seconds between sixteenth-note steps at `bpm`
pub fn step_interval_secs(bpm: f32) -> f64 {
    60.0 / bpm as f64 / 4.0
}
