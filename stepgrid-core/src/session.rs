//! A sequencer session: shared pattern text, grid, and transport.
//!
//! The session owns the pattern string that both the grid and the audio
//! engine read. Every change to it goes through here so the sequencer can
//! reconcile and, while playing, the engine picks up the new text.

use crate::engine::{AudioEngine, EngineError};
use crate::sequencer::{Reconciliation, Sequencer};
use crate::types::config::{clamp_bpm, clamp_volume};
use crate::types::{preset, Grid, SessionConfig, STEPS};
use anyhow::{anyhow, Result};
use tracing::{info, warn};

pub struct Session<E: AudioEngine> {
    engine: E,
    sequencer: Sequencer,
    pattern: String,
    bpm: f32,
    volume: f32,
    initialized: bool,
    playing: bool,
    /// Last user-facing error, cleared by the next successful play
    error: Option<String>,
    active_step: Option<usize>,
}

impl<E: AudioEngine> Session<E> {
    pub fn new(mut engine: E, config: SessionConfig) -> Self {
        let volume = clamp_volume(config.volume);
        engine.set_volume(volume);
        Self {
            engine,
            sequencer: Sequencer::new(&config.pattern),
            pattern: config.pattern,
            bpm: clamp_bpm(config.bpm),
            volume,
            initialized: false,
            playing: false,
            error: None,
            active_step: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        self.sequencer.grid()
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Column currently sounding, while playing
    pub fn active_step(&self) -> Option<usize> {
        self.active_step
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Start the audio engine. Safe to call repeatedly.
    pub fn initialize(&mut self) -> Result<(), EngineError> {
        if self.initialized {
            return Ok(());
        }
        match self.engine.initialize() {
            Ok(()) => {
                self.initialized = true;
                self.error = None;
                info!("Audio engine initialized");
                Ok(())
            }
            Err(e) => {
                self.error = Some(format!("Failed to initialize audio: {}", e));
                Err(e)
            }
        }
    }

    /// Initialize if needed, then play the current pattern
    pub fn play(&mut self) -> Result<(), EngineError> {
        self.initialize()?;
        match self.engine.evaluate(&self.pattern, self.bpm) {
            Ok(()) => {
                self.playing = true;
                self.error = None;
                info!(bpm = self.bpm, "Playback started");
                Ok(())
            }
            Err(e) => {
                self.error = Some(format!("Failed to play: {}", e));
                Err(e)
            }
        }
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        self.playing = false;
        self.active_step = None;
        info!("Playback stopped");
    }

    /// Replace the pattern from outside the grid (editor, preset, file).
    /// The grid is rebuilt from the new text.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) -> Result<Reconciliation, EngineError> {
        self.pattern = pattern.into();
        let outcome = self.sequencer.observe_pattern(&self.pattern);
        self.reevaluate("Pattern error")?;
        Ok(outcome)
    }

    /// Flip one grid cell and publish the resulting pattern text.
    ///
    /// Index errors are reported before anything changes. Engine errors are
    /// reported after the new pattern has been stored.
    pub fn toggle_step(&mut self, instrument: usize, step: usize) -> Result<()> {
        let pattern = self.sequencer.toggle(instrument, step)?;
        self.pattern = pattern;
        // our own change: the sequencer will skip re-parsing it
        self.sequencer.observe_pattern(&self.pattern);
        self.reevaluate("Pattern error")?;
        Ok(())
    }

    /// Load a built-in preset by name or 1-based index
    pub fn load_preset(&mut self, query: &str) -> Result<&'static str> {
        let preset = preset::find(query).ok_or_else(|| anyhow!("Unknown preset: {}", query))?;
        self.set_pattern(preset.pattern)?;
        Ok(preset.name)
    }

    /// Change tempo (clamped to 60-200 BPM)
    pub fn set_bpm(&mut self, bpm: f32) -> Result<(), EngineError> {
        self.bpm = clamp_bpm(bpm);
        self.reevaluate("BPM error")
    }

    /// Change output gain (clamped to 0.0-1.0)
    pub fn set_volume(&mut self, volume: f32) -> Result<(), EngineError> {
        self.volume = clamp_volume(volume);
        self.engine.set_volume(self.volume);
        self.reevaluate("Volume error")
    }

    /// Step-clock callback from the engine
    pub fn on_step(&mut self, step: usize) {
        if self.playing {
            self.active_step = Some(step % STEPS);
        }
    }

    /// Hand the current pattern to the engine again if it is playing
    fn reevaluate(&mut self, context: &str) -> Result<(), EngineError> {
        if !self.playing {
            return Ok(());
        }
        if let Err(e) = self.engine.evaluate(&self.pattern, self.bpm) {
            warn!(error = %e, "Engine rejected pattern");
            self.error = Some(format!("{}: {}", context, e));
            return Err(e);
        }
        Ok(())
    }
}
