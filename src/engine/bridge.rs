//! Hands composed programs to an external live-coding runtime.
//!
//! The runtime is expected to watch the output file (or read stdout) and
//! evaluate whatever program lands there. `stop` publishes `hush()`.

use super::clock::{StepClock, StepTick};
use crossbeam_channel::Receiver;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use stepgrid_core::types::config::{DEFAULT_BPM, DEFAULT_VOLUME};
use stepgrid_core::{compose_program, AudioEngine, EngineError};
use tracing::{debug, info, warn};

/// Program that silences the runtime
pub const HUSH: &str = "hush()";

/// Where composed programs go
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Stdout,
    File(PathBuf),
}

pub struct ScriptBridge {
    output: Output,
    volume: f32,
    clock: StepClock,
    initialized: bool,
    playing: bool,
    /// Last program handed to the runtime
    last_program: Option<String>,
}

impl ScriptBridge {
    pub fn new(output: Output) -> Self {
        Self {
            output,
            volume: DEFAULT_VOLUME,
            clock: StepClock::new(DEFAULT_BPM),
            initialized: false,
            playing: false,
            last_program: None,
        }
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn last_program(&self) -> Option<&str> {
        self.last_program.as_deref()
    }

    /// Step ticks for the playhead
    pub fn subscribe(&self) -> Receiver<StepTick> {
        self.clock.subscribe()
    }

    fn publish(&mut self, program: &str) -> Result<(), EngineError> {
        match &self.output {
            Output::Stdout => println!("{}", program),
            Output::File(path) => fs::write(path, program)?,
        }
        self.last_program = Some(program.to_string());
        Ok(())
    }
}

impl AudioEngine for ScriptBridge {
    fn initialize(&mut self) -> Result<(), EngineError> {
        if self.initialized {
            return Ok(());
        }
        if let Output::File(path) = &self.output {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| EngineError::Initialization(format!("{}: {}", path.display(), e)))?;
        }
        self.initialized = true;
        info!(output = ?self.output, "Script bridge ready");
        Ok(())
    }

    fn evaluate(&mut self, pattern: &str, bpm: f32) -> Result<(), EngineError> {
        let program = compose_program(pattern, bpm, self.volume);
        check_balanced(&program).map_err(EngineError::Evaluation)?;
        self.publish(&program)?;
        debug!(bpm, "Published program");

        // every evaluation restarts the playhead from step 0
        self.clock.set_bpm(bpm);
        self.clock.start();
        self.playing = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.clock.stop();
        self.playing = false;
        if self.initialized {
            if let Err(e) = self.publish(HUSH) {
                warn!(error = %e, "Could not publish hush()");
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Reject programs the runtime could never evaluate: unbalanced brackets
/// or unterminated string literals. Bracket characters inside strings are
/// ignored.
pub fn check_balanced(program: &str) -> Result<(), String> {
    let mut open: Vec<(char, usize)> = Vec::new();
    let mut quote: Option<(char, usize)> = None;

    for (offset, c) in program.char_indices() {
        if let Some((q, _)) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some((c, offset)),
            '(' | '[' | '{' => open.push((c, offset)),
            ')' | ']' | '}' => {
                let expected = match c {
                    ')' => '(',
                    ']' => '[',
                    _ => '{',
                };
                match open.pop() {
                    Some((o, _)) if o == expected => {}
                    Some((o, at)) => {
                        return Err(format!(
                            "'{}' at offset {} does not close '{}' at offset {}",
                            c, offset, o, at
                        ))
                    }
                    None => return Err(format!("unexpected '{}' at offset {}", c, offset)),
                }
            }
            _ => {}
        }
    }

    if let Some((q, at)) = quote {
        return Err(format!("unterminated string {} starting at offset {}", q, at));
    }
    if let Some((o, at)) = open.pop() {
        return Err(format!("unclosed '{}' at offset {}", o, at));
    }
    Ok(())
}
