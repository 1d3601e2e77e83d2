//! # Stepgrid
//!
//! Terminal host for the `stepgrid-core` step sequencer. A 16-step drum grid
//! and a live-coding pattern string are kept in agreement: toggling a cell
//! rewrites the pattern text, and editing the text (by command or by watching
//! a file) rebuilds the grid.
//!
//! ## Modules
//!
//! - `engine`: the [`ScriptBridge`](engine::ScriptBridge) that hands composed
//!   programs to an external live-coding runtime, and the step clock that
//!   drives the playhead.
//! - `commands`: REPL commands for the grid and the transport.
//! - `repl`: the interactive loop and the pattern-file watcher.

pub mod commands;
pub mod engine;
pub mod repl;

pub use crate::engine::{Output, ScriptBridge};
pub use stepgrid_core::{Grid, Session, SessionConfig};
