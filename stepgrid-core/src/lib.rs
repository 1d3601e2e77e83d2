//! # Stepgrid Core
//!
//! WASM-compatible core of the stepgrid drum sequencer: translation between a
//! 16-step instrument grid and live-coding pattern text, and the controller
//! that keeps both in agreement. No audio dependencies.
//!
//! ## Features
//!
//! - **serde**: Enable JSON serialization for web interop
//! - **wasm**: Enable WASM bindings via wasm-bindgen
//! - **colored**: Enable colored terminal rendering of the grid (disabled in WASM)
//!
//! ## Example
//!
//! ```
//! use stepgrid_core::{compile_grid, parse_pattern};
//!
//! let grid = parse_pattern(r#"s("bd*4")"#);
//! assert_eq!(grid.active_steps(0), vec![0, 4, 8, 12]);
//! assert_eq!(parse_pattern(&compile_grid(&grid)), grid);
//! ```

pub mod engine;
pub mod pattern;
pub mod sequencer;
pub mod session;
pub mod types;
pub mod wasm;

// Re-export commonly used types
pub use engine::{compose_program, AudioEngine, EngineError};
pub use pattern::{compile_grid, euclidean_rhythm, parse_pattern};
pub use sequencer::{Reconciliation, Sequencer};
pub use session::Session;
pub use types::{Grid, Instrument, SessionConfig, INSTRUMENTS, STEPS};
