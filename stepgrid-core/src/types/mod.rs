// stepgrid-core/src/types/mod.rs

pub mod config;
pub mod grid;
pub mod instrument;
pub mod preset;

pub use config::SessionConfig;
pub use grid::{Grid, STEPS};
pub use instrument::{Instrument, INSTRUMENTS};
pub use preset::{Preset, PRESETS};
