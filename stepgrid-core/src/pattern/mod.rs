//! Translation between pattern text and the step grid
//!
//! Parsing is lossy: only struct masks, `*N` repeats, `(H,T)` Euclidean
//! rhythms and plain token sequences reach the grid. Compiling is total and
//! always emits struct masks, which parse back unchanged.

mod compiler;
mod euclidean;
mod parser;

#[cfg(test)]
mod tests;

pub use compiler::{compile_grid, HIT, REST, SILENCE};
pub use euclidean::{euclidean_onsets, euclidean_rhythm};
pub use parser::parse_pattern;
