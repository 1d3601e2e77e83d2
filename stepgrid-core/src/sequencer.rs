//! Keeps the step grid and the shared pattern text in agreement.
//!
//! The pattern text is the source of truth. The sequencer re-derives its grid
//! whenever the text changes from outside, but not when the change came from
//! one of its own toggles: re-parsing our own output would be redundant, and
//! the parse direction is lossy.

use crate::pattern::{compile_grid, parse_pattern};
use crate::types::Grid;
use anyhow::Result;
use tracing::debug;

/// What happened when the sequencer observed new pattern text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// The text came from our own toggle; the grid was left as is
    Suppressed,
    /// The text came from elsewhere; the grid was rebuilt from it
    Reparsed,
}

/// Grid state plus the handshake flag marking self-originated text
#[derive(Debug, Clone)]
pub struct Sequencer {
    grid: Grid,
    /// Set right before a toggle emits text, cleared by the next observation
    internal_change: bool,
}

impl Sequencer {
    /// Start from the given pattern text
    pub fn new(pattern: &str) -> Self {
        Self {
            grid: parse_pattern(pattern),
            internal_change: false,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Whether an emitted pattern is still waiting to be observed
    pub fn has_pending_change(&self) -> bool {
        self.internal_change
    }

    /// Flip one cell and return the compiled pattern text to publish.
    ///
    /// The caller is expected to store the returned text and feed it back
    /// through [`observe_pattern`](Self::observe_pattern), which will then skip
    /// re-parsing. Out-of-range indices leave everything unchanged.
    pub fn toggle(&mut self, instrument: usize, step: usize) -> Result<String> {
        let mut next = self.grid.clone();
        next.toggle(instrument, step)?;

        let pattern = compile_grid(&next);
        self.grid = next;
        self.internal_change = true;
        Ok(pattern)
    }

    /// React to the shared pattern text changing.
    pub fn observe_pattern(&mut self, pattern: &str) -> Reconciliation {
        if self.internal_change {
            self.internal_change = false;
            debug!("Pattern change came from the grid, skipping re-parse");
            return Reconciliation::Suppressed;
        }
        self.grid = parse_pattern(pattern);
        debug!(pattern, "Rebuilt grid from external pattern");
        Reconciliation::Reparsed
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            grid: Grid::new(),
            internal_change: false,
        }
    }
}
