//! The instrument × step matrix edited by the sequencer.

use super::instrument::{self, INSTRUMENTS};
use anyhow::{anyhow, Result};
#[cfg(feature = "colored")]
use colored::*;
use std::fmt;

/// Sixteenth-note steps per cycle (grid columns)
pub const STEPS: usize = 16;

/// Boolean trigger grid: one row per instrument, one column per step.
///
/// The shape is fixed at construction and never changes.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows: Vec<[bool; STEPS]>,
}

impl Grid {
    /// An all-false grid sized to the instrument catalog
    pub fn new() -> Self {
        Self {
            rows: vec![[false; STEPS]; instrument::count()],
        }
    }

    /// Build a grid from nested rows (e.g. coming from JavaScript).
    /// Every row must be present and exactly [`STEPS`] long.
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Result<Self> {
        if rows.len() != instrument::count() {
            return Err(anyhow!(
                "Expected {} rows, got {}",
                instrument::count(),
                rows.len()
            ));
        }
        let mut grid = Self::new();
        for (i, row) in rows.into_iter().enumerate() {
            grid.rows[i] = row
                .try_into()
                .map_err(|r: Vec<bool>| anyhow!("Row {} has {} steps, expected {}", i, r.len(), STEPS))?;
        }
        Ok(grid)
    }

    /// Nested-vector copy of the cells
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows.iter().map(|row| row.to_vec()).collect()
    }

    /// Number of rows (instruments)
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, instrument: usize) -> Option<&[bool; STEPS]> {
        self.rows.get(instrument)
    }

    pub(crate) fn row_mut(&mut self, instrument: usize) -> Option<&mut [bool; STEPS]> {
        self.rows.get_mut(instrument)
    }

    /// Whether `instrument` triggers at `step`. Out-of-range cells read as false.
    pub fn get(&self, instrument: usize, step: usize) -> bool {
        self.rows
            .get(instrument)
            .and_then(|row| row.get(step))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, instrument: usize, step: usize, active: bool) -> Result<()> {
        let cell = self.cell_mut(instrument, step)?;
        *cell = active;
        Ok(())
    }

    /// Flip a cell, returning its new value
    pub fn toggle(&mut self, instrument: usize, step: usize) -> Result<bool> {
        let cell = self.cell_mut(instrument, step)?;
        *cell = !*cell;
        Ok(*cell)
    }

    fn cell_mut(&mut self, instrument: usize, step: usize) -> Result<&mut bool> {
        let rows = self.rows.len();
        let row = self
            .rows
            .get_mut(instrument)
            .ok_or_else(|| anyhow!("Instrument index {} out of range (0-{})", instrument, rows - 1))?;
        row.get_mut(step)
            .ok_or_else(|| anyhow!("Step index {} out of range (0-{})", step, STEPS - 1))
    }

    /// Columns where `instrument` is active
    pub fn active_steps(&self, instrument: usize) -> Vec<usize> {
        self.rows
            .get(instrument)
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, &on)| on)
                    .map(|(step, _)| step)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// True when no cell is active
    pub fn is_silent(&self) -> bool {
        self.rows.iter().all(|row| row.iter().all(|&on| !on))
    }

    /// Text rendering of the grid, one line per instrument.
    /// `playhead` marks the currently sounding column.
    #[cfg(feature = "colored")]
    pub fn render(&self, playhead: Option<usize>) -> String {
        let mut out = String::new();
        for (inst, row) in INSTRUMENTS.iter().zip(&self.rows) {
            let (r, g, b) = inst.rgb();
            out.push_str(&format!("{:>8} ", inst.name.truecolor(r, g, b).bold()));
            for (step, &on) in row.iter().enumerate() {
                if step > 0 && step % 4 == 0 {
                    out.push(' ');
                }
                let mut cell = if on {
                    "■".truecolor(r, g, b)
                } else {
                    "·".bright_black()
                };
                if playhead == Some(step) {
                    cell = cell.on_white();
                }
                out.push_str(&cell.to_string());
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }

    /// Text rendering of the grid, one line per instrument.
    /// `playhead` marks the currently sounding column.
    #[cfg(not(feature = "colored"))]
    pub fn render(&self, playhead: Option<usize>) -> String {
        let mut out = String::new();
        for (inst, row) in INSTRUMENTS.iter().zip(&self.rows) {
            out.push_str(&format!("{:>8} ", inst.name));
            for (step, &on) in row.iter().enumerate() {
                if step > 0 && step % 4 == 0 {
                    out.push(' ');
                }
                let cell = match (on, playhead == Some(step)) {
                    (true, true) => '#',
                    (true, false) => 'x',
                    (false, true) => '|',
                    (false, false) => '.',
                };
                out.push(cell);
                out.push(' ');
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}
