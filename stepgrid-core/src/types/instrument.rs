//! Drum instrument catalog
//!
//! The catalog order is the grid's row order, and the ids are the only
//! tokens the pattern parser recognizes as triggers.

use std::fmt;

/// A drum voice that can be triggered from the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Instrument {
    /// Sample token used in pattern text (`bd`, `sd`, ...)
    pub id: &'static str,
    /// Human readable label
    pub name: &'static str,
    /// Display color as `#rrggbb`
    pub color: &'static str,
}

/// All instruments, in grid row order. Never reorder this.
pub const INSTRUMENTS: [Instrument; 12] = [
    Instrument::new("bd", "Kick", "#ff6b6b"),
    Instrument::new("sd", "Snare", "#4ecdc4"),
    Instrument::new("hh", "Hi-Hat", "#45b7d1"),
    Instrument::new("oh", "Open HH", "#98d8c8"),
    Instrument::new("cp", "Clap", "#96ceb4"),
    Instrument::new("lt", "Low Tom", "#dda0dd"),
    Instrument::new("mt", "Mid Tom", "#da70d6"),
    Instrument::new("ht", "High Tom", "#ba55d3"),
    Instrument::new("rim", "Rimshot", "#ffeaa7"),
    Instrument::new("cb", "Cowbell", "#fdcb6e"),
    Instrument::new("cr", "Crash", "#74b9ff"),
    Instrument::new("rd", "Ride", "#a29bfe"),
];

impl Instrument {
    const fn new(id: &'static str, name: &'static str, color: &'static str) -> Self {
        Self { id, name, color }
    }

    /// Look up an instrument by its pattern token (exact match)
    pub fn from_id(id: &str) -> Option<&'static Instrument> {
        INSTRUMENTS.iter().find(|inst| inst.id == id)
    }

    /// Decode the display color into RGB components.
    /// Falls back to white for anything that is not `#rrggbb`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        if hex.len() != 6 {
            return (255, 255, 255);
        }
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .unwrap_or(255)
        };
        (channel(0..2), channel(2..4), channel(4..6))
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Number of instruments (grid rows)
pub fn count() -> usize {
    INSTRUMENTS.len()
}

/// Instrument at a row index
pub fn at(index: usize) -> Option<&'static Instrument> {
    INSTRUMENTS.get(index)
}

/// Row index of the instrument with the given token
pub fn index_of(token: &str) -> Option<usize> {
    INSTRUMENTS.iter().position(|inst| inst.id == token)
}

/// The whole catalog
pub fn all() -> &'static [Instrument] {
    &INSTRUMENTS
}
