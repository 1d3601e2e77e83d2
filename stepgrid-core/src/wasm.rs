//! WASM bindings for stepgrid-core
//!
//! Lets a web front-end run the grid translation and the reconciliation
//! handshake in Rust while it keeps talking to the audio engine itself.

#[cfg(feature = "wasm")]
use crate::pattern::euclidean_rhythm;
use crate::pattern::{compile_grid, parse_pattern};
#[cfg(feature = "wasm")]
use crate::sequencer::{Reconciliation, Sequencer};
use crate::types::{Grid, INSTRUMENTS, PRESETS};
use anyhow::Result;
#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// Instrument row description for the grid widget
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstrumentJS {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// Named example pattern
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PresetJS {
    pub name: String,
    pub pattern: String,
}

/// Instruments in grid row order
pub fn instrument_rows() -> Vec<InstrumentJS> {
    INSTRUMENTS
        .iter()
        .map(|inst| InstrumentJS {
            id: inst.id.to_string(),
            name: inst.name.to_string(),
            color: inst.color.to_string(),
        })
        .collect()
}

pub fn preset_list() -> Vec<PresetJS> {
    PRESETS
        .iter()
        .map(|preset| PresetJS {
            name: preset.name.to_string(),
            pattern: preset.pattern.to_string(),
        })
        .collect()
}

/// Pattern text as nested rows, one per instrument
pub fn grid_rows(pattern: &str) -> Vec<Vec<bool>> {
    parse_pattern(pattern).to_rows()
}

/// Pattern text for nested rows. Fails unless the shape is instruments x steps.
pub fn pattern_from_rows(rows: Vec<Vec<bool>>) -> Result<String> {
    Ok(compile_grid(&Grid::from_rows(rows)?))
}

/// Parse pattern text into nested `boolean[][]` rows
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = parse_pattern)]
pub fn parse_pattern_to_grid(pattern: &str) -> JsValue {
    serde_wasm_bindgen::to_value(&grid_rows(pattern)).unwrap_or(JsValue::NULL)
}

/// Compile nested `boolean[][]` rows into pattern text
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = compile_grid)]
pub fn compile_grid_to_pattern(rows: JsValue) -> std::result::Result<String, JsValue> {
    let rows: Vec<Vec<bool>> =
        serde_wasm_bindgen::from_value(rows).map_err(|e| JsValue::from_str(&e.to_string()))?;
    pattern_from_rows(rows).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn get_instruments() -> JsValue {
    serde_wasm_bindgen::to_value(&instrument_rows()).unwrap_or(JsValue::NULL)
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn get_presets() -> JsValue {
    serde_wasm_bindgen::to_value(&preset_list()).unwrap_or(JsValue::NULL)
}

/// Euclidean onsets for `hits` over `total` steps
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub fn euclidean(hits: usize, total: usize) -> Vec<u8> {
    euclidean_rhythm(hits, total)
        .into_iter()
        .map(u8::from)
        .collect()
}

/// Grid widget state living on the Rust side
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmSequencer {
    sequencer: Sequencer,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmSequencer {
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str) -> Self {
        WasmSequencer {
            sequencer: Sequencer::new(pattern),
        }
    }

    /// Current grid as `boolean[][]`
    pub fn grid(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.sequencer.grid().to_rows()).unwrap_or(JsValue::NULL)
    }

    /// Flip a cell. Returns the pattern text the host should publish.
    pub fn toggle(&mut self, instrument: usize, step: usize) -> std::result::Result<String, JsValue> {
        self.sequencer
            .toggle(instrument, step)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Feed back the shared pattern text after it changed.
    /// Returns true when the grid was rebuilt.
    pub fn observe_pattern(&mut self, pattern: &str) -> bool {
        self.sequencer.observe_pattern(pattern) == Reconciliation::Reparsed
    }
}
