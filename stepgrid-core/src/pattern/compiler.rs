//! Grid → canonical pattern text.

use crate::types::{Grid, INSTRUMENTS};

/// Mask symbol for an active step
pub const HIT: &str = "x";
/// Mask symbol (and sequence token) for an empty step
pub const REST: &str = "~";
/// What an all-empty grid compiles to
pub const SILENCE: &str = r#"s("~")"#;

/// Compile a grid into a `stack(...)` of struct-form triggers, one per
/// instrument with at least one active step.
///
/// The output is always understood by [`parse_pattern`](super::parse_pattern),
/// so `parse_pattern(&compile_grid(&g)) == g`.
pub fn compile_grid(grid: &Grid) -> String {
    let parts: Vec<String> = INSTRUMENTS
        .iter()
        .enumerate()
        .filter_map(|(index, instrument)| {
            let row = grid.row(index)?;
            if !row.contains(&true) {
                return None;
            }
            let mask = row
                .iter()
                .map(|&on| if on { HIT } else { REST })
                .collect::<Vec<_>>()
                .join(" ");
            Some(format!(r#"s("{}").struct("{}")"#, instrument.id, mask))
        })
        .collect();

    if parts.is_empty() {
        return SILENCE.to_string();
    }
    format!("stack(\n  {}\n)", parts.join(",\n  "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_grid_is_silence() {
        assert_eq!(compile_grid(&Grid::new()), SILENCE);
    }

    #[test]
    fn test_single_row() {
        let mut grid = Grid::new();
        grid.set(1, 4, true).unwrap();
        grid.set(1, 12, true).unwrap();
        assert_eq!(
            compile_grid(&grid),
            "stack(\n  s(\"sd\").struct(\"~ ~ ~ ~ x ~ ~ ~ ~ ~ ~ ~ x ~ ~ ~\")\n)"
        );
    }

    #[test]
    fn test_rows_follow_catalog_order() {
        let mut grid = Grid::new();
        grid.set(11, 0, true).unwrap(); // ride
        grid.set(0, 0, true).unwrap(); // kick
        let text = compile_grid(&grid);
        let kick = text.find(r#"s("bd")"#).unwrap();
        let ride = text.find(r#"s("rd")"#).unwrap();
        assert!(kick < ride);
        assert_eq!(text.matches(",\n  ").count(), 1);
    }
}
