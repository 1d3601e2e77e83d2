//! Tests for pattern translation.

use super::compiler::{compile_grid, SILENCE};
use super::parser::parse_pattern;
use crate::types::{instrument, preset, Grid, STEPS};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const KICK: usize = 0;
const SNARE: usize = 1;
const HIHAT: usize = 2;
const OPEN_HAT: usize = 3;
const CLAP: usize = 4;

fn grid_with(cells: &[(usize, usize)]) -> Grid {
    let mut grid = Grid::new();
    for &(inst, step) in cells {
        grid.set(inst, step, true).unwrap();
    }
    grid
}

fn preset_grid(name: &str) -> Grid {
    parse_pattern(preset::find(name).unwrap().pattern)
}

#[test]
fn test_kick_on_quarters_compiles_to_literal() {
    let grid = grid_with(&[(KICK, 0), (KICK, 4), (KICK, 8), (KICK, 12)]);
    let text = compile_grid(&grid);
    assert_eq!(
        text,
        "stack(\n  s(\"bd\").struct(\"x ~ ~ ~ x ~ ~ ~ x ~ ~ ~ x ~ ~ ~\")\n)"
    );
    assert_eq!(parse_pattern(&text), grid);
}

#[test]
fn test_silence_round_trip() {
    assert_eq!(compile_grid(&Grid::new()), SILENCE);
    assert!(parse_pattern(SILENCE).is_silent());
}

#[test]
fn test_compile_then_parse_is_identity() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..200 {
        let mut grid = Grid::new();
        let density: f64 = rng.gen_range(0.0..1.0);
        for inst in 0..instrument::count() {
            for step in 0..STEPS {
                if rng.gen_bool(density) {
                    grid.set(inst, step, true).unwrap();
                }
            }
        }
        assert_eq!(parse_pattern(&compile_grid(&grid)), grid);
    }
}

#[test]
fn test_full_grid_round_trip() {
    let mut grid = Grid::new();
    for inst in 0..instrument::count() {
        for step in 0..STEPS {
            grid.set(inst, step, true).unwrap();
        }
    }
    assert_eq!(parse_pattern(&compile_grid(&grid)), grid);
}

#[test]
fn test_repeat_form() {
    let grid = parse_pattern(r#"s("bd*4")"#);
    assert_eq!(grid.active_steps(KICK), vec![0, 4, 8, 12]);
    for inst in 1..instrument::count() {
        assert!(grid.active_steps(inst).is_empty());
    }
}

#[test]
fn test_repeat_uneven_stride() {
    // stride floor(16/3) = 5
    let grid = parse_pattern(r#"s("sd*3")"#);
    assert_eq!(grid.active_steps(SNARE), vec![0, 5, 10]);
}

#[test]
fn test_repeat_zero() {
    assert!(parse_pattern(r#"s("bd*0")"#).is_silent());
}

#[test]
fn test_euclidean_form() {
    let first = parse_pattern(r#"s("bd(3,8)")"#);
    let second = parse_pattern(r#"s("bd(3,8)")"#);
    assert_eq!(first, second);

    let steps = first.active_steps(KICK);
    assert_eq!(steps, vec![0, 3, 5, 8, 11, 13]);
    // same tile twice
    let low: Vec<usize> = steps.iter().copied().filter(|&s| s < 8).collect();
    let high: Vec<usize> = steps.iter().filter(|&&s| s >= 8).map(|&s| s - 8).collect();
    assert!(low.len() <= 3);
    assert_eq!(low, high);
}

#[test]
fn test_euclidean_tiles_non_divisor_cycle() {
    // 2 of 5 -> onsets 0 and round(2.5)=3, tiled every 5 columns
    let grid = parse_pattern(r#"s("hh(2,5)")"#);
    assert_eq!(grid.active_steps(HIHAT), vec![0, 3, 5, 8, 10, 13, 15]);
}

#[test]
fn test_euclidean_cycle_longer_than_grid() {
    // only the first 16 slots of a long cycle land on the grid
    assert_eq!(parse_pattern(r#"s("bd(1,5000)")"#).active_steps(KICK), vec![0]);
    assert_eq!(parse_pattern(r#"s("bd(2,4097)")"#).active_steps(KICK), vec![0]);
    // 5000/625 = 8 -> onsets every 8 slots
    assert_eq!(parse_pattern(r#"s("bd(625,5000)")"#).active_steps(KICK), vec![0, 8]);
    // saturated cycles fill every column
    assert_eq!(parse_pattern(r#"s("hh(5000,5000)")"#).active_steps(HIHAT).len(), STEPS);
}

#[test]
fn test_free_sequence() {
    let grid = parse_pattern(r#"s("bd sd hh sd")"#);
    assert_eq!(grid.active_steps(KICK), vec![0, 4, 8, 12]);
    assert_eq!(grid.active_steps(HIHAT), vec![2, 6, 10, 14]);
    // sd sits at positions 1 and 3 of the four-token cycle
    assert_eq!(grid.active_steps(SNARE), vec![1, 3, 5, 7, 9, 11, 13, 15]);
}

#[test]
fn test_free_sequence_with_rests() {
    let grid = parse_pattern(r#"s("~ ~ sd ~")"#);
    assert_eq!(grid.active_steps(SNARE), vec![2, 6, 10, 14]);
}

#[test]
fn test_leading_whitespace_shifts_sequence() {
    let grid = parse_pattern(r#"s(" bd")"#);
    // tokens are ["", "bd"]
    assert_eq!(grid.active_steps(KICK), vec![1, 3, 5, 7, 9, 11, 13, 15]);
}

#[test]
fn test_struct_mask_shorter_than_grid() {
    let grid = parse_pattern(r#"s("cp").struct("~ x")"#);
    assert_eq!(grid.active_steps(CLAP), vec![1]);
}

#[test]
fn test_struct_mask_longer_than_grid() {
    let mask = vec!["x"; 20].join(" ");
    let grid = parse_pattern(&format!(r#"s("cp").struct("{}")"#, mask));
    assert_eq!(grid.active_steps(CLAP).len(), STEPS);
}

#[test]
fn test_struct_with_single_quotes_and_spacing() {
    let grid = parse_pattern("s ( 'oh' ).struct ( 'x ~ x' )");
    assert_eq!(grid.active_steps(OPEN_HAT), vec![0, 2]);
}

#[test]
fn test_stack_layers_sub_patterns() {
    let grid = parse_pattern("stack(\n  s(\"bd*4\"),\n  s(\"~ sd ~ sd\"),\n  s(\"hh*8\")\n)");
    assert_eq!(grid.active_steps(KICK), vec![0, 4, 8, 12]);
    assert_eq!(grid.active_steps(SNARE), vec![1, 3, 5, 7, 9, 11, 13, 15]);
    assert_eq!(grid.active_steps(HIHAT), vec![0, 2, 4, 6, 8, 10, 12, 14]);
}

#[test]
fn test_stack_merges_rows_of_same_instrument() {
    let grid = parse_pattern(r#"stack(s("bd").struct("x"), s("bd").struct("~ x"))"#);
    assert_eq!(grid.active_steps(KICK), vec![0, 1]);
}

#[test]
fn test_stack_with_trailing_modifiers() {
    let grid = parse_pattern("stack(\n  s(\"bd*2\")\n).gain(0.5)");
    assert_eq!(grid.active_steps(KICK), vec![0, 8]);
}

#[test]
fn test_nested_commas_fragment_stack_arguments() {
    // `s("bd(3,8)")` is split at its own comma inside a stack
    assert!(preset_grid("Polyrhythm").is_silent());
    assert!(!parse_pattern(r#"s("bd(3,8)")"#).is_silent());
}

#[test]
fn test_presets() {
    let house = preset_grid("House");
    assert_eq!(house.active_steps(KICK), vec![0, 4, 8, 12]);
    assert_eq!(house.active_steps(CLAP), vec![1, 3, 5, 7, 9, 11, 13, 15]);
    assert_eq!(house.active_steps(OPEN_HAT), vec![6, 14]);
    // `[~ hh]*8` is a group, which the grid does not understand
    assert!(house.active_steps(HIHAT).is_empty());

    let techno = preset_grid("Techno");
    assert_eq!(techno.active_steps(HIHAT).len(), STEPS);
    // `sd:1` selects a sample variant and is not the plain `sd` token
    assert!(techno.active_steps(SNARE).is_empty());

    assert!(preset_grid("Synth Melody").is_silent());
    assert!(preset_grid("Ambient").is_silent());
}

#[test]
fn test_unsupported_syntax_is_silent() {
    for text in [
        "",
        "   ",
        "hello world",
        "note(\"c3 e3\")",
        "stack(",
        ")))(((",
        "s(\"",
        "s(\"[bd sd]*2\")",
        "stack(,,,)",
    ] {
        assert!(parse_pattern(text).is_silent(), "expected silence for {:?}", text);
    }
}

#[test]
fn test_grid_to_text_is_lossy_the_other_way() {
    let text = r#"s("bd*4")"#;
    let recompiled = compile_grid(&parse_pattern(text));
    assert_ne!(recompiled, text);
    assert_eq!(parse_pattern(&recompiled), parse_pattern(text));
}
