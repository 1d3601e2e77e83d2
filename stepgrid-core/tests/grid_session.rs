use stepgrid_core::types::{preset, PRESETS};
use stepgrid_core::{
    compile_grid, parse_pattern, AudioEngine, EngineError, Grid, Reconciliation, Sequencer,
    Session, SessionConfig, STEPS,
};

/// Engine that remembers the last program and rejects unbalanced parens,
/// standing in for a real engine's stricter grammar
#[derive(Default)]
struct StrictEngine {
    last: Option<String>,
}

impl AudioEngine for StrictEngine {
    fn initialize(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn evaluate(&mut self, pattern: &str, _bpm: f32) -> Result<(), EngineError> {
        if pattern.matches('(').count() != pattern.matches(')').count() {
            return Err(EngineError::Evaluation("unbalanced parentheses".into()));
        }
        self.last = Some(pattern.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        self.last = None;
    }

    fn set_volume(&mut self, _volume: f32) {}
}

#[test]
fn test_every_preset_parses_and_recompiles_stably() {
    for preset in PRESETS.iter() {
        let grid = parse_pattern(preset.pattern);
        let text = compile_grid(&grid);
        assert_eq!(parse_pattern(&text), grid, "preset {}", preset.name);
        // compiled text is a fixed point
        assert_eq!(compile_grid(&parse_pattern(&text)), text);
    }
}

#[test]
fn test_editing_a_preset_from_the_grid() {
    let mut seq = Sequencer::new(preset::find("Four on the Floor").unwrap().pattern);
    // add an open hat on the last step
    let text = seq.toggle(3, STEPS - 1).unwrap();
    assert_eq!(seq.observe_pattern(&text), Reconciliation::Suppressed);

    let reparsed = parse_pattern(&text);
    assert_eq!(&reparsed, seq.grid());
    assert_eq!(reparsed.active_steps(3), vec![15]);
    assert_eq!(reparsed.active_steps(0), vec![0, 4, 8, 12]);
}

#[test]
fn test_hand_edit_rejected_by_engine_keeps_grid_in_sync() {
    let mut session = Session::new(StrictEngine::default(), SessionConfig::default());
    session.play().unwrap();

    // the grid subset accepts this, the engine does not
    let err = session.set_pattern(r#"s("bd*4"))"#).unwrap_err();
    assert!(matches!(err, EngineError::Evaluation(_)));
    assert_eq!(session.grid().active_steps(0), vec![0, 4, 8, 12]);
    assert!(session.error().unwrap().contains("unbalanced"));

    // a grid edit compiles balanced text, so the engine accepts it again
    session.toggle_step(1, 2).unwrap();
    assert_eq!(session.engine().last.as_deref(), Some(session.pattern()));
}

#[test]
fn test_new_pattern_at_any_time() {
    let mut seq = Sequencer::default();
    for text in ["", r#"s("bd*4")"#, "garbage (", r#"s("sd(3,8)")"#] {
        assert_eq!(seq.observe_pattern(text), Reconciliation::Reparsed);
        assert_eq!(seq.grid(), &parse_pattern(text));
    }
    assert_ne!(seq.grid(), &Grid::new());
}
