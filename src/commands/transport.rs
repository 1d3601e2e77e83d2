//! Transport commands (play, stop, tempo, volume)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `play` command
pub fn cmd_play(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    match ctx.session.play() {
        Ok(()) => CommandResult::Message(
            format!("Playing at {:.0} BPM", ctx.session.bpm())
                .bright_green()
                .to_string(),
        ),
        // the session has already prefixed the message with what failed
        Err(e) => CommandResult::Error(ctx.session.error().map_or_else(|| e.to_string(), String::from)),
    }
}

/// Handle `stop` command
pub fn cmd_stop(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.session.stop();
    CommandResult::Message("Stopped".to_string())
}

/// Handle `tempo [bpm]` command
pub fn cmd_tempo(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!("Current tempo: {:.0} BPM", ctx.session.bpm()));
    }

    let Ok(bpm) = args.parse::<f32>() else {
        return CommandResult::Error("Invalid tempo. Use a value between 60-200 BPM".to_string());
    };
    match ctx.session.set_bpm(bpm) {
        Ok(()) => CommandResult::Message(
            format!("Tempo set to {:.0} BPM", ctx.session.bpm())
                .bright_green()
                .to_string(),
        ),
        Err(e) => CommandResult::Error(format!("BPM error: {}", e)),
    }
}

/// Handle `volume [level]` command. Levels above 1 are read as percentages.
pub fn cmd_volume(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(format!(
            "Current volume: {:.0}%",
            ctx.session.volume() * 100.0
        ));
    }

    let level = match args.trim_end_matches('%').parse::<f32>() {
        Ok(v) if v > 1.0 || args.ends_with('%') => v / 100.0,
        Ok(v) => v,
        Err(_) => return CommandResult::Error("Invalid volume. Use 0-1 or 0-100%".to_string()),
    };
    match ctx.session.set_volume(level) {
        Ok(()) => CommandResult::Message(format!(
            "Volume set to {:.0}%",
            ctx.session.volume() * 100.0
        )),
        Err(e) => CommandResult::Error(format!("Volume error: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use std::fs;

    #[test]
    fn test_play_writes_program_and_stop_hushes() {
        let (mut ctx, dir) = context();
        let path = dir.path().join("live.js");

        assert!(matches!(cmd_play("", &mut ctx), CommandResult::Message(_)));
        assert!(ctx.session.is_playing());
        let program = fs::read_to_string(&path).unwrap();
        assert!(program.starts_with("setcps(0.5)\n"));
        assert!(program.ends_with(r#"s("bd sd hh sd").gain(0.8)"#));

        cmd_stop("", &mut ctx);
        assert!(!ctx.session.is_playing());
        assert_eq!(fs::read_to_string(&path).unwrap(), "hush()");
    }

    #[test]
    fn test_play_reports_initialization_failure() {
        let (mut ctx, dir) = context();
        // a directory where the output file should be makes opening it fail
        fs::create_dir(dir.path().join("live.js")).unwrap();
        match cmd_play("", &mut ctx) {
            CommandResult::Error(msg) => assert!(msg.starts_with("Failed to initialize audio:")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!ctx.session.is_playing());
    }

    #[test]
    fn test_tempo_is_clamped() {
        let (mut ctx, _dir) = context();
        cmd_tempo("300", &mut ctx);
        assert_eq!(ctx.session.bpm(), 200.0);
        cmd_tempo("10", &mut ctx);
        assert_eq!(ctx.session.bpm(), 60.0);
        assert!(matches!(cmd_tempo("fast", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_tempo_while_playing_republishes() {
        let (mut ctx, _dir) = context();
        cmd_play("", &mut ctx);
        cmd_tempo("180", &mut ctx);
        let program = ctx.session.engine().last_program().unwrap();
        assert!(program.starts_with("setcps(0.75)"));
    }

    #[test]
    fn test_volume_levels() {
        let (mut ctx, _dir) = context();
        cmd_volume("0.5", &mut ctx);
        assert_eq!(ctx.session.volume(), 0.5);
        cmd_volume("25", &mut ctx);
        assert_eq!(ctx.session.volume(), 0.25);
        cmd_volume("1%", &mut ctx);
        assert_eq!(ctx.session.volume(), 0.01);
        cmd_volume("250", &mut ctx);
        assert_eq!(ctx.session.volume(), 1.0);
        assert!(matches!(cmd_volume("loud", &mut ctx), CommandResult::Error(_)));
    }
}
