//! Grid and pattern commands

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use stepgrid_core::types::{instrument, PRESETS};
use stepgrid_core::STEPS;

/// Resolve an instrument by id, display name, or 1-based row number
pub fn resolve_instrument(arg: &str) -> Option<usize> {
    if let Ok(n) = arg.parse::<usize>() {
        return (1..=instrument::count()).contains(&n).then(|| n - 1);
    }
    instrument::index_of(arg).or_else(|| {
        instrument::all()
            .iter()
            .position(|inst| inst.name.eq_ignore_ascii_case(arg))
    })
}

fn show_grid(ctx: &CommandContext) -> String {
    ctx.session.grid().render(ctx.session.active_step())
}

/// Handle `grid` command
pub fn cmd_grid(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(show_grid(ctx))
}

/// Handle `toggle <instrument> <step>` command
pub fn cmd_toggle(args: &str, ctx: &mut CommandContext) -> CommandResult {
    // instrument names may contain spaces ("Open HH"), the step is always last
    let Some((name, step)) = args.rsplit_once(char::is_whitespace) else {
        return CommandResult::Error("Usage: toggle <instrument> <step>".to_string());
    };

    let Some(inst) = resolve_instrument(name.trim()) else {
        return CommandResult::Error(format!("Unknown instrument: {}", name.trim()));
    };
    let step = match step.parse::<usize>() {
        Ok(n) if (1..=STEPS).contains(&n) => n - 1,
        _ => return CommandResult::Error(format!("Step must be between 1 and {}", STEPS)),
    };

    match ctx.session.toggle_step(inst, step) {
        Ok(()) => CommandResult::Message(show_grid(ctx)),
        Err(e) => CommandResult::Error(format!("Pattern error: {}", e)),
    }
}

/// Handle `pattern [text]` command
pub fn cmd_pattern(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Message(ctx.session.pattern().to_string());
    }
    match ctx.session.set_pattern(args) {
        Ok(_) => CommandResult::Message(show_grid(ctx)),
        Err(e) => CommandResult::Error(format!("Pattern error: {}", e)),
    }
}

/// Handle `preset [name|n]` command
pub fn cmd_preset(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        let list: Vec<String> = PRESETS
            .iter()
            .enumerate()
            .map(|(i, preset)| format!("  {} {}", format!("{}.", i + 1).bright_black(), preset.name))
            .collect();
        return CommandResult::Message(format!("Presets:\n{}", list.join("\n")));
    }

    match ctx.session.load_preset(args) {
        Ok(name) => CommandResult::Message(format!(
            "{} {}\n{}\n{}",
            "Loaded".bright_green(),
            name.bold(),
            ctx.session.pattern().cyan(),
            show_grid(ctx)
        )),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}
