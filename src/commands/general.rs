//! General REPL commands (help, quit, watch)

use crate::commands::{CommandContext, CommandResult};
use colored::*;
use stepgrid_core::types::instrument;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(help_text().trim_end().to_string())
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch <file>` command
pub fn cmd_watch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <file>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

/// Command and pattern syntax reference
pub fn help_text() -> String {
    let mut out = String::new();
    let mut line = |text: String| {
        out.push_str(&text);
        out.push('\n');
    };

    line("Stepgrid Help".bold().to_string());
    line("=============".bold().to_string());
    line(String::new());
    line("Grid:".green().to_string());
    line(format!("  {}                    - Show the step grid", "grid".cyan()));
    line(format!(
        "  {}  - Flip one cell (steps are 1-16)",
        "toggle <instrument> <step>".cyan()
    ));
    line(format!("  {}          - Show or replace the pattern text", "pattern [text]".cyan()));
    line(format!("  {}       - List presets or load one", "preset [name|n]".cyan()));
    line(String::new());
    line("Transport:".green().to_string());
    line(format!("  {} / {}             - Start or stop playback", "play".cyan(), "stop".cyan()));
    line(format!("  {}             - Show or set tempo (60-200 BPM)", "tempo [bpm]".cyan()));
    line(format!(
        "  {}          - Show or set volume (0-1 or a percentage)",
        "volume [level]".cyan()
    ));
    line(String::new());
    line("Files:".green().to_string());
    line(format!(
        "  {}            - Reload the pattern whenever the file changes",
        "watch <file>".cyan()
    ));
    line(String::new());
    line("Patterns:".green().to_string());
    line(format!("  {}                 - Four hits, one per beat", r#"s("bd*4")"#.cyan()));
    line(format!("  {}               - Euclidean: 3 hits spread over 8 steps", r#"s("bd(3,8)")"#.cyan()));
    line(format!("  {}  - Explicit mask, x = hit", r#"s("bd").struct("x ~ x ~")"#.cyan()));
    line(format!("  {}                     - Sequence, each token gets an equal share", r#"s("bd sd")"#.cyan()));
    line(format!("  {}                 - Layer patterns together", "stack(a, b)".cyan()));
    line(format!("  {}                  - Scale loudness (kept out of the grid)", ".gain(0.5)".cyan()));
    line(format!("  {}                           - Rest", "~".cyan()));
    line(String::new());
    line("Instruments:".green().to_string());
    let ids: Vec<String> = instrument::all()
        .iter()
        .enumerate()
        .map(|(i, inst)| format!("{} {} ({})", i + 1, inst.id, inst.name))
        .collect();
    for chunk in ids.chunks(4) {
        line(format!("  {}", chunk.join(", ")));
    }
    line(String::new());
    line("Examples:".green().to_string());
    line(format!("  stepgrid> {}", "toggle bd 1".cyan()));
    line(format!("  stepgrid> {}", r#"pattern s("bd*4")"#.cyan()));
    line(format!("  stepgrid> {}", "preset house".cyan()));
    line(String::new());
    line("Other:".green().to_string());
    line(format!("  {}                    - Show this help", "help".cyan()));
    line(format!("  {} / {}             - Exit", "quit".cyan(), "exit".cyan()));
    out
}
