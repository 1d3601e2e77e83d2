//! Command registry for REPL commands
//!
//! Each command is a prefix mapped to a handler. The longest registered
//! prefix wins, so `preset` and a hypothetical `preset list` can coexist.

pub mod general;
pub mod grid;
pub mod transport;

use crate::engine::ScriptBridge;
use stepgrid_core::Session;

/// Result of executing a command
#[derive(Debug, PartialEq)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// No command matched the input
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a pattern file for changes
    Watch(String),
}

/// Context passed to command handlers
pub struct CommandContext {
    pub session: Session<ScriptBridge>,
}

impl CommandContext {
    pub fn new(session: Session<ScriptBridge>) -> Self {
        Self { session }
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            let args = match input.strip_prefix(prefix.as_str()) {
                Some("") => "",
                Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim(),
                _ => continue,
            };
            return handler(args, ctx);
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    registry.register("grid", grid::cmd_grid);
    registry.register("toggle", grid::cmd_toggle);
    registry.register("pattern", grid::cmd_pattern);
    registry.register("preset", grid::cmd_preset);

    registry.register("play", transport::cmd_play);
    registry.register("stop", transport::cmd_stop);
    registry.register("tempo", transport::cmd_tempo);
    registry.register("volume", transport::cmd_volume);

    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}
