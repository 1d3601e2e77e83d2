//! REPL (Read-Eval-Print Loop) for the step sequencer
//!
//! Three event sources feed one loop: typed lines from the readline thread,
//! file-change events from the watcher, and step ticks from the engine's
//! clock. All session changes happen on the loop's thread.

use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::engine::{Output, ScriptBridge, StepTick};
use crate::repl::watcher::{changed_paths, FileWatcher};
use anyhow::{Context, Result};
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use notify::Event;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use stepgrid_core::{Session, SessionConfig};
use tracing::{debug, warn};

pub mod watcher;

enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive sequencer session
pub struct Repl {
    editor: Option<DefaultEditor>,
    ctx: CommandContext,
    registry: CommandRegistry,

    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,
    rx_ticks: Receiver<StepTick>,

    watcher: Option<FileWatcher>,
    watched: Option<PathBuf>,
}

/// Read a pattern file, dropping the trailing newline editors add
pub fn read_pattern_file(path: &Path) -> Result<String> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pattern file {}", path.display()))?;
    Ok(contents.trim_end().to_string())
}

impl Repl {
    pub fn new(config: SessionConfig, output: Output) -> Result<Self> {
        let editor = DefaultEditor::new().context("Failed to create line editor")?;
        let bridge = ScriptBridge::new(output);
        let rx_ticks = bridge.subscribe();
        let session = Session::new(bridge, config);

        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            ctx: CommandContext::new(session),
            registry: create_registry(),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            rx_ticks,
            watcher: None,
            watched: None,
        })
    }

    /// Handle one typed line. Returns false when the REPL should exit.
    fn handle_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }
        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => return false,
            CommandResult::Error(e) => println!("{} {}", "Error:".bright_red().bold(), e.red()),
            CommandResult::Watch(path) => self.watch(PathBuf::from(path)),
            CommandResult::NotACommand => println!(
                "{} Unknown command '{}'. Type '{}' for a list.",
                "Error:".bright_red().bold(),
                line,
                "help".bright_green()
            ),
        }
        true
    }

    /// Watch `path` instead of whatever was watched before, and load it now
    fn watch(&mut self, path: PathBuf) {
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }
        let Some(w) = &mut self.watcher else {
            return;
        };

        if let Some(old) = self.watched.take() {
            let _ = w.unwatch(&old);
        }
        if let Err(e) = w.watch(&path) {
            println!("{} Failed to watch {}: {}", "Error:".red(), path.display(), e);
            return;
        }
        println!(
            "{} Watching {} for changes...",
            "»".bright_cyan(),
            path.display().to_string().bright_green()
        );
        self.reload(&path);
        self.watched = Some(path);
    }

    /// Replace the session pattern with the file's content
    fn reload(&mut self, path: &Path) {
        let pattern = match read_pattern_file(path) {
            Ok(p) => p,
            Err(e) => {
                println!("{} {:#}", "Error:".red(), e);
                return;
            }
        };
        if pattern == self.ctx.session.pattern() {
            debug!(path = %path.display(), "File unchanged, skipping reload");
            return;
        }
        match self.ctx.session.set_pattern(pattern) {
            Ok(_) => {
                println!("{} Reloaded {}", "✓".bright_green(), path.display());
                print!("{}", self.ctx.session.grid().render(self.ctx.session.active_step()));
            }
            Err(e) => println!("{} Pattern error: {}", "Error:".red(), e),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        println!("{}", "Stepgrid step sequencer".bright_cyan().bold());
        println!(
            "Toggle steps with {}, load a groove with {}, start with {}",
            "toggle bd 1".cyan(),
            "preset".cyan(),
            "play".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );
        print!("{}", self.ctx.session.grid().render(None));

        let mut editor = self.editor.take().context("REPL is already running")?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "stepgrid>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if !self.handle_line(&line) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted | ReadlineError::Eof))) => break,
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!("{} {}", "Error reading input:".bright_red().bold(), err.to_string().red());
                        break;
                    }
                    Err(_) => break,
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => {
                        for path in changed_paths(event) {
                            self.reload(&path);
                        }
                    }
                    Ok(Err(e)) => warn!(error = %e, "Watch error"),
                    Err(_) => break,
                },

                recv(self.rx_ticks) -> msg => match msg {
                    Ok(tick) => self.ctx.session.on_step(tick.step),
                    Err(_) => break,
                },
            }
        }

        self.ctx.session.stop();
        println!("{}", "Goodbye!".bright_cyan());
        Ok(())
    }
}

/// Convenience function to start the REPL
pub fn start(config: SessionConfig, output: Output) -> Result<()> {
    let mut repl = Repl::new(config, output)?;
    repl.run()
}
