use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watches pattern files on notify's background thread and forwards
/// its events to a channel.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
}

impl FileWatcher {
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // receiver dropped: the REPL is shutting down
            let _ = tx.send(res);
        })?;

        Ok(Self { watcher })
    }

    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        self.watcher
            .watch(path.as_ref(), RecursiveMode::NonRecursive)
    }

    pub fn unwatch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        self.watcher.unwatch(path.as_ref())
    }
}

/// Paths whose content changed, or nothing for events that don't touch
/// file content (access, metadata)
pub fn changed_paths(event: Event) -> Vec<PathBuf> {
    match event.kind {
        EventKind::Modify(_) | EventKind::Create(_) => event.paths,
        _ => Vec::new(),
    }
}
