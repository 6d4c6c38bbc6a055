// Watches the directories shown as columns and reports which ones changed
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

pub struct DirectoryWatcher {
    watcher: RecommendedWatcher,
    watched: HashSet<PathBuf>,
    /// Paths that refused a watch, not retried while they stay requested
    failed: HashSet<PathBuf>,
    changes: Receiver<PathBuf>,
}

impl DirectoryWatcher {
    pub fn new<W>(wake: W) -> notify::Result<Self>
    where
        W: Fn() + Send + 'static,
    {
        let (tx, rx) = channel();
        let watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                // Listing a directory produces access events of its own.
                if matches!(event.kind, EventKind::Access(_)) {
                    return;
                }
                for path in event.paths {
                    // A change inside a directory shows up on its child path.
                    if let Some(parent) = path.parent() {
                        let _ = tx.send(parent.to_path_buf());
                    }
                    let _ = tx.send(path);
                }
                wake();
            }
            Err(e) => log::debug!("watch error: {}", e),
        })?;

        Ok(Self {
            watcher,
            watched: HashSet::new(),
            failed: HashSet::new(),
            changes: rx,
        })
    }

    /// Watch exactly `dirs`, dropping watches that are no longer needed.
    pub fn sync(&mut self, dirs: &[PathBuf]) {
        let wanted: HashSet<&PathBuf> = dirs.iter().collect();
        self.failed.retain(|p| wanted.contains(p));

        let stale: Vec<PathBuf> = self
            .watched
            .iter()
            .filter(|p| !wanted.contains(p))
            .cloned()
            .collect();
        for path in stale {
            if let Err(e) = self.watcher.unwatch(&path) {
                log::debug!("unwatch {} failed: {}", path.display(), e);
            }
            self.watched.remove(&path);
        }

        for path in wanted {
            if self.watched.contains(path) || self.failed.contains(path) {
                continue;
            }
            match self.watcher.watch(path, RecursiveMode::NonRecursive) {
                Ok(()) => {
                    self.watched.insert(path.clone());
                }
                Err(e) => {
                    log::warn!("cannot watch {}: {}", path.display(), e);
                    self.failed.insert(path.clone());
                }
            }
        }
    }

    pub fn watched(&self) -> &HashSet<PathBuf> {
        &self.watched
    }

    /// Watched directories that changed since the last poll.
    pub fn poll_changed(&mut self) -> HashSet<PathBuf> {
        self.changes
            .try_iter()
            .filter(|p| self.watched.contains(p))
            .collect()
    }
}
