use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use anyhow::{Context, Result};

/// Change notifications for the watched inputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// A watched file was created or modified
    Changed(PathBuf),
    /// A watched file was removed
    Removed(PathBuf),
}

impl WatchEvent {
    pub fn path(&self) -> &Path {
        match self {
            Self::Changed(path) | Self::Removed(path) => path,
        }
    }
}

/// Watches the documents being compared and reports when any of them changes
pub struct InputWatcher {
    _watcher: RecommendedWatcher,
    event_rx: Receiver<WatchEvent>,
}

impl InputWatcher {
    pub fn new<P: AsRef<Path>>(paths: &[P], debounce: Duration) -> Result<Self> {
        let (tx, rx) = mpsc::channel::<notify::Result<Event>>();
        let (event_tx, event_rx) = mpsc::channel::<WatchEvent>();

        let mut watcher = notify::recommended_watcher(tx)
            .context("Failed to create file system watcher")?;

        for path in paths {
            let path = path.as_ref();
            let mode = if path.is_dir() {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher
                .watch(path, mode)
                .with_context(|| format!("Failed to watch {}", path.display()))?;
        }

        // Spawn background thread to process notify events
        thread::spawn(move || {
            let mut last_event_time = HashMap::<PathBuf, Instant>::new();

            while let Ok(result) = rx.recv() {
                match result {
                    Ok(event) => {
                        let now = Instant::now();

                        for path in event.paths {
                            let watch_event = match event.kind {
                                notify::EventKind::Create(_) | notify::EventKind::Modify(_) => {
                                    WatchEvent::Changed(path.clone())
                                }
                                notify::EventKind::Remove(_) => WatchEvent::Removed(path.clone()),
                                _ => continue,
                            };

                            if let Some(last_time) = last_event_time.get(&path) {
                                if now.duration_since(*last_time) < debounce {
                                    continue;
                                }
                            }
                            last_event_time.insert(path, now);

                            if event_tx.send(watch_event).is_err() {
                                return; // Receiver dropped, exit thread
                            }
                        }
                    }
                    Err(err) => {
                        tracing::error!("File watcher error: {}", err);
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_rx,
        })
    }

    /// Wait for one event, then swallow whatever else arrives within `settle`.
    /// Returns `None` on timeout.
    pub fn next_batch(&self, timeout: Duration, settle: Duration) -> Option<Vec<WatchEvent>> {
        let first = self.event_rx.recv_timeout(timeout).ok()?;
        let mut batch = vec![first];
        while let Ok(event) = self.event_rx.recv_timeout(settle) {
            batch.push(event);
        }
        Some(batch)
    }
}
