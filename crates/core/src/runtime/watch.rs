use super::*;
use crate::error::Result;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::collections::HashSet;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use xxhash_rust::xxh3::xxh3_64;

struct FsWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl FsWatcher {
    fn new(root: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    async fn next_event_async(&mut self) -> Option<Event> {
        loop {
            match self.rx.recv().await? {
                Ok(event) => return Some(event),
                Err(e) => tracing::warn!("File watcher error: {}", e),
            }
        }
    }
}

/// Stops the watcher task it was returned with.
#[derive(Debug, Clone)]
pub struct WatchHandle {
    token: CancellationToken,
}

impl WatchHandle {
    pub fn stop(&self) {
        self.token.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl HdlscopeEngine {
    /// Re-index files as they change on disk until the handle is stopped or
    /// the engine is dropped.
    pub fn start_watch(self: Arc<Self>) -> Result<WatchHandle> {
        let token = self.cancel_token.child_token();
        self.start_watch_with_token(token.clone())?;
        Ok(WatchHandle { token })
    }

    /// The watcher task exits when `cancel_token` is cancelled.
    pub fn start_watch_with_token(self: Arc<Self>, cancel_token: CancellationToken) -> Result<()> {
        let root = self.project_root.clone();
        let mut watcher = FsWatcher::new(&root)?;
        let debounce_interval = Duration::from_millis(self.config.watch_debounce_ms);
        let engine_weak = Arc::downgrade(&self);

        tokio::spawn(async move {
            tracing::info!("Started watching {}", root.display());
            let mut pending_events: Vec<Event> = Vec::new();

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        break;
                    }
                    event = watcher.next_event_async() => {
                        match event {
                            Some(e) => pending_events.push(e),
                            None => break,
                        }
                    }
                    _ = tokio::time::sleep(debounce_interval), if !pending_events.is_empty() => {
                        let Some(engine) = engine_weak.upgrade() else {
                            break;
                        };
                        let paths: HashSet<PathBuf> = pending_events
                            .drain(..)
                            .flat_map(|event| event.paths)
                            .filter(|path| engine.is_watched_path(path))
                            .collect();

                        if !paths.is_empty() {
                            tracing::info!("Detected changes in {} files. Updating...", paths.len());
                            let mut paths: Vec<_> = paths.into_iter().collect();
                            paths.sort();
                            match engine.apply_changes(paths).await {
                                Ok(updated) => tracing::debug!("Re-indexed {} changed files", updated),
                                Err(err) => tracing::error!("Failed to update files: {}", err),
                            }
                        }
                    }
                }
            }
            tracing::info!("File watcher task ended for {}", root.display());
        });

        Ok(())
    }

    /// Re-indexes every path whose content differs from the indexed
    /// version and drops deleted ones. Returns the number of files touched.
    pub async fn apply_changes(&self, paths: Vec<PathBuf>) -> Result<usize> {
        let mut updated = 0;
        for path in paths {
            let path = self.resolve_path(&path);
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let hash = xxh3_64(&bytes);
                    if self.store.read().await.content_hash(&path) == Some(hash) {
                        continue;
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!("Cannot read changed file {}: {}", path.display(), e);
                    continue;
                }
            }
            self.reindex_file(&path).await?;
            updated += 1;
        }
        Ok(updated)
    }

    fn is_watched_path(&self, path: &Path) -> bool {
        if !self.config.is_indexable(path) {
            return false;
        }
        let rel = path.strip_prefix(&self.project_root).unwrap_or(path);
        !rel.components().any(|c| {
            c.as_os_str()
                .to_str()
                .is_some_and(|name| self.config.is_excluded_dir(name) || name.starts_with('.'))
        })
    }
}
