// ABOUTME: Watch module for monitoring a project directory tree
// ABOUTME: Tracks a revision token and triggers reloads on create, write and remove events

use log::{debug, error, info, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use notify_debouncer_full::{DebounceEventResult, DebouncedEvent, Debouncer, FileIdMap, new_debouncer};

use crate::errors::{Result, SlideError};

/// Strictly increasing marker of the latest observed content generation.
///
/// Cloning shares the underlying token; the watcher is its only writer.
#[derive(Debug, Clone)]
pub struct Revision {
    value: Arc<AtomicU64>,
}

impl Default for Revision {
    fn default() -> Self {
        Self::new()
    }
}

fn now_nanos() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map(|n| n.max(0) as u64)
        .unwrap_or(0)
}

impl Revision {
    pub fn new() -> Self {
        Self {
            value: Arc::new(AtomicU64::new(now_nanos())),
        }
    }

    pub fn get(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Token as served to preview clients.
    pub fn value(&self) -> String {
        self.get().to_string()
    }

    /// Move to the current time, or one past the previous token if the clock
    /// has not moved forward.
    pub fn advance(&self) -> u64 {
        let now = now_nanos();
        let mut next = 0;
        let _ = self
            .value
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |prev| {
                next = now.max(prev.saturating_add(1));
                Some(next)
            });
        next
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Create,
    Write,
    Remove,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub kind: ChangeKind,
    pub path: PathBuf,
}

impl ChangeEvent {
    pub fn new(kind: ChangeKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Per-directory subscription to OS change notifications.
pub trait WatchBackend {
    fn watch(&mut self, dir: &Path) -> Result<()>;
    fn unwatch(&mut self, dir: &Path) -> Result<()>;
}

pub type UpdateCallback = Box<dyn Fn() + Send>;

/// Keeps every directory of a tree subscribed and turns change batches into
/// revision bumps plus an update callback.
pub struct ChangeWatcher<B: WatchBackend> {
    root: PathBuf,
    backend: B,
    watched: BTreeSet<PathBuf>,
    revision: Revision,
    on_update: UpdateCallback,
    started: bool,
}

impl<B: WatchBackend> ChangeWatcher<B> {
    pub fn new(root: impl Into<PathBuf>, backend: B, on_update: UpdateCallback) -> Self {
        Self {
            root: root.into(),
            backend,
            watched: BTreeSet::new(),
            revision: Revision::new(),
            on_update,
            started: false,
        }
    }

    pub fn revision(&self) -> Revision {
        self.revision.clone()
    }

    pub fn is_watching(&self) -> bool {
        self.started
    }

    /// Directories currently subscribed.
    pub fn watched(&self) -> &BTreeSet<PathBuf> {
        &self.watched
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Subscribe the root and every existing subdirectory. Only a failure on
    /// the root itself is an error.
    pub fn start(&mut self) -> Result<()> {
        let root = self.root.clone();
        self.register(&root)?;
        self.register_tree(&root);
        self.started = true;
        info!("Watching for changes in {:?}", root);
        Ok(())
    }

    fn register(&mut self, dir: &Path) -> Result<()> {
        if self.watched.contains(dir) {
            return Ok(());
        }
        self.backend.watch(dir)?;
        debug!("Watching directory {:?}", dir);
        self.watched.insert(dir.to_path_buf());
        Ok(())
    }

    fn register_tree(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Failed to list {:?}: {}", dir, e);
                return;
            }
        };
        for entry in entries.flatten() {
            // Symlinked directories are not descended into.
            if !entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            let path = entry.path();
            if let Err(e) = self.register(&path) {
                warn!("Failed to watch {:?}: {}", path, e);
            }
            self.register_tree(&path);
        }
    }

    fn deregister(&mut self, path: &Path) {
        let removed: Vec<PathBuf> = self
            .watched
            .iter()
            .filter(|p| p.starts_with(path))
            .cloned()
            .collect();
        for dir in removed {
            // The OS usually drops the watch with the directory already.
            if let Err(e) = self.backend.unwatch(&dir) {
                debug!("Failed to unwatch {:?}: {}", dir, e);
            }
            self.watched.remove(&dir);
        }
    }

    /// Apply one batch of events. Returns true if the revision advanced.
    pub fn handle(&mut self, events: &[ChangeEvent]) -> bool {
        if events.is_empty() {
            return false;
        }
        for event in events {
            debug!("Change detected: {:?} {:?}", event.kind, event.path);
            match event.kind {
                ChangeKind::Create if is_real_dir(&event.path) => {
                    if let Err(e) = self.register(&event.path) {
                        warn!("Failed to watch {:?}: {}", event.path, e);
                    }
                    // Directories created inside it before the watch existed.
                    self.register_tree(&event.path);
                }
                ChangeKind::Remove => self.deregister(&event.path),
                _ => {}
            }
        }
        self.notify_update();
        true
    }

    /// A reader that sees the new token also sees what the callback rebuilt.
    fn notify_update(&self) {
        info!("Data directory updated.");
        (self.on_update)();
        self.revision.advance();
    }

    /// Consume event batches until every sender is gone.
    pub fn run(mut self, events: mpsc::Receiver<Vec<ChangeEvent>>) {
        for batch in events {
            self.handle(&batch);
        }
        debug!("Change event channel closed, watcher for {:?} exits", self.root);
    }
}

fn is_real_dir(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|meta| meta.is_dir())
        .unwrap_or(false)
}

/// Translate a debounced notify event into change events.
fn to_changes(event: &DebouncedEvent) -> Vec<ChangeEvent> {
    let kind = match event.kind {
        EventKind::Create(_) => Some(ChangeKind::Create),
        EventKind::Remove(_) => Some(ChangeKind::Remove),
        EventKind::Modify(ModifyKind::Name(_)) => None,
        EventKind::Modify(_) | EventKind::Any => Some(ChangeKind::Write),
        EventKind::Access(_) | EventKind::Other => return Vec::new(),
    };
    event
        .paths
        .iter()
        .map(|path| {
            // Renames surface as a create at the new name and a remove at the old.
            let kind = kind.unwrap_or(if path.exists() {
                ChangeKind::Create
            } else {
                ChangeKind::Remove
            });
            ChangeEvent::new(kind, path.clone())
        })
        .collect()
}

/// notify-backed subscriptions, debounced and forwarded as change batches.
pub struct NotifyBackend {
    debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
}

impl NotifyBackend {
    pub fn new(debounce: Duration, tx: mpsc::Sender<Vec<ChangeEvent>>) -> Result<Self> {
        let debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    let changes: Vec<ChangeEvent> = events.iter().flat_map(to_changes).collect();
                    if !changes.is_empty() && tx.send(changes).is_err() {
                        debug!("Change receiver dropped");
                    }
                }
                Err(errors) => {
                    for e in errors {
                        error!("Watch error: {:?}", e);
                    }
                }
            }
        })
        .map_err(|e| SlideError::WatchError(format!("Failed to create file watcher: {}", e)))?;
        Ok(Self { debouncer })
    }
}

impl WatchBackend for NotifyBackend {
    fn watch(&mut self, dir: &Path) -> Result<()> {
        self.debouncer
            .watcher()
            .watch(dir, RecursiveMode::NonRecursive)?;
        Ok(())
    }

    fn unwatch(&mut self, dir: &Path) -> Result<()> {
        self.debouncer.watcher().unwatch(dir)?;
        Ok(())
    }
}

/// Start watching `root` on a dedicated thread.
///
/// Returns once the initial subscriptions are in place, with the revision
/// the thread keeps advancing. The thread runs for the life of the process.
pub fn spawn_watcher(root: PathBuf, debounce: Duration, on_update: UpdateCallback) -> Result<Revision> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<Revision>>();

    thread::Builder::new()
        .name("revealkit-watch".to_string())
        .spawn(move || {
            let (tx, rx) = mpsc::channel();
            let backend = match NotifyBackend::new(debounce, tx) {
                Ok(backend) => backend,
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let mut watcher = ChangeWatcher::new(root, backend, on_update);
            if let Err(e) = watcher.start() {
                let _ = ready_tx.send(Err(e));
                return;
            }
            let _ = ready_tx.send(Ok(watcher.revision()));
            watcher.run(rx);
        })
        .map_err(|e| SlideError::WatchError(format!("Failed to spawn watcher thread: {}", e)))?;

    ready_rx
        .recv()
        .map_err(|_| SlideError::WatchError("Watcher thread exited during startup".to_string()))?
}
