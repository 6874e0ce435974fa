use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Keys whose backing files changed since the last poll, e.g. `@toDos`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreChange {
    pub keys: BTreeSet<String>,
}

/// Watches a data directory for writes made by other processes.
pub struct StoreWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<String>,
}

impl StoreWatcher {
    pub fn start(data_dir: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let dir: PathBuf = data_dir.to_path_buf();

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| match result {
                Ok(event) if touches_content(&event.kind) => {
                    for key in event.paths.iter().filter_map(|p| key_for_path(&dir, p)) {
                        let _ = tx.send(key);
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!("watcher error: {e}"),
            },
            Config::default(),
        )?;
        watcher.watch(data_dir, RecursiveMode::NonRecursive)?;

        Ok(StoreWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Drain everything queued so far into one change, if any.
    pub fn poll(&self) -> Option<StoreChange> {
        drain(&self.rx)
    }
}

fn drain(rx: &Receiver<String>) -> Option<StoreChange> {
    let keys: BTreeSet<String> = rx.try_iter().collect();
    if keys.is_empty() {
        None
    } else {
        Some(StoreChange { keys })
    }
}

fn touches_content(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Storage key for a `<name>.json` file directly inside `data_dir`.
/// Temp files, the lock, logs and config map to nothing.
fn key_for_path(data_dir: &Path, path: &Path) -> Option<String> {
    if path.parent()? != data_dir {
        return None;
    }
    let name = path.file_name()?.to_str()?.strip_suffix(".json")?;
    if name.is_empty() || name.starts_with('.') {
        return None;
    }
    Some(format!("@{}", name))
}
