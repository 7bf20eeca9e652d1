use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Result of trying to add a property to the compare set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The set is at its cap and the id is new; the caller is expected to
    /// offer a replace-selection flow instead
    LimitReached,
}

/// Bounded ordered set of property ids selected for comparison.
///
/// Every operation is total: invalid ids are no-ops and nothing panics.
/// Mutations notify subscribers with a snapshot of the current selection
/// and, when a persistence path is configured, rewrite the JSON id list so
/// the selection survives a restart.
pub struct CompareStore {
    cap: usize,
    ids: Vec<String>,
    changes: watch::Sender<Vec<String>>,
    persist_path: Option<PathBuf>,
}

impl CompareStore {
    pub fn new(cap: usize) -> Self {
        let (changes, _) = watch::channel(Vec::new());
        Self {
            cap,
            ids: Vec::new(),
            changes,
            persist_path: None,
        }
    }

    /// Create a store whose selection is mirrored to `path`, restoring
    /// whatever a previous session left there. A missing or corrupt file
    /// starts the store empty.
    pub fn with_persistence(cap: usize, path: PathBuf) -> Self {
        let mut store = Self::new(cap);
        store.ids = load_persisted(&path, cap);
        if !store.ids.is_empty() {
            debug!("Restored compare set: {:?}", store.ids);
            store.changes.send_replace(store.ids.clone());
        }
        store.persist_path = Some(path);
        store
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    /// Append `id` unless the set is full. Adding an already-selected id is
    /// an idempotent success.
    pub fn add(&mut self, id: &str) -> AddOutcome {
        if self.is_selected(id) {
            return AddOutcome::Added;
        }
        if self.ids.len() >= self.cap {
            return AddOutcome::LimitReached;
        }
        self.ids.push(id.to_string());
        self.after_mutation();
        AddOutcome::Added
    }

    pub fn remove(&mut self, id: &str) {
        let before = self.ids.len();
        self.ids.retain(|existing| existing != id);
        if self.ids.len() != before {
            self.after_mutation();
        }
    }

    pub fn clear(&mut self) {
        if !self.ids.is_empty() {
            self.ids.clear();
            self.after_mutation();
        }
    }

    /// Substitute `old` with `new` in place, preserving display position.
    /// When `new` is already selected the swap degenerates to removing
    /// `old`, keeping the set duplicate-free.
    pub fn replace(&mut self, old: &str, new: &str) {
        if old == new || !self.is_selected(old) {
            return;
        }
        if self.is_selected(new) {
            self.remove(old);
            return;
        }
        if let Some(slot) = self.ids.iter_mut().find(|existing| *existing == old) {
            *slot = new.to_string();
            self.after_mutation();
        }
    }

    /// Subscribe to selection changes; the receiver always holds the latest
    /// snapshot
    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.changes.subscribe()
    }

    fn after_mutation(&self) {
        self.changes.send_replace(self.ids.clone());

        if let Some(path) = &self.persist_path {
            match serde_json::to_string_pretty(&self.ids) {
                Ok(json) => {
                    if let Err(e) = fs::write(path, json) {
                        warn!("Failed to persist compare set to {:?}: {}", path, e);
                    }
                }
                Err(e) => warn!("Failed to serialize compare set: {}", e),
            }
        }
    }
}

fn load_persisted(path: &Path, cap: usize) -> Vec<String> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(_) => return Vec::new(),
    };

    match serde_json::from_str::<Vec<String>>(&json) {
        Ok(mut ids) => {
            let mut seen = std::collections::HashSet::new();
            ids.retain(|id| seen.insert(id.clone()));
            ids.truncate(cap);
            ids
        }
        Err(e) => {
            warn!("Ignoring corrupt compare set at {:?}: {}", path, e);
            Vec::new()
        }
    }
}
