use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// In-memory map of scheduler task ids to node output directories.
///
/// Entries are inserted exactly once (on successful submission) and
/// removed exactly once (at the first poll that observes a terminal
/// state). The map is the single source of truth for "still pending";
/// nothing is persisted, so a driver restart forgets all tracking.
/// Access is serialized internally so interleaved submit and poll
/// iterations from the driver cannot race.
#[derive(Debug, Default)]
pub struct PendingTasks {
    inner: Mutex<HashMap<String, PathBuf>>,
}

impl PendingTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, task_id: impl Into<String>, output_dir: impl Into<PathBuf>) {
        self.inner
            .lock()
            .expect("pending-task registry poisoned")
            .insert(task_id.into(), output_dir.into());
    }

    pub fn remove(&self, task_id: &str) -> Option<PathBuf> {
        self.inner
            .lock()
            .expect("pending-task registry poisoned")
            .remove(task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.inner
            .lock()
            .expect("pending-task registry poisoned")
            .contains_key(task_id)
    }

    /// Copies out the current entries so callers can poll without
    /// holding the lock across scheduler round-trips.
    pub fn snapshot(&self) -> Vec<(String, PathBuf)> {
        self.inner
            .lock()
            .expect("pending-task registry poisoned")
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("pending-task registry poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
