use std::collections::HashSet;

use tracing::{debug, warn};

use super::storage::{KeyValueStore, StorageError};
use crate::model::Task;

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "efficiency_tasks";

/// Values a bridge may hand back instead of real data.
const EMPTY_MARKERS: &[&str] = &["null", "undefined", "[object Promise]"];

/// Read the task collection. Any missing, placeholder or unparseable value
/// yields an empty collection.
pub fn load_tasks(store: &dyn KeyValueStore) -> Vec<Task> {
    let raw = match store.get_item(TASKS_KEY) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(error = %e, "failed to read tasks, starting empty");
            return Vec::new();
        }
    };
    match parse_tasks(raw.as_deref()) {
        Ok(tasks) => {
            let tasks = repair(tasks);
            debug!(count = tasks.len(), "tasks loaded");
            tasks
        }
        Err(e) => {
            warn!(error = %e, "stored tasks are malformed, starting empty");
            Vec::new()
        }
    }
}

fn parse_tasks(raw: Option<&str>) -> Result<Vec<Task>, StorageError> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(Vec::new());
    };
    if raw.is_empty() || EMPTY_MARKERS.contains(&raw) {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}

/// Drop records with blank text and give colliding ids a fresh value past the
/// current maximum. The first record keeps a shared id.
fn repair(tasks: Vec<Task>) -> Vec<Task> {
    let mut next = tasks.iter().map(|t| t.id).max().unwrap_or(0).saturating_add(1);
    let mut seen = HashSet::with_capacity(tasks.len());
    let mut repaired = Vec::with_capacity(tasks.len());
    for mut task in tasks {
        if task.text.trim().is_empty() {
            warn!(id = task.id, "dropping stored task with empty text");
            continue;
        }
        if !seen.insert(task.id) {
            warn!(old = task.id, new = next, "reassigning duplicate task id");
            task.id = next;
            seen.insert(next);
            next = next.saturating_add(1);
        }
        repaired.push(task);
    }
    repaired
}

/// Write the whole collection under [`TASKS_KEY`].
pub fn save_tasks(store: &mut dyn KeyValueStore, tasks: &[Task]) -> Result<(), StorageError> {
    let data = serde_json::to_string(tasks)?;
    store.set_item(TASKS_KEY, &data)?;
    debug!(count = tasks.len(), "tasks saved");
    Ok(())
}
