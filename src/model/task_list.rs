use chrono::{DateTime, Utc};

use super::task::{Priority, Task};

/// The ordered task collection. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

/// Checklist partition: open tasks first, then the completed section.
#[derive(Debug)]
pub struct ChecklistView<'a> {
    pub pending: Vec<&'a Task>,
    pub completed: Vec<&'a Task>,
}

impl ChecklistView<'_> {
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty() && self.completed.is_empty()
    }
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Allocate an id from the creation time, stepping past any id already taken.
    pub fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.tasks.iter().map(|t| t.id).max() {
            Some(max) if max >= candidate => max + 1,
            _ => candidate,
        }
    }

    /// Append a new task. Returns `None` when the trimmed text is empty.
    pub fn add(
        &mut self,
        text: &str,
        deadline: &str,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Option<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let task = Task::new(self.next_id(now), text, deadline.trim(), priority, now);
        self.tasks.push(task);
        self.tasks.last()
    }

    /// Mark every task with `id` completed. Returns false when none matched.
    pub fn complete(&mut self, id: i64) -> bool {
        self.update(id, |task| task.completed = true)
    }

    /// Drop every task with `id`. Returns false when none matched.
    pub fn remove(&mut self, id: i64) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn set_priority(&mut self, id: i64, priority: Priority) -> bool {
        self.update(id, |task| task.priority = priority)
    }

    fn update(&mut self, id: i64, mut apply: impl FnMut(&mut Task)) -> bool {
        let mut matched = false;
        for task in self.tasks.iter_mut().filter(|t| t.id == id) {
            apply(task);
            matched = true;
        }
        matched
    }

    pub fn checklist(&self) -> ChecklistView<'_> {
        let (completed, pending): (Vec<&Task>, Vec<&Task>) =
            self.tasks.iter().partition(|t| t.completed);
        ChecklistView { pending, completed }
    }

    /// The head of the triage queue: first open task without a quadrant.
    pub fn current_unprioritized(&self) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| !t.completed && !t.priority.is_set())
    }

    /// Number of tasks still waiting for triage.
    pub fn unprioritized_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| !t.completed && !t.priority.is_set())
            .count()
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }
}
