use chrono::NaiveDate;
use log::debug;

use super::task::{Task, TaskDraft};
use crate::error::ValidationError;

/// A change requested by the chart or the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    TaskDragged { index: usize, start: NaiveDate },
    TaskEdited { index: usize, draft: TaskDraft },
}

/// What happened when an edit was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    /// A field was blank or the index no longer exists; nothing changed.
    Abandoned,
}

/// Ordered task list. Row index in the chart is the list index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Validate and append a task. The store is untouched on error.
    pub fn add(
        &mut self,
        name: &str,
        start_text: &str,
        duration_text: &str,
        color: &str,
    ) -> Result<&Task, ValidationError> {
        let task = Task::parse(name, start_text, duration_text, color)?;
        debug!("adding task '{}' at row {}", task.name, self.tasks.len());
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Swap in a freshly loaded list.
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// The records in list order, for saving.
    pub fn export(&self) -> &[Task] {
        &self.tasks
    }

    /// Replace the task at `index` with the parsed draft.
    ///
    /// A draft with any blank field, or an index past the end, is dropped
    /// silently. A draft that fails validation leaves the task unchanged.
    pub fn edit(&mut self, index: usize, draft: &TaskDraft) -> Result<EditOutcome, ValidationError> {
        if !draft.is_complete() || index >= self.tasks.len() {
            return Ok(EditOutcome::Abandoned);
        }
        let task = draft.to_task()?;
        debug!("editing row {}: '{}'", index, task.name);
        self.tasks[index] = task;
        Ok(EditOutcome::Applied)
    }

    /// Move a task without touching its other fields. Returns false for a stale index.
    pub fn set_start(&mut self, index: usize, start: NaiveDate) -> bool {
        match self.tasks.get_mut(index) {
            Some(task) => {
                task.start = start;
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, event: StoreEvent) -> Result<EditOutcome, ValidationError> {
        match event {
            StoreEvent::TaskDragged { index, start } => Ok(if self.set_start(index, start) {
                EditOutcome::Applied
            } else {
                EditOutcome::Abandoned
            }),
            StoreEvent::TaskEdited { index, draft } => self.edit(index, &draft),
        }
    }
}
