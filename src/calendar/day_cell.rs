//! A calendar cell, showing the tasks due on a single day

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::controller::TaskListController;
use crate::form::AddTaskForm;
use crate::task::{Task, TaskId};
use crate::traits::TaskStore;

/// Whether a task of a cell is being edited
#[derive(Clone, Debug, PartialEq)]
pub enum EditState {
    Viewing,
    /// The text input is shown, pre-filled with the text, and focused
    Editing{ draft: String },
}

/// A key that has been pressed on a task of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}


/// A task, as displayed in a [`DayCell`]
#[derive(Clone, Debug, PartialEq)]
pub struct CellEntry {
    id: TaskId,
    text: String,
    position: i64,
    state: EditState,
}

impl CellEntry {
    pub fn id(&self) -> &TaskId { &self.id }
    pub fn text(&self) -> &str { &self.text }
    pub fn position(&self) -> i64 { self.position }
    pub fn state(&self) -> &EditState { &self.state }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, EditState::Editing{ .. })
    }

    /// The current content of the text input, when editing
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Editing{ draft } => Some(draft),
            EditState::Viewing => None,
        }
    }
}


/// The tasks due on one day, plus a form to add more of them.
///
/// A cell never talks to the store by itself. Its content comes from [`DayCell::sync`], which takes the task list of a [`TaskListController`] and keeps only the tasks due on the cell's day.
///
/// Editing a task text is local to the cell: it is not sent to the store (there is no way to update a stored task).
/// Committed edits are kept in an overlay that survives re-syncs, until the task leaves this day.
#[derive(Clone, Debug)]
pub struct DayCell {
    date: NaiveDate,
    is_today: bool,
    entries: Vec<CellEntry>,
    local_edits: HashMap<TaskId, String>,
    form: AddTaskForm,
}

impl DayCell {
    pub fn new(date: NaiveDate, today: NaiveDate) -> Self {
        Self {
            date,
            is_today: date == today,
            entries: Vec::new(),
            local_edits: HashMap::new(),
            form: AddTaskForm::for_date(date),
        }
    }

    pub fn date(&self) -> NaiveDate { self.date }
    pub fn is_today(&self) -> bool { self.is_today }
    pub fn entries(&self) -> &[CellEntry] { &self.entries }
    pub fn form(&self) -> &AddTaskForm { &self.form }
    pub fn form_mut(&mut self) -> &mut AddTaskForm { &mut self.form }

    /// Edits that have been committed in this cell, but exist nowhere else
    pub fn local_edits(&self) -> &HashMap<TaskId, String> { &self.local_edits }

    /// The day of the month, e.g. `"19"`
    pub fn day_number(&self) -> String {
        self.date.day().to_string()
    }

    /// The name of the day, e.g. `"Monday"`
    pub fn day_name(&self) -> String {
        self.date.format("%A").to_string()
    }

    pub fn entry(&self, id: &TaskId) -> Option<&CellEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// The task whose text input holds the focus, if any
    pub fn focused(&self) -> Option<&TaskId> {
        self.entries.iter()
            .find(|entry| entry.is_editing())
            .map(|entry| &entry.id)
    }

    /// Replace the content of this cell with the tasks that are due on its day.
    ///
    /// Tasks are sorted by position (ties keep the collection order). A task that was being edited stays in edit mode, with its draft.
    pub fn sync(&mut self, tasks: &[Task]) {
        let mut previous_states: HashMap<TaskId, EditState> = self.entries.drain(..)
            .map(|entry| (entry.id, entry.state))
            .collect();

        let mut entries: Vec<CellEntry> = tasks.iter()
            .filter(|task| task.is_due_on(self.date))
            .map(|task| {
                let text = match self.local_edits.get(task.id()) {
                    Some(edited) => edited.clone(),
                    None => task.text().to_string(),
                };
                CellEntry {
                    id: task.id().clone(),
                    text,
                    position: task.position(),
                    state: previous_states.remove(task.id()).unwrap_or(EditState::Viewing),
                }
            })
            .collect();
        entries.sort_by_key(|entry| entry.position);

        self.local_edits.retain(|id, _| entries.iter().any(|entry| &entry.id == id));
        self.form.position = entries.iter()
            .map(|entry| entry.position.saturating_add(1))
            .max()
            .unwrap_or(crate::config::DEFAULT_POSITION);

        log::trace!("Day cell {} now shows {} tasks", self.date, entries.len());
        self.entries = entries;
    }

    /// Switch a task to edit mode (e.g. after a click on its text).
    ///
    /// A task that was being edited in this cell loses the focus, hence is committed first.
    /// Returns whether the task entered edit mode.
    pub fn activate(&mut self, id: &TaskId) -> bool {
        match self.entry(id) {
            None => return false,
            Some(entry) if entry.is_editing() => return false,
            Some(_) => {},
        }

        if let Some(focused) = self.focused().cloned() {
            self.commit(&focused);
        }

        match self.entries.iter_mut().find(|entry| &entry.id == id) {
            None => false,
            Some(entry) => {
                entry.state = EditState::Editing{ draft: entry.text.clone() };
                true
            },
        }
    }

    /// Update the content of the text input of a task being edited
    pub fn edit_draft<S: ToString>(&mut self, id: &TaskId, text: S) -> bool {
        match self.entries.iter_mut().find(|entry| &entry.id == id) {
            Some(CellEntry{ state: EditState::Editing{ draft }, .. }) => {
                *draft = text.to_string();
                true
            },
            _ => false,
        }
    }

    /// Leave edit mode, keeping the draft as the new text of the task.
    ///
    /// A blank draft is discarded, since a task text is never empty.
    /// Returns whether the task was being edited.
    pub fn commit(&mut self, id: &TaskId) -> bool {
        let entry = match self.entries.iter_mut().find(|entry| &entry.id == id) {
            Some(entry) => entry,
            None => return false,
        };

        let draft = match std::mem::replace(&mut entry.state, EditState::Viewing) {
            EditState::Viewing => return false,
            EditState::Editing{ draft } => draft,
        };

        if draft.trim().is_empty() {
            log::debug!("Ignoring an empty edit of task {}", id);
        } else if draft != entry.text {
            log::debug!("Task {} has been edited locally", id);
            entry.text = draft.clone();
            self.local_edits.insert(id.clone(), draft);
        }
        true
    }

    /// The text input of a task lost the focus
    pub fn blur(&mut self, id: &TaskId) -> bool {
        self.commit(id)
    }

    /// A key has been pressed on a task (either on its text, or on its input when editing).
    ///
    /// `Enter` or `Space` start editing, and `Enter` confirms an edit. Returns whether anything changed.
    pub fn key(&mut self, id: &TaskId, key: Key) -> bool {
        let editing = match self.entry(id) {
            None => return false,
            Some(entry) => entry.is_editing(),
        };

        match (editing, key) {
            (false, Key::Enter) | (false, Key::Space) => self.activate(id),
            (true, Key::Enter) => self.commit(id),
            _ => false,
        }
    }

    /// Submit the embedded form through the controller, then show the refreshed task list
    pub async fn submit<S: TaskStore>(&mut self, controller: &mut TaskListController<S>) -> bool {
        let today = chrono::Local::now().date_naive();
        self.submit_on(controller, today).await
    }

    /// Same as [`Self::submit`], with an explicit current day
    pub async fn submit_on<S: TaskStore>(&mut self, controller: &mut TaskListController<S>, today: NaiveDate) -> bool {
        let created = controller.add_task_on(&mut self.form, today).await;
        if created {
            self.sync(controller.tasks());
        }
        created
    }
}


#[cfg(test)]
mod test {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    fn tasks() -> Vec<Task> {
        vec![
            Task::new(TaskId::from("a"), "Later".into(), day(19), 5),
            Task::new(TaskId::from("b"), "Other day".into(), day(20), 1),
            Task::new(TaskId::from("c"), "First".into(), day(19), 1),
        ]
    }

    fn synced_cell() -> DayCell {
        let mut cell = DayCell::new(day(19), day(19));
        cell.sync(&tasks());
        cell
    }

    #[test]
    fn test_labels() {
        let cell = DayCell::new(day(19), day(20));
        assert_eq!(cell.day_number(), "19");
        assert_eq!(cell.day_name(), "Monday");
        assert!(cell.is_today() == false);
        assert!(DayCell::new(day(20), day(20)).is_today());
        assert_eq!(cell.form().date, "2026-10-19");
    }

    #[test]
    fn test_sync_filters_and_sorts() {
        let cell = synced_cell();
        let ids: Vec<&str> = cell.entries().iter().map(|e| e.id().as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(cell.form().position, 6);

        let mut empty = DayCell::new(day(21), day(19));
        empty.sync(&tasks());
        assert!(empty.entries().is_empty());
        assert_eq!(empty.form().position, crate::config::DEFAULT_POSITION);
    }

    #[test]
    fn test_form_position_after_the_largest_position() {
        let task: Task = serde_json::from_str(r#"{"_id": "x", "text": "t", "date": "2026-10-20", "position": 9223372036854775807}"#).unwrap();
        let mut cell = DayCell::new(day(20), day(20));
        cell.sync(&[task]);
        assert_eq!(cell.entries().len(), 1);
        assert_eq!(cell.form().position, i64::MAX);
    }

    #[test]
    fn test_edit_round_trip_keeps_text() {
        let mut cell = synced_cell();
        let id = TaskId::from("a");

        assert!(cell.activate(&id));
        assert_eq!(cell.entry(&id).unwrap().draft(), Some("Later"));
        assert_eq!(cell.focused(), Some(&id));
        assert!(cell.blur(&id));

        let entry = cell.entry(&id).unwrap();
        assert_eq!(entry.text(), "Later");
        assert_eq!(entry.state(), &EditState::Viewing);
        assert!(cell.local_edits().is_empty());
    }

    #[test]
    fn test_edit_and_confirm() {
        let mut cell = synced_cell();
        let id = TaskId::from("c");

        assert!(cell.key(&id, Key::Space));
        assert!(cell.edit_draft(&id, "First, really"));
        assert!(cell.key(&id, Key::Other) == false);
        assert!(cell.key(&id, Key::Enter));

        assert_eq!(cell.entry(&id).unwrap().text(), "First, really");
        assert_eq!(cell.local_edits().get(&id).map(|s| s.as_str()), Some("First, really"));
        assert_eq!(cell.focused(), None);

        // The local edit survives a re-sync
        cell.sync(&tasks());
        assert_eq!(cell.entry(&id).unwrap().text(), "First, really");

        // ...but not the removal of the task
        let remaining: Vec<Task> = tasks().into_iter().filter(|t| t.id() != &id).collect();
        cell.sync(&remaining);
        assert!(cell.entry(&id).is_none());
        assert!(cell.local_edits().is_empty());
    }

    #[test]
    fn test_blank_edit_is_discarded() {
        let mut cell = synced_cell();
        let id = TaskId::from("a");
        cell.activate(&id);
        cell.edit_draft(&id, "   ");
        cell.commit(&id);
        assert_eq!(cell.entry(&id).unwrap().text(), "Later");
    }

    #[test]
    fn test_single_focus() {
        let mut cell = synced_cell();
        let a = TaskId::from("a");
        let c = TaskId::from("c");

        cell.activate(&a);
        cell.edit_draft(&a, "Later today");
        assert!(cell.activate(&c));

        assert_eq!(cell.focused(), Some(&c));
        assert_eq!(cell.entry(&a).unwrap().text(), "Later today");
        assert!(cell.entry(&a).unwrap().is_editing() == false);

        // Activating twice does nothing
        assert!(cell.activate(&c) == false);
        // Unknown tasks are ignored
        assert!(cell.activate(&TaskId::from("b")) == false);
        assert!(cell.edit_draft(&a, "not editing") == false);
        assert!(cell.commit(&a) == false);
    }

    #[test]
    fn test_editing_survives_sync() {
        let mut cell = synced_cell();
        let id = TaskId::from("a");
        cell.activate(&id);
        cell.edit_draft(&id, "half-typed");

        cell.sync(&tasks());
        assert_eq!(cell.entry(&id).unwrap().draft(), Some("half-typed"));
    }
}
