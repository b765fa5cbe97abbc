//! This module holds the in-memory task list of a view, and keeps it in sync with a [`TaskStore`]
//!
//! The [`TaskListController`] is the only component that mutates a store. It never patches its collection:
//! after every successful mutation, the whole list is fetched again.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;

use crate::error::{ErrorKind, StoreError};
use crate::form::AddTaskForm;
use crate::task::{Task, TaskId};
use crate::traits::TaskStore;

pub mod feedback;
use feedback::{ControllerEvent, FeedbackSender};


/// The operations a controller performs against its store
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Refresh,
    Create,
    Delete,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Refresh => write!(f, "refresh"),
            Self::Create => write!(f, "create"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// The error currently shown to the user, tagged with the operation that caused it
#[derive(Clone, Debug, PartialEq)]
pub struct OperationError {
    pub operation: Operation,
    pub kind: ErrorKind,
    pub message: String,
}

/// What a task row should look like, apart from its content
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskUiState {
    Idle,
    /// A deletion request for this task is in flight
    Deleting,
}


/// The authority over the tasks displayed in a view.
///
/// Every operation takes `&mut self`, so that operations on a given controller never overlap.
/// There is no timeout: a request that never settles keeps `is_submitting()` (or `deleting_id()`) set until it does.
pub struct TaskListController<S: TaskStore> {
    store: S,

    /// In the order the store returned them
    tasks: Vec<Task>,
    submitting: bool,
    deleting_id: Option<TaskId>,
    /// There is a single slot: a new error replaces the previous one
    error: Option<OperationError>,

    feedback_channel: Option<FeedbackSender>,
}

impl<S: TaskStore> TaskListController<S> {
    /// Create a controller with an empty task list. Call [`Self::refresh`] to populate it.
    pub fn new(store: S) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            submitting: false,
            deleting_id: None,
            error: None,
            feedback_channel: None,
        }
    }

    /// Create a controller that reports its state changes to a feedback channel (see [`feedback::feedback_channel`])
    pub fn with_feedback(store: S, feedback_sender: FeedbackSender) -> Self {
        let mut controller = Self::new(store);
        controller.feedback_channel = Some(feedback_sender);
        controller
    }

    pub fn store(&self) -> &S { &self.store }
    pub fn tasks(&self) -> &[Task] { &self.tasks }
    pub fn is_submitting(&self) -> bool { self.submitting }
    pub fn deleting_id(&self) -> Option<&TaskId> { self.deleting_id.as_ref() }
    pub fn last_error(&self) -> Option<&OperationError> { self.error.as_ref() }

    /// The message the user should currently see, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|err| err.message.as_str())
    }

    /// Dismiss the current error message
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn task_state(&self, id: &TaskId) -> TaskUiState {
        match &self.deleting_id {
            Some(deleting) if deleting == id => TaskUiState::Deleting,
            _ => TaskUiState::Idle,
        }
    }

    /// The tasks due on a given day, in collection order
    pub fn tasks_on(&self, day: NaiveDate) -> Vec<&Task> {
        self.tasks.iter()
            .filter(|task| task.is_due_on(day))
            .collect()
    }

    /// Replace the task list with the content of the store.
    ///
    /// In case of failure, the current list is kept as-is and an error message is set.
    /// Returns whether the refresh succeeded.
    pub async fn refresh(&mut self) -> bool {
        self.feedback(ControllerEvent::Refreshing);

        match self.store.list_tasks().await {
            Ok(tasks) => {
                log::debug!("Task list refreshed ({} tasks)", tasks.len());
                self.tasks = tasks;
                self.feedback(ControllerEvent::Refreshed{ count: self.tasks.len() });
                true
            },
            Err(err) => {
                self.fail(Operation::Refresh, err);
                false
            },
        }
    }

    /// Validate the form, and create the task it describes.
    ///
    /// Invalid input never reaches the store: the form keeps its per-field messages instead.
    /// On success, the form is reset and the task list refreshed. On failure, the form input is kept so that the user can retry.
    /// Returns whether a task has been created.
    pub async fn add_task(&mut self, form: &mut AddTaskForm) -> bool {
        let today = chrono::Local::now().date_naive();
        self.add_task_on(form, today).await
    }

    /// Same as [`Self::add_task`], with an explicit current day (the earliest date the form accepts)
    pub async fn add_task_on(&mut self, form: &mut AddTaskForm, today: NaiveDate) -> bool {
        let new_task = match form.validate(today) {
            Err(errors) => {
                log::debug!("Not submitting an invalid task: {:?}", errors);
                return false;
            },
            Ok(new_task) => new_task,
        };

        self.error = None;
        self.submitting = true;
        self.feedback(ControllerEvent::Submitting);
        log::info!("Creating task {:?} due on {}", new_task.text, new_task.date);

        let result = self.store.create_task(&new_task).await;
        self.submitting = false;

        match result {
            Err(err) => {
                self.fail(Operation::Create, err);
                false
            },
            Ok(()) => {
                form.reset();
                self.feedback(ControllerEvent::Idle);
                self.refresh().await;
                true
            },
        }
    }

    /// Delete a task, then refresh the task list.
    ///
    /// `deleting_id()` is set while the request is in flight, and always cleared once it settles.
    /// Only one deletion is tracked at a time. Returns whether the task has been deleted.
    pub async fn remove_task(&mut self, id: &TaskId) -> bool {
        self.deleting_id = Some(id.clone());
        self.feedback(ControllerEvent::Deleting{ id: id.clone() });
        log::info!("Deleting task {}", id);

        let result = self.store.delete_task(id).await;
        self.deleting_id = None;

        match result {
            Err(err) => {
                self.fail(Operation::Delete, err);
                false
            },
            Ok(()) => {
                self.feedback(ControllerEvent::Idle);
                self.refresh().await;
                true
            },
        }
    }

    fn fail(&mut self, operation: Operation, err: StoreError) {
        log::warn!("Unable to {} tasks: {} ({})", operation, err, err.kind());
        let message = err.to_string();
        self.feedback(ControllerEvent::Failed{ operation, message: message.clone() });
        self.error = Some(OperationError {
            operation,
            kind: err.kind(),
            message,
        });
    }

    /// Send an event as a feedback to the listener (if any).
    fn feedback(&self, event: ControllerEvent) {
        if let Some(sender) = &self.feedback_channel {
            // Nobody listening is not an error
            let _ = sender.send(event);
        }
    }
}
