//! Utilities to follow the state changes of a controller while its requests are in flight

use std::fmt::{Display, Error, Formatter};

use crate::task::TaskId;
use super::Operation;

/// A state change of a [`TaskListController`](super::TaskListController)
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerEvent {
    /// Nothing is in flight
    Idle,
    /// The task list is being fetched
    Refreshing,
    /// The task list has just been replaced
    Refreshed{ count: usize },
    /// A task creation request is in flight
    Submitting,
    /// A task deletion request is in flight
    Deleting{ id: TaskId },
    /// An operation failed, and the user will be shown `message`
    Failed{ operation: Operation, message: String },
}

impl Display for ControllerEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            ControllerEvent::Idle => write!(f, "Idle"),
            ControllerEvent::Refreshing => write!(f, "Refreshing tasks..."),
            ControllerEvent::Refreshed{count} => write!(f, "{} tasks loaded", count),
            ControllerEvent::Submitting => write!(f, "Adding..."),
            ControllerEvent::Deleting{id} => write!(f, "Deleting task {}...", id),
            ControllerEvent::Failed{operation, message} => write!(f, "[{}] {}", operation, message),
        }
    }
}

impl Default for ControllerEvent {
    fn default() -> Self {
        Self::Idle
    }
}



/// See [`feedback_channel`]
pub type FeedbackSender = tokio::sync::watch::Sender<ControllerEvent>;
/// See [`feedback_channel`]
pub type FeedbackReceiver = tokio::sync::watch::Receiver<ControllerEvent>;

/// Create a feeback channel, that can be used to retrieve the current state of a controller
pub fn feedback_channel() -> (FeedbackSender, FeedbackReceiver) {
    tokio::sync::watch::channel(ControllerEvent::default())
}
