//! This crate manages a personal list of dated tasks, stored on a remote server.
//!
//! It provides a client for the task server in the [`client`] module, that can be used as a stand-alone module.
//! Any other store can be used, as long as it implements [`TaskStore`](traits::TaskStore) (see e.g. [`MemoryStore`](memory_store::MemoryStore)).
//!
//! A [`TaskListController`](controller::TaskListController) holds the task list of a view. It is the only component that sends changes to the store,
//! and it re-fetches the whole list after every change. \
//! The [`calendar`] module projects this list onto days: each [`DayCell`](calendar::DayCell) shows the tasks due on its day, and lets the user edit their text inline.
//! New tasks are described with an [`AddTaskForm`](form::AddTaskForm).

pub mod traits;

mod task;
pub use task::{Task, TaskId, NewTask};
pub mod error;
pub use error::StoreError;

pub mod client;
pub mod resource;
pub mod memory_store;
pub mod mock_behaviour;

pub mod form;
pub mod controller;
pub use controller::TaskListController;
pub mod calendar;

pub mod config;
pub mod utils;

/// Helpers to read and write calendar days
pub mod date {
    pub use crate::task::{parse_day, DATE_FORMAT};
}
