//! This module provides a task store that lives in memory
//!
//! It behaves like the remote server (it assigns IDs, refuses empty tasks, returns tasks in insertion order),
//! which makes it suitable to drive a [`TaskListController`](crate::controller::TaskListController) in tests and dry runs.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tokio::sync::Notify;
use uuid::Uuid;

use crate::error::StoreError;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskStore;


/// An in-memory [`TaskStore`].
///
/// Cloning a `MemoryStore` returns a handle to the same data, so that a test can keep inspecting (or tweaking) a store that has been moved into a controller.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<StoreData>>,
}

#[derive(Debug, Default)]
struct StoreData {
    tasks: Vec<Task>,
    mock_behaviour: MockBehaviour,
    gate: Option<Arc<Notify>>,
    request_count: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already contains some tasks
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let store = Self::new();
        store.lock().tasks = tasks;
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreData> {
        // A panicking test thread must not hide the data from the others
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// A copy of the tasks currently stored
    pub fn tasks(&self) -> Vec<Task> {
        self.lock().tasks.clone()
    }

    /// Insert a task directly, as if another client had created it
    pub fn insert(&self, task: Task) {
        self.lock().tasks.push(task);
    }

    /// How many calls to the `TaskStore` methods this store has received (including failed ones)
    pub fn request_count(&self) -> usize {
        self.lock().request_count
    }

    /// Replace the current mock behaviour
    pub fn set_mock_behaviour(&self, behaviour: MockBehaviour) {
        self.lock().mock_behaviour = behaviour;
    }

    /// When a gate is set, every call waits for a notification on it before doing anything.
    ///
    /// This lets a test observe what happens while a request is in flight.
    pub fn set_gate(&self, gate: Option<Arc<Notify>>) {
        self.lock().gate = gate;
    }

    async fn enter(&self) {
        let gate = {
            let mut data = self.lock();
            data.request_count += 1;
            data.gate.clone()
        };
        if let Some(gate) = gate {
            log::trace!("Memory store: waiting for the gate to open");
            gate.notified().await;
        }
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        self.enter().await;
        let mut data = self.lock();
        data.mock_behaviour.can_list_tasks()?;
        Ok(data.tasks.clone())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), StoreError> {
        self.enter().await;
        let mut data = self.lock();
        data.mock_behaviour.can_create_task()?;

        if new_task.text.trim().is_empty() {
            return Err(StoreError::Validation { status: 400, message: "Missing required fields".to_string() });
        }

        let id = TaskId::from(Uuid::new_v4().to_string());
        log::debug!("Memory store: creating task {}", id);
        data.tasks.push(new_task.clone().into_task(id));
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError> {
        self.enter().await;
        let mut data = self.lock();
        data.mock_behaviour.can_delete_task()?;

        let count_before = data.tasks.len();
        data.tasks.retain(|task| task.id() != id);
        if data.tasks.len() == count_before {
            return Err(StoreError::Validation { status: 404, message: "Task not found".to_string() });
        }
        log::debug!("Memory store: deleted task {}", id);
        Ok(())
    }
}
