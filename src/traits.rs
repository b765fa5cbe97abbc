use async_trait::async_trait;

use crate::error::StoreError;
use crate::task::{NewTask, Task, TaskId};

/// A place where tasks are persisted (usually a remote server, see [`Client`](crate::client::Client))
///
/// Implementors own no UI state and do not cache anything: every call reaches the actual store.
#[async_trait]
pub trait TaskStore {
    /// Returns every task of the current user, in the order the store returns them
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError>;

    /// Asks the store to persist a new task. The store is responsible for assigning it an ID
    async fn create_task(&self, new_task: &NewTask) -> Result<(), StoreError>;

    /// Asks the store to remove a task
    async fn delete_task(&self, id: &TaskId) -> Result<(), StoreError>;
}
