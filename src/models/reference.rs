use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{LifecycleError, Result};
use crate::lifecycle::{EngineContext, TaskLifecycle};

/// Weak pointer to another task by identifier and type.
///
/// Not an ownership relation: the reference resolves on demand against the
/// engine's type registry and persistence store. Two references are equal
/// when they point at the same (type, id) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskReference {
    pub task_id: Uuid,
    pub task_type: String,
}

impl TaskReference {
    pub fn new(task_id: Uuid, task_type: impl Into<String>) -> Self {
        Self {
            task_id,
            task_type: task_type.into(),
        }
    }

    /// Resolve this reference to the live, persisted task.
    ///
    /// Fails with [`LifecycleError::UnknownTaskType`] if the type name is not
    /// registered, and with [`LifecycleError::TaskNotFound`] if no persisted
    /// record exists for the (type, id) pair. The returned handle writes
    /// through to the store, so subsequent operations produce durable effects.
    pub async fn resolve(&self, ctx: &Arc<EngineContext>) -> Result<TaskLifecycle> {
        if !ctx.types.is_registered(&self.task_type) {
            return Err(LifecycleError::UnknownTaskType {
                task_type: self.task_type.clone(),
            });
        }

        let record = ctx
            .store
            .find_by_id(&self.task_type, self.task_id)
            .await?
            .ok_or_else(|| LifecycleError::TaskNotFound {
                task_type: self.task_type.clone(),
                task_id: self.task_id,
            })?;

        Ok(TaskLifecycle::attach(Arc::clone(ctx), record))
    }
}
