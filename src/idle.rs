//! Idle task queue
//!
//! Work that must wait for the end of the current UI turn is expressed as an
//! [`IdleTask`] message. Backends keep them in an [`IdleQueue`] and hand them
//! back to the controller, in FIFO order, when the queue is drained once per
//! tick. Tasks are never cancelled; a task that no longer applies notices
//! that on its own when it runs.

use std::collections::VecDeque;

use thiserror::Error;

use crate::input_method::CloseSnapshot;

/// Deferred work for the input method controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdleTask {
    /// Close the keyboard captured in the snapshot, unless focus moved on
    CloseKeyboard(CloseSnapshot),
}

/// The idle queue refused a task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("idle queue is full ({capacity} tasks pending)")]
    QueueFull { capacity: usize },
}

/// FIFO queue of idle tasks with an optional capacity limit
#[derive(Debug, Default)]
pub struct IdleQueue {
    tasks: VecDeque<IdleTask>,
    capacity: Option<usize>,
}

impl IdleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of pending tasks (`None` for unbounded).
    pub fn set_capacity(&mut self, capacity: Option<usize>) {
        self.capacity = capacity;
    }

    pub fn push(&mut self, task: IdleTask) -> Result<(), ScheduleError> {
        if let Some(capacity) = self.capacity {
            if self.tasks.len() >= capacity {
                return Err(ScheduleError::QueueFull { capacity });
            }
        }
        self.tasks.push_back(task);
        Ok(())
    }

    /// Take every pending task, oldest first.
    ///
    /// Tasks pushed while the returned batch is being processed wait for the
    /// next drain.
    pub fn drain(&mut self) -> Vec<IdleTask> {
        self.tasks.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
