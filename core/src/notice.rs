//! Dismissable failure notifications.
//!
//! Every failed mutation leaves one `Notice` naming the operation and the
//! reason. The reason is the server's `detail` verbatim when it sent one.

use std::fmt;

use tracing::warn;

use crate::error::ApiError;

/// The user action a notice refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateTodo,
    ToggleTodo,
    EditTodo,
    DeleteTodo,
    CreateUser,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::CreateTodo => "create todo",
            Operation::ToggleTodo => "toggle todo",
            Operation::EditTodo => "edit todo",
            Operation::DeleteTodo => "delete todo",
            Operation::CreateUser => "create user",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: Operation,
    pub message: String,
}

impl Notice {
    pub fn from_error(operation: Operation, err: &ApiError) -> Self {
        Self {
            operation,
            message: err.message(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.operation, self.message)
    }
}

/// Pending notices, oldest first.
#[derive(Debug, Default)]
pub struct Notices {
    pending: Vec<Notice>,
}

impl Notices {
    pub fn push(&mut self, notice: Notice) {
        self.pending.push(notice);
    }

    /// Log a failed mutation and queue its notice.
    pub fn record(&mut self, operation: Operation, err: &ApiError) {
        warn!(%operation, error = %err, "mutation failed");
        self.push(Notice::from_error(operation, err));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn latest(&self) -> Option<&Notice> {
        self.pending.last()
    }

    /// Remove the notice at `index`; out-of-range indexes return `None`.
    pub fn dismiss(&mut self, index: usize) -> Option<Notice> {
        (index < self.pending.len()).then(|| self.pending.remove(index))
    }

    pub fn dismiss_all(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.pending)
    }
}
