//! Orchestration services for tasks and comments.

mod comments;
mod tasks;

pub use comments::{
    CommentDeletionReceipt, CommentService, CommentServiceError, CommentServiceResult,
};
pub use tasks::{TaskDeletionReceipt, TaskService, TaskServiceError, TaskServiceResult};
