//! Application services for task lifecycle orchestration.

mod config;
mod lifecycle;

pub use config::LifecycleConfig;
pub use lifecycle::{
    CreateTaskRequest, EditTaskRequest, SubmitSolutionRequest, TaskErrorCategory,
    TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
};
