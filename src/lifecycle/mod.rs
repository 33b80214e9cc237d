//! Task lifecycle engine: the engine context, the per-task state machine
//! handle, and the execution-plan runner.

pub mod context;
pub mod runner;
pub mod task_lifecycle;

pub use context::EngineContext;
pub use runner::run_plan;
pub use task_lifecycle::{TaskLifecycle, TaskUpdate};
