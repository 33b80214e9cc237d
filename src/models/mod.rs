//! Data model for the lifecycle engine: statuses, log records, references,
//! execution plans, and the persisted task record itself.

pub mod log_record;
pub mod plan;
pub mod reference;
pub mod status;
pub mod task;

pub use log_record::TaskLogRecord;
pub use plan::{ExecutionMode, ExecutionPlan, PlanNode};
pub use reference::TaskReference;
pub use status::TaskStatus;
pub use task::TaskRecord;
