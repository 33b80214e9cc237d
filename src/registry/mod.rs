//! Component registration: signal handlers and task-type names.

pub mod signal_registry;
pub mod type_registry;

pub use signal_registry::{SignalRegistry, TaskSignal};
pub use type_registry::TaskTypeRegistry;
