use std::fmt;

use serde::{Deserialize, Serialize};

/// Task lifecycle states.
///
/// The intended workflow is linear: `draft -> init -> processing -> {done | error}`,
/// with `paused` reachable from `processing` and returning to it. No transition
/// table is enforced; callers own the workflow. `None` is a sentinel for
/// entities that are not status-driven and is never assigned by the lifecycle
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Sentinel for "not a status-driven entity"; wire value `null`.
    #[serde(rename = "null")]
    None,
    /// Initial state when a task is created
    #[default]
    Draft,
    /// Task has been initialized and is ready to run
    Init,
    /// Task is currently being executed
    Processing,
    /// Task execution is suspended and may resume
    Paused,
    /// Task completed successfully
    Done,
    /// Task failed with an error
    Error,
}

impl TaskStatus {
    /// Check if this is a terminal state (the workflow has finished)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    /// Check if this is an active state (task is being processed)
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Processing)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "null"),
            Self::Draft => write!(f, "draft"),
            Self::Init => write!(f, "init"),
            Self::Processing => write!(f, "processing"),
            Self::Paused => write!(f, "paused"),
            Self::Done => write!(f, "done"),
            Self::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::None),
            "draft" => Ok(Self::Draft),
            "init" => Ok(Self::Init),
            "processing" => Ok(Self::Processing),
            "paused" => Ok(Self::Paused),
            "done" => Ok(Self::Done),
            "error" => Ok(Self::Error),
            _ => Err(format!("Invalid task status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_draft() {
        assert_eq!(TaskStatus::default(), TaskStatus::Draft);
    }

    #[test]
    fn test_terminal_check() {
        assert!(TaskStatus::Done.is_terminal());
        assert!(TaskStatus::Error.is_terminal());
        assert!(!TaskStatus::Draft.is_terminal());
        assert!(!TaskStatus::Processing.is_terminal());
        assert!(!TaskStatus::Paused.is_terminal());
    }

    #[test]
    fn test_string_conversion() {
        assert_eq!(TaskStatus::Processing.to_string(), "processing");
        assert_eq!("paused".parse::<TaskStatus>().unwrap(), TaskStatus::Paused);
        assert!("bogus".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_none_serializes_as_null_string() {
        let json = serde_json::to_string(&TaskStatus::None).unwrap();
        assert_eq!(json, "\"null\"");
        let parsed: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TaskStatus::None);
    }

    #[test]
    fn test_status_serde_round_trip() {
        let json = serde_json::to_string(&TaskStatus::Done).unwrap();
        assert_eq!(json, "\"done\"");
        let parsed: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, TaskStatus::Done);
    }
}
