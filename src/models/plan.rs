//! Execution plans: recursive serial/parallel groupings of task references.
//!
//! A plan is a tree of execution groups, not a general graph: nesting allows
//! arbitrary serial/parallel composition, but there are no shared sub-task
//! nodes and no cycles by construction.

use serde::{Deserialize, Serialize};

use super::reference::TaskReference;

/// How the children of a plan node are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// Items run strictly one after another, in declaration order.
    #[default]
    Serial,
    /// Items start concurrently; the node completes at the join barrier.
    Parallel,
}

/// One node of an execution plan: either a reference to a task or a nested
/// group with its own mode.
///
/// Serialized untagged so a node is either a `{task_id, task_type}` object or
/// a `{tasks, mode}` object, matching the stored document shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlanNode {
    Task(TaskReference),
    Group(ExecutionPlan),
}

/// Ordered grouping of task references and nested groups, tagged with the
/// execution mode that drives them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExecutionPlan {
    #[serde(default)]
    pub tasks: Vec<PlanNode>,
    #[serde(default)]
    pub mode: ExecutionMode,
}

impl ExecutionPlan {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            tasks: Vec::new(),
            mode,
        }
    }

    pub fn serial(tasks: Vec<PlanNode>) -> Self {
        Self {
            tasks,
            mode: ExecutionMode::Serial,
        }
    }

    pub fn parallel(tasks: Vec<PlanNode>) -> Self {
        Self {
            tasks,
            mode: ExecutionMode::Parallel,
        }
    }

    pub fn push(&mut self, node: PlanNode) {
        self.tasks.push(node);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Total number of leaf references, recursing into nested groups.
    pub fn leaf_count(&self) -> usize {
        self.tasks
            .iter()
            .map(|node| match node {
                PlanNode::Task(_) => 1,
                PlanNode::Group(group) => group.leaf_count(),
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn leaf(task_type: &str) -> PlanNode {
        PlanNode::Task(TaskReference::new(Uuid::new_v4(), task_type))
    }

    #[test]
    fn test_default_mode_is_serial() {
        let plan: ExecutionPlan = serde_json::from_str("{}").unwrap();
        assert_eq!(plan.mode, ExecutionMode::Serial);
        assert!(plan.is_empty());
    }

    #[test]
    fn test_nested_plan_round_trip() {
        let plan = ExecutionPlan::serial(vec![
            leaf("extract"),
            PlanNode::Group(ExecutionPlan::parallel(vec![
                leaf("transform"),
                leaf("transform"),
            ])),
            leaf("load"),
        ]);

        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["mode"], "serial");
        assert_eq!(json["tasks"][1]["mode"], "parallel");

        let parsed: ExecutionPlan = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, plan);
        assert_eq!(parsed.leaf_count(), 4);
    }

    #[test]
    fn test_untagged_nodes_distinguish_leaf_from_group() {
        let json = serde_json::json!({
            "mode": "parallel",
            "tasks": [
                {"task_id": Uuid::new_v4(), "task_type": "export"},
                {"tasks": [], "mode": "serial"},
            ],
        });
        let plan: ExecutionPlan = serde_json::from_value(json).unwrap();
        assert!(matches!(plan.tasks[0], PlanNode::Task(_)));
        assert!(matches!(plan.tasks[1], PlanNode::Group(_)));
    }
}
