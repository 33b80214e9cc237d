//! Execution-plan runner.
//!
//! Walks an [`ExecutionPlan`], resolving each referenced task and driving its
//! `start_processing`, recursing into nested groups as their own sub-plans.
//!
//! Error policy: a failing item never prevents its siblings from running.
//! Serial nodes finish the remaining items in order; parallel nodes join all
//! branches. In both modes every failure is collected and the node fails with
//! an aggregate [`LifecycleError::PlanFailed`] if any item failed.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::error::{LifecycleError, Result};
use crate::models::{ExecutionMode, ExecutionPlan, PlanNode};

use super::context::EngineContext;

/// Execute a plan node against the engine. An empty plan is a no-op success.
pub fn run_plan<'a>(
    ctx: &'a Arc<EngineContext>,
    plan: &'a ExecutionPlan,
) -> BoxFuture<'a, Result<()>> {
    Box::pin(async move {
        if plan.is_empty() {
            return Ok(());
        }

        debug!(
            mode = ?plan.mode,
            items = plan.tasks.len(),
            "executing plan node"
        );

        let failures = match plan.mode {
            ExecutionMode::Serial => {
                let mut failures = Vec::new();
                for node in &plan.tasks {
                    if let Err(err) = run_node(ctx, node).await {
                        warn!(error = %err, "serial plan item failed; continuing with remaining items");
                        failures.push(err.to_string());
                    }
                }
                failures
            }
            ExecutionMode::Parallel => {
                let limit = ctx.config.max_parallel_branches.max(1);
                let branches: Vec<_> = plan.tasks.iter().map(|node| run_node(ctx, node)).collect();
                stream::iter(branches)
                    .buffer_unordered(limit)
                    .filter_map(|result| async move {
                        match result {
                            Ok(()) => None,
                            Err(err) => {
                                warn!(error = %err, "parallel plan branch failed");
                                Some(err.to_string())
                            }
                        }
                    })
                    .collect()
                    .await
            }
        };

        if failures.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError::PlanFailed { failures })
        }
    })
}

async fn run_node(ctx: &Arc<EngineContext>, node: &PlanNode) -> Result<()> {
    match node {
        PlanNode::Task(reference) => {
            let task = reference.resolve(ctx).await?;
            task.start_processing().await
        }
        PlanNode::Group(group) => run_plan(ctx, group).await,
    }
}
