use crate::rollout::ProgressiveMigration;
use crate::rollout::RolloutError;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollbackStrategy {
    /// Halve each operation's percentage, wait, then fully disable.
    Gradual,
    /// Disable all referenced operations synchronously.
    Immediate,
}

/// An executable plan referencing a previously taken checkpoint.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollbackPlan {
    pub checkpoint_id: Uuid,
    pub operation_ids: Vec<String>,
    pub strategy: RollbackStrategy,
}

impl ProgressiveMigration {
    /// Executes a rollback plan. `wait` is invoked between the gradual
    /// strategy's reduce and disable phases (the CLI passes a sleep;
    /// tests pass a no-op).
    ///
    /// A failure is fatal to this call and propagates; a partially
    /// applied rollback is possible and is retried per operation via
    /// [`rollback_operation`](ProgressiveMigration::rollback_operation).
    pub fn execute_rollback(
        &self,
        plan: &RollbackPlan,
        wait: impl FnOnce(),
    ) -> Result<(), RolloutError> {
        log::info!(
            "Executing {:?} rollback of {} operations (checkpoint {}).",
            plan.strategy,
            plan.operation_ids.len(),
            plan.checkpoint_id,
        );

        match plan.strategy {
            RollbackStrategy::Immediate => {
                for operation_id in &plan.operation_ids {
                    self.rollback_operation(operation_id)?;
                }
            },

            RollbackStrategy::Gradual => {
                for operation_id in &plan.operation_ids {
                    self.update(operation_id, |flag| {
                        // Already-disabled operations are skipped, not
                        // errors.
                        if flag.enabled {
                            flag.rollout_percentage = flag.rollout_percentage / 2;
                        }
                    })?;
                }
                wait();
                for operation_id in &plan.operation_ids {
                    self.rollback_operation(operation_id)?;
                }
            },
        }
        Ok(())
    }
}
