use crate::rollout::FeatureFlag;
use crate::rollout::ProgressiveMigration;
use crate::rollout::RolloutError;
use chrono::DateTime;
use chrono::Utc;
use std::collections::BTreeMap;
use uuid::Uuid;

/// A snapshot of one or more flags' full rollout state at a point in
/// time. Retention is caller-owned; checkpoints never expire on their
/// own.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    pub created_at: DateTime<Utc>,
    pub flags: BTreeMap<String, FeatureFlag>,
    pub id: Uuid,
}

impl ProgressiveMigration {
    /// Snapshots the referenced operations' flags. Unknown operation IDs
    /// are an error: a checkpoint that silently misses flags cannot be
    /// trusted for restoration.
    pub fn create_checkpoint(
        &self,
        operation_ids: &[String],
    ) -> Result<Checkpoint, RolloutError> {
        let mut flags = BTreeMap::new();
        for operation_id in operation_ids {
            let flag = self.flag(operation_id).ok_or_else(|| {
                RolloutError::FlagNotFound {
                    operation_id: operation_id.clone(),
                }
            })?;
            flags.insert(operation_id.clone(), flag);
        }
        Ok(Checkpoint {
            created_at: Utc::now(),
            flags,
            id: Uuid::new_v4(),
        })
    }

    /// Restores every flag captured in `checkpoint` to its snapshotted
    /// state, recreating flags that no longer exist.
    pub fn restore_checkpoint(&self, checkpoint: &Checkpoint) {
        for (operation_id, snapshot) in &checkpoint.flags {
            self.create_feature_flag(operation_id);
            let restored = self.update(operation_id, |flag| {
                *flag = snapshot.clone();
            });
            if let Err(err) = restored {
                log::warn!("Failed to restore flag `{operation_id}`: {err}");
            }
        }
    }
}
