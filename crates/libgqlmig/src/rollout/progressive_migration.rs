use crate::rollout::FeatureFlag;
use crate::rollout::RolloutError;
use chrono::DateTime;
use chrono::Utc;
use parking_lot::Mutex;
use parking_lot::RwLock;
use rand::Rng;
use sha2::Digest;
use sha2::Sha256;
use std::collections::HashMap;

pub const DEFAULT_ROLLOUT_DELTA: u8 = 10;

/// Request attributes used by the routing decision.
#[derive(Clone, Copy, Debug, Default)]
pub struct RoutingContext<'req> {
    pub segment: Option<&'req str>,
    pub user_id: Option<&'req str>,
}

/// One rollout state transition, kept for audit.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRecord {
    pub at: DateTime<Utc>,
    pub detail: String,
    pub operation_id: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolloutSummary {
    pub enabled: usize,
    pub fully_rolled_out: usize,
    pub total_flags: usize,
}

/// The progressive-rollout state machine: per-operation feature flags with
/// percentage- and segment-based routing.
///
/// States per operation run `disabled (0%)` -> `rolling out (1-99%)` ->
/// `full (100%)`, with segment enablement as an independent axis that can
/// force traffic in regardless of percentage. Caller-owned; the
/// process-wide default instance belongs to the composition root.
#[derive(Debug, Default)]
pub struct ProgressiveMigration {
    audit: Mutex<Vec<TransitionRecord>>,
    flags: RwLock<HashMap<String, FeatureFlag>>,
}
impl ProgressiveMigration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a manager from persisted flag state.
    pub fn from_flags(flags: Vec<FeatureFlag>) -> Self {
        let manager = Self::new();
        {
            let mut map = manager.flags.write();
            for flag in flags {
                map.insert(flag.operation_id.clone(), flag);
            }
        }
        manager
    }

    /// Initial state: disabled at 0%. Idempotent per operation; an
    /// existing flag is returned unchanged.
    pub fn create_feature_flag(&self, operation_id: &str) -> FeatureFlag {
        let mut flags = self.flags.write();
        if let Some(existing) = flags.get(operation_id) {
            return existing.clone();
        }
        let flag = FeatureFlag::new(operation_id);
        flags.insert(operation_id.to_string(), flag.clone());
        drop(flags);
        self.record(operation_id, "flag created (disabled, 0%)");
        flag
    }

    pub fn start_rollout(
        &self,
        operation_id: &str,
        percentage: u8,
    ) -> Result<(), RolloutError> {
        validate_percentage(percentage)?;
        self.update(operation_id, |flag| {
            flag.enabled = true;
            flag.rollout_percentage = percentage;
        })?;
        self.record(operation_id, &format!("rollout started at {percentage}%"));
        Ok(())
    }

    /// Bounded increment; the percentage is clamped at 100. `None` uses
    /// the default delta of 10.
    pub fn increase_rollout(
        &self,
        operation_id: &str,
        delta: Option<u8>,
    ) -> Result<u8, RolloutError> {
        let delta = delta.unwrap_or(DEFAULT_ROLLOUT_DELTA);
        let updated = self.update(operation_id, |flag| {
            flag.rollout_percentage =
                flag.rollout_percentage.saturating_add(delta).min(100);
        })?;
        self.record(
            operation_id,
            &format!("rollout increased to {}%", updated.rollout_percentage),
        );
        Ok(updated.rollout_percentage)
    }

    /// Disables routing but preserves the percentage, so the rollout is
    /// resumable from where it stopped.
    pub fn pause_rollout(&self, operation_id: &str) -> Result<(), RolloutError> {
        self.update(operation_id, |flag| {
            flag.enabled = false;
        })?;
        self.record(operation_id, "rollout paused");
        Ok(())
    }

    /// Destructive reset: disabled AND 0%. Distinct from pause, and
    /// idempotent: rolling back an already-rolled-back operation is not
    /// an error.
    pub fn rollback_operation(&self, operation_id: &str) -> Result<(), RolloutError> {
        self.update(operation_id, |flag| {
            flag.enabled = false;
            flag.rollout_percentage = 0;
        })?;
        self.record(operation_id, "rolled back (disabled, 0%)");
        Ok(())
    }

    /// Replaces (not merges) the segment list and forces the flag on.
    pub fn enable_for_segments(
        &self,
        operation_id: &str,
        segments: &[String],
    ) -> Result<(), RolloutError> {
        self.update(operation_id, |flag| {
            flag.enabled = true;
            flag.enabled_segments = segments.to_vec();
        })?;
        self.record(
            operation_id,
            &format!("enabled for segments [{}]", segments.join(", ")),
        );
        Ok(())
    }

    /// The routing decision.
    ///
    /// Disabled wins outright. A supplied segment is authoritative when
    /// the flag carries a segment list. Otherwise percentage-based: a
    /// stable user ID is assigned by deterministic hash bucket (the same
    /// user always gets the same answer at a given percentage), anonymous
    /// traffic by uniform draw.
    pub fn should_use_migrated_query(
        &self,
        operation_id: &str,
        ctx: &RoutingContext<'_>,
    ) -> Result<bool, RolloutError> {
        let flags = self.flags.read();
        let flag = flags.get(operation_id).ok_or_else(|| {
            RolloutError::FlagNotFound {
                operation_id: operation_id.to_string(),
            }
        })?;

        if !flag.enabled {
            return Ok(false);
        }
        if let Some(segment) = ctx.segment
            && !flag.enabled_segments.is_empty() {
            return Ok(flag.enabled_segments.iter().any(|s| s == segment));
        }
        if flag.rollout_percentage >= 100 {
            return Ok(true);
        }
        if flag.rollout_percentage == 0 {
            return Ok(false);
        }
        match ctx.user_id {
            Some(user_id) => {
                Ok(bucket(user_id, operation_id) < flag.rollout_percentage)
            },
            None => {
                let draw: u8 = rand::rng().random_range(0..100);
                Ok(draw < flag.rollout_percentage)
            },
        }
    }

    pub fn flag(&self, operation_id: &str) -> Option<FeatureFlag> {
        self.flags.read().get(operation_id).cloned()
    }

    pub fn flags(&self) -> Vec<FeatureFlag> {
        let mut flags: Vec<FeatureFlag> =
            self.flags.read().values().cloned().collect();
        flags.sort_by(|a, b| a.operation_id.cmp(&b.operation_id));
        flags
    }

    pub fn audit_log(&self) -> Vec<TransitionRecord> {
        self.audit.lock().clone()
    }

    pub fn summary(&self) -> RolloutSummary {
        let flags = self.flags.read();
        RolloutSummary {
            enabled: flags.values().filter(|flag| flag.enabled).count(),
            fully_rolled_out: flags
                .values()
                .filter(|flag| flag.enabled && flag.rollout_percentage >= 100)
                .count(),
            total_flags: flags.len(),
        }
    }

    pub(crate) fn update(
        &self,
        operation_id: &str,
        mutate: impl FnOnce(&mut FeatureFlag),
    ) -> Result<FeatureFlag, RolloutError> {
        let mut flags = self.flags.write();
        let flag = flags.get_mut(operation_id).ok_or_else(|| {
            RolloutError::FlagNotFound {
                operation_id: operation_id.to_string(),
            }
        })?;
        mutate(flag);
        Ok(flag.clone())
    }

    fn record(&self, operation_id: &str, detail: &str) {
        log::debug!("Rollout transition for `{operation_id}`: {detail}.");
        self.audit.lock().push(TransitionRecord {
            at: Utc::now(),
            detail: detail.to_string(),
            operation_id: operation_id.to_string(),
        });
    }
}

fn validate_percentage(percentage: u8) -> Result<(), RolloutError> {
    if percentage > 100 {
        return Err(RolloutError::InvalidPercentage {
            value: percentage as u32,
        });
    }
    Ok(())
}

/// Deterministic assignment: hash of `user_id + operation_id`, mod 100.
fn bucket(user_id: &str, operation_id: &str) -> u8 {
    let mut hasher = Sha256::new();
    hasher.update(user_id.as_bytes());
    hasher.update(operation_id.as_bytes());
    let digest = hasher.finalize();
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    (u64::from_be_bytes(prefix) % 100) as u8
}
