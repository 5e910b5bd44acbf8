/// What traffic does when the migrated operation is not selected (or
/// errors at runtime).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackBehavior {
    /// Fail the request instead of silently using the original; for
    /// operations whose original form is being hard-removed.
    Error,
    #[default]
    OriginalQuery,
}

/// Rollout state for one migrated operation. One flag per operation,
/// created once, mutated only through
/// [`ProgressiveMigration`](crate::rollout::ProgressiveMigration).
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub enabled: bool,
    pub enabled_segments: Vec<String>,
    pub fallback_behavior: FallbackBehavior,
    pub name: String,
    pub operation_id: String,
    /// Always within 0-100; adjusted only by bounded increments.
    pub rollout_percentage: u8,
}
impl FeatureFlag {
    pub(crate) fn new(operation_id: &str) -> Self {
        Self {
            enabled: false,
            enabled_segments: vec![],
            fallback_behavior: FallbackBehavior::default(),
            name: format!("migration:{operation_id}"),
            operation_id: operation_id.to_string(),
            rollout_percentage: 0,
        }
    }
}
