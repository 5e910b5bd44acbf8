use thiserror::Error;

/// Invalid operation references and out-of-range percentages raise rather
/// than clamp: silent clamping would mask caller bugs.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RolloutError {
    #[error("Feature flag not found: {operation_id}")]
    FlagNotFound {
        operation_id: String,
    },

    #[error("invalid rollout percentage {value} (expected 0-100)")]
    InvalidPercentage {
        value: u32,
    },
}
