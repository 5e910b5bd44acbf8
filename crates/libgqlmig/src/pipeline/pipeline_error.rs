use crate::extract::ExtractionRunError;
use crate::schema::SchemaLoadError;
use thiserror::Error;

/// Unrecoverable, whole-phase failures. Per-item failures never surface
/// here; they accumulate in the report's error lists instead.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("deprecation rules failed to load: {0}")]
    DeprecationRules(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionRunError),

    #[error(transparent)]
    Schema(#[from] SchemaLoadError),
}
