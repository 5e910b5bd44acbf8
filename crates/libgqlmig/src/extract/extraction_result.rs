use crate::extract::ExtractionError;
use crate::operation::ExtractedFragment;
use crate::operation::ExtractedOperation;
use crate::operation::QueryVariant;
use crate::operation::VariantSwitch;

/// Everything one extraction run produced.
///
/// Ordering of `queries` is not guaranteed stable across runs (files are
/// processed by a worker pool); callers wanting stable output sort by ID.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub errors: Vec<ExtractionError>,
    pub fragments: Vec<ExtractedFragment>,
    pub queries: Vec<ExtractedOperation>,
    pub stats: ExtractionStats,
    pub switches: Vec<VariantSwitch>,
    pub variants: Vec<QueryVariant>,
}
impl ExtractionResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionStats {
    /// Files successfully processed with the host-language parser.
    pub ast_files: usize,
    pub duration_ms: u64,
    pub files_failed: usize,
    pub files_scanned: usize,
    pub fragments: usize,
    pub mutations: usize,
    /// Files the hybrid strategy fell back to text scanning for.
    pub pluck_fallbacks: usize,
    pub queries: usize,
    pub subscriptions: usize,
    pub variants: usize,
}
