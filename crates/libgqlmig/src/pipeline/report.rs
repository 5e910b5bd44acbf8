use crate::confidence::ConfidenceScore;
use crate::confidence::ScoreCategory;
use crate::extract::ExtractionError;
use crate::extract::ExtractionStats;
use crate::operation::ExtractedFragment;
use crate::operation::ExtractedOperation;
use crate::operation::QueryVariant;
use crate::transform::AppliedChange;
use crate::transform::TransformPattern;
use std::path::PathBuf;

/// Extraction result artifact, serialized for downstream tooling.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionArtifact {
    pub directory: String,
    pub errors: Vec<ExtractionError>,
    pub fragments: Vec<ExtractedFragment>,
    pub queries: Vec<ExtractedOperation>,
    pub stats: ExtractionStats,
    pub timestamp: String,
    pub total_queries: usize,
    pub variants: Vec<QueryVariant>,
}

impl ExtractionArtifact {
    /// Stamps an extraction result into its artifact form.
    pub fn from_result(
        result: crate::extract::ExtractionResult,
        directory: String,
    ) -> Self {
        Self {
            directory,
            errors: result.errors,
            fragments: result.fragments,
            total_queries: result.queries.len(),
            queries: result.queries,
            stats: result.stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
            variants: result.variants,
        }
    }
}

/// One scored transformation in the transformation artifact.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationRecord {
    pub applied: bool,
    pub category: ScoreCategory,
    pub changes: Vec<AppliedChange>,
    pub confidence: ConfidenceScore,
    pub file: PathBuf,
    pub id: String,
    pub name: String,
    pub original: String,
    pub pattern: TransformPattern,
    pub transformed: String,
}

#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationSummary {
    pub automatic: usize,
    pub failed: usize,
    pub manual: usize,
    pub semi_automatic: usize,
    pub skipped_low_confidence: usize,
}

/// Transformation result artifact.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationArtifact {
    pub summary: TransformationSummary,
    pub timestamp: String,
    pub total_transformed: usize,
    pub transformations: Vec<TransformationRecord>,
}

/// Everything one pipeline run produced, for the CLI/dashboard layers to
/// render.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineReport {
    pub applied_files: Vec<PathBuf>,
    pub dry_run: bool,
    /// Per-item failures from the transform and apply phases.
    pub errors: Vec<String>,
    pub extraction: ExtractionArtifact,
    pub transformation: TransformationArtifact,
}
impl PipelineReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || !self.extraction.errors.is_empty()
    }

    /// One-paragraph run summary for logs and CLI output.
    pub fn summary(&self) -> String {
        let summary = &self.transformation.summary;
        format!(
            "{} operations extracted ({} errors); {} transformed \
            ({} automatic, {} semi-automatic, {} manual), {} skipped below \
            confidence threshold, {} failed; {} files {}",
            self.extraction.total_queries,
            self.extraction.errors.len(),
            self.transformation.total_transformed,
            summary.automatic,
            summary.semi_automatic,
            summary.manual,
            summary.skipped_low_confidence,
            summary.failed,
            self.applied_files.len(),
            if self.dry_run { "would change (dry run)" } else { "changed" },
        )
    }

    /// A pull-request description assembled from the run summary and
    /// per-file change lists.
    pub fn pr_description(&self) -> String {
        let mut description = String::new();
        description.push_str("## GraphQL migration\n\n");
        description.push_str(&self.summary());
        description.push_str("\n\n");

        let mut by_file: Vec<(&PathBuf, Vec<&TransformationRecord>)> = vec![];
        for record in &self.transformation.transformations {
            if !record.applied {
                continue;
            }
            match by_file.iter_mut().find(|(file, _)| *file == &record.file) {
                Some((_, records)) => records.push(record),
                None => by_file.push((&record.file, vec![record])),
            }
        }

        for (file, records) in by_file {
            description.push_str(&format!("### `{}`\n", file.display()));
            for record in records {
                description.push_str(&format!(
                    "- `{}` ({}, confidence {})\n",
                    record.name,
                    record.pattern,
                    record.confidence.score,
                ));
                for change in &record.changes {
                    description.push_str(&format!(
                        "  - {}: `{}` -> `{}`\n",
                        change.rule,
                        change.field,
                        change.replacement,
                    ));
                }
            }
            description.push('\n');
        }

        description
    }
}
