use crate::apply;
use crate::apply::FileEdit;
use crate::confidence::ConfidenceScorer;
use crate::confidence::QueryMetrics;
use crate::confidence::ScoreCategory;
use crate::confidence::ScoreInputs;
use crate::extract::ExtractionEngine;
use crate::file_reader;
use crate::pattern::PatternRegistry;
use crate::pipeline::PipelineConfig;
use crate::pipeline::PipelineError;
use crate::pipeline::report::ExtractionArtifact;
use crate::pipeline::report::PipelineReport;
use crate::pipeline::report::TransformationArtifact;
use crate::pipeline::report::TransformationRecord;
use crate::pipeline::report::TransformationSummary;
use crate::rollout::ProgressiveMigration;
use crate::schema;
use crate::schema::SchemaLoadError;
use crate::schema::SchemaLoader;
use crate::source_map::SourceMap;
use crate::transform;
use crate::transform::TransformPattern;
use chrono::Utc;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::PathBuf;

/// Composes extraction -> validation -> transformation -> application ->
/// rollout. Phases run strictly sequentially; per-item failures accumulate
/// into the report while whole-phase failures abort the run.
pub struct MigrationPipeline {
    config: PipelineConfig,
    registry: PatternRegistry,
    rollout: ProgressiveMigration,
    schema_loader: SchemaLoader,
    scorer: ConfidenceScorer,
}

struct AcceptedEdit {
    file: PathBuf,
    operation_id: String,
    rename_pattern: Option<String>,
    transformed: String,
}

impl MigrationPipeline {
    pub fn new(
        config: PipelineConfig,
        schema_loader: SchemaLoader,
        registry: PatternRegistry,
    ) -> Self {
        Self {
            config,
            registry,
            rollout: ProgressiveMigration::new(),
            schema_loader,
            scorer: ConfidenceScorer::default(),
        }
    }

    /// The rollout manager holding flags created by `run`.
    pub fn rollout(&self) -> &ProgressiveMigration {
        &self.rollout
    }

    pub fn run(&self) -> Result<PipelineReport, PipelineError> {
        let rules = self.load_rules()?;

        let source_map = SourceMap::new();
        let engine = ExtractionEngine::new(self.config.extraction.clone());
        let extraction = engine.extract(&source_map)?;
        log::info!(
            "Extracted {} operations ({} errors) from {}.",
            extraction.queries.len(),
            extraction.errors.len(),
            self.config.extraction.root.display(),
        );

        let mut errors: Vec<String> = vec![];
        let mut records: Vec<TransformationRecord> = vec![];
        let mut summary = TransformationSummary::default();
        let mut accepted: Vec<AcceptedEdit> = vec![];

        for operation in &extraction.queries {
            let analysis = match self.registry.analyze(operation) {
                Ok(analysis) => analysis,
                Err(err) => {
                    errors.push(err.to_string());
                    summary.failed += 1;
                    continue;
                },
            };
            let recommendation = self.registry.recommend_migration(&analysis);

            let outcome = match transform::transform(operation.normalized(), &rules) {
                Ok(outcome) => outcome,
                Err(err) => {
                    errors.push(format!("{}: {err}", operation.id()));
                    summary.failed += 1;
                    continue;
                },
            };

            let mut transformed = outcome.transformed.clone();
            let mut changes = outcome.changes.clone();
            if let Some(recommendation) = &recommendation
                && let Some((from, to)) = &recommendation.fragment_substitution {
                match transform::rename_fragment(&transformed, from, to) {
                    Ok((renamed, more_changes)) => {
                        transformed = renamed;
                        changes.extend(more_changes);
                    },
                    Err(err) => {
                        errors.push(format!("{}: {err}", operation.id()));
                        summary.failed += 1;
                        continue;
                    },
                }
            }

            // A rule set that produced no textual change is not a
            // transformation; it is neither scored nor recorded.
            let name_migrated = recommendation.is_some();
            if transformed == outcome.original && !name_migrated {
                continue;
            }

            let metrics = match operation.document() {
                Ok(doc) => QueryMetrics::from_document(&doc),
                Err(err) => {
                    errors.push(err.to_string());
                    summary.failed += 1;
                    continue;
                },
            };
            let pattern = TransformPattern::classify(&changes, name_migrated);
            let rule_kinds: HashSet<&str> =
                changes.iter().map(|change| change.rule.as_str()).collect();
            let rule_count = rule_kinds.len().max(1);
            let confidence = self.scorer.score(
                &metrics,
                pattern,
                rule_count,
                &ScoreInputs::default(),
            );

            match confidence.category {
                ScoreCategory::Automatic => summary.automatic += 1,
                ScoreCategory::SemiAutomatic => summary.semi_automatic += 1,
                ScoreCategory::Manual => summary.manual += 1,
            }

            let meets_threshold = confidence.score >= self.config.min_confidence;
            if !meets_threshold {
                summary.skipped_low_confidence += 1;
                log::debug!(
                    "Skipping `{}`: confidence {} below threshold {}.",
                    operation.id(),
                    confidence.score,
                    self.config.min_confidence,
                );
            }

            let name = match operation.name() {
                crate::operation::OperationName::Static(name) => {
                    self.config.naming.normalize(name)
                },
                other => other.display_name().to_string(),
            };
            records.push(TransformationRecord {
                applied: false,
                category: confidence.category,
                changes,
                confidence,
                file: operation.file().to_path_buf(),
                id: operation.id().to_string(),
                name,
                original: outcome.original.clone(),
                pattern,
                transformed: transformed.clone(),
            });

            if meets_threshold {
                accepted.push(AcceptedEdit {
                    file: operation.file().to_path_buf(),
                    operation_id: operation.id().to_string(),
                    rename_pattern: recommendation
                        .map(|recommendation| recommendation.target_template),
                    transformed,
                });
            }
        }

        let applied_files =
            self.apply_phase(accepted, &source_map, &mut records, &mut summary, &mut errors);

        for record in records.iter().filter(|record| record.applied) {
            self.rollout.create_feature_flag(&record.id);
            if self.config.rollout_percentage > 0
                && let Err(err) = self
                    .rollout
                    .start_rollout(&record.id, self.config.rollout_percentage) {
                errors.push(err.to_string());
            }
        }

        let timestamp = Utc::now().to_rfc3339();
        Ok(PipelineReport {
            applied_files,
            dry_run: self.config.dry_run,
            errors,
            extraction: ExtractionArtifact {
                directory: self.config.extraction.root.display().to_string(),
                errors: extraction.errors,
                fragments: extraction.fragments,
                total_queries: extraction.queries.len(),
                queries: extraction.queries,
                stats: extraction.stats,
                timestamp: timestamp.clone(),
                variants: extraction.variants,
            },
            transformation: TransformationArtifact {
                summary,
                timestamp,
                total_transformed: records.len(),
                transformations: records,
            },
        })
    }

    /// Merges deprecation rules from the schema's `@deprecated` directives
    /// and the configured rules document.
    fn load_rules(&self) -> Result<Vec<crate::transform::TransformRule>, PipelineError> {
        let mut deprecated = vec![];

        if let Some(source) = &self.config.schema_source {
            let loaded = self.schema_loader.load(source)?;
            log::info!(
                "Schema `{source}` loaded in {:?} (cached: {}).",
                loaded.load_time,
                loaded.cached,
            );
            let harvested = schema::harvest_sdl(&loaded.sdl).map_err(|err| {
                PipelineError::Schema(SchemaLoadError::InvalidSdl {
                    message: err.to_string(),
                    source_id: source.clone(),
                })
            })?;
            deprecated.extend(harvested);
        }

        if let Some(path) = &self.config.deprecation_rules_path {
            let json = file_reader::read_content(path)
                .map_err(|err| PipelineError::DeprecationRules(err.to_string()))?;
            deprecated.extend(
                schema::rules_from_json(&json)
                    .map_err(|err| PipelineError::DeprecationRules(err.to_string()))?,
            );
        }

        Ok(schema::to_rules(&deprecated))
    }

    /// Applies accepted edits grouped per file; edits within one file are
    /// serialized and ordered by descending source offset inside
    /// [`apply::apply_file`].
    fn apply_phase(
        &self,
        accepted: Vec<AcceptedEdit>,
        source_map: &SourceMap,
        records: &mut [TransformationRecord],
        summary: &mut TransformationSummary,
        errors: &mut Vec<String>,
    ) -> Vec<PathBuf> {
        let record_index: HashMap<String, usize> = records
            .iter()
            .enumerate()
            .map(|(index, record)| (record.id.clone(), index))
            .collect();

        let mut edits_by_file: IndexMap<PathBuf, Vec<FileEdit>> = IndexMap::new();
        for edit in accepted {
            match apply::edit_for(
                source_map,
                &edit.operation_id,
                edit.transformed,
                edit.rename_pattern,
            ) {
                Ok(file_edit) => {
                    edits_by_file.entry(edit.file).or_default().push(file_edit);
                },
                Err(err) => {
                    errors.push(err.to_string());
                    summary.failed += 1;
                },
            }
        }

        let mut applied_files = vec![];
        for (file, edits) in edits_by_file {
            let edit_ids: Vec<String> = edits
                .iter()
                .map(|edit| edit.mapping.operation_id.clone())
                .collect();
            let text = match file_reader::read_content(&file) {
                Ok(text) => text,
                Err(err) => {
                    errors.push(err.to_string());
                    summary.failed += edits.len();
                    continue;
                },
            };

            let applied = apply::apply_file(&text, edits);
            let skipped_ids: HashSet<&str> = applied
                .skipped
                .iter()
                .map(|skipped| skipped.operation_id.as_str())
                .collect();
            for skipped in &applied.skipped {
                errors.push(skipped.error.to_string());
                summary.failed += 1;
            }
            for operation_id in &edit_ids {
                if !skipped_ids.contains(operation_id.as_str())
                    && let Some(index) = record_index.get(operation_id) {
                    records[*index].applied = true;
                }
            }

            if applied.code != text {
                if !self.config.dry_run {
                    if let Err(err) = file_reader::write_content(&file, &applied.code) {
                        errors.push(err.to_string());
                        continue;
                    }
                    log::info!(
                        "Rewrote {} (+{} -{} lines).",
                        file.display(),
                        applied.lines_added,
                        applied.lines_removed,
                    );
                }
                applied_files.push(file);
            }
        }
        applied_files
    }
}
