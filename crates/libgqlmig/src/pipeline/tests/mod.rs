use crate::extract::ExtractionConfig;
use crate::extract::ExtractionStrategy;
use crate::pattern::PatternRegistry;
use crate::pipeline::MigrationPipeline;
use crate::pipeline::PipelineConfig;
use crate::pipeline::PipelineError;
use crate::schema::SchemaLoader;
use crate::schema::SchemaLoaderConfig;
use std::path::Path;

const SCHEMA: &str = "type Query {\n\
  user: User\n\
  venture: Venture\n\
}\n\
type User {\n\
  id: ID!\n\
  name: String @deprecated(reason: \"Use `fullName`\")\n\
  fullName: String\n\
}\n\
type Venture {\n\
  id: ID!\n\
  name: String\n\
}\n";

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn pipeline_for(root: &Path, mutate: impl FnOnce(&mut PipelineConfig)) -> MigrationPipeline {
    let mut extraction = ExtractionConfig::new(root.join("src"));
    extraction.strategy = ExtractionStrategy::Pluck;
    let mut config = PipelineConfig::new(extraction);
    config.schema_source = Some(
        root.join("schema.graphql").to_string_lossy().to_string(),
    );
    mutate(&mut config);
    MigrationPipeline::new(
        config,
        SchemaLoader::new(SchemaLoaderConfig::default()),
        PatternRegistry::with_builtin_patterns(),
    )
}

#[test]
fn end_to_end_field_rename_rewrites_the_file() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "import gql from 'graphql-tag';\n\
         export const GET_USER = gql`query GetUser { user { id name } }`;\n",
    );

    let pipeline = pipeline_for(dir.path(), |_| {});
    let report = pipeline.run().expect("pipeline should succeed");

    assert_eq!(report.extraction.total_queries, 1);
    assert_eq!(report.transformation.total_transformed, 1);
    assert_eq!(report.applied_files.len(), 1);
    assert!(report.errors.is_empty());

    let rewritten =
        std::fs::read_to_string(dir.path().join("src/queries.ts")).unwrap();
    assert!(rewritten.contains("fullName"));
    assert!(rewritten.starts_with("import gql from 'graphql-tag';\n"));
    assert!(rewritten.contains("export const GET_USER = gql`"));

    // A flag exists for the applied operation, still disabled by default.
    let record = &report.transformation.transformations[0];
    assert!(record.applied);
    let flag = pipeline.rollout().flag(&record.id).unwrap();
    assert!(!flag.enabled);
}

#[test]
fn dry_run_reports_but_leaves_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    let source = "const q = gql`query GetUser { user { name } }`;\n";
    write_file(dir.path(), "src/queries.ts", source);

    let pipeline = pipeline_for(dir.path(), |config| {
        config.dry_run = true;
    });
    let report = pipeline.run().unwrap();

    assert_eq!(report.applied_files.len(), 1);
    let untouched =
        std::fs::read_to_string(dir.path().join("src/queries.ts")).unwrap();
    assert_eq!(untouched, source);
}

#[test]
fn operations_without_matching_rules_are_not_recorded() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "const q = gql`query GetVenture { venture { id } }`;\n",
    );

    let pipeline = pipeline_for(dir.path(), |_| {});
    let report = pipeline.run().unwrap();

    assert_eq!(report.extraction.total_queries, 1);
    // No textual change, so nothing is scored or applied.
    assert_eq!(report.transformation.total_transformed, 0);
    assert!(report.applied_files.is_empty());
}

#[test]
fn min_confidence_gates_application() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "const q = gql`query GetUser { user { id name } }`;\n",
    );

    let pipeline = pipeline_for(dir.path(), |config| {
        config.min_confidence = 100;
    });
    let report = pipeline.run().unwrap();

    assert_eq!(report.transformation.total_transformed, 1);
    assert_eq!(report.transformation.summary.skipped_low_confidence, 1);
    assert!(report.applied_files.is_empty());
    assert!(!report.transformation.transformations[0].applied);
}

#[test]
fn name_pattern_migration_rewrites_the_dynamic_template() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "const q = gql`query ${queryNames.byIdV1} { venture { id } }`;\n",
    );

    let pipeline = pipeline_for(dir.path(), |_| {});
    let report = pipeline.run().unwrap();

    assert_eq!(report.transformation.total_transformed, 1);
    assert_eq!(report.applied_files.len(), 1);

    let rewritten =
        std::fs::read_to_string(dir.path().join("src/queries.ts")).unwrap();
    assert!(rewritten.contains("query ${queryNames.byIdV2} {"));
    assert!(!rewritten.contains("byIdV1"));
}

#[test]
fn rollout_percentage_starts_flags() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "const q = gql`query GetUser { user { name } }`;\n",
    );

    let pipeline = pipeline_for(dir.path(), |config| {
        config.rollout_percentage = 25;
    });
    let report = pipeline.run().unwrap();

    let record = &report.transformation.transformations[0];
    let flag = pipeline.rollout().flag(&record.id).unwrap();
    assert!(flag.enabled);
    assert_eq!(flag.rollout_percentage, 25);
}

#[test]
fn missing_schema_source_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "src/app.ts", "const q = 1;\n");

    let pipeline = pipeline_for(dir.path(), |_| {});
    assert!(matches!(pipeline.run(), Err(PipelineError::Schema(_))));
}

#[test]
fn missing_rules_document_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(dir.path(), "src/app.ts", "const q = 1;\n");

    let pipeline = pipeline_for(dir.path(), |config| {
        config.deprecation_rules_path =
            Some(dir.path().join("missing-rules.json"));
    });
    assert!(matches!(
        pipeline.run(),
        Err(PipelineError::DeprecationRules(_)),
    ));
}

#[test]
fn artifacts_serialize_with_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "const q = gql`query GetUser { user { name } }`;\n",
    );

    let report = pipeline_for(dir.path(), |config| {
        config.dry_run = true;
    })
    .run()
    .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"totalQueries\""));
    assert!(json.contains("\"totalTransformed\""));
    assert!(json.contains("\"timestamp\""));
    assert!(json.contains("\"directory\""));
}

#[test]
fn summary_and_pr_description_render() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "schema.graphql", SCHEMA);
    write_file(
        dir.path(),
        "src/queries.ts",
        "const q = gql`query GetUser { user { name } }`;\n",
    );

    let report = pipeline_for(dir.path(), |_| {}).run().unwrap();
    let summary = report.summary();
    assert!(summary.contains("1 operations extracted"));

    let description = report.pr_description();
    assert!(description.contains("## GraphQL migration"));
    assert!(description.contains("queries.ts"));
    assert!(description.contains("field-rename"));
}
