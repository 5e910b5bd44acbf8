use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::scan_args::ScanArgs;
use crate::output_utils;
use libgqlmig::pattern::PatternRegistry;
use libgqlmig::pipeline::MigrationPipeline;
use libgqlmig::pipeline::NamingStyle;
use libgqlmig::pipeline::PipelineConfig;
use libgqlmig::schema::SchemaLoader;
use libgqlmig::schema::SchemaLoaderConfig;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct MigrateCmd {
    #[command(flatten)]
    scan: ScanArgs,

    #[arg(
        help="Transform and report without writing any files.",
        long,
    )]
    dry_run: bool,

    #[arg(
        help="Skip transformations scoring below this confidence (0-100).",
        long,
        default_value_t=libgqlmig::pipeline::DEFAULT_MIN_CONFIDENCE,
    )]
    min_confidence: u8,

    #[arg(
        help="Naming normalization for reported operation names.",
        long,
        default_value_t=NamingStyle::Preserve,
        value_parser=clap::value_parser!(NamingStyle),
    )]
    naming: NamingStyle,

    #[arg(
        help="Bypass the schema cache.",
        long="no-cache",
    )]
    no_cache: bool,

    #[arg(
        help="Write the pipeline report JSON to this path.",
        long,
        short='o',
    )]
    output: Option<PathBuf>,

    #[arg(
        help="Initial rollout percentage for applied operations (0-100).",
        long,
        default_value_t=0,
    )]
    rollout: u8,

    #[arg(
        help="Path to a deprecation rules JSON document.",
        long,
    )]
    rules: Option<PathBuf>,

    #[arg(
        help="Schema SDL source: a file path, registry manifest, or URL.",
        long,
    )]
    schema: Option<String>,
}

#[inherent::inherent]
impl RunnableCommand for MigrateCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        if self.min_confidence > 100 || self.rollout > 100 {
            return CommandResult::stderr(format_args!(
                "{} --min-confidence and --rollout must be within 0-100.",
                output_utils::RED_X,
            ));
        }

        let mut config = PipelineConfig::new(self.scan.to_config());
        config.deprecation_rules_path = self.rules.clone();
        config.dry_run = self.dry_run;
        config.min_confidence = self.min_confidence;
        config.naming = self.naming;
        config.rollout_percentage = self.rollout;
        config.schema_source = self.schema.clone();

        let schema_loader = SchemaLoader::new(SchemaLoaderConfig {
            no_cache: self.no_cache,
            ..SchemaLoaderConfig::default()
        });
        let pipeline = MigrationPipeline::new(
            config,
            schema_loader,
            PatternRegistry::with_builtin_patterns(),
        );

        let report = match pipeline.run() {
            Ok(report) => report,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Migration failed: {e}",
                    output_utils::RED_X,
                ));
            },
        };

        if let Some(output) = &self.output {
            let json = match serde_json::to_string_pretty(&report) {
                Ok(json) => json,
                Err(e) => {
                    return CommandResult::stderr(format_args!(
                        "{} Failed to serialize pipeline report: {e}",
                        output_utils::RED_X,
                    ));
                },
            };
            if let Err(e) = std::fs::write(output, &json) {
                return CommandResult::stderr(format_args!(
                    "{} Failed to write {}: {e}",
                    output_utils::RED_X,
                    output.display(),
                ));
            }
        }

        if report.has_errors() {
            return CommandResult::stderr(format_args!(
                "{} {}\n\nErrors:\n{}",
                output_utils::RED_X,
                report.summary(),
                report
                    .errors
                    .iter()
                    .map(|e| format!("  * {e}"))
                    .chain(
                        report
                            .extraction
                            .errors
                            .iter()
                            .map(|e| format!("  * {e}")),
                    )
                    .collect::<Vec<_>>()
                    .join("\n"),
            ));
        }

        CommandResult::stdout(format_args!(
            "{} {}\n\n{}",
            output_utils::GREEN_CHECK,
            report.summary(),
            report.pr_description(),
        ))
    }
}
