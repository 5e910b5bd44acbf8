use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::scan_args::ScanArgs;
use crate::output_utils;
use libgqlmig::extract::ExtractionEngine;
use libgqlmig::pipeline::ExtractionArtifact;
use libgqlmig::source_map::SourceMap;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ExtractCmd {
    #[command(flatten)]
    scan: ScanArgs,

    #[arg(
        help="Write the extraction artifact JSON to this path instead of \
             stdout.",
        long,
        short='o',
    )]
    output: Option<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for ExtractCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let config = self.scan.to_config();
        let directory = config.root.display().to_string();
        let source_map = SourceMap::new();

        let result = match ExtractionEngine::new(config).extract(&source_map) {
            Ok(result) => result,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Extraction failed: {e}",
                    output_utils::RED_X,
                ));
            },
        };

        let error_count = result.errors.len();
        let artifact = ExtractionArtifact::from_result(result, directory);
        let json = match serde_json::to_string_pretty(&artifact) {
            Ok(json) => json,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Failed to serialize extraction artifact: {e}",
                    output_utils::RED_X,
                ));
            },
        };

        if let Some(output) = &self.output {
            if let Err(e) = std::fs::write(output, &json) {
                return CommandResult::stderr(format_args!(
                    "{} Failed to write {}: {e}",
                    output_utils::RED_X,
                    output.display(),
                ));
            }
            CommandResult::stdout(format_args!(
                "{} Extracted {} operations ({} errors) to {}.",
                output_utils::GREEN_CHECK,
                artifact.total_queries,
                error_count,
                output.display(),
            ))
        } else {
            CommandResult::stdout(format_args!("{json}"))
        }
    }
}
