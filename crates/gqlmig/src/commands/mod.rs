mod extract;
mod migrate;
mod rollout;
mod scan_args;

use crate::Cli;
use crate::CommandResult;
use extract::ExtractCmd;
use migrate::MigrateCmd;
use rollout::RolloutCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "gqlmig")]
pub(crate) enum CommandEnum {
    /// Scan a source tree and report the embedded GraphQL operations.
    Extract(Box<ExtractCmd>),
    /// Run the full migration pipeline: extract, transform, score, apply.
    Migrate(Box<MigrateCmd>),
    /// Inspect or adjust rollout state for migrated operations.
    Rollout(Box<RolloutCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Extract(cmd) => cmd.run(cli).await,
            Self::Migrate(cmd) => cmd.run(cli).await,
            Self::Rollout(cmd) => cmd.run(cli).await,
        }
    }
}
