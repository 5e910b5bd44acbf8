use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::output_utils;
use libgqlmig::rollout::FeatureFlag;
use libgqlmig::rollout::ProgressiveMigration;
use libgqlmig::rollout::RolloutError;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct RolloutCmd {
    #[command(subcommand)]
    action: RolloutAction,

    #[arg(
        help="Path of the JSON file holding persisted rollout state.",
        long,
        default_value="rollout-state.json",
    )]
    state: PathBuf,
}

#[derive(Debug, clap::Subcommand)]
enum RolloutAction {
    /// Create a feature flag for an operation (disabled, 0%).
    Create {
        operation: String,
    },
    /// Raise an operation's rollout percentage by a bounded increment.
    Increase {
        operation: String,
        #[arg(help="Percentage points to add (default 10).", long)]
        delta: Option<u8>,
    },
    /// Disable routing while preserving the percentage for resumption.
    Pause {
        operation: String,
    },
    /// Disable and reset an operation to 0%.
    Rollback {
        operation: String,
    },
    /// Replace an operation's segment list and force it on.
    Segments {
        operation: String,
        segments: Vec<String>,
    },
    /// Begin routing a percentage of traffic to the migrated operation.
    Start {
        operation: String,
        #[arg(help="Rollout percentage (0-100).", long, default_value_t=10)]
        percentage: u8,
    },
    /// Print every flag's current state.
    Status,
}

#[inherent::inherent]
impl RunnableCommand for RolloutCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let manager = match load_state(&self.state) {
            Ok(manager) => manager,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} Failed to load rollout state from {}: {e}",
                    output_utils::RED_X,
                    self.state.display(),
                ));
            },
        };

        let outcome: Result<String, RolloutError> = match &self.action {
            RolloutAction::Create { operation } => {
                let flag = manager.create_feature_flag(operation);
                Ok(format!("flag `{}` ready (disabled, 0%)", flag.name))
            },
            RolloutAction::Increase { operation, delta } => manager
                .increase_rollout(operation, *delta)
                .map(|pct| format!("`{operation}` now at {pct}%")),
            RolloutAction::Pause { operation } => manager
                .pause_rollout(operation)
                .map(|_| format!("`{operation}` paused")),
            RolloutAction::Rollback { operation } => manager
                .rollback_operation(operation)
                .map(|_| format!("`{operation}` rolled back to disabled/0%")),
            RolloutAction::Segments { operation, segments } => manager
                .enable_for_segments(operation, segments)
                .map(|_| {
                    format!("`{operation}` enabled for [{}]", segments.join(", "))
                }),
            RolloutAction::Start { operation, percentage } => manager
                .start_rollout(operation, *percentage)
                .map(|_| format!("`{operation}` rolling out at {percentage}%")),
            RolloutAction::Status => {
                let flags = manager.flags();
                if flags.is_empty() {
                    Ok("no flags".to_string())
                } else {
                    Ok(flags
                        .iter()
                        .map(render_flag)
                        .collect::<Vec<_>>()
                        .join("\n"))
                }
            },
        };

        let message = match outcome {
            Ok(message) => message,
            Err(e) => {
                return CommandResult::stderr(format_args!(
                    "{} {e}",
                    output_utils::RED_X,
                ));
            },
        };

        if !matches!(self.action, RolloutAction::Status) {
            if let Err(e) = save_state(&self.state, &manager) {
                return CommandResult::stderr(format_args!(
                    "{} Failed to persist rollout state to {}: {e}",
                    output_utils::RED_X,
                    self.state.display(),
                ));
            }
        }

        CommandResult::stdout(format_args!(
            "{} {message}",
            output_utils::GREEN_CHECK,
        ))
    }
}

fn render_flag(flag: &FeatureFlag) -> String {
    format!(
        "{}: {} at {}%{}",
        flag.operation_id,
        if flag.enabled { "enabled" } else { "disabled" },
        flag.rollout_percentage,
        if flag.enabled_segments.is_empty() {
            String::new()
        } else {
            format!(" (segments: {})", flag.enabled_segments.join(", "))
        },
    )
}

fn load_state(path: &Path) -> anyhow::Result<ProgressiveMigration> {
    if !path.exists() {
        return Ok(ProgressiveMigration::new());
    }
    let json = std::fs::read_to_string(path)?;
    let flags: Vec<FeatureFlag> = serde_json::from_str(&json)?;
    Ok(ProgressiveMigration::from_flags(flags))
}

fn save_state(path: &Path, manager: &ProgressiveMigration) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&manager.flags())?;
    std::fs::write(path, json)?;
    Ok(())
}
