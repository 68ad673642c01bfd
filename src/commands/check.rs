//! Check command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::CheckCyclesConfig;
use crate::error::CycleRadarError;

impl FromCommand for CheckCyclesConfig {
    fn from_command(command: Commands) -> Result<Self, CycleRadarError> {
        match command {
            Commands::Check {
                common,
                format,
                cycle_display,
                error_on_cycles,
            } => CheckCyclesConfig::builder()
                .with_analysis(common.resolve_analysis_config()?)
                .with_root(common.get_root())
                .with_paths(common.paths)
                .with_format(format.format)
                .with_error_on_cycles(error_on_cycles)
                .with_max_cycles(cycle_display.max_cycles)
                .build(),
            _ => Err(CycleRadarError::ConfigurationError {
                message: "Invalid command type for CheckCyclesConfig".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(CheckCyclesConfig);

/// Execute the check command for detecting circular dependencies
pub fn execute_check_command(command: Commands) -> Result<()> {
    let config = CheckCyclesConfig::from_command(command)
        .wrap_err("Failed to parse check command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::check::CheckExecutor;
    CheckExecutor::execute(config)
}
