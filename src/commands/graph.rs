//! Graph command implementation

use miette::{Result, WrapErr};

use crate::cli::Commands;
use crate::common::{ConfigBuilder, FromCommand};
use crate::config::GraphOptions;
use crate::error::CycleRadarError;

impl FromCommand for GraphOptions {
    fn from_command(command: Commands) -> Result<Self, CycleRadarError> {
        match command {
            Commands::Graph {
                common,
                format,
                output,
            } => GraphOptions::builder()
                .with_analysis(common.resolve_analysis_config()?)
                .with_root(common.get_root())
                .with_paths(common.paths)
                .with_format(format)
                .with_output(output)
                .build(),
            _ => Err(CycleRadarError::ConfigurationError {
                message: "Invalid command type for GraphOptions".to_string(),
            }),
        }
    }
}

crate::impl_try_from_command!(GraphOptions);

/// Execute the graph command for rendering detected cycles
pub fn execute_graph_command(command: Commands) -> Result<()> {
    let config = GraphOptions::from_command(command)
        .wrap_err("Failed to parse graph command configuration")?;

    use crate::executors::CommandExecutor;
    use crate::executors::graph::GraphExecutor;
    GraphExecutor::execute(config)
}
