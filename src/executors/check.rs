//! Check command executor

use console::style;
use miette::{Result, WrapErr};

use crate::cli::OutputFormat;
use crate::config::CheckCyclesConfig;
use crate::executors::{CommandExecutor, run_analysis};
use crate::progress::ProgressReporter;
use crate::reports::{
    GitHubReportGenerator, HumanReportGenerator, JsonReportGenerator, ReportGenerator,
};

pub struct CheckExecutor;

impl CommandExecutor for CheckExecutor {
    type Config = CheckCyclesConfig;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Checking for circular dependencies...\n",
            style("📡").cyan()
        );
        eprintln!(
            "  {} Internal analysis: {}",
            style("→").dim(),
            enabled(config.analysis.enable_internal_analysis)
        );
        eprintln!(
            "  {} External tool ({}): {}",
            style("→").dim(),
            config.analysis.external_tool.program,
            enabled(config.analysis.enable_external_tool)
        );
        eprintln!(
            "  {} Max cycle length: {}",
            style("→").dim(),
            style(config.analysis.max_cycle_length).bold()
        );

        let mut progress = ProgressReporter::for_terminal();
        let detector = run_analysis(
            &config.paths,
            &config.root,
            &config.analysis,
            progress.as_mut(),
        )?;

        let report = match config.format {
            OutputFormat::Human => {
                HumanReportGenerator::new(config.max_cycles).generate_report(&detector)
            }
            OutputFormat::Json => JsonReportGenerator::new().generate_report(&detector),
            OutputFormat::GitHub => GitHubReportGenerator::new().generate_report(&detector),
        }
        .wrap_err("Failed to generate report")?;
        print!("{report}");

        // Exit with error code if cycles found and requested
        if config.error_on_cycles && detector.has_cycles() {
            std::process::exit(1);
        }

        Ok(())
    }
}

fn enabled(on: bool) -> console::StyledObject<&'static str> {
    if on {
        style("yes").green()
    } else {
        style("no").red()
    }
}
