//! Graph command executor

use std::fs::File;
use std::io::{self, BufWriter, Write};

use console::style;
use miette::{IntoDiagnostic, Result, WrapErr};

use crate::cli::GraphFormat;
use crate::config::GraphOptions;
use crate::executors::{CommandExecutor, run_analysis};
use crate::graph::{GraphRenderer, VisualizationGraph};

pub struct GraphExecutor;

impl CommandExecutor for GraphExecutor {
    type Config = GraphOptions;

    fn execute(config: Self::Config) -> Result<()> {
        eprintln!(
            "{} Generating {} cycle graph...",
            style("📊").cyan(),
            format!("{:?}", config.format).to_lowercase()
        );

        let detector = run_analysis(&config.paths, &config.root, &config.analysis, None)?;
        let graph = VisualizationGraph::from_cycles(detector.cycles());
        let renderer = GraphRenderer::default();

        // Determine output destination
        let mut output_writer: Box<dyn Write> = if let Some(output_path) = config.output.as_ref()
        {
            Box::new(BufWriter::new(
                File::create(output_path)
                    .into_diagnostic()
                    .wrap_err_with(|| {
                        format!("Failed to create output file '{}'", output_path.display())
                    })?,
            ))
        } else {
            Box::new(io::stdout())
        };

        match config.format {
            GraphFormat::Json => renderer
                .render_json(&graph, output_writer.as_mut())
                .wrap_err("Failed to render JSON graph")?,
            GraphFormat::Mermaid => renderer
                .render_mermaid(&graph, output_writer.as_mut())
                .wrap_err("Failed to render Mermaid graph")?,
            GraphFormat::Dot => renderer
                .render_dot(&graph, output_writer.as_mut())
                .wrap_err("Failed to render DOT graph")?,
        }
        output_writer.flush().into_diagnostic()?;

        if let Some(output_path) = config.output {
            eprintln!(
                "{} Graph written to {}",
                style("✓").green(),
                style(output_path.display()).bold()
            );
            let mut stderr = io::stderr();
            renderer.render_summary(&graph, &mut stderr)?;
        }

        Ok(())
    }
}
