use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::common::{CommonArgs, CycleDisplayArgs, FormatArgs};

#[derive(Parser)]
#[command(
    name = "cycle-radar",
    about = "📡 Detect and rank circular file dependencies",
    long_about = "cycle-radar reads entity manifests (files and the files they import), builds \
                  a file dependency graph and finds the circular dependencies in it. Cycles from \
                  an optional external detector and from internal graph analysis are merged, \
                  scored and ranked so the most expensive ones come first.",
    subcommand_required = true,
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find circular dependencies and report them
    ///
    /// Loads the manifests, runs every enabled detector and prints the
    /// scored cycles, most severe first.
    #[command(
        long_about = "Detect circular file dependencies. Strongly connected components are found \
                      with Tarjan's algorithm and a representative cycle is extracted from each; \
                      a bounded depth-first search adds the shorter cycles inside them. If an \
                      external detector is enabled its cycles take precedence. Every cycle is \
                      scored for severity, refactoring difficulty and suggested break points."
    )]
    Check {
        #[command(flatten)]
        common: CommonArgs,

        #[command(flatten)]
        format: FormatArgs,

        #[command(flatten)]
        cycle_display: CycleDisplayArgs,

        /// Exit with error code if cycles found
        #[arg(long, env = "CYCLE_RADAR_ERROR_ON_CYCLES")]
        error_on_cycles: bool,
    },

    /// Render the detected cycles as a graph
    ///
    /// Produces a graph of the files that take part in a cycle and the
    /// edges between them, annotated with severity and weight.
    #[command(
        long_about = "Render the circular dependencies as a graph. JSON output lists nodes and \
                      edges for other tools; Mermaid and Graphviz DOT output can be pasted into \
                      documentation or rendered directly. Edges are coloured by the severity of \
                      the cycle they belong to."
    )]
    Graph {
        #[command(flatten)]
        common: CommonArgs,

        /// Graph format
        #[arg(
            short,
            long,
            value_enum,
            default_value = crate::constants::output::DEFAULT_GRAPH_FORMAT,
            env = "CYCLE_RADAR_GRAPH_FORMAT"
        )]
        format: GraphFormat,

        /// Output file (stdout if not specified)
        #[arg(short, long, env = "CYCLE_RADAR_OUTPUT")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "github")]
    GitHub,
}

#[derive(Clone, Copy, Debug, PartialEq, clap::ValueEnum)]
pub enum GraphFormat {
    Json,
    Mermaid,
    Dot,
}
