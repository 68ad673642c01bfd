//! Configuration constants for cycle-radar
//!
//! Defaults used when neither the CLI nor a configuration file overrides a
//! value.

use std::time::Duration;

/// Cycle analysis defaults
pub mod analysis {
    /// Longest cycle the bounded depth-first finder will report
    pub const DEFAULT_MAX_CYCLE_LENGTH: usize = 10;

    /// Cycles lighter than this are not reported (0 reports everything)
    pub const DEFAULT_WEIGHT_THRESHOLD: usize = 0;

    /// Shortest possible cycle; self-loops are never modeled
    pub const MIN_CYCLE_LENGTH: usize = 2;
}

/// External cycle detector defaults
pub mod external {
    use super::*;

    /// Program invoked when the external detector is enabled
    pub const DEFAULT_PROGRAM: &str = "madge";

    /// Arguments passed before the analyzed directory
    pub const DEFAULT_ARGS: &[&str] = &["--circular", "--json"];

    /// Hard limit on the external detector's wall-clock time
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// How often the child process is polled for completion
    pub const POLL_INTERVAL: Duration = Duration::from_millis(25);
}

/// Progress bar configuration
pub mod progress {
    use super::*;

    /// Duration between progress bar updates
    pub const TICK_INTERVAL: Duration = Duration::from_millis(100);

    /// Spinner frames for the radar sweep animation
    pub const SPINNER_FRAMES: &[&str] = &["◜", "◠", "◝", "◞", "◡", "◟", "✓"];
}

/// Output formatting configuration
pub mod output {
    /// Default report format when not specified
    pub const DEFAULT_FORMAT: &str = "human";

    /// Default visualization format when not specified
    pub const DEFAULT_GRAPH_FORMAT: &str = "json";
}

/// Environment variable holding the tracing filter directive
pub const LOG_ENV: &str = "CYCLE_RADAR_LOG";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_constants() {
        assert_eq!(analysis::DEFAULT_MAX_CYCLE_LENGTH, 10);
        assert_eq!(analysis::DEFAULT_WEIGHT_THRESHOLD, 0);
        assert_eq!(analysis::MIN_CYCLE_LENGTH, 2);
    }

    #[test]
    fn test_external_constants() {
        assert_eq!(external::DEFAULT_TIMEOUT, Duration::from_secs(60));
        assert_eq!(external::DEFAULT_PROGRAM, "madge");
        assert!(external::POLL_INTERVAL < external::DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_output_constants() {
        assert_eq!(output::DEFAULT_FORMAT, "human");
        assert_eq!(output::DEFAULT_GRAPH_FORMAT, "json");
    }
}
