//! GitHub Actions format report generation
//!
//! Emits workflow commands, so cycles show up as annotations on the files
//! involved.

use std::fmt::Write;

use super::ReportGenerator;
use crate::core::Severity;
use crate::detector::CycleDetector;
use crate::error::CycleRadarError;
use crate::graph::base_name;
use crate::utils::string::pluralize;

pub struct GitHubReportGenerator;

impl Default for GitHubReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

/// Escape the message part of a workflow command
fn escape_data(text: &str) -> String {
    text.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a `key=value` property of a workflow command
fn escape_property(text: &str) -> String {
    escape_data(text).replace(':', "%3A").replace(',', "%2C")
}

impl ReportGenerator for GitHubReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CycleRadarError> {
        let mut output = String::new();

        if !detector.has_cycles() {
            writeln!(
                output,
                "::notice title=Dependency Check::No circular dependencies detected! ✅"
            )?;
            return Ok(output);
        }

        writeln!(
            output,
            "::error title=Circular Dependencies::Found {} circular dependency {}",
            detector.cycle_count(),
            pluralize("cycle", detector.cycle_count())
        )?;

        for (i, cycle) in detector.cycles().iter().enumerate() {
            let level = match cycle.severity() {
                Severity::High | Severity::Critical => "error",
                Severity::Low | Severity::Medium => "warning",
            };
            let chain: Vec<&str> = cycle.cycle().iter().map(|p| base_name(p)).collect();
            let file = cycle.files().first().map(String::as_str).unwrap_or_default();

            writeln!(
                output,
                "::{} file={},title={}::{}",
                level,
                escape_property(file),
                escape_property(&format!("Cycle {} ({})", i + 1, cycle.severity())),
                escape_data(&format!(
                    "{} (weight {}, {} {})",
                    chain.join(" → "),
                    cycle.weight(),
                    cycle.depth(),
                    pluralize("file", cycle.depth())
                ))
            )?;

            if let Some(point) = cycle.break_points().first() {
                writeln!(
                    output,
                    "::notice file={},title={}::{}",
                    escape_property(&point.from),
                    escape_property(&format!("Cycle {} break point", i + 1)),
                    escape_data(&format!(
                        "Remove the dependency on {} ({}): {}",
                        point.to, point.difficulty, point.suggestion
                    ))
                )?;
            }
        }

        writeln!(
            output,
            "::notice title=Recommendation::Extract shared code into a separate module that both \
             sides can depend on."
        )?;

        Ok(output)
    }
}
