//! Human-readable console report generation

use std::fmt::Write;

use console::style;

use super::ReportGenerator;
use crate::core::Severity;
use crate::detector::{CycleDetector, DependencyCycle};
use crate::error::CycleRadarError;
use crate::graph::base_name;
use crate::utils::string::pluralize;

/// Break points listed per cycle
const BREAK_POINTS_SHOWN: usize = 3;

pub struct HumanReportGenerator {
    max_cycles: Option<usize>,
}

impl HumanReportGenerator {
    pub fn new(max_cycles: Option<usize>) -> Self {
        Self { max_cycles }
    }

    fn write_cycle(
        &self,
        output: &mut String,
        index: usize,
        cycle: &DependencyCycle,
    ) -> Result<(), CycleRadarError> {
        writeln!(
            output,
            "{} Cycle #{} {} {}",
            style("🔄").yellow(),
            index + 1,
            severity_badge(cycle.severity()),
            style(format!("({}, found by {})", cycle.id(), cycle.source())).dim()
        )?;

        let chain: Vec<&str> = cycle.cycle().iter().map(|p| base_name(p)).collect();
        writeln!(output, "  {}", style(chain.join(" → ")).bold())?;
        writeln!(
            output,
            "  {} {} {}, weight {}, ~{}h to refactor",
            style("📏").blue(),
            cycle.depth(),
            pluralize("file", cycle.depth()),
            cycle.weight(),
            cycle.impact().estimated_refactoring_hours
        )?;

        writeln!(output, "\n  {} Files involved:", style("📄").blue())?;
        for file in cycle.files() {
            writeln!(output, "    {} {}", style("•").dim(), file)?;
        }

        writeln!(output, "\n  {} Easiest places to break it:", style("✂").cyan())?;
        for point in cycle.break_points().iter().take(BREAK_POINTS_SHOWN) {
            writeln!(
                output,
                "    {} {} → {} ({} {}, {})",
                style("→").dim(),
                style(base_name(&point.from)).yellow(),
                style(base_name(&point.to)).yellow(),
                point.weight,
                pluralize("reference", point.weight),
                point.difficulty
            )?;
        }

        if !cycle.related_cycles().is_empty() {
            let related: Vec<&str> = cycle.related_cycles().iter().map(|id| id.as_str()).collect();
            writeln!(
                output,
                "\n  {} Shares files with: {}",
                style("🔗").cyan(),
                related.join(", ")
            )?;
        }

        writeln!(output)?;
        Ok(())
    }
}

fn severity_badge(severity: Severity) -> String {
    let label = format!("[{}]", severity.to_string().to_uppercase());
    match severity {
        Severity::Low => style(label).dim().to_string(),
        Severity::Medium => style(label).yellow().to_string(),
        Severity::High => style(label).red().to_string(),
        Severity::Critical => style(label).red().bold().to_string(),
    }
}

impl ReportGenerator for HumanReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CycleRadarError> {
        let mut output = String::new();

        if !detector.has_cycles() {
            write!(
                output,
                "\n{} No circular dependencies detected! Your files have a clean dependency \
                 structure.\n",
                style("✅").green().bold()
            )?;
            return Ok(output);
        }

        let total_cycles = detector.cycle_count();
        write!(
            output,
            "\n{} Found {} dependency {}:\n\n",
            style("❌").red().bold(),
            style(total_cycles).red().bold(),
            pluralize("cycle", total_cycles)
        )?;

        let limit = self.max_cycles.unwrap_or(total_cycles);
        for (i, cycle) in detector.cycles().iter().take(limit).enumerate() {
            self.write_cycle(&mut output, i, cycle)?;
        }

        if limit < total_cycles {
            writeln!(
                output,
                "{} Showing {} of {} cycles. Use --max-cycles to see more.",
                style("ℹ️").blue(),
                style(limit).yellow(),
                style(total_cycles).yellow()
            )?;
        }

        if let Some(cycle) = detector.cycles().first() {
            writeln!(output, "\n{} Suggestions:", style("💡").yellow())?;
            for suggestion in cycle.suggestions().iter().take(2) {
                writeln!(output, "  {} {}", style("•").dim(), suggestion)?;
            }
        }
        writeln!(
            output,
            "{} Breaking the lightest edge of each cycle is usually the cheapest fix.",
            style("💡").yellow()
        )?;

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::detector;

    #[test]
    fn test_no_cycles() {
        let detector = detector(&[("a.ts", &["b.ts"]), ("b.ts", &[])]);
        let report = HumanReportGenerator::new(None)
            .generate_report(&detector)
            .unwrap();
        assert!(report.contains("No circular dependencies detected"));
    }

    #[test]
    fn test_cycle_details() {
        let detector = detector(&[
            ("src/a.ts", &["src/b.ts"]),
            ("src/b.ts", &["src/c.ts"]),
            ("src/c.ts", &["src/a.ts"]),
        ]);
        let report = HumanReportGenerator::new(None)
            .generate_report(&detector)
            .unwrap();

        assert!(report.contains("Found"));
        assert!(report.contains("Cycle #1"));
        assert!(report.contains("MEDIUM"));
        assert!(report.contains("a.ts → b.ts → c.ts → a.ts"));
        assert!(report.contains("/repo/src/b.ts"));
        assert!(report.contains("3 files, weight 3"));
        assert!(report.contains("Easiest places to break it"));
    }

    #[test]
    fn test_max_cycles_truncates() {
        let detector = detector(&[
            ("a.ts", &["b.ts"]),
            ("b.ts", &["a.ts"]),
            ("x.ts", &["y.ts"]),
            ("y.ts", &["x.ts"]),
        ]);
        assert_eq!(detector.cycle_count(), 2);

        let report = HumanReportGenerator::new(Some(1))
            .generate_report(&detector)
            .unwrap();
        assert!(report.contains("Cycle #1"));
        assert!(!report.contains("Cycle #2"));
        assert!(report.contains("Showing 1 of 2 cycles"));
    }
}
