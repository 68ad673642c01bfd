//! JSON format report generation

use serde_json::json;

use super::ReportGenerator;
use crate::detector::CycleDetector;
use crate::error::CycleRadarError;

pub struct JsonReportGenerator;

impl Default for JsonReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReportGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl ReportGenerator for JsonReportGenerator {
    fn generate_report(&self, detector: &CycleDetector) -> Result<String, CycleRadarError> {
        // Cycles keep detection order: external tool, then SCC, then DFS
        let report = json!({
            "has_cycles": detector.has_cycles(),
            "cycle_count": detector.cycle_count(),
            "cycles": detector.cycles(),
        });

        serde_json::to_string_pretty(&report).map_err(CycleRadarError::Json)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::reports::test_support::detector;

    #[test]
    fn test_json_report_no_cycles() {
        let detector = detector(&[("a.ts", &["b.ts"]), ("b.ts", &[])]);
        let report = JsonReportGenerator::new().generate_report(&detector).unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], false);
        assert_eq!(json["cycle_count"], 0);
        assert_eq!(json["cycles"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_json_report_cycle_shape() {
        let detector = detector(&[("a.ts", &["b.ts", "b.ts"]), ("b.ts", &["a.ts"])]);
        let report = JsonReportGenerator::new().generate_report(&detector).unwrap();
        let json: Value = serde_json::from_str(&report).unwrap();

        assert_eq!(json["has_cycles"], true);
        assert_eq!(json["cycle_count"], 1);

        let cycle = &json["cycles"][0];
        assert!(cycle["id"].as_str().unwrap().starts_with("cycle-"));
        assert_eq!(
            cycle["cycle"],
            serde_json::json!(["/repo/a.ts", "/repo/b.ts", "/repo/a.ts"])
        );
        assert_eq!(cycle["severity"], "medium");
        assert_eq!(cycle["depth"], 2);
        assert_eq!(cycle["files"], serde_json::json!(["/repo/a.ts", "/repo/b.ts"]));
        assert_eq!(cycle["source"], "scc");
        assert_eq!(cycle["weight"], 3);
        assert_eq!(cycle["impact"]["affectedFiles"], 2);
        assert_eq!(cycle["impact"]["estimatedRefactoringHours"], 4);
        assert_eq!(cycle["impact"]["riskLevel"], "medium");
        assert_eq!(cycle["impact"]["buildTimeImprovement"], "moderate");
        assert_eq!(cycle["breakPoints"][0]["from"], "/repo/b.ts");
        assert_eq!(cycle["breakPoints"][0]["difficulty"], "easy");
        assert_eq!(cycle["breakPoints"][1]["weight"], 2);
        assert_eq!(cycle["relatedCycles"], serde_json::json!([]));
        assert_eq!(cycle["suggestions"].as_array().unwrap().len(), 6);
    }
}
