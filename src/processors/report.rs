use serde::Serialize;

use crate::models::InputRepresentation;
use crate::projection::ProjectedCrsId;

/// A row that could not be brought to a canonical point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowFailure {
    pub row_index: usize,
    pub reason: String,
}

/// Outcome of one `process` run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessingReport {
    pub representation: InputRepresentation,
    pub crs: Option<ProjectedCrsId>,
    pub total_rows: usize,
    pub kept_rows: usize,
    pub dropped_rows: usize,
    /// Kept rows whose UTM columns are undefined.
    pub auto_projection_failures: usize,
    /// Per-row reasons, only filled when failure tracking is enabled.
    pub failures: Vec<RowFailure>,
    pub warnings: Vec<String>,
}

impl ProcessingReport {
    pub fn new(representation: InputRepresentation, total_rows: usize) -> Self {
        Self {
            representation,
            crs: None,
            total_rows,
            kept_rows: 0,
            dropped_rows: 0,
            auto_projection_failures: 0,
            failures: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_drops(&self) -> bool {
        self.dropped_rows > 0
    }

    fn percentage(&self, count: usize) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            100.0 * count as f64 / self.total_rows as f64
        }
    }

    /// Human readable summary of the run.
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Coordinate Conversion Report ===\n");
        summary.push_str(&format!("Input: {}\n", self.representation));
        if let Some(crs) = self.crs {
            summary.push_str(&format!("Source CRS: {}\n", crs));
        }
        summary.push_str(&format!("Total Rows: {}\n", self.total_rows));
        summary.push_str(&format!(
            "Converted Rows: {} ({:.1}%)\n",
            self.kept_rows,
            self.percentage(self.kept_rows)
        ));
        summary.push_str(&format!(
            "Dropped Rows: {} ({:.1}%)\n",
            self.dropped_rows,
            self.percentage(self.dropped_rows)
        ));
        summary.push_str(&format!(
            "Rows without UTM output: {}\n",
            self.auto_projection_failures
        ));

        for warning in &self.warnings {
            summary.push_str(&format!("Warning: {}\n", warning));
        }

        if !self.failures.is_empty() {
            summary.push_str("\nFirst 10 Dropped Rows:\n");
            for (i, failure) in self.failures.iter().take(10).enumerate() {
                summary.push_str(&format!(
                    "  {}. Row {}: {}\n",
                    i + 1,
                    failure.row_index + 1,
                    failure.reason
                ));
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_lists_failures() {
        let mut report = ProcessingReport::new(InputRepresentation::Dms, 3);
        report.kept_rows = 2;
        report.dropped_rows = 1;
        report.failures.push(RowFailure {
            row_index: 1,
            reason: "Invalid DMS format: 'abc'".to_string(),
        });

        let summary = report.summary();
        assert!(summary.contains("Total Rows: 3"));
        assert!(summary.contains("Dropped Rows: 1 (33.3%)"));
        assert!(summary.contains("Row 2: Invalid DMS format"));
        assert!(report.has_drops());
    }

    #[test]
    fn test_summary_with_no_rows() {
        let report = ProcessingReport::new(InputRepresentation::Utm, 0);
        assert!(report.summary().contains("Converted Rows: 0 (0.0%)"));
    }
}
