use serde::{Deserialize, Serialize};

use crate::results::result_model::{StatusTotals, TestResultRecord};

/// Default document title.
pub const REPORT_TITLE: &str = "Portable Execution Report";

// ============================================================================
// Portable report — aggregates TestResultRecord instances for rendering
// ============================================================================

/// Aggregated, display-ordered view of one results directory.
///
/// Built from a `Vec<TestResultRecord>` via `from_records()`. Consumed by
/// the HTML and console reporters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortableReport {
    /// Heading shown at the top of the document
    pub title: String,

    /// Local timestamp, `YYYY-MM-DD HH:MM:SS`
    pub generated_at: String,

    /// Per-status counts
    pub totals: StatusTotals,

    /// Records sorted by status priority, then name
    pub rows: Vec<TestResultRecord>,
}

impl PortableReport {
    /// Build a report from loaded records, stamped with the current local time.
    pub fn from_records(records: Vec<TestResultRecord>) -> Self {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        Self::with_timestamp(records, generated_at)
    }

    /// Build a report with an explicit timestamp.
    ///
    /// Sorting is stable, so records with the same rank and name keep their
    /// file order.
    pub fn with_timestamp(mut records: Vec<TestResultRecord>, generated_at: impl Into<String>) -> Self {
        let totals = StatusTotals::from_records(&records);
        records.sort_by(|a, b| {
            a.sort_rank()
                .cmp(&b.sort_rank())
                .then_with(|| a.name.cmp(&b.name))
        });
        Self {
            title: REPORT_TITLE.to_string(),
            generated_at: generated_at.into(),
            totals,
            rows: records,
        }
    }

    /// Total number of test cases.
    pub fn total(&self) -> usize {
        self.rows.len()
    }
}
