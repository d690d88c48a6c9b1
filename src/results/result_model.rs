use serde::{Deserialize, Serialize};

// ============================================================================
// Test status — fixed priority order used for both counting and sorting
// ============================================================================

/// Outcome category of one executed test case.
///
/// Declaration order is display priority: failures first, unknown last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TestStatus {
    Failed,
    Broken,
    Skipped,
    Passed,
    Unknown,
}

impl TestStatus {
    /// All statuses in priority order.
    pub const ORDER: [TestStatus; 5] = [
        TestStatus::Failed,
        TestStatus::Broken,
        TestStatus::Skipped,
        TestStatus::Passed,
        TestStatus::Unknown,
    ];

    /// Recognize one of the five status names. Anything else is `None`.
    pub fn parse(raw: &str) -> Option<TestStatus> {
        Self::ORDER.iter().copied().find(|s| s.as_str() == raw)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Failed => "failed",
            TestStatus::Broken => "broken",
            TestStatus::Skipped => "skipped",
            TestStatus::Passed => "passed",
            TestStatus::Unknown => "unknown",
        }
    }

    /// Position in `ORDER`.
    pub fn priority(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Test result record — one per parsed `*-result.json` file
// ============================================================================

/// One executed test case as read from a result file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResultRecord {
    /// Test name (falls back to the file stem)
    pub name: String,

    /// Status text exactly as recorded
    pub status: String,

    /// `suite` label, else `parentSuite`, else "-"
    pub suite: String,

    /// `package` label, else "-"
    pub package: String,

    /// `stop - start`, only when both timestamps were integers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<i64>,
}

impl TestResultRecord {
    /// Bucket this record is counted under.
    pub fn bucket(&self) -> TestStatus {
        TestStatus::parse(&self.status).unwrap_or(TestStatus::Unknown)
    }

    /// Display rank: the status priority, or past every known status when
    /// the status text is unrecognized.
    pub fn sort_rank(&self) -> usize {
        TestStatus::parse(&self.status)
            .map(|s| s.priority())
            .unwrap_or(TestStatus::ORDER.len())
    }

    /// Duration cell text: "<n> ms" or "-".
    pub fn duration_label(&self) -> String {
        match self.duration_ms {
            Some(ms) => format!("{} ms", ms),
            None => "-".to_string(),
        }
    }
}

// ============================================================================
// Status totals
// ============================================================================

/// Count of records per status bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusTotals {
    counts: [usize; 5],
}

impl StatusTotals {
    pub fn from_records(records: &[TestResultRecord]) -> Self {
        let mut totals = Self::default();
        for record in records {
            totals.counts[record.bucket().priority()] += 1;
        }
        totals
    }

    pub fn count(&self, status: TestStatus) -> usize {
        self.counts[status.priority()]
    }

    /// Sum over all five buckets.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// `(status, count)` pairs in priority order.
    pub fn iter(&self) -> impl Iterator<Item = (TestStatus, usize)> + '_ {
        TestStatus::ORDER.iter().map(|s| (*s, self.count(*s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, status: &str) -> TestResultRecord {
        TestResultRecord {
            name: name.to_string(),
            status: status.to_string(),
            suite: "-".to_string(),
            package: "-".to_string(),
            duration_ms: None,
        }
    }

    #[test]
    fn parse_known_statuses() {
        assert_eq!(TestStatus::parse("failed"), Some(TestStatus::Failed));
        assert_eq!(TestStatus::parse("unknown"), Some(TestStatus::Unknown));
        assert_eq!(TestStatus::parse("PASSED"), None);
        assert_eq!(TestStatus::parse("flaky"), None);
    }

    #[test]
    fn unrecognized_status_ranks_after_unknown() {
        assert_eq!(record("a", "unknown").sort_rank(), 4);
        assert_eq!(record("a", "flaky").sort_rank(), 5);
        assert_eq!(record("a", "flaky").bucket(), TestStatus::Unknown);
    }

    #[test]
    fn totals_sum_to_record_count() {
        let records = vec![
            record("a", "passed"),
            record("b", "failed"),
            record("c", "weird"),
            record("d", "passed"),
        ];
        let totals = StatusTotals::from_records(&records);
        assert_eq!(totals.total(), 4);
        assert_eq!(totals.count(TestStatus::Passed), 2);
        assert_eq!(totals.count(TestStatus::Failed), 1);
        assert_eq!(totals.count(TestStatus::Unknown), 1);
    }
}
