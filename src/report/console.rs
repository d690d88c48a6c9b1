use crate::report::report_model::PortableReport;

// ============================================================================
// Console reporter — one-line terminal summary
// ============================================================================

/// Format a one-line summary of the report's counts.
///
/// Produces output like:
/// ```text
/// 12 cases: 1 failed, 0 broken, 2 skipped, 9 passed, 0 unknown
/// ```
pub fn format_console_summary(report: &PortableReport) -> String {
    let parts: Vec<String> = report
        .totals
        .iter()
        .map(|(status, count)| format!("{} {}", count, status))
        .collect();

    format!("{} cases: {}", report.total(), parts.join(", "))
}
