//! Console report renderer for development. Logs reports to tracing output.

use audentra_application::ReportRenderer;
use audentra_core::AppResult;
use audentra_domain::AllocationReport;
use tracing::info;

/// Development renderer that logs allocation reports to the console.
///
/// The production renderer (workbook writing with selection highlighting)
/// lives outside this repository; this adapter keeps the port exercised in
/// local and batch runs.
#[derive(Clone)]
pub struct ConsoleReportRenderer;

impl ConsoleReportRenderer {
    /// Creates a new console report renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleReportRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for ConsoleReportRenderer {
    fn render(&self, report: &AllocationReport) -> AppResult<()> {
        info!(
            run_id = %report.run_id,
            allocated = report.summary.total_mandays_allocated,
            used = report.summary.total_mandays_used,
            utilization = report.summary.overall_utilization,
            selected_units = report.summary.selected_units,
            "allocation run complete"
        );

        info!(
            "--- AUDIT TRAIL (console) ---\n{}--- END AUDIT TRAIL ---",
            report.trail.to_text()
        );

        Ok(())
    }
}
