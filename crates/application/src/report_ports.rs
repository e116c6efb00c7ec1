//! Ports for the external report boundary.

use audentra_core::AppResult;
use audentra_domain::AllocationReport;

/// Port for the downstream report renderer.
///
/// Workbook writing, selection highlighting and transport are collaborator
/// concerns behind this boundary; the engine only hands over the finished
/// report.
pub trait ReportRenderer: Send + Sync {
    /// Renders or forwards one finished allocation report.
    fn render(&self, report: &AllocationReport) -> AppResult<()>;
}
