use std::collections::BTreeMap;

use audentra_core::RunId;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One row of the results table: the ingested unit plus the two selection
/// columns consumed by the downstream highlighting renderer.
///
/// Field names serialize as the external column labels so renderers see the
/// same tabular contract whether the row came over JSON or a workbook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionResultRow {
    /// Owning department as ingested.
    #[serde(rename = "Department")]
    pub department: String,
    /// Section as ingested.
    #[serde(rename = "Section")]
    pub section: String,
    /// Normalized risk category label.
    #[serde(rename = "Audit Risk Category")]
    pub risk_category: String,
    /// Continuous risk rating used for ranking.
    #[serde(rename = "Total Rating")]
    pub rating: f64,
    /// "Yes" when the unit was selected, otherwise "No".
    #[serde(rename = "Selected")]
    pub selected: String,
    /// Mandays committed to the unit, 0 when not selected.
    #[serde(rename = "Party days")]
    pub party_days: f64,
}

/// Per-department allocation outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentAllocationResult {
    /// Department name from the parameter table.
    #[serde(rename = "Department")]
    pub department: String,
    /// Manday budget computed for the department.
    #[serde(rename = "Mandays_Allocated")]
    pub target_mandays: f64,
    /// Mandays actually consumed by selected units.
    #[serde(rename = "Mandays_Used")]
    pub used_mandays: f64,
    /// Used over target as a percentage, one decimal; 0 when the target is 0.
    #[serde(rename = "Utilization(%)")]
    pub utilization_pct: f64,
}

/// Selected-unit counts for one section, zero-filled across the tiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionCrosstabRow {
    /// Section name.
    #[serde(rename = "Section")]
    pub section: String,
    /// Selected High-tier units in the section.
    #[serde(rename = "High")]
    pub high: usize,
    /// Selected Medium-tier units in the section.
    #[serde(rename = "Medium")]
    pub medium: usize,
    /// Selected Low-tier units in the section.
    #[serde(rename = "Low")]
    pub low: usize,
}

/// Selected-unit counts for one department, zero-filled across the tiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentCategoryRow {
    /// Department name as ingested.
    #[serde(rename = "Department")]
    pub department: String,
    /// Selected High-tier units in the department.
    #[serde(rename = "High")]
    pub high: usize,
    /// Selected Medium-tier units in the department.
    #[serde(rename = "Medium")]
    pub medium: usize,
    /// Selected Low-tier units in the department.
    #[serde(rename = "Low")]
    pub low: usize,
    /// Sum of the three tier counts.
    #[serde(rename = "Total Selected Units")]
    pub total_selected_units: usize,
}

/// The machine-readable summary payload handed to external callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Sum of all department targets.
    pub total_mandays_allocated: f64,
    /// Sum of all department used mandays.
    pub total_mandays_used: f64,
    /// Overall used over allocated as a percentage, one decimal.
    pub overall_utilization: f64,
    /// Count of selected units across the whole universe.
    pub selected_units: usize,
    /// Selected-unit counts keyed by risk category label.
    pub risk_breakdown: BTreeMap<String, usize>,
    /// Per-department outcome rows in parameter-table order.
    pub department_summary: Vec<DepartmentAllocationResult>,
    /// Section crosstab rows, sections ascending.
    pub section_analysis: Vec<SectionCrosstabRow>,
}

/// The textual audit trail of one allocation run.
///
/// Auditors read this to re-derive every decision: the header discloses the
/// detected grand total, each selection line discloses counts and (for the
/// High-tier random branch) the department seed, and the footer restates
/// the totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditTrail {
    run_id: RunId,
    generated_at: DateTime<Utc>,
    total_mandays: f64,
    lines: Vec<String>,
    total_allocated: f64,
    total_used: f64,
    overall_utilization: f64,
}

impl AuditTrail {
    /// Creates a finished trail from the run's decision lines and totals.
    #[must_use]
    pub fn new(
        run_id: RunId,
        generated_at: DateTime<Utc>,
        total_mandays: f64,
        lines: Vec<String>,
        total_allocated: f64,
        total_used: f64,
        overall_utilization: f64,
    ) -> Self {
        Self {
            run_id,
            generated_at,
            total_mandays,
            lines,
            total_allocated,
            total_used,
            overall_utilization,
        }
    }

    /// Returns the run this trail belongs to.
    #[must_use]
    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    /// Returns the run timestamp.
    #[must_use]
    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Returns the grand total mandays detected from the parameter table.
    #[must_use]
    pub fn total_mandays(&self) -> f64 {
        self.total_mandays
    }

    /// Returns the per-decision trail lines in emission order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Renders the full trail text: header block, decision lines and the
    /// terminating total summary.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str("Audit Allocation Log\n");
        text.push_str(&format!("Run ID: {}\n", self.run_id));
        text.push_str(&format!(
            "Timestamp: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        ));
        text.push_str(&format!(
            "Total Mandays detected: {}\n\n",
            self.total_mandays
        ));

        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }

        text.push('\n');
        text.push_str(&"=".repeat(70));
        text.push('\n');
        text.push_str(&format!(
            "TOTAL SUMMARY: Allocated={} | Used={} | Utilization={}%\n",
            self.total_allocated, self.total_used, self.overall_utilization
        ));

        text
    }
}

/// Everything one allocation run produces for the external renderer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationReport {
    /// Identifier stamped on this run.
    pub run_id: RunId,
    /// When the run executed.
    pub generated_at: DateTime<Utc>,
    /// The full universe with the two selection columns appended.
    pub results: Vec<SelectionResultRow>,
    /// Per-department outcome table.
    pub department_summary: Vec<DepartmentAllocationResult>,
    /// Section by category crosstab over selected units.
    pub section_analysis: Vec<SectionCrosstabRow>,
    /// Department by category crosstab over selected units.
    pub department_category_summary: Vec<DepartmentCategoryRow>,
    /// The textual audit trail.
    pub trail: AuditTrail,
    /// The machine-readable summary payload.
    pub summary: RunSummary,
}
