//! Post-selection aggregation: utilization, crosstabs and the trail.

use std::collections::BTreeMap;

use audentra_core::RunId;
use audentra_domain::{
    AllocationReport, AuditTrail, AuditUniverse, DepartmentAllocationResult,
    DepartmentCategoryRow, RiskCategory, RunSummary, SectionCrosstabRow, SelectionResultRow,
};
use chrono::{DateTime, Utc};

use crate::rounding::round_to_tenth;

/// Assembles the full report from the mutated universe and the per-run
/// department results and trail lines.
pub(super) fn assemble_report(
    run_id: RunId,
    generated_at: DateTime<Utc>,
    total_mandays: f64,
    universe: &AuditUniverse,
    department_summary: Vec<DepartmentAllocationResult>,
    lines: Vec<String>,
) -> AllocationReport {
    let total_allocated: f64 = department_summary
        .iter()
        .map(|result| result.target_mandays)
        .sum();
    let total_used: f64 = department_summary
        .iter()
        .map(|result| result.used_mandays)
        .sum();
    let overall_utilization = if total_allocated > 0.0 {
        round_to_tenth(total_used / total_allocated * 100.0)
    } else {
        0.0
    };

    let results: Vec<SelectionResultRow> = universe
        .units()
        .iter()
        .map(|unit| SelectionResultRow {
            department: unit.department().to_owned(),
            section: unit.section().to_owned(),
            risk_category: unit.risk_category().as_str().to_owned(),
            rating: unit.rating(),
            selected: if unit.is_selected() { "Yes" } else { "No" }.to_owned(),
            party_days: unit.assigned_days(),
        })
        .collect();

    // zero-filled tier counts keyed by section and by department; BTreeMap
    // keeps group keys in ascending order for deterministic row sets
    let mut section_counts: BTreeMap<String, [usize; 3]> = BTreeMap::new();
    let mut department_counts: BTreeMap<String, [usize; 3]> = BTreeMap::new();
    let mut risk_breakdown: BTreeMap<String, usize> = BTreeMap::new();
    let mut selected_units = 0_usize;

    for unit in universe.selected_units() {
        selected_units += 1;
        *risk_breakdown
            .entry(unit.risk_category().as_str().to_owned())
            .or_insert(0) += 1;

        if let Some(slot) = tier_slot(unit.risk_category()) {
            section_counts
                .entry(unit.section().to_owned())
                .or_insert([0; 3])[slot] += 1;
            department_counts
                .entry(unit.department().to_owned())
                .or_insert([0; 3])[slot] += 1;
        }
    }

    let section_analysis: Vec<SectionCrosstabRow> = section_counts
        .into_iter()
        .map(|(section, [high, medium, low])| SectionCrosstabRow {
            section,
            high,
            medium,
            low,
        })
        .collect();

    let department_category_summary: Vec<DepartmentCategoryRow> = department_counts
        .into_iter()
        .map(|(department, [high, medium, low])| DepartmentCategoryRow {
            department,
            high,
            medium,
            low,
            total_selected_units: high + medium + low,
        })
        .collect();

    let trail = AuditTrail::new(
        run_id,
        generated_at,
        total_mandays,
        lines,
        total_allocated,
        total_used,
        overall_utilization,
    );

    let summary = RunSummary {
        total_mandays_allocated: total_allocated,
        total_mandays_used: total_used,
        overall_utilization,
        selected_units,
        risk_breakdown,
        department_summary: department_summary.clone(),
        section_analysis: section_analysis.clone(),
    };

    AllocationReport {
        run_id,
        generated_at,
        results,
        department_summary,
        section_analysis,
        department_category_summary,
        trail,
        summary,
    }
}

fn tier_slot(category: RiskCategory) -> Option<usize> {
    match category {
        RiskCategory::High => Some(0),
        RiskCategory::Medium => Some(1),
        RiskCategory::Low => Some(2),
        RiskCategory::Unknown => None,
    }
}
