//! The allocation run orchestrator.

use std::sync::Arc;

use audentra_core::{AppResult, RunId};
use audentra_domain::{
    AllocationReport, AuditUniverse, DepartmentAllocationResult, ParameterTable, RiskCategory,
};
use chrono::Utc;

use crate::report_ports::ReportRenderer;
use crate::rounding::{round_half_to_even, round_to_tenth};

mod aggregate;
mod selection;

/// Application service that runs one allocation pass: per-department target
/// derivation, tier-by-tier unit selection and final aggregation.
///
/// A run is a single-threaded synchronous batch computation over one input
/// snapshot; the service takes the universe by value so selection state is
/// owned exclusively for the duration of the run.
#[derive(Clone, Default)]
pub struct AllocationService {
    renderer: Option<Arc<dyn ReportRenderer>>,
}

impl AllocationService {
    /// Creates an allocation service.
    #[must_use]
    pub fn new() -> Self {
        Self { renderer: None }
    }

    /// Adds an optional report renderer invoked after each run.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn ReportRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Runs one full allocation pass.
    ///
    /// Departments are processed in parameter-table order, tiers in
    /// High/Medium/Low order within a department. Departments with a zero
    /// budget percentage are skipped; departments with no units in the
    /// universe get a target-only result and a warning trail line.
    pub fn run(
        &self,
        parameters: &ParameterTable,
        mut universe: AuditUniverse,
    ) -> AppResult<AllocationReport> {
        let run_id = RunId::new();
        let generated_at = Utc::now();
        let total_mandays = parameters.total_mandays();

        let mut lines: Vec<String> = Vec::new();
        let mut department_summary: Vec<DepartmentAllocationResult> = Vec::new();

        for parameter in parameters.parameters() {
            if parameter.percentage_of_budget() == 0.0 {
                continue;
            }

            let department = parameter.department();
            let department_budget =
                round_half_to_even(total_mandays * parameter.percentage_of_budget() / 100.0);

            if universe.department_pool(department).is_empty() {
                lines.push(format!(
                    "WARNING {department}: No matching audit units found."
                ));
                department_summary.push(DepartmentAllocationResult {
                    department: department.to_owned(),
                    target_mandays: department_budget,
                    used_mandays: 0.0,
                    utilization_pct: 0.0,
                });
                continue;
            }

            let mut used_total = 0.0;
            let mut tier_counts = [0_usize; 3];

            for (slot, &tier) in RiskCategory::tiers().iter().enumerate() {
                let tier_target =
                    round_half_to_even(department_budget * parameter.tier_share(tier) / 100.0);
                let pool = universe.tier_pool(department, tier);
                let outcome = selection::select_tier_units(
                    &mut universe,
                    pool,
                    tier_target,
                    parameter.tier_days(tier),
                    tier,
                    department,
                    &mut lines,
                )?;

                used_total += outcome.mandays_used;
                tier_counts[slot] = outcome.units_selected;
            }

            let utilization = if department_budget > 0.0 {
                round_to_tenth(used_total / department_budget * 100.0)
            } else {
                0.0
            };

            lines.push(format!(
                "{department:<10} | Target={department_budget:5.0} | Used={used_total:5.0} | Util={utilization:5.1}% | H:{} M:{} L:{}",
                tier_counts[0], tier_counts[1], tier_counts[2]
            ));
            department_summary.push(DepartmentAllocationResult {
                department: department.to_owned(),
                target_mandays: department_budget,
                used_mandays: used_total,
                utilization_pct: utilization,
            });
        }

        let report = aggregate::assemble_report(
            run_id,
            generated_at,
            total_mandays,
            &universe,
            department_summary,
            lines,
        );

        if let Some(renderer) = &self.renderer {
            renderer.render(&report)?;
        }

        Ok(report)
    }
}
