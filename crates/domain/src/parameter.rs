use crate::RiskCategory;

/// Allocation inputs for one department: its share of the total manday
/// budget, the per-unit manday cost of each tier, and the share of the
/// department budget reserved per tier.
///
/// Values are carried as ingested; shares above 100 or aggregates beyond
/// the whole budget pass through unvalidated. A department with a zero
/// budget percentage is skipped entirely, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationParameter {
    department: String,
    percentage_of_budget: f64,
    high_days: f64,
    medium_days: f64,
    low_days: f64,
    high_pct: f64,
    medium_pct: f64,
    low_pct: f64,
}

impl AllocationParameter {
    /// Creates a department parameter row.
    #[allow(clippy::too_many_arguments)]
    #[must_use]
    pub fn new(
        department: impl Into<String>,
        percentage_of_budget: f64,
        high_days: f64,
        medium_days: f64,
        low_days: f64,
        high_pct: f64,
        medium_pct: f64,
        low_pct: f64,
    ) -> Self {
        Self {
            department: department.into(),
            percentage_of_budget,
            high_days,
            medium_days,
            low_days,
            high_pct,
            medium_pct,
            low_pct,
        }
    }

    /// Returns the department name, the case-insensitive pool key.
    #[must_use]
    pub fn department(&self) -> &str {
        self.department.as_str()
    }

    /// Returns this department's share of the total mandays, 0-100 scale.
    #[must_use]
    pub fn percentage_of_budget(&self) -> f64 {
        self.percentage_of_budget
    }

    /// Returns the manday cost of one audit unit in the given tier.
    ///
    /// The non-allocatable `Unknown` category has no cost and yields 0.
    #[must_use]
    pub fn tier_days(&self, tier: RiskCategory) -> f64 {
        match tier {
            RiskCategory::High => self.high_days,
            RiskCategory::Medium => self.medium_days,
            RiskCategory::Low => self.low_days,
            RiskCategory::Unknown => 0.0,
        }
    }

    /// Returns the share of the department budget reserved for the tier,
    /// 0-100 scale; 0 for `Unknown`.
    #[must_use]
    pub fn tier_share(&self, tier: RiskCategory) -> f64 {
        match tier {
            RiskCategory::High => self.high_pct,
            RiskCategory::Medium => self.medium_pct,
            RiskCategory::Low => self.low_pct,
            RiskCategory::Unknown => 0.0,
        }
    }
}

/// The normalized parameters table: department rows plus the grand total of
/// mandays detected from the trailer row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterTable {
    total_mandays: f64,
    parameters: Vec<AllocationParameter>,
}

impl ParameterTable {
    /// Creates a parameter table.
    #[must_use]
    pub fn new(total_mandays: f64, parameters: Vec<AllocationParameter>) -> Self {
        Self {
            total_mandays,
            parameters,
        }
    }

    /// Returns the grand total mandays for the whole run.
    #[must_use]
    pub fn total_mandays(&self) -> f64 {
        self.total_mandays
    }

    /// Returns the department rows in original table order.
    #[must_use]
    pub fn parameters(&self) -> &[AllocationParameter] {
        &self.parameters
    }
}
