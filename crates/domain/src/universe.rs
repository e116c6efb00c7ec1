use std::fmt::{Display, Formatter};

use audentra_core::{AppError, AppResult};

/// Risk tier assigned to an audit unit by the upstream scoring pipeline.
///
/// The engine never re-derives categories; free-text labels are normalized
/// to Title Case and anything outside the three tiers collapses to
/// [`RiskCategory::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskCategory {
    /// High-risk tier, eligible for the hybrid random selection rule.
    High,
    /// Medium-risk tier.
    Medium,
    /// Low-risk tier.
    Low,
    /// Unrecognized or missing category; never pooled for selection.
    Unknown,
}

impl RiskCategory {
    /// Normalizes a free-text label into a category.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match title_case(label).as_str() {
            "High" => Self::High,
            "Medium" => Self::Medium,
            "Low" => Self::Low,
            _ => Self::Unknown,
        }
    }

    /// Returns the canonical report label for this category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns the three allocatable tiers in report column order.
    #[must_use]
    pub fn tiers() -> &'static [Self] {
        const TIERS: &[RiskCategory] = &[
            RiskCategory::High,
            RiskCategory::Medium,
            RiskCategory::Low,
        ];

        TIERS
    }
}

impl Display for RiskCategory {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Stable identifier of an audit unit: its ingestion ordinal.
///
/// Ingestion order doubles as the documented tie-break for equal ratings,
/// so the ordinal must never be reassigned after load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(usize);

impl UnitId {
    /// Creates a unit identifier from an ingestion ordinal.
    #[must_use]
    pub fn new(ordinal: usize) -> Self {
        Self(ordinal)
    }

    /// Returns the ingestion ordinal.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for UnitId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// One audit-eligible entity with its pre-scored rating and category.
///
/// The selection pair `selected`/`assigned_days` starts at `false`/`0` and
/// flips at most once per run, always through [`AuditUniverse::mark_selected`].
#[derive(Debug, Clone, PartialEq)]
pub struct AuditUnit {
    unit_id: UnitId,
    department: String,
    section: String,
    risk_category: RiskCategory,
    rating: f64,
    selected: bool,
    assigned_days: f64,
}

impl AuditUnit {
    /// Creates an unselected audit unit.
    #[must_use]
    pub fn new(
        unit_id: UnitId,
        department: impl Into<String>,
        section: impl Into<String>,
        risk_category: RiskCategory,
        rating: f64,
    ) -> Self {
        Self {
            unit_id,
            department: department.into(),
            section: section.into(),
            risk_category,
            rating,
            selected: false,
            assigned_days: 0.0,
        }
    }

    /// Returns the stable unit identifier.
    #[must_use]
    pub fn unit_id(&self) -> UnitId {
        self.unit_id
    }

    /// Returns the owning department name as ingested.
    #[must_use]
    pub fn department(&self) -> &str {
        self.department.as_str()
    }

    /// Returns the section name as ingested.
    #[must_use]
    pub fn section(&self) -> &str {
        self.section.as_str()
    }

    /// Returns the assigned risk category.
    #[must_use]
    pub fn risk_category(&self) -> RiskCategory {
        self.risk_category
    }

    /// Returns the continuous risk rating used for ranking.
    #[must_use]
    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Returns whether this unit has been selected in the current run.
    #[must_use]
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Returns the manday cost committed to this unit, 0 until selected.
    #[must_use]
    pub fn assigned_days(&self) -> f64 {
        self.assigned_days
    }
}

/// The exclusive owner of all audit units for the duration of one run.
///
/// Selection state is the only mutable data in a run and every write goes
/// through [`AuditUniverse::mark_selected`], which rejects unknown ids and
/// double selection. The unit set is fixed at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditUniverse {
    units: Vec<AuditUnit>,
}

impl AuditUniverse {
    /// Creates a universe from units in ingestion order.
    ///
    /// Unit ids must equal their position so id lookups stay positional.
    pub fn new(units: Vec<AuditUnit>) -> AppResult<Self> {
        for (position, unit) in units.iter().enumerate() {
            if unit.unit_id().index() != position {
                return Err(AppError::Validation(format!(
                    "audit unit id '{}' does not match its ingestion position {position}",
                    unit.unit_id()
                )));
            }
        }

        Ok(Self { units })
    }

    /// Returns all units in ingestion order.
    #[must_use]
    pub fn units(&self) -> &[AuditUnit] {
        &self.units
    }

    /// Returns the number of units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns true when the universe holds no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Returns the unit with the given id, if any.
    #[must_use]
    pub fn unit(&self, unit_id: UnitId) -> Option<&AuditUnit> {
        self.units.get(unit_id.index())
    }

    /// Returns ids of all units in the given department, ingestion order.
    ///
    /// Department matching is case-insensitive; "Finance" and "FINANCE"
    /// address the same pool.
    #[must_use]
    pub fn department_pool(&self, department: &str) -> Vec<UnitId> {
        let needle = department.trim().to_lowercase();
        self.units
            .iter()
            .filter(|unit| unit.department().trim().to_lowercase() == needle)
            .map(AuditUnit::unit_id)
            .collect()
    }

    /// Returns ids of units in the given department and tier, ingestion order.
    #[must_use]
    pub fn tier_pool(&self, department: &str, tier: RiskCategory) -> Vec<UnitId> {
        let needle = department.trim().to_lowercase();
        self.units
            .iter()
            .filter(|unit| {
                unit.risk_category() == tier
                    && unit.department().trim().to_lowercase() == needle
            })
            .map(AuditUnit::unit_id)
            .collect()
    }

    /// Flips a unit to selected with the given manday cost.
    ///
    /// Fails with `NotFound` for unknown ids and `Conflict` when the unit
    /// was already selected; a unit is never unselected again.
    pub fn mark_selected(&mut self, unit_id: UnitId, assigned_days: f64) -> AppResult<()> {
        let unit = self.units.get_mut(unit_id.index()).ok_or_else(|| {
            AppError::NotFound(format!("audit unit '{unit_id}' does not exist"))
        })?;

        if unit.selected {
            return Err(AppError::Conflict(format!(
                "audit unit '{unit_id}' is already selected"
            )));
        }

        unit.selected = true;
        unit.assigned_days = assigned_days;
        Ok(())
    }

    /// Returns all currently selected units in ingestion order.
    pub fn selected_units(&self) -> impl Iterator<Item = &AuditUnit> {
        self.units.iter().filter(|unit| unit.is_selected())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{AuditUnit, AuditUniverse, RiskCategory, UnitId};

    fn unit(ordinal: usize, department: &str, category: RiskCategory) -> AuditUnit {
        AuditUnit::new(UnitId::new(ordinal), department, "Section A", category, 5.0)
    }

    #[test]
    fn category_labels_normalize_to_title_case() {
        assert_eq!(RiskCategory::from_label(" hIgH "), RiskCategory::High);
        assert_eq!(RiskCategory::from_label("medium"), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_label("LOW"), RiskCategory::Low);
        assert_eq!(RiskCategory::from_label("Very High"), RiskCategory::Unknown);
        assert_eq!(RiskCategory::from_label(""), RiskCategory::Unknown);
    }

    #[test]
    fn universe_rejects_out_of_order_ids() {
        let result = AuditUniverse::new(vec![unit(1, "Finance", RiskCategory::High)]);
        assert!(result.is_err());
    }

    #[test]
    fn mark_selected_flips_exactly_once() {
        let mut universe = AuditUniverse::new(vec![unit(0, "Finance", RiskCategory::High)])
            .unwrap_or_else(|_| unreachable!());

        assert!(universe.mark_selected(UnitId::new(0), 20.0).is_ok());
        let selected = universe.unit(UnitId::new(0));
        assert!(selected.is_some_and(AuditUnit::is_selected));
        assert!(selected.is_some_and(|u| u.assigned_days() == 20.0));

        assert!(universe.mark_selected(UnitId::new(0), 20.0).is_err());
        assert!(universe.mark_selected(UnitId::new(7), 20.0).is_err());
    }

    #[test]
    fn pools_match_departments_case_insensitively() {
        let universe = AuditUniverse::new(vec![
            unit(0, "Finance", RiskCategory::High),
            unit(1, "FINANCE", RiskCategory::Medium),
            unit(2, "Health", RiskCategory::High),
        ])
        .unwrap_or_else(|_| unreachable!());

        assert_eq!(
            universe.department_pool("finance"),
            vec![UnitId::new(0), UnitId::new(1)]
        );
        assert_eq!(
            universe.tier_pool("Finance", RiskCategory::High),
            vec![UnitId::new(0)]
        );
        assert!(universe.tier_pool("Finance", RiskCategory::Low).is_empty());
    }

    proptest! {
        #[test]
        fn from_label_never_panics_and_is_idempotent(label in ".{0,40}") {
            let category = RiskCategory::from_label(&label);
            prop_assert_eq!(RiskCategory::from_label(category.as_str()), category);
        }

        #[test]
        fn tier_labels_survive_case_and_padding(
            padding_left in " {0,3}",
            label in prop::sample::select(vec!["high", "HIGH", "High", "hIgH", "medium", "MEDIUM", "low", "Low"]),
            padding_right in " {0,3}",
        ) {
            let padded = format!("{padding_left}{label}{padding_right}");
            prop_assert_ne!(RiskCategory::from_label(&padded), RiskCategory::Unknown);
        }
    }
}
