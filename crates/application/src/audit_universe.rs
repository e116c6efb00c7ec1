//! Builder for the audit universe table.
//!
//! The raw table may or may not lead with a header row; either way the four
//! fields the engine needs are read from fixed column positions.

use audentra_core::AppResult;
use audentra_domain::{AuditUnit, AuditUniverse, RawTable, RiskCategory, UnitId};

/// First-row values (case-insensitive, trimmed) that identify a header row.
const HEADER_VOCABULARY: &[&str] = &[
    "department",
    "audit risk category",
    "s.no",
    "name of auditable audit",
];

const DEPARTMENT_COLUMN: usize = 3;
const SECTION_COLUMN: usize = 5;
const RATING_COLUMN: usize = 7;
const CATEGORY_COLUMN: usize = 8;

/// Normalizes raw audit-unit rows into the typed, mutable universe.
///
/// Risk category text is Title-Case normalized, ratings coerce to numeric
/// with a 0 fallback, and reads beyond a row's width yield missing values.
/// Every unit starts unselected with 0 assigned days; ids are ingestion
/// ordinals.
pub fn build_audit_universe(raw: &RawTable) -> AppResult<AuditUniverse> {
    let has_header = raw.rows().first().is_some_and(|row| {
        row.iter().any(|cell| {
            cell.as_text()
                .is_some_and(|value| HEADER_VOCABULARY.contains(&value.to_lowercase().as_str()))
        })
    });

    let first_data_row = usize::from(has_header);
    let mut units = Vec::new();

    for row in first_data_row..raw.row_count() {
        let ordinal = units.len();
        let department = raw
            .cell(row, DEPARTMENT_COLUMN)
            .as_text()
            .unwrap_or_default();
        let section = raw.cell(row, SECTION_COLUMN).as_text().unwrap_or_default();
        let rating = raw.cell(row, RATING_COLUMN).as_number().unwrap_or(0.0);
        let category_label = raw
            .cell(row, CATEGORY_COLUMN)
            .as_text()
            .unwrap_or_default();

        units.push(AuditUnit::new(
            UnitId::new(ordinal),
            department,
            section,
            RiskCategory::from_label(&category_label),
            rating,
        ));
    }

    AuditUniverse::new(units)
}
