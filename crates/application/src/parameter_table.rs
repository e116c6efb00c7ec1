//! Builder for the department parameters table.
//!
//! The raw table carries positional columns
//! `[Department, Percentage, HighDays, MediumDays, LowDays, HighPct, MedPct, LowPct]`
//! and a trailer row whose second column holds the grand total mandays.

use audentra_core::{AppError, AppResult};
use audentra_domain::{AllocationParameter, ParameterTable, RawTable};

const DEPARTMENT_COLUMN: usize = 0;
const PERCENTAGE_COLUMN: usize = 1;
const HIGH_DAYS_COLUMN: usize = 2;
const MEDIUM_DAYS_COLUMN: usize = 3;
const LOW_DAYS_COLUMN: usize = 4;
const HIGH_PCT_COLUMN: usize = 5;
const MEDIUM_PCT_COLUMN: usize = 6;
const LOW_PCT_COLUMN: usize = 7;

/// Normalizes raw parameter rows into typed allocation targets.
///
/// The grand total is the last row whose percentage column parses as
/// numeric; rows after it are discarded and rows before it become
/// candidate parameter rows. A leading header row (first cell starting
/// with "department", any case) is dropped, as is any candidate whose
/// percentage cell is non-numeric. Every other numeric cell defaults to 0
/// on parse failure; only a missing grand total aborts the run.
pub fn build_parameter_table(raw: &RawTable) -> AppResult<ParameterTable> {
    let total_row = (0..raw.row_count())
        .rev()
        .find(|&row| raw.cell(row, PERCENTAGE_COLUMN).as_number().is_some())
        .ok_or_else(|| {
            AppError::Validation(
                "no numeric value found in parameters column 1 to detect total mandays".to_owned(),
            )
        })?;

    let total_mandays = raw
        .cell(total_row, PERCENTAGE_COLUMN)
        .as_number()
        .unwrap_or(0.0);

    let mut first_candidate = 0;
    let has_header = total_row > 0
        && raw
            .cell(0, DEPARTMENT_COLUMN)
            .as_text()
            .is_some_and(|text| text.to_lowercase().starts_with("department"));
    if has_header {
        first_candidate = 1;
    }

    let mut parameters = Vec::new();
    for row in first_candidate..total_row {
        // blank separator rows have no numeric percentage and are skipped
        let Some(percentage) = raw.cell(row, PERCENTAGE_COLUMN).as_number() else {
            continue;
        };

        let department = raw
            .cell(row, DEPARTMENT_COLUMN)
            .as_text()
            .unwrap_or_default();

        parameters.push(AllocationParameter::new(
            department,
            percentage,
            raw.cell(row, HIGH_DAYS_COLUMN).as_number().unwrap_or(0.0),
            raw.cell(row, MEDIUM_DAYS_COLUMN).as_number().unwrap_or(0.0),
            raw.cell(row, LOW_DAYS_COLUMN).as_number().unwrap_or(0.0),
            raw.cell(row, HIGH_PCT_COLUMN).as_number().unwrap_or(0.0),
            raw.cell(row, MEDIUM_PCT_COLUMN).as_number().unwrap_or(0.0),
            raw.cell(row, LOW_PCT_COLUMN).as_number().unwrap_or(0.0),
        ));
    }

    Ok(ParameterTable::new(total_mandays, parameters))
}
