use serde::{Deserialize, Serialize};

static EMPTY_CELL: Cell = Cell::Empty;

/// One parsed cell from an upstream tabular source.
///
/// Workbook parsing is an external collaborator; the engine receives rows
/// already split into cells. Coercion is deliberately lenient: numeric text
/// counts as a number, and anything unparseable is simply absent rather than
/// an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Missing or blank cell.
    #[default]
    Empty,
    /// Numeric cell value.
    Number(f64),
    /// Textual cell value.
    Text(String),
}

impl Cell {
    /// Coerces the cell to a finite number, parsing numeric text.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Empty => None,
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|parsed| parsed.is_finite()),
        }
    }

    /// Coerces the cell to trimmed text, rendering numbers.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Number(value) => Some(value.to_string()),
            Self::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
        }
    }

    /// Returns true when the cell holds no usable value.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Number(_) => false,
            Self::Text(value) => value.trim().is_empty(),
        }
    }
}

/// A row-major table of parsed cells, the engine's input contract.
///
/// Fully blank rows are dropped at construction, matching how upstream
/// parsing discards separator rows before the engine ever sees them.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    rows: Vec<Vec<Cell>>,
}

impl RawTable {
    /// Creates a table from parsed rows, dropping fully blank ones.
    #[must_use]
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_blank()))
            .collect();

        Self { rows }
    }

    /// Returns the retained rows in original order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Returns the number of retained rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when no usable rows remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at the given position.
    ///
    /// Reads beyond the row or column bounds yield an empty cell, never an
    /// out-of-range failure.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&EMPTY_CELL)
    }
}
