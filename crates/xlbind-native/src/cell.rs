//! Cell values and sparse cell storage
//!
//! Only non-empty cells are stored, using a row-based BTreeMap structure so
//! that structural edits (row and column insertion or removal) can re-key
//! whole rows cheaply.

use std::collections::BTreeMap;

use crate::handle::{FontId, FormatId};
use crate::types::{CellType, ErrorType};

/// One run of a rich string
#[derive(Debug, Clone, PartialEq)]
pub struct RichRun {
    pub text: String,
    pub font: Option<FontId>,
}

/// Represents the value stored in a cell
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Formatted cell without a value
    Blank,

    /// Numeric value (dates are numbers too)
    Number(f64),

    /// Plain string
    String(String),

    /// String made of runs with their own fonts
    Rich(Vec<RichRun>),

    /// Boolean value
    Boolean(bool),

    /// Error value (#VALUE!, #REF!, etc.)
    Error(ErrorType),

    /// Formula with an optional cached result
    Formula {
        /// Formula text without the leading '='
        text: String,
        cached: Option<Box<CellValue>>,
    },
}

impl CellValue {
    /// Cell type as reported to callers; formulas report their cached result
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Blank => CellType::Blank,
            CellValue::Number(_) => CellType::Number,
            CellValue::String(_) | CellValue::Rich(_) => CellType::String,
            CellValue::Boolean(_) => CellType::Boolean,
            CellValue::Error(_) => CellType::Error,
            CellValue::Formula { cached, .. } => cached
                .as_deref()
                .map(CellValue::cell_type)
                .unwrap_or(CellType::Number),
        }
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula { .. })
    }

    /// The value itself, or a formula's cached result
    pub fn resolved(&self) -> &CellValue {
        match self {
            CellValue::Formula {
                cached: Some(v), ..
            } => v,
            other => other,
        }
    }

    /// Plain text of a string or rich string value
    pub fn as_text(&self) -> Option<String> {
        match self.resolved() {
            CellValue::String(s) => Some(s.clone()),
            CellValue::Rich(runs) => Some(runs.iter().map(|r| r.text.as_str()).collect()),
            _ => None,
        }
    }

    /// Try to get the value as a number
    pub fn as_number(&self) -> Option<f64> {
        match self.resolved() {
            CellValue::Number(n) => Some(*n),
            CellValue::Formula { .. } => Some(0.0),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self.resolved() {
            CellValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub value: CellValue,
    pub format: Option<FormatId>,
}

impl CellData {
    /// Create a new cell with a value and an optional format
    pub fn new(value: CellValue, format: Option<FormatId>) -> Self {
        Self { value, format }
    }
}

/// Sparse cell storage keyed by row, then column
#[derive(Debug, Clone, Default)]
pub struct CellStorage {
    rows: BTreeMap<i32, BTreeMap<i32, CellData>>,
}

impl CellStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: i32, col: i32) -> Option<&CellData> {
        self.rows.get(&row)?.get(&col)
    }

    /// Get a cell mutably
    pub fn get_mut(&mut self, row: i32, col: i32) -> Option<&mut CellData> {
        self.rows.get_mut(&row)?.get_mut(&col)
    }

    /// Store a cell, replacing whatever was there
    pub fn set(&mut self, row: i32, col: i32, data: CellData) {
        self.rows.entry(row).or_default().insert(col, data);
    }

    /// Remove a cell
    pub fn remove(&mut self, row: i32, col: i32) -> Option<CellData> {
        let cells = self.rows.get_mut(&row)?;
        let removed = cells.remove(&col);
        if cells.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    /// Number of stored cells
    pub fn len(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    /// Check whether no cell is stored
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bounds of the used area as `(first_row, last_row_exclusive, first_col, last_col_exclusive)`
    pub fn used_bounds(&self) -> Option<(i32, i32, i32, i32)> {
        let first_row = *self.rows.keys().next()?;
        let last_row = *self.rows.keys().next_back()?;
        let mut first_col = i32::MAX;
        let mut last_col = i32::MIN;
        for cells in self.rows.values() {
            if let (Some(f), Some(l)) = (cells.keys().next(), cells.keys().next_back()) {
                first_col = first_col.min(*f);
                last_col = last_col.max(*l);
            }
        }
        Some((first_row, last_row + 1, first_col, last_col + 1))
    }

    /// Clear every cell in a rectangle
    pub fn clear(&mut self, row_first: i32, row_last: i32, col_first: i32, col_last: i32) {
        for cells in self.rows.range_mut(row_first..=row_last).map(|(_, c)| c) {
            cells.retain(|col, _| !(col_first..=col_last).contains(col));
        }
        self.rows.retain(|_, cells| !cells.is_empty());
    }

    /// Shift rows `first..` down by `count`, dropping anything pushed past `limit`
    pub fn insert_rows(&mut self, first: i32, count: i32, limit: i32) {
        self.rows = shift_keys(std::mem::take(&mut self.rows), first, count, limit);
    }

    /// Delete rows `first..first+count` and shift the rest up
    pub fn remove_rows(&mut self, first: i32, count: i32) {
        self.rows = drop_keys(std::mem::take(&mut self.rows), first, count);
    }

    /// Shift columns `first..` right by `count`, dropping anything pushed past `limit`
    pub fn insert_cols(&mut self, first: i32, count: i32, limit: i32) {
        for cells in self.rows.values_mut() {
            *cells = shift_keys(std::mem::take(cells), first, count, limit);
        }
        self.rows.retain(|_, cells| !cells.is_empty());
    }

    /// Delete columns `first..first+count` and shift the rest left
    pub fn remove_cols(&mut self, first: i32, count: i32) {
        for cells in self.rows.values_mut() {
            *cells = drop_keys(std::mem::take(cells), first, count);
        }
        self.rows.retain(|_, cells| !cells.is_empty());
    }
}

/// Re-key a map for an insertion of `count` slots at `first`
pub(crate) fn shift_keys<V>(map: BTreeMap<i32, V>, first: i32, count: i32, limit: i32) -> BTreeMap<i32, V> {
    map.into_iter()
        .filter_map(|(k, v)| {
            if k < first {
                Some((k, v))
            } else {
                let moved = k + count;
                (moved < limit).then_some((moved, v))
            }
        })
        .collect()
}

/// Re-key a map for a removal of `count` slots at `first`
pub(crate) fn drop_keys<V>(map: BTreeMap<i32, V>, first: i32, count: i32) -> BTreeMap<i32, V> {
    map.into_iter()
        .filter_map(|(k, v)| {
            if k < first {
                Some((k, v))
            } else if k < first + count {
                None
            } else {
                Some((k - count, v))
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn num(n: f64) -> CellData {
        CellData::new(CellValue::Number(n), None)
    }

    #[test]
    fn test_insert_rows_shifts_down() {
        let mut storage = CellStorage::new();
        storage.set(2, 0, num(1.0));
        storage.set(7, 1, num(2.0));

        storage.insert_rows(5, 6, 100);

        assert_eq!(storage.get(2, 0), Some(&num(1.0)));
        assert_eq!(storage.get(7, 1), None);
        assert_eq!(storage.get(13, 1), Some(&num(2.0)));
    }

    #[test]
    fn test_insert_rows_drops_overflow() {
        let mut storage = CellStorage::new();
        storage.set(98, 0, num(1.0));
        storage.insert_rows(0, 5, 100);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_remove_cols_shifts_left() {
        let mut storage = CellStorage::new();
        storage.set(0, 1, num(1.0));
        storage.set(0, 4, num(2.0));

        storage.remove_cols(1, 2);

        assert_eq!(storage.len(), 1);
        assert_eq!(storage.get(0, 2), Some(&num(2.0)));
    }

    #[test]
    fn test_used_bounds() {
        let mut storage = CellStorage::new();
        assert_eq!(storage.used_bounds(), None);
        storage.set(3, 5, num(1.0));
        storage.set(1, 7, num(1.0));
        assert_eq!(storage.used_bounds(), Some((1, 4, 5, 8)));
    }

    #[test]
    fn test_formula_type_follows_cached_value() {
        let value = CellValue::Formula {
            text: "A1".into(),
            cached: Some(Box::new(CellValue::String("x".into()))),
        };
        assert_eq!(value.cell_type(), CellType::String);
        assert_eq!(value.as_text().as_deref(), Some("x"));
    }

    proptest::proptest! {
        #[test]
        fn prop_insert_then_remove_rows_restores_cells(
            rows in proptest::collection::btree_set(0i32..200, 0..20),
            first in 0i32..200,
            count in 1i32..50,
        ) {
            let mut storage = CellStorage::new();
            for row in &rows {
                storage.set(*row, 0, num(*row as f64));
            }
            storage.insert_rows(first, count, i32::MAX);
            storage.remove_rows(first, count);

            proptest::prop_assert_eq!(storage.len(), rows.len());
            for row in &rows {
                proptest::prop_assert_eq!(storage.get(*row, 0), Some(&num(*row as f64)));
            }
        }
    }
}
