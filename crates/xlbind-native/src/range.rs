//! Rectangular cell ranges

use std::fmt;

/// An inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    pub row_first: i32,
    pub row_last: i32,
    pub col_first: i32,
    pub col_last: i32,
}

impl CellRange {
    /// Create a range from its corners
    pub fn new(row_first: i32, row_last: i32, col_first: i32, col_last: i32) -> Self {
        Self {
            row_first,
            row_last,
            col_first,
            col_last,
        }
    }

    /// Whether the range contains a cell
    pub fn contains(&self, row: i32, col: i32) -> bool {
        (self.row_first..=self.row_last).contains(&row) && (self.col_first..=self.col_last).contains(&col)
    }

    /// Whether two ranges share at least one cell
    pub fn intersects(&self, other: &CellRange) -> bool {
        self.row_first <= other.row_last
            && other.row_first <= self.row_last
            && self.col_first <= other.col_last
            && other.col_first <= self.col_last
    }

    /// Adjust for `count` rows inserted at `first`
    pub(crate) fn insert_rows(&mut self, first: i32, count: i32) {
        if self.row_first >= first {
            self.row_first += count;
        }
        if self.row_last >= first {
            self.row_last += count;
        }
    }

    /// Adjust for `count` columns inserted at `first`
    pub(crate) fn insert_cols(&mut self, first: i32, count: i32) {
        if self.col_first >= first {
            self.col_first += count;
        }
        if self.col_last >= first {
            self.col_last += count;
        }
    }

    /// Adjust for rows `first..first+count` removed; `None` if nothing survives
    pub(crate) fn remove_rows(self, first: i32, count: i32) -> Option<Self> {
        let (row_first, row_last) = shrink(self.row_first, self.row_last, first, count)?;
        Some(Self {
            row_first,
            row_last,
            ..self
        })
    }

    /// Adjust for columns `first..first+count` removed; `None` if nothing survives
    pub(crate) fn remove_cols(self, first: i32, count: i32) -> Option<Self> {
        let (col_first, col_last) = shrink(self.col_first, self.col_last, first, count)?;
        Some(Self {
            col_first,
            col_last,
            ..self
        })
    }
}

fn shrink(lo: i32, hi: i32, first: i32, count: i32) -> Option<(i32, i32)> {
    let last = first + count - 1;
    let map = |v: i32| if v > last { v - count } else { v };
    if lo >= first && hi <= last {
        return None;
    }
    let new_lo = if lo >= first && lo <= last { first } else { map(lo) };
    let new_hi = if hi >= first && hi <= last { first - 1 } else { map(hi) };
    Some((new_lo, new_hi))
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{}C{}:R{}C{}",
            self.row_first + 1,
            self.col_first + 1,
            self.row_last + 1,
            self.col_last + 1
        )
    }
}
