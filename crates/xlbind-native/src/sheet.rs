//! Worksheet data
//!
//! A [`Sheet`] knows nothing about the pooled objects of its book. Format,
//! font and rich-string handles are stored as-is; their validity is checked
//! by [`NativeBook`](crate::NativeBook) before they reach a sheet.

use std::collections::BTreeMap;

use crate::cell::{drop_keys, shift_keys, CellData, CellStorage, CellValue, RichRun};
use crate::conditional::ConditionalFormatting;
use crate::error::{NativeError, Result};
use crate::filter::AutoFilter;
use crate::form_control::FormControl;
use crate::handle::FormatId;
use crate::range::CellRange;
use crate::types::{BookType, CellType, ErrorType, ObjectType, SheetType};

/// Default column width in characters
pub const DEFAULT_COL_WIDTH: f64 = 8.43;

/// A cell comment
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub author: String,
    pub width: i32,
    pub height: i32,
}

/// Row or column layout
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineInfo {
    pub size: f64,
    pub format: Option<FormatId>,
    pub hidden: bool,
}

/// A worksheet
#[derive(Debug, Clone)]
pub struct Sheet {
    name: String,
    kind: SheetType,
    max_rows: i32,
    max_cols: i32,
    cells: CellStorage,
    comments: BTreeMap<i32, BTreeMap<i32, Comment>>,
    cols: BTreeMap<i32, LineInfo>,
    rows: BTreeMap<i32, LineInfo>,
    default_row_height: f64,
    merges: Vec<CellRange>,
    zoom: i32,
    active: (i32, i32),
    pub(crate) auto_filter: AutoFilter,
    pub(crate) formattings: Vec<ConditionalFormatting>,
    pub(crate) form_controls: Vec<FormControl>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new(name: impl Into<String>, book_type: BookType) -> Self {
        Self {
            name: name.into(),
            kind: SheetType::Sheet,
            max_rows: book_type.max_rows(),
            max_cols: book_type.max_cols(),
            cells: CellStorage::new(),
            comments: BTreeMap::new(),
            cols: BTreeMap::new(),
            rows: BTreeMap::new(),
            default_row_height: match book_type {
                BookType::Xls => 12.75,
                BookType::Xlsx => 15.0,
            },
            merges: Vec::new(),
            zoom: 100,
            active: (0, 0),
            auto_filter: AutoFilter::default(),
            formattings: Vec::new(),
            form_controls: Vec::new(),
        }
    }

    // === Identity ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn kind(&self) -> SheetType {
        self.kind
    }

    // === Bounds checking ===

    fn check_row(&self, row: i32) -> Result<()> {
        if row < 0 || row >= self.max_rows {
            return Err(NativeError::RowOutOfBounds(row));
        }
        Ok(())
    }

    fn check_col(&self, col: i32) -> Result<()> {
        if col < 0 || col >= self.max_cols {
            return Err(NativeError::ColumnOutOfBounds(col));
        }
        Ok(())
    }

    fn check_cell(&self, row: i32, col: i32) -> Result<()> {
        self.check_row(row)?;
        self.check_col(col)
    }

    fn check_rows(&self, first: i32, last: i32) -> Result<()> {
        self.check_row(first)?;
        self.check_row(last)?;
        if first > last {
            return Err(NativeError::InvalidRange { first, last });
        }
        Ok(())
    }

    fn check_cols(&self, first: i32, last: i32) -> Result<()> {
        self.check_col(first)?;
        self.check_col(last)?;
        if first > last {
            return Err(NativeError::InvalidRange { first, last });
        }
        Ok(())
    }

    /// Validate a rectangle against the sheet limits
    pub fn check_range(&self, range: &CellRange) -> Result<()> {
        self.check_rows(range.row_first, range.row_last)?;
        self.check_cols(range.col_first, range.col_last)
    }

    // === Cell access ===

    fn cell(&self, row: i32, col: i32) -> Result<&CellData> {
        self.check_cell(row, col)?;
        self.cells.get(row, col).ok_or(NativeError::CellType("a value"))
    }

    fn write(&mut self, row: i32, col: i32, value: CellValue, format: Option<FormatId>) -> Result<()> {
        self.check_cell(row, col)?;
        let format = format.or_else(|| self.cells.get(row, col).and_then(|c| c.format));
        self.cells.set(row, col, CellData::new(value, format));
        Ok(())
    }

    /// Type of a cell; missing cells are empty
    pub fn cell_type(&self, row: i32, col: i32) -> Result<CellType> {
        self.check_cell(row, col)?;
        Ok(self
            .cells
            .get(row, col)
            .map(|c| c.value.cell_type())
            .unwrap_or(CellType::Empty))
    }

    /// Whether a cell holds a formula
    pub fn is_formula(&self, row: i32, col: i32) -> Result<bool> {
        self.check_cell(row, col)?;
        Ok(self.cells.get(row, col).map_or(false, |c| c.value.is_formula()))
    }

    /// Whether a cell holds a rich string
    pub fn is_rich_str(&self, row: i32, col: i32) -> Result<bool> {
        self.check_cell(row, col)?;
        Ok(self
            .cells
            .get(row, col)
            .map_or(false, |c| matches!(c.value.resolved(), CellValue::Rich(_))))
    }

    /// Explicit format of a cell
    pub fn cell_format(&self, row: i32, col: i32) -> Result<Option<FormatId>> {
        self.check_cell(row, col)?;
        Ok(self.cells.get(row, col).and_then(|c| c.format))
    }

    /// Set a cell's format; an empty cell becomes blank
    pub fn set_cell_format(&mut self, row: i32, col: i32, format: FormatId) -> Result<()> {
        self.check_cell(row, col)?;
        match self.cells.get_mut(row, col) {
            Some(cell) => cell.format = Some(format),
            None => self.cells.set(row, col, CellData::new(CellValue::Blank, Some(format))),
        }
        Ok(())
    }

    pub fn read_str(&self, row: i32, col: i32) -> Result<(String, Option<FormatId>)> {
        let cell = self.cell(row, col)?;
        let text = cell.value.as_text().ok_or(NativeError::CellType("a string"))?;
        Ok((text, cell.format))
    }

    pub fn write_str(&mut self, row: i32, col: i32, value: &str, format: Option<FormatId>) -> Result<()> {
        self.write(row, col, CellValue::String(value.to_string()), format)
    }

    pub fn read_rich(&self, row: i32, col: i32) -> Result<(Vec<RichRun>, Option<FormatId>)> {
        let cell = self.cell(row, col)?;
        match cell.value.resolved() {
            CellValue::Rich(runs) => Ok((runs.clone(), cell.format)),
            _ => Err(NativeError::CellType("a rich string")),
        }
    }

    pub fn write_rich(&mut self, row: i32, col: i32, runs: Vec<RichRun>, format: Option<FormatId>) -> Result<()> {
        self.write(row, col, CellValue::Rich(runs), format)
    }

    pub fn read_num(&self, row: i32, col: i32) -> Result<(f64, Option<FormatId>)> {
        let cell = self.cell(row, col)?;
        let n = cell.value.as_number().ok_or(NativeError::CellType("a number"))?;
        Ok((n, cell.format))
    }

    pub fn write_num(&mut self, row: i32, col: i32, value: f64, format: Option<FormatId>) -> Result<()> {
        self.write(row, col, CellValue::Number(value), format)
    }

    pub fn read_bool(&self, row: i32, col: i32) -> Result<(bool, Option<FormatId>)> {
        let cell = self.cell(row, col)?;
        let b = cell.value.as_bool().ok_or(NativeError::CellType("a boolean"))?;
        Ok((b, cell.format))
    }

    pub fn write_bool(&mut self, row: i32, col: i32, value: bool, format: Option<FormatId>) -> Result<()> {
        self.write(row, col, CellValue::Boolean(value), format)
    }

    /// Format of a blank cell
    pub fn read_blank(&self, row: i32, col: i32) -> Result<Option<FormatId>> {
        let cell = self.cell(row, col)?;
        match cell.value {
            CellValue::Blank => Ok(cell.format),
            _ => Err(NativeError::CellType("a blank")),
        }
    }

    pub fn write_blank(&mut self, row: i32, col: i32, format: FormatId) -> Result<()> {
        self.write(row, col, CellValue::Blank, Some(format))
    }

    pub fn read_formula(&self, row: i32, col: i32) -> Result<(String, Option<FormatId>)> {
        let cell = self.cell(row, col)?;
        match &cell.value {
            CellValue::Formula { text, .. } => Ok((text.clone(), cell.format)),
            _ => Err(NativeError::CellType("a formula")),
        }
    }

    /// Write a formula with an optional cached result; the text must already be validated
    pub fn write_formula(
        &mut self,
        row: i32,
        col: i32,
        text: String,
        cached: Option<CellValue>,
        format: Option<FormatId>,
    ) -> Result<()> {
        self.write(
            row,
            col,
            CellValue::Formula {
                text,
                cached: cached.map(Box::new),
            },
            format,
        )
    }

    pub fn read_error(&self, row: i32, col: i32) -> Result<ErrorType> {
        match self.cell(row, col)?.value.resolved() {
            CellValue::Error(e) => Ok(*e),
            _ => Err(NativeError::CellType("an error")),
        }
    }

    pub fn write_error(&mut self, row: i32, col: i32, error: ErrorType, format: Option<FormatId>) -> Result<()> {
        self.write(row, col, CellValue::Error(error), format)
    }

    // === Comments ===

    pub fn read_comment(&self, row: i32, col: i32) -> Result<&Comment> {
        self.check_cell(row, col)?;
        self.comments
            .get(&row)
            .and_then(|cols| cols.get(&col))
            .ok_or(NativeError::CellType("a comment"))
    }

    pub fn write_comment(&mut self, row: i32, col: i32, comment: Comment) -> Result<()> {
        self.check_cell(row, col)?;
        if comment.width <= 0 || comment.height <= 0 {
            return Err(NativeError::InvalidArgument("comment size must be positive".into()));
        }
        self.comments.entry(row).or_default().insert(col, comment);
        Ok(())
    }

    pub fn remove_comment(&mut self, row: i32, col: i32) -> Result<()> {
        self.check_cell(row, col)?;
        if let Some(cols) = self.comments.get_mut(&row) {
            cols.remove(&col);
            if cols.is_empty() {
                self.comments.remove(&row);
            }
        }
        Ok(())
    }

    // === Rows and columns ===

    pub fn col_width(&self, col: i32) -> Result<f64> {
        self.check_col(col)?;
        Ok(self.cols.get(&col).map_or(DEFAULT_COL_WIDTH, |c| c.size))
    }

    pub fn row_height(&self, row: i32) -> Result<f64> {
        self.check_row(row)?;
        Ok(self.rows.get(&row).map_or(self.default_row_height, |r| r.size))
    }

    /// Set width, format and visibility of a column span; a negative width keeps the default
    pub fn set_col(&mut self, first: i32, last: i32, width: f64, format: Option<FormatId>, hidden: bool) -> Result<()> {
        self.check_cols(first, last)?;
        let size = if width < 0.0 { DEFAULT_COL_WIDTH } else { width };
        for col in first..=last {
            self.cols.insert(col, LineInfo { size, format, hidden });
        }
        Ok(())
    }

    /// Set height, format and visibility of a row
    pub fn set_row(&mut self, row: i32, height: f64, format: Option<FormatId>, hidden: bool) -> Result<()> {
        self.check_row(row)?;
        let size = if height < 0.0 { self.default_row_height } else { height };
        self.rows.insert(row, LineInfo { size, format, hidden });
        Ok(())
    }

    pub fn row_format(&self, row: i32) -> Result<Option<FormatId>> {
        self.check_row(row)?;
        Ok(self.rows.get(&row).and_then(|r| r.format))
    }

    pub fn col_format(&self, col: i32) -> Result<Option<FormatId>> {
        self.check_col(col)?;
        Ok(self.cols.get(&col).and_then(|c| c.format))
    }

    pub fn row_hidden(&self, row: i32) -> Result<bool> {
        self.check_row(row)?;
        Ok(self.rows.get(&row).map_or(false, |r| r.hidden))
    }

    pub fn set_row_hidden(&mut self, row: i32, hidden: bool) -> Result<()> {
        self.check_row(row)?;
        let default = self.default_row_height;
        self.rows
            .entry(row)
            .or_insert(LineInfo {
                size: default,
                format: None,
                hidden: false,
            })
            .hidden = hidden;
        Ok(())
    }

    pub fn col_hidden(&self, col: i32) -> Result<bool> {
        self.check_col(col)?;
        Ok(self.cols.get(&col).map_or(false, |c| c.hidden))
    }

    pub fn set_col_hidden(&mut self, col: i32, hidden: bool) -> Result<()> {
        self.check_col(col)?;
        self.cols
            .entry(col)
            .or_insert(LineInfo {
                size: DEFAULT_COL_WIDTH,
                format: None,
                hidden: false,
            })
            .hidden = hidden;
        Ok(())
    }

    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    pub fn set_default_row_height(&mut self, height: f64) -> Result<()> {
        if !(0.0..=409.0).contains(&height) {
            return Err(NativeError::InvalidArgument(format!("row height {height}")));
        }
        self.default_row_height = height;
        Ok(())
    }

    // === Merged cells ===

    /// Merged region containing a cell
    pub fn merge_at(&self, row: i32, col: i32) -> Result<CellRange> {
        self.check_cell(row, col)?;
        self.merges
            .iter()
            .find(|m| m.contains(row, col))
            .copied()
            .ok_or(NativeError::NotMerged(row, col))
    }

    pub fn set_merge(&mut self, range: CellRange) -> Result<()> {
        self.check_range(&range)?;
        if self.merges.iter().any(|m| m.intersects(&range)) {
            return Err(NativeError::MergeConflict(range.to_string()));
        }
        self.merges.push(range);
        Ok(())
    }

    pub fn del_merge(&mut self, row: i32, col: i32) -> Result<()> {
        let range = self.merge_at(row, col)?;
        self.merges.retain(|m| *m != range);
        Ok(())
    }

    pub fn merge_size(&self) -> i32 {
        self.merges.len() as i32
    }

    pub fn merge(&self, index: i32) -> Result<CellRange> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.merges.get(i))
            .copied()
            .ok_or(NativeError::Index { what: "merge", index })
    }

    pub fn del_merge_by_index(&mut self, index: i32) -> Result<()> {
        self.merge(index)?;
        self.merges.remove(index as usize);
        Ok(())
    }

    // === Structural edits ===

    /// Clear cells and comments in a rectangle
    pub fn clear(&mut self, range: CellRange) -> Result<()> {
        self.check_range(&range)?;
        self.cells
            .clear(range.row_first, range.row_last, range.col_first, range.col_last);
        for (_, cols) in self.comments.range_mut(range.row_first..=range.row_last) {
            cols.retain(|c, _| !(range.col_first..=range.col_last).contains(c));
        }
        self.comments.retain(|_, cols| !cols.is_empty());
        Ok(())
    }

    /// Insert rows `first..=last`, shifting everything below down
    pub fn insert_row(&mut self, first: i32, last: i32) -> Result<()> {
        self.check_rows(first, last)?;
        let count = last - first + 1;
        let limit = self.max_rows;
        self.cells.insert_rows(first, count, limit);
        self.comments = shift_keys(std::mem::take(&mut self.comments), first, count, limit);
        self.rows = shift_keys(std::mem::take(&mut self.rows), first, count, limit);
        self.for_each_range(|r| {
            r.insert_rows(first, count);
            (r.row_last < limit).then_some(*r)
        });
        if self.active.0 >= first {
            self.active.0 = (self.active.0 + count).min(limit - 1);
        }
        Ok(())
    }

    /// Remove rows `first..=last`, shifting everything below up
    pub fn remove_row(&mut self, first: i32, last: i32) -> Result<()> {
        self.check_rows(first, last)?;
        let count = last - first + 1;
        self.cells.remove_rows(first, count);
        self.comments = drop_keys(std::mem::take(&mut self.comments), first, count);
        self.rows = drop_keys(std::mem::take(&mut self.rows), first, count);
        self.for_each_range(|r| r.remove_rows(first, count));
        if self.active.0 > last {
            self.active.0 -= count;
        } else if self.active.0 >= first {
            self.active.0 = first;
        }
        Ok(())
    }

    /// Insert columns `first..=last`, shifting everything right
    pub fn insert_col(&mut self, first: i32, last: i32) -> Result<()> {
        self.check_cols(first, last)?;
        let count = last - first + 1;
        let limit = self.max_cols;
        self.cells.insert_cols(first, count, limit);
        for cols in self.comments.values_mut() {
            *cols = shift_keys(std::mem::take(cols), first, count, limit);
        }
        self.comments.retain(|_, cols| !cols.is_empty());
        self.cols = shift_keys(std::mem::take(&mut self.cols), first, count, limit);
        self.for_each_range(|r| {
            r.insert_cols(first, count);
            (r.col_last < limit).then_some(*r)
        });
        if self.active.1 >= first {
            self.active.1 = (self.active.1 + count).min(limit - 1);
        }
        Ok(())
    }

    /// Remove columns `first..=last`, shifting everything left
    pub fn remove_col(&mut self, first: i32, last: i32) -> Result<()> {
        self.check_cols(first, last)?;
        let count = last - first + 1;
        self.cells.remove_cols(first, count);
        for cols in self.comments.values_mut() {
            *cols = drop_keys(std::mem::take(cols), first, count);
        }
        self.comments.retain(|_, cols| !cols.is_empty());
        self.cols = drop_keys(std::mem::take(&mut self.cols), first, count);
        self.for_each_range(|r| r.remove_cols(first, count));
        if self.active.1 > last {
            self.active.1 -= count;
        } else if self.active.1 >= first {
            self.active.1 = first;
        }
        Ok(())
    }

    /// Rewrite every stored range; `None` drops it
    fn for_each_range(&mut self, mut f: impl FnMut(&mut CellRange) -> Option<CellRange>) {
        self.merges = std::mem::take(&mut self.merges)
            .into_iter()
            .filter_map(|mut r| f(&mut r))
            .collect();
        let filter_ref = self.auto_filter.reference_slot();
        *filter_ref = filter_ref.take().and_then(|mut r| f(&mut r));
        for formatting in &mut self.formattings {
            formatting.ranges = std::mem::take(&mut formatting.ranges)
                .into_iter()
                .filter_map(|mut r| f(&mut r))
                .collect();
        }
    }

    /// Copy value and format of one cell to another
    pub fn copy_cell(&mut self, row_src: i32, col_src: i32, row_dst: i32, col_dst: i32) -> Result<()> {
        self.check_cell(row_src, col_src)?;
        self.check_cell(row_dst, col_dst)?;
        match self.cells.get(row_src, col_src).cloned() {
            Some(data) => self.cells.set(row_dst, col_dst, data),
            None => {
                self.cells.remove(row_dst, col_dst);
            }
        }
        Ok(())
    }

    // === Used area ===

    pub fn first_row(&self) -> i32 {
        self.cells.used_bounds().map_or(0, |b| b.0)
    }

    pub fn last_row(&self) -> i32 {
        self.cells.used_bounds().map_or(0, |b| b.1)
    }

    pub fn first_col(&self) -> i32 {
        self.cells.used_bounds().map_or(0, |b| b.2)
    }

    pub fn last_col(&self) -> i32 {
        self.cells.used_bounds().map_or(0, |b| b.3)
    }

    // === View ===

    pub fn zoom(&self) -> i32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: i32) -> Result<()> {
        if !(10..=400).contains(&zoom) {
            return Err(NativeError::InvalidArgument(format!("zoom {zoom}")));
        }
        self.zoom = zoom;
        Ok(())
    }

    pub fn active_cell(&self) -> (i32, i32) {
        self.active
    }

    pub fn set_active_cell(&mut self, row: i32, col: i32) -> Result<()> {
        self.check_cell(row, col)?;
        self.active = (row, col);
        Ok(())
    }

    // === Filtering ===

    pub fn auto_filter(&self) -> &AutoFilter {
        &self.auto_filter
    }

    pub fn auto_filter_mut(&mut self) -> &mut AutoFilter {
        &mut self.auto_filter
    }

    /// Whether an auto filter range is set
    pub fn is_auto_filter(&self) -> bool {
        self.auto_filter.is_set()
    }

    /// Hide data rows rejected by the value filters of the auto filter
    pub fn apply_filter(&mut self) -> Result<()> {
        let range = self.auto_filter.reference()?;
        let data = CellRange {
            row_first: range.row_first + 1,
            ..range
        };
        let mut hidden = Vec::new();
        for row in data.row_first..=data.row_last {
            let mut keep = true;
            for slot in 0..self.auto_filter.column_size() {
                let Some(column) = self.auto_filter.column(slot as u32) else {
                    continue;
                };
                if column.filter_size() == 0 {
                    continue;
                }
                let text = self.display_text(row, range.col_first + column.index());
                keep &= (0..column.filter_size()).any(|i| column.filter(i).ok() == Some(text.as_str()));
            }
            hidden.push((row, !keep));
        }
        for (row, hide) in hidden {
            self.set_row_hidden(row, hide)?;
        }
        self.auto_filter.applied = true;
        Ok(())
    }

    /// Drop the auto filter and show rows it hid
    pub fn remove_filter(&mut self) {
        if self.auto_filter.applied {
            if let Ok(range) = self.auto_filter.reference() {
                for row in range.row_first..=range.row_last {
                    if let Some(info) = self.rows.get_mut(&row) {
                        info.hidden = false;
                    }
                }
            }
        }
        self.auto_filter = AutoFilter::default();
    }

    fn display_text(&self, row: i32, col: i32) -> String {
        match self.cells.get(row, col).map(|c| c.value.resolved()) {
            Some(CellValue::Number(n)) => n.to_string(),
            Some(CellValue::Boolean(b)) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            Some(value) => value.as_text().unwrap_or_default(),
            None => String::new(),
        }
    }

    // === Conditional formatting and form controls ===

    pub(crate) fn add_conditional_formatting(&mut self) -> u32 {
        self.formattings.push(ConditionalFormatting::default());
        (self.formattings.len() - 1) as u32
    }

    pub fn add_form_control(&mut self, object_type: ObjectType) -> u32 {
        let name = format!("{:?} {}", object_type, self.form_controls.len() + 1);
        self.form_controls.push(FormControl::new(object_type, name));
        (self.form_controls.len() - 1) as u32
    }

    pub fn form_control_size(&self) -> i32 {
        self.form_controls.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sheet() -> Sheet {
        Sheet::new("Sheet1", BookType::Xlsx)
    }

    #[test]
    fn test_write_keeps_format_when_none_given() {
        let mut s = sheet();
        s.write_num(0, 0, 1.0, Some(FormatId(3))).unwrap();
        s.write_str(0, 0, "x", None).unwrap();
        assert_eq!(s.read_str(0, 0).unwrap(), ("x".to_string(), Some(FormatId(3))));
    }

    #[test]
    fn test_read_wrong_type_fails() {
        let mut s = sheet();
        s.write_num(1, 1, 2.5, None).unwrap();
        assert_eq!(s.read_str(1, 1), Err(NativeError::CellType("a string")));
        assert_eq!(s.cell_type(1, 1).unwrap(), CellType::Number);
        assert_eq!(s.cell_type(9, 9).unwrap(), CellType::Empty);
    }

    #[test]
    fn test_bounds_depend_on_book_type() {
        let mut xls = Sheet::new("Sheet1", BookType::Xls);
        assert_eq!(xls.write_num(70_000, 0, 1.0, None), Err(NativeError::RowOutOfBounds(70_000)));
        let mut xlsx = sheet();
        assert!(xlsx.write_num(70_000, 0, 1.0, None).is_ok());
    }

    #[test]
    fn test_insert_row_moves_cells_merges_and_comments() {
        let mut s = sheet();
        s.write_str(6, 0, "moved", None).unwrap();
        s.write_str(2, 0, "stays", None).unwrap();
        s.set_merge(CellRange::new(6, 7, 0, 1)).unwrap();
        s.write_comment(
            6,
            0,
            Comment {
                text: "note".into(),
                author: "me".into(),
                width: 100,
                height: 50,
            },
        )
        .unwrap();

        s.insert_row(5, 10).unwrap();

        assert_eq!(s.read_str(12, 0).unwrap().0, "moved");
        assert_eq!(s.read_str(2, 0).unwrap().0, "stays");
        assert_eq!(s.cell_type(6, 0).unwrap(), CellType::Empty);
        assert_eq!(s.merge(0).unwrap(), CellRange::new(12, 13, 0, 1));
        assert_eq!(s.read_comment(12, 0).unwrap().text, "note");
    }

    #[test]
    fn test_remove_col_drops_and_shifts() {
        let mut s = sheet();
        s.write_num(0, 1, 1.0, None).unwrap();
        s.write_num(0, 5, 5.0, None).unwrap();
        s.remove_col(1, 2).unwrap();
        assert_eq!(s.read_num(0, 3).unwrap().0, 5.0);
        assert_eq!(s.cell_type(0, 1).unwrap(), CellType::Empty);
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut s = sheet();
        assert_eq!(s.insert_row(5, 2), Err(NativeError::InvalidRange { first: 5, last: 2 }));
    }

    #[test]
    fn test_merge_conflicts() {
        let mut s = sheet();
        s.set_merge(CellRange::new(0, 1, 0, 1)).unwrap();
        assert!(s.set_merge(CellRange::new(1, 2, 1, 2)).is_err());
        assert_eq!(s.merge_at(1, 1).unwrap(), CellRange::new(0, 1, 0, 1));
        s.del_merge(0, 0).unwrap();
        assert_eq!(s.merge_size(), 0);
    }

    #[test]
    fn test_apply_filter_hides_rejected_rows() {
        let mut s = sheet();
        s.write_str(0, 0, "fruit", None).unwrap();
        s.write_str(1, 0, "apple", None).unwrap();
        s.write_str(2, 0, "pear", None).unwrap();
        s.auto_filter_mut().set_reference(CellRange::new(0, 2, 0, 0));
        let slot = s.auto_filter_mut().column_slot(0).unwrap();
        s.auto_filter_mut()
            .column_mut(slot as u32)
            .unwrap()
            .add_filter("apple");

        s.apply_filter().unwrap();
        assert!(!s.row_hidden(1).unwrap());
        assert!(s.row_hidden(2).unwrap());

        s.remove_filter();
        assert!(!s.row_hidden(2).unwrap());
        assert!(!s.is_auto_filter());
    }

    #[test]
    fn test_used_range_is_exclusive() {
        let mut s = sheet();
        s.write_num(2, 3, 1.0, None).unwrap();
        assert_eq!((s.first_row(), s.last_row()), (2, 3));
        assert_eq!((s.first_col(), s.last_col()), (3, 4));
    }
}
