//! Auto filters and their columns

use crate::error::{NativeError, Result};
use crate::range::CellRange;
use crate::types::{FilterOperator, FilterType};

/// Parameters of a top/bottom N filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Top10 {
    pub value: f64,
    pub top: bool,
    pub percent: bool,
}

/// One or two comparison conditions of a custom filter
#[derive(Debug, Clone, PartialEq)]
pub struct CustomFilter {
    pub op1: FilterOperator,
    pub value1: String,
    pub second: Option<(FilterOperator, String)>,
    pub and_op: bool,
}

/// Filter settings of one column
#[derive(Debug, Clone, PartialEq)]
pub struct FilterColumn {
    index: i32,
    filter_type: FilterType,
    values: Vec<String>,
    top10: Option<Top10>,
    custom: Option<CustomFilter>,
}

impl FilterColumn {
    fn new(index: i32) -> Self {
        Self {
            index,
            filter_type: FilterType::NotSet,
            values: Vec::new(),
            top10: None,
            custom: None,
        }
    }

    /// Zero-based column offset inside the filter range
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Active filter mode
    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    /// Number of filter values
    pub fn filter_size(&self) -> i32 {
        self.values.len() as i32
    }

    /// Filter value at `index`
    pub fn filter(&self, index: i32) -> Result<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
            .ok_or(NativeError::Index {
                what: "filter value",
                index,
            })
    }

    /// Add a value to show; switches the column to value filtering
    pub fn add_filter(&mut self, value: &str) {
        if self.filter_type != FilterType::Value {
            self.reset(FilterType::Value);
        }
        self.values.push(value.to_string());
    }

    /// Current top/bottom N parameters
    pub fn top10(&self) -> Result<Top10> {
        self.top10
            .ok_or(NativeError::InvalidArgument("column has no top10 filter".into()))
    }

    /// Filter the top or bottom N items or percent
    pub fn set_top10(&mut self, value: f64, top: bool, percent: bool) -> Result<()> {
        if !value.is_finite() || value <= 0.0 {
            return Err(NativeError::InvalidArgument(format!("top10 value {value}")));
        }
        self.reset(FilterType::Top10);
        self.top10 = Some(Top10 {
            value,
            top,
            percent,
        });
        Ok(())
    }

    /// Current custom conditions
    pub fn custom_filter(&self) -> Result<&CustomFilter> {
        self.custom
            .as_ref()
            .ok_or(NativeError::InvalidArgument("column has no custom filter".into()))
    }

    /// Filter with one or two comparisons
    pub fn set_custom_filter(&mut self, filter: CustomFilter) {
        self.reset(FilterType::Custom);
        self.custom = Some(filter);
    }

    /// Drop all criteria
    pub fn clear(&mut self) {
        self.reset(FilterType::NotSet);
    }

    fn reset(&mut self, filter_type: FilterType) {
        self.filter_type = filter_type;
        self.values.clear();
        self.top10 = None;
        self.custom = None;
    }
}

/// Auto filter of a sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoFilter {
    reference: Option<CellRange>,
    columns: Vec<FilterColumn>,
    sort: Vec<(i32, bool)>,
    pub(crate) applied: bool,
}

impl AutoFilter {
    /// Filtered range
    pub fn reference(&self) -> Result<CellRange> {
        self.reference
            .ok_or(NativeError::InvalidArgument("auto filter range is not set".into()))
    }

    /// Set the filtered range
    pub fn set_reference(&mut self, range: CellRange) {
        self.reference = Some(range);
    }

    pub(crate) fn reference_slot(&mut self) -> &mut Option<CellRange> {
        &mut self.reference
    }

    /// Whether a range is set
    pub fn is_set(&self) -> bool {
        self.reference.is_some()
    }

    /// Slot of the column with offset `col_id`, created when missing
    pub fn column_slot(&mut self, col_id: i32) -> Result<usize> {
        if col_id < 0 {
            return Err(NativeError::Index {
                what: "filter column",
                index: col_id,
            });
        }
        if let Some(slot) = self.columns.iter().position(|c| c.index == col_id) {
            return Ok(slot);
        }
        self.columns.push(FilterColumn::new(col_id));
        Ok(self.columns.len() - 1)
    }

    /// Slot of an existing column by position
    pub fn column_by_index(&self, index: i32) -> Result<usize> {
        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.columns.len())
            .ok_or(NativeError::Index {
                what: "filter column",
                index,
            })
    }

    /// Number of filtered columns
    pub fn column_size(&self) -> i32 {
        self.columns.len() as i32
    }

    pub(crate) fn column(&self, slot: u32) -> Option<&FilterColumn> {
        self.columns.get(slot as usize)
    }

    pub(crate) fn column_mut(&mut self, slot: u32) -> Option<&mut FilterColumn> {
        self.columns.get_mut(slot as usize)
    }

    /// Data rows covered by sorting (the range below its header row)
    pub fn sort_range(&self) -> Result<CellRange> {
        let range = self.reference()?;
        if range.row_last <= range.row_first {
            return Err(NativeError::InvalidArgument("auto filter range has no data rows".into()));
        }
        Ok(CellRange {
            row_first: range.row_first + 1,
            ..range
        })
    }

    /// Number of sort levels
    pub fn sort_levels(&self) -> i32 {
        self.sort.len() as i32
    }

    /// Primary sort column and direction
    pub fn sort(&self) -> Result<(i32, bool)> {
        self.sort
            .first()
            .copied()
            .ok_or(NativeError::InvalidArgument("auto filter has no sort".into()))
    }

    /// Replace all sort levels with one
    pub fn set_sort(&mut self, column: i32, descending: bool) -> Result<()> {
        self.check_sort_column(column)?;
        self.sort = vec![(column, descending)];
        Ok(())
    }

    /// Append a sort level
    pub fn add_sort(&mut self, column: i32, descending: bool) -> Result<()> {
        self.check_sort_column(column)?;
        self.sort.push((column, descending));
        Ok(())
    }

    fn check_sort_column(&self, column: i32) -> Result<()> {
        let range = self.reference()?;
        if column < 0 || column > range.col_last - range.col_first {
            return Err(NativeError::Index {
                what: "sort column",
                index: column,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_column_created_once() {
        let mut filter = AutoFilter::default();
        let a = filter.column_slot(2).unwrap();
        let b = filter.column_slot(2).unwrap();
        assert_eq!(a, b);
        assert_eq!(filter.column_size(), 1);
        assert!(filter.column_by_index(1).is_err());
    }

    #[test]
    fn test_switching_filter_modes_resets_criteria() {
        let mut column = FilterColumn::new(0);
        column.add_filter("a");
        column.add_filter("b");
        assert_eq!(column.filter_size(), 2);

        column.set_top10(10.0, true, false).unwrap();
        assert_eq!(column.filter_type(), FilterType::Top10);
        assert_eq!(column.filter_size(), 0);

        column.clear();
        assert_eq!(column.filter_type(), FilterType::NotSet);
        assert!(column.top10().is_err());
    }

    #[test]
    fn test_sort_requires_range() {
        let mut filter = AutoFilter::default();
        assert!(filter.set_sort(0, false).is_err());

        filter.set_reference(CellRange::new(0, 10, 0, 3));
        filter.set_sort(1, true).unwrap();
        filter.add_sort(0, false).unwrap();
        assert!(filter.add_sort(4, false).is_err());

        assert_eq!(filter.sort_levels(), 2);
        assert_eq!(filter.sort().unwrap(), (1, true));
        assert_eq!(filter.sort_range().unwrap(), CellRange::new(1, 10, 0, 3));
    }
}
