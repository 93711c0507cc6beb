//! The filter column proxy

use xlbind_native as native;
use xlbind_native::{CustomFilter, FilterColumnId, FilterOperator, FilterType, Top10};

use crate::error::Result;
use crate::proxy::{proxy_class, Proxy};

proxy_class!(
    /// Filter criteria of one column of an auto filter
    ///
    /// Removing the sheet's filter invalidates the column.
    FilterColumn,
    FilterColumnId,
    "FilterColumn"
);

impl FilterColumn {
    fn with<T>(&self, f: impl FnOnce(&mut native::FilterColumn) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_filter_column(id, f))
    }

    /// Offset of the column inside the filter range
    pub fn index(&self) -> Result<i32> {
        self.with(|column| Ok(column.index()))
    }

    pub fn filter_type(&self) -> Result<FilterType> {
        self.with(|column| Ok(column.filter_type()))
    }

    pub fn filter_size(&self) -> Result<i32> {
        self.with(|column| Ok(column.filter_size()))
    }

    pub fn filter(&self, index: i32) -> Result<String> {
        self.with(|column| column.filter(index).map(str::to_string))
    }

    /// Show rows whose value equals `value`
    pub fn add_filter(&self, value: &str) -> Result<()> {
        self.with(|column| {
            column.add_filter(value);
            Ok(())
        })
    }

    pub fn get_top10(&self) -> Result<Top10> {
        self.with(|column| column.top10())
    }

    /// Show the top or bottom `value` items, or percent of items
    pub fn set_top10(&self, value: f64, top: bool, percent: bool) -> Result<()> {
        self.with(|column| column.set_top10(value, top, percent))
    }

    pub fn get_custom_filter(&self) -> Result<CustomFilter> {
        self.with(|column| column.custom_filter().cloned())
    }

    /// Filter with a single comparison
    pub fn set_custom_filter(&self, op: FilterOperator, value: &str) -> Result<()> {
        let filter = CustomFilter {
            op1: op,
            value1: value.to_string(),
            second: None,
            and_op: false,
        };
        self.with(|column| {
            column.set_custom_filter(filter);
            Ok(())
        })
    }

    /// Filter with two comparisons joined by AND or OR
    pub fn set_custom_filter_ex(
        &self,
        op1: FilterOperator,
        value1: &str,
        op2: FilterOperator,
        value2: &str,
        and_op: bool,
    ) -> Result<()> {
        let filter = CustomFilter {
            op1,
            value1: value1.to_string(),
            second: Some((op2, value2.to_string())),
            and_op,
        };
        self.with(|column| {
            column.set_custom_filter(filter);
            Ok(())
        })
    }

    /// Drop all criteria of the column
    pub fn clear(&self) -> Result<()> {
        self.with(|column| {
            column.clear();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use xlbind_native::{BookType, CellRange};

    #[test]
    fn test_filter_modes() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        let book = bindings.new_book(BookType::Xlsx);
        let sheet = book.add_sheet("Data", None).unwrap();
        let filter = sheet.auto_filter().unwrap();
        filter.set_ref(CellRange::new(0, 9, 0, 2)).unwrap();

        let column = filter.column(1).unwrap();
        assert_eq!(column.index().unwrap(), 1);
        assert_eq!(column.filter_type().unwrap(), FilterType::NotSet);

        column.add_filter("x").unwrap();
        assert_eq!(column.filter(0).unwrap(), "x");

        column.set_custom_filter_ex(FilterOperator::GreaterThan, "1", FilterOperator::LessThan, "9", true).unwrap();
        let custom = column.get_custom_filter().unwrap();
        assert_eq!(column.filter_type().unwrap(), FilterType::Custom);
        assert_eq!(custom.second, Some((FilterOperator::LessThan, "9".to_string())));
        assert_eq!(column.filter_size().unwrap(), 0);

        column.set_top10(5.0, false, true).unwrap();
        assert_eq!(
            column.get_top10().unwrap(),
            Top10 {
                value: 5.0,
                top: false,
                percent: true
            }
        );

        column.clear().unwrap();
        assert!(column.get_top10().is_err());
        assert_eq!(filter.column(1).unwrap().filter_type().unwrap(), FilterType::NotSet);
    }
}
