//! The auto filter proxy

use xlbind_native as native;
use xlbind_native::{AutoFilterId, CellRange};

use crate::error::Result;
use crate::filter_column::FilterColumn;
use crate::proxy::{proxy_class, Proxy};

proxy_class!(
    /// Auto filter of a sheet
    AutoFilter,
    AutoFilterId,
    "AutoFilter"
);

impl AutoFilter {
    fn with<T>(&self, f: impl FnOnce(&mut native::AutoFilter) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_auto_filter(id, f))
    }

    /// Filtered range, header row included
    pub fn get_ref(&self) -> Result<CellRange> {
        self.with(|filter| filter.reference())
    }

    pub fn set_ref(&self, range: CellRange) -> Result<()> {
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.auto_filter_set_ref(id, range))
    }

    /// Column at offset `col_id` of the range, created on first use
    pub fn column(&self, col_id: i32) -> Result<FilterColumn> {
        let (id, book) = self.scope()?;
        let column = book.call(|native| native.auto_filter_column(id, col_id))?;
        book.env().new_instance(column, book)
    }

    pub fn column_size(&self) -> Result<i32> {
        self.with(|filter| Ok(filter.column_size()))
    }

    pub fn column_by_index(&self, index: i32) -> Result<FilterColumn> {
        let (id, book) = self.scope()?;
        let column = book.call(|native| native.auto_filter_column_by_index(id, index))?;
        book.env().new_instance(column, book)
    }

    /// Rows below the header that sorting applies to
    pub fn get_sort_range(&self) -> Result<CellRange> {
        self.with(|filter| filter.sort_range())
    }

    pub fn sort_levels(&self) -> Result<i32> {
        self.with(|filter| Ok(filter.sort_levels()))
    }

    /// Primary sort column and whether it sorts descending
    pub fn get_sort(&self) -> Result<(i32, bool)> {
        self.with(|filter| filter.sort())
    }

    pub fn set_sort(&self, column: i32, descending: bool) -> Result<()> {
        self.with(|filter| filter.set_sort(column, descending))
    }

    pub fn add_sort(&self, column: i32, descending: bool) -> Result<()> {
        self.with(|filter| filter.add_sort(column, descending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::config::Config;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use xlbind_native::BookType;

    #[test]
    fn test_filter_hides_rows() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        let book = bindings.new_book(BookType::Xlsx);
        let sheet = book.add_sheet("Data", None).unwrap();
        for (row, fruit) in ["Fruit", "apple", "pear", "apple"].iter().enumerate() {
            sheet.write_str(row as i32, 0, fruit, None).unwrap();
        }

        let filter = sheet.auto_filter().unwrap();
        assert!(filter.get_ref().is_err());
        filter.set_ref(CellRange::new(0, 3, 0, 0)).unwrap();
        filter.column(0).unwrap().add_filter("apple").unwrap();
        sheet.apply_filter().unwrap();

        assert!(!sheet.row_hidden(1).unwrap());
        assert!(sheet.row_hidden(2).unwrap());
        assert!(!sheet.row_hidden(3).unwrap());

        sheet.remove_filter().unwrap();
        assert!(!sheet.row_hidden(2).unwrap());
        assert_eq!(
            filter.column_by_index(0).unwrap_err(),
            Error::Native("filter column index 0 out of range".into())
        );
    }

    #[test]
    fn test_sort_levels() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        let book = bindings.new_book(BookType::Xls);
        let sheet = book.add_sheet("Data", None).unwrap();
        let filter = sheet.auto_filter().unwrap();

        filter.set_ref(CellRange::new(0, 20, 1, 4)).unwrap();
        filter.set_sort(2, true).unwrap();
        filter.add_sort(0, false).unwrap();

        assert_eq!(filter.sort_levels().unwrap(), 2);
        assert_eq!(filter.get_sort().unwrap(), (2, true));
        assert_eq!(filter.get_sort_range().unwrap(), CellRange::new(1, 20, 1, 4));
        assert!(filter.set_ref(CellRange::new(5, 2, 0, 0)).is_err());
    }
}
