//! The sheet proxy

use xlbind_native as native;
use xlbind_native::{CellRange, CellType, CellValue, Comment, ErrorType, FormatId, ObjectType, SheetId};

use crate::async_worker::queue_sheet_edit;
use crate::auto_filter::AutoFilter;
use crate::book::Book;
use crate::conditional_formatting::ConditionalFormatting;
use crate::error::{Error, Result, SHEET_DISCARDED};
use crate::form_control::FormControl;
use crate::format::Format;
use crate::holder::{ensure_same_book, HasBook};
use crate::proxy::{proxy_class, Proxy};
use crate::rich_string::RichString;

proxy_class!(
    /// A worksheet of a book
    ///
    /// Deleting the sheet from its book leaves every proxy of it in place;
    /// their methods then fail with "sheet has been discarded".
    Sheet,
    SheetId,
    "Sheet"
);

impl Sheet {
    /// Handle and book of a sheet that still exists
    pub(crate) fn live(&self) -> Result<(SheetId, &Book)> {
        let (id, book) = self.scope()?;
        if !book.read(|native| native.is_valid_sheet(id))? {
            return Err(Error::generic(SHEET_DISCARDED));
        }
        Ok((id, book))
    }

    fn with<T>(&self, f: impl FnOnce(&mut native::Sheet) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.live()?;
        book.call(|native| native.with_sheet(id, f))
    }

    fn format_arg(&self, format: Option<&Format>) -> Result<Option<FormatId>> {
        match format {
            Some(format) => {
                ensure_same_book!(self.owning_book(), format.owning_book());
                Ok(Some(format.scope()?.0))
            }
            None => Ok(None),
        }
    }

    fn write(&self, row: i32, col: i32, value: CellValue, format: Option<&Format>) -> Result<()> {
        let format = self.format_arg(format)?;
        let (id, book) = self.live()?;
        book.call_ok(|native| native.sheet_write(id, row, col, value, format))
    }

    fn format_at(&self, format: FormatId) -> Result<Format> {
        let (_, book) = self.scope()?;
        book.env().new_instance(format, book)
    }

    // === Identity ===

    pub fn name(&self) -> Result<String> {
        self.with(|sheet| Ok(sheet.name().to_string()))
    }

    pub fn set_name(&self, name: &str) -> Result<()> {
        let (id, book) = self.live()?;
        book.call_ok(|native| native.sheet_set_name(id, name))
    }

    // === Cells ===

    pub fn cell_type(&self, row: i32, col: i32) -> Result<CellType> {
        self.with(|sheet| sheet.cell_type(row, col))
    }

    pub fn is_formula(&self, row: i32, col: i32) -> Result<bool> {
        self.with(|sheet| sheet.is_formula(row, col))
    }

    pub fn is_rich_str(&self, row: i32, col: i32) -> Result<bool> {
        self.with(|sheet| sheet.is_rich_str(row, col))
    }

    /// Whether a numeric cell is displayed as a date
    pub fn is_date(&self, row: i32, col: i32) -> Result<bool> {
        let (id, book) = self.live()?;
        book.call(|native| native.sheet_is_date(id, row, col))
    }

    /// Format of a cell; cells without one report the default format
    pub fn cell_format(&self, row: i32, col: i32) -> Result<Format> {
        let (id, book) = self.live()?;
        let format = book.call(|native| native.sheet_cell_format(id, row, col))?;
        self.format_at(format)
    }

    pub fn set_cell_format(&self, row: i32, col: i32, format: &Format) -> Result<()> {
        ensure_same_book!(self.owning_book(), format.owning_book());
        let (format, _) = format.scope()?;
        let (id, book) = self.live()?;
        book.call_ok(|native| native.sheet_set_cell_format(id, row, col, format))
    }

    pub fn read_str(&self, row: i32, col: i32) -> Result<String> {
        self.with(|sheet| sheet.read_str(row, col).map(|(text, _)| text))
    }

    pub fn write_str(&self, row: i32, col: i32, value: &str, format: Option<&Format>) -> Result<()> {
        self.write(row, col, CellValue::String(value.to_string()), format)
    }

    pub fn read_num(&self, row: i32, col: i32) -> Result<f64> {
        self.with(|sheet| sheet.read_num(row, col).map(|(value, _)| value))
    }

    pub fn write_num(&self, row: i32, col: i32, value: f64, format: Option<&Format>) -> Result<()> {
        self.write(row, col, CellValue::Number(value), format)
    }

    pub fn read_bool(&self, row: i32, col: i32) -> Result<bool> {
        self.with(|sheet| sheet.read_bool(row, col).map(|(value, _)| value))
    }

    pub fn write_bool(&self, row: i32, col: i32, value: bool, format: Option<&Format>) -> Result<()> {
        self.write(row, col, CellValue::Boolean(value), format)
    }

    /// Format of a blank cell; fails for cells holding a value
    pub fn read_blank(&self, row: i32, col: i32) -> Result<Format> {
        self.with(|sheet| sheet.read_blank(row, col))?;
        self.cell_format(row, col)
    }

    pub fn write_blank(&self, row: i32, col: i32, format: &Format) -> Result<()> {
        self.write(row, col, CellValue::Blank, Some(format))
    }

    pub fn read_formula(&self, row: i32, col: i32) -> Result<String> {
        self.with(|sheet| sheet.read_formula(row, col).map(|(text, _)| text))
    }

    /// Write a formula; a leading '=' is accepted, invalid syntax fails
    pub fn write_formula(&self, row: i32, col: i32, expr: &str, format: Option<&Format>) -> Result<()> {
        self.write_formula_value(row, col, expr, None, format)
    }

    /// Write a formula with a cached numeric result
    pub fn write_formula_num(&self, row: i32, col: i32, expr: &str, value: f64, format: Option<&Format>) -> Result<()> {
        self.write_formula_value(row, col, expr, Some(CellValue::Number(value)), format)
    }

    /// Write a formula with a cached string result
    pub fn write_formula_str(&self, row: i32, col: i32, expr: &str, value: &str, format: Option<&Format>) -> Result<()> {
        self.write_formula_value(row, col, expr, Some(CellValue::String(value.to_string())), format)
    }

    /// Write a formula with a cached boolean result
    pub fn write_formula_bool(&self, row: i32, col: i32, expr: &str, value: bool, format: Option<&Format>) -> Result<()> {
        self.write_formula_value(row, col, expr, Some(CellValue::Boolean(value)), format)
    }

    fn write_formula_value(
        &self,
        row: i32,
        col: i32,
        expr: &str,
        cached: Option<CellValue>,
        format: Option<&Format>,
    ) -> Result<()> {
        let value = CellValue::Formula {
            text: expr.to_string(),
            cached: cached.map(Box::new),
        };
        self.write(row, col, value, format)
    }

    /// Copy a rich string cell into a new rich string of the book
    pub fn read_rich_str(&self, row: i32, col: i32) -> Result<RichString> {
        let (id, book) = self.live()?;
        let (rich, _) = book.call(|native| native.sheet_read_rich_str(id, row, col))?;
        book.env().new_instance(rich, book)
    }

    pub fn write_rich_str(&self, row: i32, col: i32, value: &RichString, format: Option<&Format>) -> Result<()> {
        ensure_same_book!(self.owning_book(), value.owning_book());
        let (rich, _) = value.scope()?;
        let format = self.format_arg(format)?;
        let (id, book) = self.live()?;
        book.call_ok(|native| native.sheet_write_rich_str(id, row, col, rich, format))
    }

    pub fn read_error(&self, row: i32, col: i32) -> Result<ErrorType> {
        self.with(|sheet| sheet.read_error(row, col))
    }

    pub fn write_error(&self, row: i32, col: i32, error: ErrorType, format: Option<&Format>) -> Result<()> {
        self.write(row, col, CellValue::Error(error), format)
    }

    // === Comments ===

    pub fn read_comment(&self, row: i32, col: i32) -> Result<Comment> {
        self.with(|sheet| sheet.read_comment(row, col).cloned())
    }

    pub fn write_comment(&self, row: i32, col: i32, text: &str, author: &str, width: i32, height: i32) -> Result<()> {
        let comment = Comment {
            text: text.to_string(),
            author: author.to_string(),
            width,
            height,
        };
        self.with(|sheet| sheet.write_comment(row, col, comment))
    }

    pub fn remove_comment(&self, row: i32, col: i32) -> Result<()> {
        self.with(|sheet| sheet.remove_comment(row, col))
    }

    // === Rows and columns ===

    pub fn col_width(&self, col: i32) -> Result<f64> {
        self.with(|sheet| sheet.col_width(col))
    }

    pub fn row_height(&self, row: i32) -> Result<f64> {
        self.with(|sheet| sheet.row_height(row))
    }

    /// Set width, format and visibility of columns `first..=last`
    pub fn set_col(&self, first: i32, last: i32, width: f64, format: Option<&Format>, hidden: bool) -> Result<()> {
        let format = self.format_arg(format)?;
        let (id, book) = self.live()?;
        book.call_ok(|native| native.sheet_set_col(id, first, last, width, format, hidden))
    }

    pub fn set_row(&self, row: i32, height: f64, format: Option<&Format>, hidden: bool) -> Result<()> {
        let format = self.format_arg(format)?;
        let (id, book) = self.live()?;
        book.call_ok(|native| native.sheet_set_row(id, row, height, format, hidden))
    }

    pub fn row_hidden(&self, row: i32) -> Result<bool> {
        self.with(|sheet| sheet.row_hidden(row))
    }

    pub fn set_row_hidden(&self, row: i32, hidden: bool) -> Result<()> {
        self.with(|sheet| sheet.set_row_hidden(row, hidden))
    }

    pub fn col_hidden(&self, col: i32) -> Result<bool> {
        self.with(|sheet| sheet.col_hidden(col))
    }

    pub fn set_col_hidden(&self, col: i32, hidden: bool) -> Result<()> {
        self.with(|sheet| sheet.set_col_hidden(col, hidden))
    }

    pub fn default_row_height(&self) -> Result<f64> {
        self.with(|sheet| Ok(sheet.default_row_height()))
    }

    pub fn set_default_row_height(&self, height: f64) -> Result<()> {
        self.with(|sheet| sheet.set_default_row_height(height))
    }

    // === Merged cells ===

    /// Merged region containing a cell
    pub fn merge_at(&self, row: i32, col: i32) -> Result<CellRange> {
        self.with(|sheet| sheet.merge_at(row, col))
    }

    pub fn set_merge(&self, range: CellRange) -> Result<()> {
        self.with(|sheet| sheet.set_merge(range))
    }

    pub fn del_merge(&self, row: i32, col: i32) -> Result<()> {
        self.with(|sheet| sheet.del_merge(row, col))
    }

    pub fn merge_size(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.merge_size()))
    }

    pub fn merge(&self, index: i32) -> Result<CellRange> {
        self.with(|sheet| sheet.merge(index))
    }

    pub fn del_merge_by_index(&self, index: i32) -> Result<()> {
        self.with(|sheet| sheet.del_merge_by_index(index))
    }

    // === Structural edits ===

    pub fn clear(&self, range: CellRange) -> Result<()> {
        self.with(|sheet| sheet.clear(range))
    }

    pub fn insert_row(&self, first: i32, last: i32) -> Result<()> {
        self.with(|sheet| sheet.insert_row(first, last))
    }

    pub fn remove_row(&self, first: i32, last: i32) -> Result<()> {
        self.with(|sheet| sheet.remove_row(first, last))
    }

    pub fn insert_col(&self, first: i32, last: i32) -> Result<()> {
        self.with(|sheet| sheet.insert_col(first, last))
    }

    pub fn remove_col(&self, first: i32, last: i32) -> Result<()> {
        self.with(|sheet| sheet.remove_col(first, last))
    }

    /// Insert rows on the worker pool; `callback` runs when the loop is driven
    pub fn insert_row_async<C>(&self, first: i32, last: i32, callback: C) -> Result<()>
    where
        C: FnOnce(Result<()>) + Send + 'static,
    {
        queue_sheet_edit(self, "insert row", move |sheet| sheet.insert_row(first, last), callback)
    }

    pub fn remove_row_async<C>(&self, first: i32, last: i32, callback: C) -> Result<()>
    where
        C: FnOnce(Result<()>) + Send + 'static,
    {
        queue_sheet_edit(self, "remove row", move |sheet| sheet.remove_row(first, last), callback)
    }

    pub fn insert_col_async<C>(&self, first: i32, last: i32, callback: C) -> Result<()>
    where
        C: FnOnce(Result<()>) + Send + 'static,
    {
        queue_sheet_edit(self, "insert col", move |sheet| sheet.insert_col(first, last), callback)
    }

    pub fn remove_col_async<C>(&self, first: i32, last: i32, callback: C) -> Result<()>
    where
        C: FnOnce(Result<()>) + Send + 'static,
    {
        queue_sheet_edit(self, "remove col", move |sheet| sheet.remove_col(first, last), callback)
    }

    pub fn copy_cell(&self, row_src: i32, col_src: i32, row_dst: i32, col_dst: i32) -> Result<()> {
        self.with(|sheet| sheet.copy_cell(row_src, col_src, row_dst, col_dst))
    }

    // === Used area ===

    pub fn first_row(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.first_row()))
    }

    pub fn last_row(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.last_row()))
    }

    pub fn first_col(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.first_col()))
    }

    pub fn last_col(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.last_col()))
    }

    // === View ===

    pub fn zoom(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.zoom()))
    }

    pub fn set_zoom(&self, zoom: i32) -> Result<()> {
        self.with(|sheet| sheet.set_zoom(zoom))
    }

    /// Row and column of the active cell
    pub fn active_cell(&self) -> Result<(i32, i32)> {
        self.with(|sheet| Ok(sheet.active_cell()))
    }

    pub fn set_active_cell(&self, row: i32, col: i32) -> Result<()> {
        self.with(|sheet| sheet.set_active_cell(row, col))
    }

    // === Filtering ===

    pub fn auto_filter(&self) -> Result<AutoFilter> {
        let (id, book) = self.live()?;
        let filter = book.call(|native| native.sheet_auto_filter(id))?;
        book.env().new_instance(filter, book)
    }

    pub fn is_auto_filter(&self) -> Result<bool> {
        self.with(|sheet| Ok(sheet.is_auto_filter()))
    }

    /// Hide the rows rejected by the auto filter
    pub fn apply_filter(&self) -> Result<()> {
        self.with(|sheet| sheet.apply_filter())
    }

    /// Drop the auto filter; its column proxies stop resolving
    pub fn remove_filter(&self) -> Result<()> {
        self.with(|sheet| {
            sheet.remove_filter();
            Ok(())
        })
    }

    // === Conditional formatting and form controls ===

    /// Start a new set of conditionally formatted ranges (xlsx only)
    pub fn add_conditional_formatting(&self) -> Result<ConditionalFormatting> {
        let (id, book) = self.live()?;
        let formatting = book.call(|native| native.sheet_add_conditional_formatting(id))?;
        book.env().new_instance(formatting, book)
    }

    /// Place a new form control (xlsx only)
    pub fn add_form_control(&self, object_type: ObjectType) -> Result<FormControl> {
        let (id, book) = self.live()?;
        let control = book.call(|native| native.sheet_add_form_control(id, object_type))?;
        book.env().new_instance(control, book)
    }

    pub fn form_control(&self, index: i32) -> Result<FormControl> {
        let (id, book) = self.live()?;
        let control = book.call(|native| native.sheet_form_control(id, index))?;
        book.env().new_instance(control, book)
    }

    pub fn form_control_size(&self) -> Result<i32> {
        self.with(|sheet| Ok(sheet.form_control_size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use xlbind_native::BookType;

    fn book(kind: BookType) -> Book {
        Bindings::new(Config::default().with_worker_threads(1)).unwrap().new_book(kind)
    }

    #[test]
    fn test_write_and_read_values() {
        let book = book(BookType::Xlsx);
        let sheet = book.add_sheet("Data", None).unwrap();

        sheet.write_num(0, 0, 42.5, None).unwrap();
        sheet.write_bool(0, 1, true, None).unwrap();
        sheet.write_error(0, 2, ErrorType::Div0, None).unwrap();

        assert_eq!(sheet.read_num(0, 0).unwrap(), 42.5);
        assert!(sheet.read_bool(0, 1).unwrap());
        assert_eq!(sheet.read_error(0, 2).unwrap(), ErrorType::Div0);
        assert_eq!(sheet.cell_type(0, 1).unwrap(), CellType::Boolean);
        assert_eq!(sheet.cell_type(5, 5).unwrap(), CellType::Empty);
    }

    #[test]
    fn test_formula_with_cached_result() {
        let book = book(BookType::Xlsx);
        let sheet = book.add_sheet("Data", None).unwrap();

        sheet.write_formula_num(1, 0, "=SUM(A1:A1)", 3.0, None).unwrap();
        assert!(sheet.is_formula(1, 0).unwrap());
        assert_eq!(sheet.read_formula(1, 0).unwrap(), "SUM(A1:A1)");
        assert_eq!(sheet.read_num(1, 0).unwrap(), 3.0);
    }

    #[test]
    fn test_blank_cell_keeps_format() {
        let book = book(BookType::Xls);
        let sheet = book.add_sheet("Data", None).unwrap();
        let format = book.add_format(None).unwrap();
        format.set_wrap(true).unwrap();

        sheet.write_blank(2, 2, &format).unwrap();
        assert_eq!(sheet.cell_type(2, 2).unwrap(), CellType::Blank);
        assert!(sheet.read_blank(2, 2).unwrap().wrap().unwrap());
        assert!(!sheet.cell_format(9, 9).unwrap().wrap().unwrap());
    }

    #[test]
    fn test_deleted_sheet_is_discarded() {
        let book = book(BookType::Xlsx);
        let sheet = book.add_sheet("Gone", None).unwrap();
        book.del_sheet(0).unwrap();

        let err = sheet.read_str(0, 0).unwrap_err();
        assert_eq!(err, Error::Generic("sheet has been discarded and is no longer valid".into()));
    }

    #[test]
    fn test_rename_rejects_duplicate() {
        let book = book(BookType::Xlsx);
        let first = book.add_sheet("One", None).unwrap();
        book.add_sheet("Two", None).unwrap();

        assert!(first.set_name("two").is_err());
        first.set_name("Uno").unwrap();
        assert_eq!(first.name().unwrap(), "Uno");
        assert_eq!(book.sheet_name(0).unwrap(), "Uno");
    }

    #[test]
    fn test_merges_and_comments() {
        let book = book(BookType::Xlsx);
        let sheet = book.add_sheet("Data", None).unwrap();

        sheet.set_merge(CellRange::new(0, 1, 0, 2)).unwrap();
        assert_eq!(sheet.merge_at(1, 1).unwrap(), CellRange::new(0, 1, 0, 2));
        assert!(sheet.set_merge(CellRange::new(1, 3, 1, 1)).is_err());
        assert_eq!(sheet.merge_size().unwrap(), 1);

        sheet.write_comment(4, 4, "check", "ops", 100, 50).unwrap();
        assert_eq!(sheet.read_comment(4, 4).unwrap().author, "ops");
        sheet.remove_comment(4, 4).unwrap();
        assert!(sheet.read_comment(4, 4).is_err());
    }

    #[test]
    fn test_rich_string_cells() {
        let book = book(BookType::Xlsx);
        let sheet = book.add_sheet("Data", None).unwrap();
        let rich = book.add_rich_string().unwrap();
        let bold = rich.add_font(None).unwrap();
        bold.set_bold(true).unwrap();
        rich.add_text("Hello ", None).unwrap();
        rich.add_text("world", Some(&bold)).unwrap();

        sheet.write_rich_str(0, 0, &rich, None).unwrap();
        assert!(sheet.is_rich_str(0, 0).unwrap());
        let copy = sheet.read_rich_str(0, 0).unwrap();
        assert_eq!(copy.text_size().unwrap(), 2);
        assert_eq!(copy.get_text(1).unwrap().0, "world");
    }
}
