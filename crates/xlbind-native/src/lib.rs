//! # xlbind-native
//!
//! In-memory spreadsheet object graph driven through opaque handles.
//!
//! A [`NativeBook`] owns every sheet, format, font, rich string and
//! conditional format. Callers hold small `Copy` handles such as
//! [`SheetId`] or [`FormatId`] and pass them back into the book. Failing
//! calls return `false` or `None`; the reason is available from
//! [`NativeBook::error_message`] until the next call.
//!
//! ## Example
//!
//! ```rust
//! use xlbind_native::{BookType, CellValue, NativeBook};
//!
//! let mut book = NativeBook::new(BookType::Xlsx);
//! let sheet = book.add_sheet("Sheet1", None).unwrap();
//! assert!(book.sheet_write(sheet, 0, 0, CellValue::Number(42.0), None));
//!
//! assert!(!book.sheet_write(sheet, -1, 0, CellValue::Number(1.0), None));
//! assert_eq!(book.error_message(), "invalid row index -1");
//! ```

pub mod book;
pub mod cell;
pub mod color;
pub mod conditional;
pub mod date;
pub mod error;
pub mod filter;
pub mod font;
pub mod form_control;
pub mod format;
pub mod formula;
pub mod handle;
pub mod range;
pub mod rich_string;
pub mod sheet;
pub mod types;

pub use book::{BookSettings, CoreProperties, NativeBook, OK_MESSAGE, VERSION};
pub use cell::{CellData, CellValue, RichRun};
pub use color::Color;
pub use conditional::{CfRule, ColorStop, ConditionalFormat, ConditionalFormatting, RuleEntry};
pub use date::DateParts;
pub use error::{NativeError, Result};
pub use filter::{AutoFilter, CustomFilter, FilterColumn, Top10};
pub use font::Font;
pub use form_control::FormControl;
pub use format::{BorderEdge, Borders, Fill, Format};
pub use handle::{
    AutoFilterId, ConditionalFormatId, ConditionalFormattingId, CorePropertiesId, FilterColumnId,
    FontId, FormControlId, FormatId, RichStringId, SheetId,
};
pub use range::CellRange;
pub use rich_string::RichString;
pub use sheet::{Comment, Sheet};
pub use types::{
    num_format, AlignH, AlignV, BookType, BorderDiagonal, BorderStyle, CellType, CfOperator,
    CfTimePeriod, CfType, CfvoType, CheckedType, ErrorType, FillPattern, FilterOperator,
    FilterType, ObjectType, Script, SheetType, Underline,
};

/// Every exported enumeration code as `(name, value)` pairs
pub fn constants() -> Vec<(String, i32)> {
    types::constants()
}
