//! # xlbind
//!
//! Binding layer exposing the [`xlbind_native`] spreadsheet object model to
//! a host scripting runtime.
//!
//! Only [`Book`] has a public constructor. Every other class is a thin proxy
//! produced by a factory method through a guarded stub constructor; it holds
//! the native handle and a reference to its book. Failed native calls raise
//! the book's last error message, and row/column insertion and removal can
//! run on a worker pool with completions delivered on the host thread.
//!
//! ## Example
//!
//! ```rust
//! use xlbind::{Bindings, BookType, CellType, Config};
//!
//! let mut bindings = Bindings::new(Config::default()).unwrap();
//! let book = bindings.new_book(BookType::Xls);
//! let sheet = book.add_sheet("Sheet1", None).unwrap();
//!
//! sheet.write_str(0, 0, "hello", None).unwrap();
//! assert_eq!(sheet.read_str(0, 0).unwrap(), "hello");
//! assert_eq!(sheet.cell_type(0, 0).unwrap(), CellType::String);
//!
//! sheet.insert_row_async(0, 1, |result| assert!(result.is_ok())).unwrap();
//! bindings.run_until_idle();
//! assert_eq!(sheet.read_str(2, 0).unwrap(), "hello");
//! ```

mod async_worker;
pub mod auto_filter;
pub mod bindings;
pub mod book;
pub mod conditional_format;
pub mod conditional_formatting;
pub mod config;
pub mod core_properties;
pub mod env;
pub mod error;
pub mod filter_column;
pub mod font;
pub mod form_control;
pub mod format;
pub mod holder;
pub mod host;
pub mod proxy;
pub mod rich_string;
pub mod sheet;

pub use auto_filter::AutoFilter;
pub use bindings::Bindings;
pub use book::{Book, Disposal};
pub use conditional_format::ConditionalFormat;
pub use conditional_formatting::ConditionalFormatting;
pub use config::Config;
pub use core_properties::CoreProperties;
pub use env::Env;
pub use error::{Error, ErrorClass, Result};
pub use filter_column::FilterColumn;
pub use font::Font;
pub use form_control::FormControl;
pub use format::Format;
pub use holder::{same_book, HasBook};
pub use proxy::{stub_guard, Proxy};
pub use rich_string::RichString;
pub use sheet::Sheet;

pub use xlbind_native::{
    num_format, AlignH, AlignV, BookType, BorderDiagonal, BorderStyle, CellRange, CellType, CfOperator,
    CfTimePeriod, CfType, CfvoType, CheckedType, Color, ColorStop, Comment, CustomFilter, DateParts,
    ErrorType, FillPattern, FilterOperator, FilterType, ObjectType, Script, SheetType, Top10, Underline,
};
