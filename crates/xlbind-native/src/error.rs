//! Error types for xlbind-native
//!
//! These never cross the public handle API directly. Every failing call on
//! [`NativeBook`](crate::NativeBook) stores the rendered message as the book's
//! last error and reports failure through its return value.

use thiserror::Error;

/// Result type alias using [`NativeError`]
pub type Result<T> = std::result::Result<T, NativeError>;

/// Failures of the in-memory spreadsheet library
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NativeError {
    /// Row index outside the sheet limits
    #[error("invalid row index {0}")]
    RowOutOfBounds(i32),

    /// Column index outside the sheet limits
    #[error("invalid column index {0}")]
    ColumnOutOfBounds(i32),

    /// Inverted or out-of-bounds range
    #[error("invalid range {first}:{last}")]
    InvalidRange { first: i32, last: i32 },

    /// Cell holds a different kind of value
    #[error("cell doesn't contain {0}")]
    CellType(&'static str),

    /// Sheet handle no longer refers to a live sheet
    #[error("sheet not found")]
    SheetNotFound,

    /// Sheet index out of range
    #[error("sheet index {0} out of range")]
    SheetIndex(i32),

    /// Name rejected by the library
    #[error("invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Name used by another sheet
    #[error("sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// Formula failed syntax validation
    #[error("invalid formula: {0}")]
    InvalidFormula(String),

    /// Handle of a pooled object the book does not know
    #[error("{0} not found")]
    UnknownHandle(&'static str),

    /// Index into a collection out of range
    #[error("{what} index {index} out of range")]
    Index { what: &'static str, index: i32 },

    /// Feature unavailable for the book's file type
    #[error("{0} is available only in xlsx format")]
    XlsxOnly(&'static str),

    /// Argument rejected by the library
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Merge overlapping an existing merged region
    #[error("merge {0} intersects an existing merged region")]
    MergeConflict(String),

    /// No merged region contains the cell
    #[error("cell ({0}, {1}) is not merged")]
    NotMerged(i32, i32),

    /// Date outside the representable serial range
    #[error("invalid date")]
    InvalidDate,
}
