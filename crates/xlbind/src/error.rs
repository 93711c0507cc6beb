//! Errors raised to the host runtime

use thiserror::Error;

pub(crate) const INVALID_SCOPE: &str = "invalid scope";
pub(crate) const PARENT_BOOKS_DIFFER: &str = "parent books differ";
pub(crate) const DIRECT_CONSTRUCTOR: &str = "You are not supposed to call this constructor directly";
pub(crate) const INVALID_BOOK_TYPE: &str = "invalid book type";
pub(crate) const SHEET_DISCARDED: &str = "sheet has been discarded and is no longer valid";
pub(crate) const ASYNC_PENDING: &str = "async operation pending on parent";
pub(crate) const BOOK_RELEASED: &str = "book has been released";

/// Host-visible exception class of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    TypeError,
    Error,
}

/// Errors raised by binding calls
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Bad argument shape, stub-guard rejection, invalid scope or cross-book mix
    #[error("{0}")]
    Type(String),

    /// Runtime condition detected by the binding itself
    #[error("{0}")]
    Generic(String),

    /// Last error reported by the wrapped library
    #[error("{0}")]
    Native(String),
}

impl Error {
    /// Build a native error from a book's last-error text
    pub(crate) fn native(message: &str) -> Self {
        if message == xlbind_native::OK_MESSAGE {
            Error::Native("not found".to_string())
        } else {
            Error::Native(message.to_string())
        }
    }

    pub(crate) fn type_error(message: &str) -> Self {
        Error::Type(message.to_string())
    }

    pub(crate) fn generic(message: &str) -> Self {
        Error::Generic(message.to_string())
    }

    /// Exception class the host should raise
    pub fn class(&self) -> ErrorClass {
        match self {
            Error::Type(_) => ErrorClass::TypeError,
            Error::Generic(_) | Error::Native(_) => ErrorClass::Error,
        }
    }

    /// Message carried by the error
    pub fn message(&self) -> &str {
        match self {
            Error::Type(m) | Error::Generic(m) | Error::Native(m) => m,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ok_message_reads_as_not_found() {
        assert_eq!(Error::native("ok"), Error::Native("not found".into()));
        assert_eq!(Error::native("invalid row index 3").message(), "invalid row index 3");
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(Error::type_error(INVALID_SCOPE).class(), ErrorClass::TypeError);
        assert_eq!(Error::generic(BOOK_RELEASED).class(), ErrorClass::Error);
        assert_eq!(Error::native("x").to_string(), "x");
    }
}
