//! Native handle and owning book slots shared by every proxy

use std::sync::OnceLock;

use crate::book::Book;
use crate::error::{Error, Result, INVALID_SCOPE};

/// Native handle slot; empty until the factory wraps it
#[derive(Debug)]
pub struct Wrapped<H>(OnceLock<H>);

impl<H: Copy> Wrapped<H> {
    pub fn empty() -> Self {
        Wrapped(OnceLock::new())
    }

    /// The wrapped handle, or an "invalid scope" type error for a stub
    pub fn get(&self) -> Result<H> {
        self.0.get().copied().ok_or_else(|| Error::type_error(INVALID_SCOPE))
    }

    pub fn is_wrapped(&self) -> bool {
        self.0.get().is_some()
    }

    pub(crate) fn wrap(&self, handle: H) -> Result<()> {
        self.0
            .set(handle)
            .map_err(|_| Error::generic("proxy is already wrapped"))
    }
}

/// Relationship from a proxy back to its book
#[derive(Debug, Default)]
pub struct BookHolder(OnceLock<Book>);

impl BookHolder {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Record the owning book; done once by the factory
    pub fn attach(&self, book: &Book) -> Result<()> {
        self.0
            .set(book.clone())
            .map_err(|_| Error::generic("proxy already belongs to a book"))
    }

    pub fn book(&self) -> Option<&Book> {
        self.0.get()
    }

    /// The owning book, or "invalid scope" for a stub
    pub fn require(&self) -> Result<&Book> {
        self.book().ok_or_else(|| Error::type_error(INVALID_SCOPE))
    }
}

/// Access to the owning book of any entity
pub trait HasBook {
    fn owning_book(&self) -> Option<&Book>;
}

/// Whether two entities may be combined in one native call
///
/// An entity without a recorded book never fails the check.
pub fn same_book(a: Option<&Book>, b: Option<&Book>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.ptr_eq(b),
        _ => true,
    }
}

/// Return a "parent books differ" type error unless both entities share a book
macro_rules! ensure_same_book {
    ($a:expr, $b:expr) => {
        if !$crate::holder::same_book($a, $b) {
            return Err($crate::error::Error::type_error($crate::error::PARENT_BOOKS_DIFFER));
        }
    };
}

pub(crate) use ensure_same_book;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stub_slot_reports_invalid_scope() {
        let slot: Wrapped<u32> = Wrapped::empty();
        assert!(!slot.is_wrapped());
        assert_eq!(slot.get(), Err(Error::Type("invalid scope".into())));

        slot.wrap(7).unwrap();
        assert_eq!(slot.get(), Ok(7));
        assert!(slot.wrap(8).is_err());
        assert_eq!(slot.get(), Ok(7));
    }

    #[test]
    fn test_unattached_holder() {
        let holder = BookHolder::empty();
        assert!(holder.book().is_none());
        assert_eq!(holder.require().unwrap_err().message(), "invalid scope");
        assert!(same_book(holder.book(), None));
    }
}
