//! Proxy construction
//!
//! Every class except the book is registered with a stub constructor that
//! only accepts the internal sentinel: a construct call with exactly one
//! argument, an external whose payload is null. The resulting stub has an
//! empty native slot until [`crate::env::Env::new_instance`] wraps it.

use std::fmt::Debug;
use std::sync::Arc;

use crate::book::Book;
use crate::env::Env;
use crate::error::{Error, Result, DIRECT_CONSTRUCTOR};
use crate::holder::{BookHolder, HasBook, Wrapped};
use crate::host::{CallInfo, ClassKind, ClassTemplate, Object, Value};

/// Reject any call shape other than the internal sentinel
pub fn stub_guard(info: &CallInfo) -> Result<()> {
    let sentinel = info.is_construct_call()
        && info.len() == 1
        && matches!(info.arg(0), Value::External(e) if e.is_null());
    if !sentinel {
        tracing::debug!(
            "rejected direct constructor call (construct={}, args={})",
            info.is_construct_call(),
            info.len()
        );
        return Err(Error::type_error(DIRECT_CONSTRUCTOR));
    }
    Ok(())
}

/// Slots composed into every owned-entity proxy
#[derive(Debug)]
pub struct Slots<H> {
    pub(crate) native: Wrapped<H>,
    pub(crate) book: BookHolder,
}

impl<H: Copy> Slots<H> {
    pub(crate) fn empty() -> Self {
        Self {
            native: Wrapped::empty(),
            book: BookHolder::empty(),
        }
    }
}

/// A host-visible class wrapping one kind of native handle
pub trait Proxy: HasBook + Clone + Send + Sync + Sized + 'static {
    type Native: Copy + Debug + Send + Sync + 'static;

    /// Registered class name
    const CLASS: &'static str;

    /// A fresh instance with empty slots
    fn stub() -> Self;

    fn slots(&self) -> &Slots<Self::Native>;

    fn from_object(object: Object) -> Option<Self>;

    fn into_object(self) -> Object;

    /// Whether the native slot has been filled
    fn is_wrapped(&self) -> bool {
        self.slots().native.is_wrapped()
    }

    /// Native handle and owning book, or "invalid scope" for a stub
    fn scope(&self) -> Result<(Self::Native, &Book)> {
        let handle = self.slots().native.get()?;
        let book = self.slots().book.require()?;
        Ok((handle, book))
    }
}

/// Stub constructor body shared by every owned-entity class
pub fn construct_stub<T: Proxy>(_env: &Arc<Env>, info: &CallInfo) -> Result<Object> {
    stub_guard(info)?;
    Ok(T::stub().into_object())
}

/// Template registering `T` behind the stub guard
pub fn stub_template<T: Proxy>() -> ClassTemplate {
    ClassTemplate::new(T::CLASS, ClassKind::Stub, construct_stub::<T>)
}

/// Define an owned-entity proxy class over a native handle type
macro_rules! proxy_class {
    ($(#[$meta:meta])* $name:ident, $native:ty, $class:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(std::sync::Arc<$crate::proxy::Slots<$native>>);

        impl $crate::proxy::Proxy for $name {
            type Native = $native;
            const CLASS: &'static str = $class;

            fn stub() -> Self {
                $name(std::sync::Arc::new($crate::proxy::Slots::empty()))
            }

            fn slots(&self) -> &$crate::proxy::Slots<$native> {
                &self.0
            }

            fn from_object(object: $crate::host::Object) -> Option<Self> {
                match object {
                    $crate::host::Object::$name(p) => Some(p),
                    _ => None,
                }
            }

            fn into_object(self) -> $crate::host::Object {
                $crate::host::Object::$name(self)
            }
        }

        impl $crate::holder::HasBook for $name {
            fn owning_book(&self) -> Option<&$crate::book::Book> {
                self.0.book.book()
            }
        }
    };
}

pub(crate) use proxy_class;

/// Plain field getters and setters forwarded through the proxy's `with`
///
/// `String` fields take `&str` in their setter; every other type is copied.
macro_rules! proxy_props {
    ($proxy:ident { $($body:tt)* }) => {
        impl $proxy {
            $crate::proxy::proxy_props!(@items $($body)*);
        }
    };
    (@items) => {};
    (@items $(#[$meta:meta])* $get:ident, $set:ident: String => $($field:ident).+; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $get(&self) -> $crate::error::Result<String> {
            self.with(|target| Ok(target.$($field).+.clone()))
        }

        pub fn $set(&self, value: &str) -> $crate::error::Result<()> {
            self.with(|target| {
                target.$($field).+ = value.to_string();
                Ok(())
            })
        }

        $crate::proxy::proxy_props!(@items $($rest)*);
    };
    (@items $(#[$meta:meta])* $get:ident, $set:ident: $ty:ty => $($field:ident).+; $($rest:tt)*) => {
        $(#[$meta])*
        pub fn $get(&self) -> $crate::error::Result<$ty> {
            self.with(|target| Ok(target.$($field).+))
        }

        pub fn $set(&self, value: $ty) -> $crate::error::Result<()> {
            self.with(|target| {
                target.$($field).+ = value;
                Ok(())
            })
        }

        $crate::proxy::proxy_props!(@items $($rest)*);
    };
}

pub(crate) use proxy_props;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::External;
    use pretty_assertions::assert_eq;

    fn sentinel() -> Value {
        Value::External(External::null())
    }

    #[test]
    fn test_guard_accepts_only_the_sentinel() {
        assert!(stub_guard(&CallInfo::construct(vec![sentinel()])).is_ok());

        let mut slot = 1u8;
        let bad = [
            CallInfo::construct(Vec::new()),
            CallInfo::construct(vec![sentinel(), sentinel()]),
            CallInfo::construct(vec![Value::from(0)]),
            CallInfo::construct(vec![Value::Null]),
            CallInfo::construct(vec![Value::External(External::new((&mut slot as *mut u8).cast()))]),
            CallInfo::call(vec![sentinel()]),
        ];
        for info in &bad {
            assert_eq!(
                stub_guard(info),
                Err(Error::Type("You are not supposed to call this constructor directly".into()))
            );
        }
    }
}
