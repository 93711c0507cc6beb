//! Shared binding environment

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::book::Book;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::host::{CallInfo, External, Registry, Value, WorkQueue};
use crate::proxy::Proxy;

/// State shared by every book created through one [`crate::Bindings`]
#[derive(Debug)]
pub struct Env {
    pub(crate) registry: Registry,
    pub(crate) queue: WorkQueue,
    pub(crate) config: Config,
    next_book_id: AtomicU64,
}

impl Env {
    pub(crate) fn new(registry: Registry, queue: WorkQueue, config: Config) -> Self {
        Self {
            registry,
            queue,
            config,
            next_book_id: AtomicU64::new(1),
        }
    }

    pub(crate) fn next_book_id(&self) -> u64 {
        self.next_book_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Create a proxy around a native handle owned by `book`
    ///
    /// The proxy goes through the registered stub constructor and is
    /// wrapped before it is returned, so callers never see an empty stub.
    pub(crate) fn new_instance<T: Proxy>(self: &Arc<Self>, handle: T::Native, book: &Book) -> Result<T> {
        let template = self.registry.require(T::CLASS)?;
        let sentinel = CallInfo::construct(vec![Value::External(External::null())]);
        let object = template.construct(self, &sentinel)?;
        let proxy = T::from_object(object)
            .ok_or_else(|| Error::Generic(format!("constructor of {} returned another class", T::CLASS)))?;
        proxy.slots().native.wrap(handle)?;
        proxy.slots().book.attach(book)?;
        Ok(proxy)
    }
}
