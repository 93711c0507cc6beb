//! Module entry point

use std::sync::Arc;

use xlbind_native::BookType;

use crate::auto_filter::AutoFilter;
use crate::book::Book;
use crate::conditional_format::ConditionalFormat;
use crate::conditional_formatting::ConditionalFormatting;
use crate::config::Config;
use crate::core_properties::CoreProperties;
use crate::env::Env;
use crate::error::Result;
use crate::filter_column::FilterColumn;
use crate::font::Font;
use crate::form_control::FormControl;
use crate::format::Format;
use crate::host::{CallInfo, ClassKind, ClassTemplate, EventLoop, Object, Registry};
use crate::proxy::stub_template;
use crate::rich_string::RichString;
use crate::sheet::Sheet;

/// Initialized binding module: class registry, worker pool and event loop
///
/// The thread that owns `Bindings` is the host thread. Async completions
/// run there when [`Bindings::run_until_idle`] or [`Bindings::run_pending`]
/// is called.
#[derive(Debug)]
pub struct Bindings {
    env: Arc<Env>,
    event_loop: EventLoop,
}

impl Bindings {
    /// Register every class and start the worker pool
    pub fn new(config: Config) -> Result<Self> {
        let event_loop = EventLoop::new(&config)?;

        let mut registry = Registry::new();
        registry.register(ClassTemplate::new(Book::CLASS, ClassKind::Public, Book::construct));
        registry.register(stub_template::<Sheet>());
        registry.register(stub_template::<Format>());
        registry.register(stub_template::<Font>());
        registry.register(stub_template::<AutoFilter>());
        registry.register(stub_template::<FilterColumn>());
        registry.register(stub_template::<ConditionalFormat>());
        registry.register(stub_template::<ConditionalFormatting>());
        registry.register(stub_template::<RichString>());
        registry.register(stub_template::<FormControl>());
        registry.register(stub_template::<CoreProperties>());
        tracing::debug!("registered {} classes", registry.len());

        let env = Arc::new(Env::new(registry, event_loop.queue(), config));
        Ok(Self { env, event_loop })
    }

    /// Call a registered constructor the way the host would
    pub fn construct(&self, class: &str, info: &CallInfo) -> Result<Object> {
        self.env.registry.require(class)?.construct(&self.env, info)
    }

    /// Create a book directly
    pub fn new_book(&self, kind: BookType) -> Book {
        Book::create(&self.env, kind)
    }

    /// Run completions that are already waiting
    pub fn run_pending(&mut self) -> usize {
        self.event_loop.run_pending()
    }

    /// Block until all queued async work has completed
    pub fn run_until_idle(&mut self) -> usize {
        self.event_loop.run_until_idle()
    }

    /// Every exported enumeration code as `(name, value)` pairs
    pub fn constants(&self) -> Vec<(String, i32)> {
        xlbind_native::constants()
    }

    pub fn env(&self) -> &Arc<Env> {
        &self.env
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_registers_every_class() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        assert_eq!(
            bindings.env().registry().names(),
            vec![
                "AutoFilter",
                "Book",
                "ConditionalFormat",
                "ConditionalFormatting",
                "CoreProperties",
                "FilterColumn",
                "Font",
                "FormControl",
                "Format",
                "RichString",
                "Sheet",
            ]
        );
        assert_eq!(bindings.env().registry().get("Book").unwrap().kind, ClassKind::Public);
        assert_eq!(bindings.env().registry().get("Sheet").unwrap().kind, ClassKind::Stub);
    }

    #[test]
    fn test_constants_are_exported() {
        let bindings = Bindings::new(Config::default()).unwrap();
        let constants = bindings.constants();
        assert!(constants.contains(&("BOOK_TYPE_XLSX".to_string(), 1)));
        assert!(constants.contains(&("CELLTYPE_STRING".to_string(), 2)));
    }

    #[test]
    fn test_unknown_class() {
        let bindings = Bindings::new(Config::default()).unwrap();
        let err = bindings.construct("Chart", &CallInfo::construct(Vec::new())).unwrap_err();
        assert_eq!(err.message(), "class Chart is not registered");
    }
}
