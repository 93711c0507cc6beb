//! The core document properties proxy

use xlbind_native as native;
use xlbind_native::CorePropertiesId;

use crate::error::Result;
use crate::proxy::{proxy_class, proxy_props, Proxy};

proxy_class!(
    /// Title, subject and creator of an xlsx book
    CoreProperties,
    CorePropertiesId,
    "CoreProperties"
);

impl CoreProperties {
    fn with<T>(&self, f: impl FnOnce(&mut native::CoreProperties) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_core_properties(id, f))
    }
}

proxy_props!(CoreProperties {
    title, set_title: String => title;
    subject, set_subject: String => subject;
    creator, set_creator: String => creator;
});

#[cfg(test)]
mod tests {
    use crate::bindings::Bindings;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use xlbind_native::BookType;

    #[test]
    fn test_properties_persist_in_book() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        let book = bindings.new_book(BookType::Xlsx);

        book.core_properties().unwrap().set_title("Quarterly report").unwrap();
        let props = book.core_properties().unwrap();
        props.set_creator("finance").unwrap();

        assert_eq!(props.title().unwrap(), "Quarterly report");
        assert_eq!(props.creator().unwrap(), "finance");
        assert_eq!(props.subject().unwrap(), "");
    }
}
