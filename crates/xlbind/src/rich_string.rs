//! The rich string proxy

use xlbind_native::RichStringId;

use crate::error::Result;
use crate::font::Font;
use crate::holder::{ensure_same_book, HasBook};
use crate::proxy::{proxy_class, Proxy};

proxy_class!(
    /// Text made of runs with their own fonts
    RichString,
    RichStringId,
    "RichString"
);

impl RichString {
    /// Create a font for later runs, copied from `init` when given
    pub fn add_font(&self, init: Option<&Font>) -> Result<Font> {
        let init = match init {
            Some(font) => {
                ensure_same_book!(self.owning_book(), font.owning_book());
                Some(font.scope()?.0)
            }
            None => None,
        };
        let (id, book) = self.scope()?;
        let font = book.call(|native| native.rich_string_add_font(id, init))?;
        book.env().new_instance(font, book)
    }

    /// Append a run
    pub fn add_text(&self, text: &str, font: Option<&Font>) -> Result<()> {
        let font = match font {
            Some(font) => {
                ensure_same_book!(self.owning_book(), font.owning_book());
                Some(font.scope()?.0)
            }
            None => None,
        };
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.rich_string_add_text(id, text, font))
    }

    /// Text of run `index` and its font, if it has one
    pub fn get_text(&self, index: i32) -> Result<(String, Option<Font>)> {
        let (id, book) = self.scope()?;
        let (text, font) = book.call(|native| native.with_rich_string(id, |rich| rich.text(index)))?;
        let font = match font {
            Some(font) => Some(book.env().new_instance(font, book)?),
            None => None,
        };
        Ok((text, font))
    }

    /// Number of runs
    pub fn text_size(&self) -> Result<i32> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_rich_string(id, |rich| Ok(rich.text_size())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::config::Config;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use xlbind_native::BookType;

    #[test]
    fn test_runs_and_fonts() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        let book = bindings.new_book(BookType::Xlsx);
        let other = bindings.new_book(BookType::Xlsx);
        let rich = book.add_rich_string().unwrap();

        let italic = rich.add_font(None).unwrap();
        italic.set_italic(true).unwrap();
        rich.add_text("plain ", None).unwrap();
        rich.add_text("slanted", Some(&italic)).unwrap();

        assert_eq!(rich.text_size().unwrap(), 2);
        let (text, font) = rich.get_text(1).unwrap();
        assert_eq!(text, "slanted");
        assert!(font.unwrap().italic().unwrap());
        assert!(rich.get_text(0).unwrap().1.is_none());
        assert!(rich.get_text(2).is_err());

        let foreign = other.add_font(None).unwrap();
        assert_eq!(
            rich.add_text("nope", Some(&foreign)),
            Err(Error::Type("parent books differ".into()))
        );
        assert_eq!(rich.text_size().unwrap(), 2);
    }
}
