//! The font proxy

use xlbind_native as native;
use xlbind_native::{Color, FontId, Script, Underline};

use crate::error::Result;
use crate::proxy::{proxy_class, proxy_props, Proxy};

proxy_class!(
    /// A font of a book, shared by formats, rich text runs and conditional formats
    Font,
    FontId,
    "Font"
);

impl Font {
    fn with<T>(&self, f: impl FnOnce(&mut native::Font) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_font(id, f))
    }

    pub fn name(&self) -> Result<String> {
        self.with(|font| Ok(font.name().to_string()))
    }

    pub fn set_name(&self, name: &str) -> Result<()> {
        self.with(|font| font.set_name(name))
    }

    /// Size in points
    pub fn size(&self) -> Result<i32> {
        self.with(|font| Ok(font.size()))
    }

    pub fn set_size(&self, size: i32) -> Result<()> {
        self.with(|font| font.set_size(size))
    }
}

proxy_props!(Font {
    italic, set_italic: bool => italic;
    strike_out, set_strike_out: bool => strike_out;
    color, set_color: Color => color;
    bold, set_bold: bool => bold;
    script, set_script: Script => script;
    underline, set_underline: Underline => underline;
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use xlbind_native::BookType;

    #[test]
    fn test_font_properties() {
        let bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
        let book = bindings.new_book(BookType::Xlsx);
        let font = book.add_font(None).unwrap();

        assert_eq!(font.name().unwrap(), "Calibri");
        assert_eq!(font.size().unwrap(), 11);

        font.set_size(14).unwrap();
        font.set_underline(Underline::Double).unwrap();
        font.set_color(Color::BLUE).unwrap();
        assert!(font.set_size(0).is_err());

        let copy = book.add_font(Some(&font)).unwrap();
        assert_eq!(copy.size().unwrap(), 14);
        assert_eq!(copy.underline().unwrap(), Underline::Double);
        assert_eq!(copy.color().unwrap(), Color::BLUE);
    }
}
