//! The cell format proxy

use xlbind_native as native;
use xlbind_native::{AlignH, AlignV, BorderDiagonal, BorderStyle, Color, FillPattern, FormatId};

use crate::error::Result;
use crate::font::Font;
use crate::holder::{ensure_same_book, HasBook};
use crate::proxy::{proxy_class, proxy_props, Proxy};

proxy_class!(
    /// A cell format of a book
    Format,
    FormatId,
    "Format"
);

impl Format {
    fn with<T>(&self, f: impl FnOnce(&mut native::Format) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_format(id, f))
    }

    /// Font used by cells with this format
    pub fn font(&self) -> Result<Font> {
        let (_, book) = self.scope()?;
        let font = self.with(|format| Ok(format.font))?;
        book.env().new_instance(font, book)
    }

    pub fn set_font(&self, font: &Font) -> Result<()> {
        ensure_same_book!(self.owning_book(), font.owning_book());
        let (font, _) = font.scope()?;
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.format_set_font(id, font))
    }

    /// Built-in or custom number format id
    pub fn num_format(&self) -> Result<i32> {
        self.with(|format| Ok(format.num_format))
    }

    pub fn set_num_format(&self, num_format: i32) -> Result<()> {
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.format_set_num_format(id, num_format))
    }

    pub fn rotation(&self) -> Result<i32> {
        self.with(|format| Ok(format.rotation()))
    }

    pub fn set_rotation(&self, rotation: i32) -> Result<()> {
        self.with(|format| format.set_rotation(rotation))
    }

    pub fn indent(&self) -> Result<i32> {
        self.with(|format| Ok(format.indent()))
    }

    pub fn set_indent(&self, indent: i32) -> Result<()> {
        self.with(|format| format.set_indent(indent))
    }

    /// Style all four outer edges
    pub fn set_border(&self, style: BorderStyle) -> Result<()> {
        self.with(|format| {
            format.borders.set_style(style);
            Ok(())
        })
    }

    /// Color all four outer edges
    pub fn set_border_color(&self, color: Color) -> Result<()> {
        self.with(|format| {
            format.borders.set_color(color);
            Ok(())
        })
    }
}

proxy_props!(Format {
    align_h, set_align_h: AlignH => align_h;
    align_v, set_align_v: AlignV => align_v;
    wrap, set_wrap: bool => wrap;
    shrink_to_fit, set_shrink_to_fit: bool => shrink_to_fit;
    border_left, set_border_left: BorderStyle => borders.left.style;
    border_right, set_border_right: BorderStyle => borders.right.style;
    border_top, set_border_top: BorderStyle => borders.top.style;
    border_bottom, set_border_bottom: BorderStyle => borders.bottom.style;
    border_left_color, set_border_left_color: Color => borders.left.color;
    border_right_color, set_border_right_color: Color => borders.right.color;
    border_top_color, set_border_top_color: Color => borders.top.color;
    border_bottom_color, set_border_bottom_color: Color => borders.bottom.color;
    /// Which diagonals are drawn
    border_diagonal, set_border_diagonal: BorderDiagonal => diagonal;
    border_diagonal_style, set_border_diagonal_style: BorderStyle => diagonal_edge.style;
    border_diagonal_color, set_border_diagonal_color: Color => diagonal_edge.color;
    fill_pattern, set_fill_pattern: FillPattern => fill.pattern;
    pattern_foreground_color, set_pattern_foreground_color: Color => fill.foreground;
    pattern_background_color, set_pattern_background_color: Color => fill.background;
    locked, set_locked: bool => locked;
    hidden, set_hidden: bool => hidden;
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bindings::Bindings;
    use crate::config::Config;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use xlbind_native::{num_format, BookType};

    fn bindings() -> Bindings {
        Bindings::new(Config::default().with_worker_threads(1)).unwrap()
    }

    #[test]
    fn test_properties_round_trip() {
        let book = bindings().new_book(BookType::Xlsx);
        let format = book.add_format(None).unwrap();

        format.set_align_h(AlignH::Center).unwrap();
        format.set_border(BorderStyle::Thin).unwrap();
        format.set_border_top_color(Color::RED).unwrap();
        format.set_fill_pattern(FillPattern::Solid).unwrap();

        assert_eq!(format.align_h().unwrap(), AlignH::Center);
        assert_eq!(format.border_bottom().unwrap(), BorderStyle::Thin);
        assert_eq!(format.border_top_color().unwrap(), Color::RED);
        assert_eq!(format.border_left_color().unwrap(), Color::BLACK);
        assert_eq!(format.fill_pattern().unwrap(), FillPattern::Solid);
    }

    #[test]
    fn test_parent_format_is_copied() {
        let book = bindings().new_book(BookType::Xls);
        let parent = book.add_format(None).unwrap();
        parent.set_num_format(num_format::PERCENT).unwrap();

        let child = book.add_format(Some(&parent)).unwrap();
        assert_eq!(child.num_format().unwrap(), num_format::PERCENT);
        child.set_wrap(true).unwrap();
        assert!(!parent.wrap().unwrap());
    }

    #[test]
    fn test_rotation_error_is_native() {
        let book = bindings().new_book(BookType::Xls);
        let format = book.add_format(None).unwrap();
        let err = format.set_rotation(500).unwrap_err();
        assert_eq!(err, Error::Native("invalid argument: rotation 500".into()));
        assert_eq!(book.error_message().unwrap(), "invalid argument: rotation 500");
    }

    #[test]
    fn test_font_from_other_book_is_rejected() {
        let bindings = bindings();
        let a = bindings.new_book(BookType::Xlsx);
        let b = bindings.new_book(BookType::Xlsx);
        let format = a.add_format(None).unwrap();
        let font = b.add_font(None).unwrap();

        assert_eq!(format.set_font(&font), Err(Error::Type("parent books differ".into())));

        let own = a.add_font(None).unwrap();
        own.set_bold(true).unwrap();
        format.set_font(&own).unwrap();
        assert!(format.font().unwrap().bold().unwrap());
    }
}
