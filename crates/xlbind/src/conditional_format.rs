//! The conditional format proxy

use xlbind_native as native;
use xlbind_native::{BorderStyle, Color, ConditionalFormatId, FillPattern};

use crate::error::Result;
use crate::font::Font;
use crate::proxy::{proxy_class, proxy_props, Proxy};

proxy_class!(
    /// Style applied by conditional formatting rules (xlsx only)
    ConditionalFormat,
    ConditionalFormatId,
    "ConditionalFormat"
);

impl ConditionalFormat {
    fn with<T>(&self, f: impl FnOnce(&mut native::ConditionalFormat) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_conditional_format(id, f))
    }

    /// The format's own font
    pub fn font(&self) -> Result<Font> {
        let (_, book) = self.scope()?;
        let font = self.with(|format| Ok(format.font))?;
        book.env().new_instance(font, book)
    }

    pub fn num_format(&self) -> Result<i32> {
        self.with(|format| Ok(format.num_format))
    }

    pub fn set_num_format(&self, num_format: i32) -> Result<()> {
        let (id, book) = self.scope()?;
        book.call_ok(|native| native.conditional_format_set_num_format(id, num_format))
    }

    /// Custom number format string, empty when none is set
    pub fn custom_num_format(&self) -> Result<String> {
        self.with(|format| Ok(format.custom_num_format.clone().unwrap_or_default()))
    }

    pub fn set_custom_num_format(&self, num_format: &str) -> Result<()> {
        self.with(|format| format.set_custom_num_format(num_format))
    }

    pub fn set_border(&self, style: BorderStyle) -> Result<()> {
        self.with(|format| {
            format.borders.set_style(style);
            Ok(())
        })
    }

    pub fn set_border_color(&self, color: Color) -> Result<()> {
        self.with(|format| {
            format.borders.set_color(color);
            Ok(())
        })
    }
}

proxy_props!(ConditionalFormat {
    border_left, set_border_left: BorderStyle => borders.left.style;
    border_right, set_border_right: BorderStyle => borders.right.style;
    border_top, set_border_top: BorderStyle => borders.top.style;
    border_bottom, set_border_bottom: BorderStyle => borders.bottom.style;
    border_left_color, set_border_left_color: Color => borders.left.color;
    border_right_color, set_border_right_color: Color => borders.right.color;
    border_top_color, set_border_top_color: Color => borders.top.color;
    border_bottom_color, set_border_bottom_color: Color => borders.bottom.color;
    fill_pattern, set_fill_pattern: FillPattern => fill.pattern;
    pattern_foreground_color, set_pattern_foreground_color: Color => fill.foreground;
    pattern_background_color, set_pattern_background_color: Color => fill.background;
});
