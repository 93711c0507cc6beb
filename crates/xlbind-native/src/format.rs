//! Cell formats

use crate::color::Color;
use crate::error::{NativeError, Result};
use crate::handle::FontId;
use crate::types::{num_format, AlignH, AlignV, BorderDiagonal, BorderStyle, FillPattern};

/// One edge of a border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderEdge {
    pub style: BorderStyle,
    pub color: Color,
}

impl Default for BorderEdge {
    fn default() -> Self {
        Self {
            style: BorderStyle::None,
            color: Color::BLACK,
        }
    }
}

/// The four outer edges of a cell border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Borders {
    pub left: BorderEdge,
    pub right: BorderEdge,
    pub top: BorderEdge,
    pub bottom: BorderEdge,
}

impl Borders {
    /// Apply one style to every edge
    pub fn set_style(&mut self, style: BorderStyle) {
        for edge in self.edges_mut() {
            edge.style = style;
        }
    }

    /// Apply one color to every edge
    pub fn set_color(&mut self, color: Color) {
        for edge in self.edges_mut() {
            edge.color = color;
        }
    }

    fn edges_mut(&mut self) -> [&mut BorderEdge; 4] {
        [&mut self.left, &mut self.right, &mut self.top, &mut self.bottom]
    }
}

/// Background fill of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    pub pattern: FillPattern,
    pub foreground: Color,
    pub background: Color,
}

impl Default for Fill {
    fn default() -> Self {
        Self {
            pattern: FillPattern::None,
            foreground: Color::DEFAULT_FOREGROUND,
            background: Color::DEFAULT_BACKGROUND,
        }
    }
}

/// A cell format
#[derive(Debug, Clone, PartialEq)]
pub struct Format {
    pub font: FontId,
    pub num_format: i32,
    pub align_h: AlignH,
    pub align_v: AlignV,
    pub wrap: bool,
    rotation: i32,
    indent: i32,
    pub shrink_to_fit: bool,
    pub borders: Borders,
    pub diagonal: BorderDiagonal,
    pub diagonal_edge: BorderEdge,
    pub fill: Fill,
    pub locked: bool,
    pub hidden: bool,
}

impl Format {
    /// Default format using the given font
    pub fn new(font: FontId) -> Self {
        Self {
            font,
            num_format: num_format::GENERAL,
            align_h: AlignH::General,
            align_v: AlignV::Bottom,
            wrap: false,
            rotation: 0,
            indent: 0,
            shrink_to_fit: false,
            borders: Borders::default(),
            diagonal: BorderDiagonal::None,
            diagonal_edge: BorderEdge::default(),
            fill: Fill::default(),
            locked: true,
            hidden: false,
        }
    }

    /// Text rotation in degrees
    pub fn rotation(&self) -> i32 {
        self.rotation
    }

    /// Set text rotation: 0..=90 counter-clockwise, 91..=180 clockwise, 255 vertical
    pub fn set_rotation(&mut self, rotation: i32) -> Result<()> {
        if !(0..=180).contains(&rotation) && rotation != 255 {
            return Err(NativeError::InvalidArgument(format!("rotation {rotation}")));
        }
        self.rotation = rotation;
        Ok(())
    }

    /// Indentation level
    pub fn indent(&self) -> i32 {
        self.indent
    }

    /// Set indentation level (0..=15)
    pub fn set_indent(&mut self, indent: i32) -> Result<()> {
        if !(0..=15).contains(&indent) {
            return Err(NativeError::InvalidArgument(format!("indent {indent}")));
        }
        self.indent = indent;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rotation_bounds() {
        let mut format = Format::new(FontId(0));
        assert!(format.set_rotation(90).is_ok());
        assert!(format.set_rotation(255).is_ok());
        assert!(format.set_rotation(200).is_err());
        assert_eq!(format.rotation(), 255);
    }

    #[test]
    fn test_border_shorthand() {
        let mut borders = Borders::default();
        borders.set_style(BorderStyle::Thick);
        borders.set_color(Color::RED);
        assert_eq!(borders.top, BorderEdge { style: BorderStyle::Thick, color: Color::RED });
        assert_eq!(borders.left, borders.bottom);
    }
}
