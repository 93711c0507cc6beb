//! Fonts

use crate::color::Color;
use crate::error::{NativeError, Result};
use crate::types::{Script, Underline};

/// Font settings
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    name: String,
    size: i32,
    pub italic: bool,
    pub strike_out: bool,
    pub color: Color,
    pub bold: bool,
    pub script: Script,
    pub underline: Underline,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            name: "Arial".to_string(),
            size: 10,
            italic: false,
            strike_out: false,
            color: Color::AUTO,
            bold: false,
            script: Script::Normal,
            underline: Underline::None,
        }
    }
}

impl Font {
    /// Font with an explicit family and size
    pub fn named(name: impl Into<String>, size: i32) -> Self {
        Self {
            name: name.into(),
            size,
            ..Self::default()
        }
    }

    /// Font family name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the font family name
    pub fn set_name(&mut self, name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(NativeError::InvalidArgument("empty font name".into()));
        }
        self.name = name.to_string();
        Ok(())
    }

    /// Size in points
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Set the size in points (1..=409)
    pub fn set_size(&mut self, size: i32) -> Result<()> {
        if !(1..=409).contains(&size) {
            return Err(NativeError::InvalidArgument(format!("font size {size}")));
        }
        self.size = size;
        Ok(())
    }
}
