//! Colors
//!
//! A color is either an index into the legacy palette or a packed RGB value
//! with the top byte set.

/// A palette index or packed RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

const RGB_FLAG: u32 = 0xFF00_0000;

/// Basic palette entries (indices 8..16)
const PALETTE: [(u8, u8, u8); 8] = [
    (0, 0, 0),
    (255, 255, 255),
    (255, 0, 0),
    (0, 255, 0),
    (0, 0, 255),
    (255, 255, 0),
    (255, 0, 255),
    (0, 255, 255),
];

impl Color {
    pub const BLACK: Color = Color(8);
    pub const WHITE: Color = Color(9);
    pub const RED: Color = Color(10);
    pub const BRIGHT_GREEN: Color = Color(11);
    pub const BLUE: Color = Color(12);
    pub const YELLOW: Color = Color(13);
    pub const PINK: Color = Color(14);
    pub const TURQUOISE: Color = Color(15);
    pub const DEFAULT_FOREGROUND: Color = Color(0x40);
    pub const DEFAULT_BACKGROUND: Color = Color(0x41);
    pub const NONE: Color = Color(0x7F);
    pub const AUTO: Color = Color(0x7FFF);

    /// Pack an RGB triple
    pub fn pack(red: u8, green: u8, blue: u8) -> Self {
        Color(RGB_FLAG | (u32::from(red) << 16) | (u32::from(green) << 8) | u32::from(blue))
    }

    /// Split into an RGB triple, if the color has a concrete value
    pub fn unpack(self) -> Option<(u8, u8, u8)> {
        if self.0 & RGB_FLAG == RGB_FLAG {
            let v = self.0;
            return Some(((v >> 16) as u8, (v >> 8) as u8, v as u8));
        }
        let idx = self.0.checked_sub(8)? as usize;
        PALETTE.get(idx).copied()
    }

    /// Whether the color is a packed RGB value
    pub fn is_rgb(self) -> bool {
        self.0 & RGB_FLAG == RGB_FLAG
    }

    pub(crate) fn constants() -> Vec<(String, i32)> {
        [
            ("BLACK", Color::BLACK),
            ("WHITE", Color::WHITE),
            ("RED", Color::RED),
            ("BRIGHTGREEN", Color::BRIGHT_GREEN),
            ("BLUE", Color::BLUE),
            ("YELLOW", Color::YELLOW),
            ("PINK", Color::PINK),
            ("TURQUOISE", Color::TURQUOISE),
            ("DEFAULT_FOREGROUND", Color::DEFAULT_FOREGROUND),
            ("DEFAULT_BACKGROUND", Color::DEFAULT_BACKGROUND),
            ("NONE", Color::NONE),
            ("AUTO", Color::AUTO),
        ]
        .into_iter()
        .map(|(name, c)| (format!("COLOR_{name}"), c.0 as i32))
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_pack_unpack() {
        let c = Color::pack(0x12, 0x34, 0x56);
        assert!(c.is_rgb());
        assert_eq!(c.unpack(), Some((0x12, 0x34, 0x56)));
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(Color::RED.unpack(), Some((255, 0, 0)));
        assert_eq!(Color::AUTO.unpack(), None);
        assert_eq!(Color(3).unpack(), None);
    }
}
