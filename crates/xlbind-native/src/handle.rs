//! Opaque handles into a book's object graph
//!
//! Handles are plain `Copy` values. They stay meaningful only for the book
//! that minted them; sheet-scoped handles also die with their sheet.

macro_rules! pool_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(pub(crate) u32);

        impl $name {
            /// Position in the owning pool
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }
    };
}

pool_handle!(
    /// A sheet, stable across reordering and valid until the sheet is deleted
    SheetId
);
pool_handle!(
    /// A cell format
    FormatId
);
pool_handle!(
    /// A font
    FontId
);
pool_handle!(
    /// A rich string
    RichStringId
);
pool_handle!(
    /// A conditional format (the style applied by a conditional rule)
    ConditionalFormatId
);

/// The auto filter of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AutoFilterId {
    pub(crate) sheet: SheetId,
}

impl AutoFilterId {
    /// Sheet the filter belongs to
    pub fn sheet(self) -> SheetId {
        self.sheet
    }
}

/// One column of a sheet's auto filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FilterColumnId {
    pub(crate) sheet: SheetId,
    pub(crate) slot: u32,
}

/// A conditional formatting range-set of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConditionalFormattingId {
    pub(crate) sheet: SheetId,
    pub(crate) slot: u32,
}

/// A form control of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormControlId {
    pub(crate) sheet: SheetId,
    pub(crate) slot: u32,
}

/// Core document properties of an xlsx book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorePropertiesId;
