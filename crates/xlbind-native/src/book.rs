//! The book: owner of every sheet and pooled object
//!
//! [`NativeBook`] exposes the handle API used by bindings. Calls report
//! failure through `false` or `None` and leave a message behind that
//! [`NativeBook::error_message`] returns until the next call replaces it.
//! A successful call resets the message to `"ok"`.

use ahash::AHashMap;

use crate::cell::{CellValue, RichRun};
use crate::color::Color;
use crate::conditional::{CfRule, ConditionalFormat, ConditionalFormatting};
use crate::date::{self, DateParts};
use crate::error::{NativeError, Result};
use crate::filter::{AutoFilter, FilterColumn};
use crate::font::Font;
use crate::form_control::FormControl;
use crate::format::Format;
use crate::formula;
use crate::handle::{
    AutoFilterId, ConditionalFormatId, ConditionalFormattingId, CorePropertiesId, FilterColumnId,
    FontId, FormControlId, FormatId, RichStringId, SheetId,
};
use crate::range::CellRange;
use crate::rich_string::RichString;
use crate::sheet::Sheet;
use crate::types::{num_format, BookType, ObjectType, SheetType};

/// Library version reported by [`NativeBook::version`]
pub const VERSION: i32 = 0x0401_0000;

/// Message left behind by a successful call
pub const OK_MESSAGE: &str = "ok";

const MAX_SHEET_NAME: usize = 31;

/// Book-wide settings
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BookSettings {
    /// Use the 1904 date system
    pub date1904: bool,
    /// Save as a template
    pub template: bool,
    /// R1C1 reference mode
    pub ref_r1c1: bool,
    /// Colors are packed RGB values instead of palette indices
    pub rgb_mode: bool,
    /// Locale used for string conversion
    pub locale: String,
}

impl Default for BookSettings {
    fn default() -> Self {
        Self {
            date1904: false,
            template: false,
            ref_r1c1: false,
            rgb_mode: false,
            locale: "C".to_string(),
        }
    }
}

impl BookSettings {
    /// Set the date system
    pub fn with_date1904(mut self, date1904: bool) -> Self {
        self.date1904 = date1904;
        self
    }

    /// Set the locale
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Core document properties (xlsx only)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoreProperties {
    pub title: String,
    pub subject: String,
    pub creator: String,
}

/// An in-memory book
#[derive(Debug)]
pub struct NativeBook {
    book_type: BookType,
    settings: BookSettings,
    sheets: Vec<Option<Sheet>>,
    order: Vec<SheetId>,
    formats: Vec<Format>,
    fonts: Vec<Font>,
    rich_strings: Vec<RichString>,
    conditional_formats: Vec<ConditionalFormat>,
    custom_num_formats: Vec<String>,
    custom_num_format_ids: AHashMap<String, i32>,
    active_sheet: usize,
    core: CoreProperties,
    last_error: String,
}

impl NativeBook {
    /// Create an empty book with default settings
    pub fn new(book_type: BookType) -> Self {
        Self::with_settings(book_type, BookSettings::default())
    }

    /// Create an empty book
    pub fn with_settings(book_type: BookType, settings: BookSettings) -> Self {
        let default_font = match book_type {
            BookType::Xls => Font::named("Arial", 10),
            BookType::Xlsx => Font::named("Calibri", 11),
        };
        Self {
            book_type,
            settings,
            sheets: Vec::new(),
            order: Vec::new(),
            formats: vec![Format::new(FontId(0))],
            fonts: vec![default_font],
            rich_strings: Vec::new(),
            conditional_formats: Vec::new(),
            custom_num_formats: Vec::new(),
            custom_num_format_ids: AHashMap::new(),
            active_sheet: 0,
            core: CoreProperties::default(),
            last_error: OK_MESSAGE.to_string(),
        }
    }

    /// File flavour
    pub fn book_type(&self) -> BookType {
        self.book_type
    }

    /// Message of the last call
    pub fn error_message(&self) -> &str {
        &self.last_error
    }

    fn record<T>(&mut self, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                OK_MESSAGE.clone_into(&mut self.last_error);
                Some(value)
            }
            Err(e) => {
                tracing::trace!(error = %e, "native call failed");
                self.last_error = e.to_string();
                None
            }
        }
    }

    fn require_xlsx(&self, feature: &'static str) -> Result<()> {
        match self.book_type {
            BookType::Xlsx => Ok(()),
            BookType::Xls => Err(NativeError::XlsxOnly(feature)),
        }
    }

    // === Sheets ===

    fn sheet_ref(&self, id: SheetId) -> Result<&Sheet> {
        self.sheets
            .get(id.index())
            .and_then(Option::as_ref)
            .ok_or(NativeError::SheetNotFound)
    }

    fn sheet_mut(&mut self, id: SheetId) -> Result<&mut Sheet> {
        self.sheets
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(NativeError::SheetNotFound)
    }

    fn sheet_at(&self, index: i32) -> Result<SheetId> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.order.get(i))
            .copied()
            .ok_or(NativeError::SheetIndex(index))
    }

    fn check_sheet_name(&self, name: &str, except: Option<SheetId>) -> Result<()> {
        let invalid = name.trim().is_empty()
            || name.chars().count() > MAX_SHEET_NAME
            || name.contains(['[', ']', ':', '*', '?', '/', '\\'])
            || name.starts_with('\'');
        if invalid {
            return Err(NativeError::InvalidSheetName(name.to_string()));
        }
        let taken = self
            .order
            .iter()
            .filter(|id| Some(**id) != except)
            .filter_map(|id| self.sheet_ref(*id).ok())
            .any(|s| s.name().eq_ignore_ascii_case(name));
        if taken {
            return Err(NativeError::DuplicateSheetName(name.to_string()));
        }
        Ok(())
    }

    fn create_sheet(&mut self, index: usize, name: &str, template: Option<SheetId>) -> Result<SheetId> {
        self.check_sheet_name(name, None)?;
        let mut sheet = match template {
            Some(tpl) => self.sheet_ref(tpl)?.clone(),
            None => Sheet::new(name, self.book_type),
        };
        sheet.set_name(name);
        let id = SheetId(self.sheets.len() as u32);
        self.sheets.push(Some(sheet));
        self.order.insert(index, id);
        Ok(id)
    }

    /// Append a sheet, optionally copying a template sheet
    pub fn add_sheet(&mut self, name: &str, template: Option<SheetId>) -> Option<SheetId> {
        let result = self.create_sheet(self.order.len(), name, template);
        self.record(result)
    }

    /// Insert a sheet before position `index`
    pub fn insert_sheet(&mut self, index: i32, name: &str, template: Option<SheetId>) -> Option<SheetId> {
        let result = usize::try_from(index)
            .ok()
            .filter(|i| *i <= self.order.len())
            .ok_or(NativeError::SheetIndex(index))
            .and_then(|i| self.create_sheet(i, name, template));
        self.record(result)
    }

    /// Sheet at position `index`
    pub fn get_sheet(&mut self, index: i32) -> Option<SheetId> {
        let result = self.sheet_at(index);
        self.record(result)
    }

    /// Name of the sheet at position `index`
    pub fn sheet_name(&mut self, index: i32) -> Option<String> {
        let result = self
            .sheet_at(index)
            .and_then(|id| self.sheet_ref(id))
            .map(|s| s.name().to_string());
        self.record(result)
    }

    /// Type of the sheet at position `index`
    pub fn sheet_type(&mut self, index: i32) -> Option<SheetType> {
        let result = self.sheet_at(index).and_then(|id| self.sheet_ref(id)).map(Sheet::kind);
        self.record(result)
    }

    /// Move a sheet to a new position
    pub fn move_sheet(&mut self, src: i32, dst: i32) -> bool {
        let result = self.sheet_at(src).and_then(|id| {
            self.sheet_at(dst)?;
            self.order.remove(src as usize);
            self.order.insert(dst as usize, id);
            Ok(())
        });
        self.record(result).is_some()
    }

    /// Delete the sheet at position `index`; its handle becomes invalid
    pub fn del_sheet(&mut self, index: i32) -> bool {
        let result = self.sheet_at(index).map(|id| {
            self.order.remove(index as usize);
            self.sheets[id.index()] = None;
            if self.active_sheet >= self.order.len() {
                self.active_sheet = self.order.len().saturating_sub(1);
            }
        });
        self.record(result).is_some()
    }

    /// Number of sheets
    pub fn sheet_count(&self) -> i32 {
        self.order.len() as i32
    }

    /// Whether a sheet handle still refers to a live sheet
    pub fn is_valid_sheet(&self, id: SheetId) -> bool {
        self.sheet_ref(id).is_ok()
    }

    /// Position of the active sheet
    pub fn active_sheet(&self) -> i32 {
        self.active_sheet as i32
    }

    pub fn set_active_sheet(&mut self, index: i32) -> bool {
        let result = self.sheet_at(index).map(|_| self.active_sheet = index as usize);
        self.record(result).is_some()
    }

    /// Run a call against one sheet
    pub fn with_sheet<T>(&mut self, id: SheetId, f: impl FnOnce(&mut Sheet) -> Result<T>) -> Option<T> {
        let result = self.sheet_mut(id).and_then(f);
        self.record(result)
    }

    /// Rename a sheet
    pub fn sheet_set_name(&mut self, id: SheetId, name: &str) -> bool {
        let result = self.check_sheet_name(name, Some(id)).and_then(|_| {
            self.sheet_mut(id)?.set_name(name);
            Ok(())
        });
        self.record(result).is_some()
    }

    fn check_value(&self, value: CellValue) -> Result<CellValue> {
        match value {
            CellValue::Formula { text, cached } => Ok(CellValue::Formula {
                text: formula::normalize(&text)?,
                cached,
            }),
            CellValue::Rich(runs) => {
                for font in runs.iter().filter_map(|r| r.font) {
                    self.font_ref(font)?;
                }
                Ok(CellValue::Rich(runs))
            }
            other => Ok(other),
        }
    }

    /// Write any value to a cell; `None` keeps the cell's current format
    pub fn sheet_write(&mut self, id: SheetId, row: i32, col: i32, value: CellValue, format: Option<FormatId>) -> bool {
        let result = self.check_optional_format(format).and_then(|_| {
            let value = self.check_value(value)?;
            let sheet = self.sheet_mut(id)?;
            match value {
                CellValue::Blank => {
                    let format = format.ok_or(NativeError::InvalidArgument("blank cells need a format".into()))?;
                    sheet.write_blank(row, col, format)
                }
                CellValue::Formula { text, cached } => sheet.write_formula(row, col, text, cached.map(|c| *c), format),
                CellValue::String(s) => sheet.write_str(row, col, &s, format),
                CellValue::Number(n) => sheet.write_num(row, col, n, format),
                CellValue::Boolean(b) => sheet.write_bool(row, col, b, format),
                CellValue::Error(e) => sheet.write_error(row, col, e, format),
                CellValue::Rich(runs) => sheet.write_rich(row, col, runs, format),
            }
        });
        self.record(result).is_some()
    }

    /// Explicit format of a cell, or the default format
    pub fn sheet_cell_format(&mut self, id: SheetId, row: i32, col: i32) -> Option<FormatId> {
        let result = self
            .sheet_ref(id)
            .and_then(|s| s.cell_format(row, col))
            .map(|f| f.unwrap_or(FormatId(0)));
        self.record(result)
    }

    pub fn sheet_set_cell_format(&mut self, id: SheetId, row: i32, col: i32, format: FormatId) -> bool {
        let result = self
            .format_ref(format)
            .map(|_| ())
            .and_then(|_| self.sheet_mut(id)?.set_cell_format(row, col, format));
        self.record(result).is_some()
    }

    /// Read a rich string cell into a new pooled rich string
    pub fn sheet_read_rich_str(&mut self, id: SheetId, row: i32, col: i32) -> Option<(RichStringId, Option<FormatId>)> {
        let result = self.sheet_ref(id).and_then(|s| s.read_rich(row, col)).map(|(runs, format)| {
            self.rich_strings.push(RichString::from_runs(runs));
            (RichStringId(self.rich_strings.len() as u32 - 1), format)
        });
        self.record(result)
    }

    /// Write a pooled rich string to a cell
    pub fn sheet_write_rich_str(&mut self, id: SheetId, row: i32, col: i32, rich: RichStringId, format: Option<FormatId>) -> bool {
        let runs: Result<Vec<RichRun>> = self.rich_string_ref(rich).map(|r| r.runs().to_vec());
        match runs {
            Ok(runs) => self.sheet_write(id, row, col, CellValue::Rich(runs), format),
            Err(e) => self.record::<()>(Err(e)).is_some(),
        }
    }

    /// Whether a cell holds a number rendered as a date
    pub fn sheet_is_date(&mut self, id: SheetId, row: i32, col: i32) -> Option<bool> {
        let result = self.sheet_ref(id).and_then(|s| {
            let numeric = s.read_num(row, col).ok();
            Ok(match numeric {
                Some((_, Some(format))) => self.is_date_format(self.format_ref(format)?.num_format),
                _ => false,
            })
        });
        self.record(result)
    }

    fn is_date_format(&self, num_format: i32) -> bool {
        if num_format::is_date(num_format) {
            return true;
        }
        self.custom_format_text(num_format)
            .map(|text| text.chars().any(|c| matches!(c.to_ascii_lowercase(), 'y' | 'd' | 'h')))
            .unwrap_or(false)
    }

    /// Set width, format and visibility of columns
    pub fn sheet_set_col(&mut self, id: SheetId, first: i32, last: i32, width: f64, format: Option<FormatId>, hidden: bool) -> bool {
        let result = self
            .check_optional_format(format)
            .and_then(|_| self.sheet_mut(id)?.set_col(first, last, width, format, hidden));
        self.record(result).is_some()
    }

    /// Set height, format and visibility of a row
    pub fn sheet_set_row(&mut self, id: SheetId, row: i32, height: f64, format: Option<FormatId>, hidden: bool) -> bool {
        let result = self
            .check_optional_format(format)
            .and_then(|_| self.sheet_mut(id)?.set_row(row, height, format, hidden));
        self.record(result).is_some()
    }

    /// Auto filter of a sheet
    pub fn sheet_auto_filter(&mut self, id: SheetId) -> Option<AutoFilterId> {
        let result = self.sheet_ref(id).map(|_| AutoFilterId { sheet: id });
        self.record(result)
    }

    /// Start a new conditional formatting range-set on a sheet
    pub fn sheet_add_conditional_formatting(&mut self, id: SheetId) -> Option<ConditionalFormattingId> {
        let result = self.require_xlsx("conditional formatting").and_then(|_| {
            let slot = self.sheet_mut(id)?.add_conditional_formatting();
            Ok(ConditionalFormattingId { sheet: id, slot })
        });
        self.record(result)
    }

    /// Place a new form control on a sheet
    pub fn sheet_add_form_control(&mut self, id: SheetId, object_type: ObjectType) -> Option<FormControlId> {
        let result = self.require_xlsx("form controls").and_then(|_| {
            let slot = self.sheet_mut(id)?.add_form_control(object_type);
            Ok(FormControlId { sheet: id, slot })
        });
        self.record(result)
    }

    /// Form control at position `index`
    pub fn sheet_form_control(&mut self, id: SheetId, index: i32) -> Option<FormControlId> {
        let result = self.sheet_ref(id).and_then(|s| {
            if index < 0 || index >= s.form_control_size() {
                return Err(NativeError::Index {
                    what: "form control",
                    index,
                });
            }
            Ok(FormControlId {
                sheet: id,
                slot: index as u32,
            })
        });
        self.record(result)
    }

    // === Formats ===

    fn format_ref(&self, id: FormatId) -> Result<&Format> {
        self.formats.get(id.index()).ok_or(NativeError::UnknownHandle("format"))
    }

    fn check_optional_format(&self, format: Option<FormatId>) -> Result<()> {
        match format {
            Some(id) => self.format_ref(id).map(|_| ()),
            None => Ok(()),
        }
    }

    fn check_num_format(&self, id: i32) -> Result<()> {
        let known = (0..num_format::FIRST_CUSTOM).contains(&id) || self.custom_format_text(id).is_some();
        if !known {
            return Err(NativeError::UnknownHandle("number format"));
        }
        Ok(())
    }

    /// Add a format, copying `parent` when given
    pub fn add_format(&mut self, parent: Option<FormatId>) -> Option<FormatId> {
        let result = match parent {
            Some(p) => self.format_ref(p).cloned(),
            None => Ok(Format::new(FontId(0))),
        }
        .map(|format| {
            self.formats.push(format);
            FormatId(self.formats.len() as u32 - 1)
        });
        self.record(result)
    }

    /// Format at position `index`
    pub fn format(&mut self, index: i32) -> Option<FormatId> {
        let result = usize::try_from(index)
            .ok()
            .filter(|i| *i < self.formats.len())
            .map(|i| FormatId(i as u32))
            .ok_or(NativeError::Index { what: "format", index });
        self.record(result)
    }

    /// Number of formats
    pub fn format_size(&self) -> i32 {
        self.formats.len() as i32
    }

    /// Run a call against one format
    pub fn with_format<T>(&mut self, id: FormatId, f: impl FnOnce(&mut Format) -> Result<T>) -> Option<T> {
        let result = self
            .formats
            .get_mut(id.index())
            .ok_or(NativeError::UnknownHandle("format"))
            .and_then(f);
        self.record(result)
    }

    pub fn format_set_font(&mut self, id: FormatId, font: FontId) -> bool {
        let result = self.font_ref(font).map(|_| ());
        match result {
            Ok(()) => self.with_format(id, |f| Ok(f.font = font)).is_some(),
            Err(e) => self.record::<()>(Err(e)).is_some(),
        }
    }

    pub fn format_set_num_format(&mut self, id: FormatId, num_format: i32) -> bool {
        match self.check_num_format(num_format) {
            Ok(()) => self.with_format(id, |f| Ok(f.num_format = num_format)).is_some(),
            Err(e) => self.record::<()>(Err(e)).is_some(),
        }
    }

    // === Fonts ===

    fn font_ref(&self, id: FontId) -> Result<&Font> {
        self.fonts.get(id.index()).ok_or(NativeError::UnknownHandle("font"))
    }

    fn push_font(&mut self, parent: Option<FontId>) -> Result<FontId> {
        let font = match parent {
            Some(p) => self.font_ref(p)?.clone(),
            None => self.fonts[0].clone(),
        };
        self.fonts.push(font);
        Ok(FontId(self.fonts.len() as u32 - 1))
    }

    /// Add a font, copying `parent` when given
    pub fn add_font(&mut self, parent: Option<FontId>) -> Option<FontId> {
        let result = self.push_font(parent);
        self.record(result)
    }

    /// Font at position `index`
    pub fn font(&mut self, index: i32) -> Option<FontId> {
        let result = usize::try_from(index)
            .ok()
            .filter(|i| *i < self.fonts.len())
            .map(|i| FontId(i as u32))
            .ok_or(NativeError::Index { what: "font", index });
        self.record(result)
    }

    /// Number of fonts
    pub fn font_size(&self) -> i32 {
        self.fonts.len() as i32
    }

    /// Run a call against one font
    pub fn with_font<T>(&mut self, id: FontId, f: impl FnOnce(&mut Font) -> Result<T>) -> Option<T> {
        let result = self
            .fonts
            .get_mut(id.index())
            .ok_or(NativeError::UnknownHandle("font"))
            .and_then(f);
        self.record(result)
    }

    /// Family and size of the default font
    pub fn default_font(&self) -> (String, i32) {
        let font = &self.fonts[0];
        (font.name().to_string(), font.size())
    }

    pub fn set_default_font(&mut self, name: &str, size: i32) -> bool {
        self.with_font(FontId(0), |font| {
            let mut updated = font.clone();
            updated.set_name(name)?;
            updated.set_size(size)?;
            *font = updated;
            Ok(())
        })
        .is_some()
    }

    // === Rich strings ===

    fn rich_string_ref(&self, id: RichStringId) -> Result<&RichString> {
        self.rich_strings
            .get(id.index())
            .ok_or(NativeError::UnknownHandle("rich string"))
    }

    /// Add an empty rich string
    pub fn add_rich_string(&mut self) -> Option<RichStringId> {
        self.rich_strings.push(RichString::new());
        self.record(Ok(RichStringId(self.rich_strings.len() as u32 - 1)))
    }

    /// Run a call against one rich string
    pub fn with_rich_string<T>(&mut self, id: RichStringId, f: impl FnOnce(&mut RichString) -> Result<T>) -> Option<T> {
        let result = self
            .rich_strings
            .get_mut(id.index())
            .ok_or(NativeError::UnknownHandle("rich string"))
            .and_then(f);
        self.record(result)
    }

    /// Create a font for use in a rich string
    pub fn rich_string_add_font(&mut self, id: RichStringId, init: Option<FontId>) -> Option<FontId> {
        let result = self.rich_string_ref(id).map(|_| ()).and_then(|_| self.push_font(init));
        self.record(result)
    }

    /// Append a run to a rich string
    pub fn rich_string_add_text(&mut self, id: RichStringId, text: &str, font: Option<FontId>) -> bool {
        let result = match font {
            Some(f) => self.font_ref(f).map(|_| ()),
            None => Ok(()),
        }
        .and_then(|_| {
            self.rich_strings
                .get_mut(id.index())
                .ok_or(NativeError::UnknownHandle("rich string"))
                .map(|r| r.add_text(text, font))
        });
        self.record(result).is_some()
    }

    // === Number formats, dates and colors ===

    fn custom_format_text(&self, id: i32) -> Option<&str> {
        let index = usize::try_from(id - num_format::FIRST_CUSTOM).ok()?;
        self.custom_num_formats.get(index).map(String::as_str)
    }

    /// Register a custom number format, reusing an identical one
    pub fn add_custom_num_format(&mut self, format: &str) -> Option<i32> {
        let result = if format.is_empty() {
            Err(NativeError::InvalidArgument("empty number format".into()))
        } else {
            let next = num_format::FIRST_CUSTOM + self.custom_num_formats.len() as i32;
            let id = *self.custom_num_format_ids.entry(format.to_string()).or_insert(next);
            if id == next {
                self.custom_num_formats.push(format.to_string());
            }
            Ok(id)
        };
        self.record(result)
    }

    /// Text of a custom number format
    pub fn custom_num_format(&mut self, id: i32) -> Option<String> {
        let result = self
            .custom_format_text(id)
            .map(str::to_string)
            .ok_or(NativeError::UnknownHandle("custom number format"));
        self.record(result)
    }

    pub fn date_pack(&mut self, parts: DateParts) -> Option<f64> {
        let result = date::pack(parts, self.settings.date1904);
        self.record(result)
    }

    pub fn date_unpack(&mut self, serial: f64) -> Option<DateParts> {
        let result = date::unpack(serial, self.settings.date1904);
        self.record(result)
    }

    pub fn color_pack(&self, red: u8, green: u8, blue: u8) -> Color {
        Color::pack(red, green, blue)
    }

    pub fn color_unpack(&mut self, color: Color) -> Option<(u8, u8, u8)> {
        let result = color
            .unpack()
            .ok_or(NativeError::InvalidArgument(format!("color {:#x} has no rgb value", color.0)));
        self.record(result)
    }

    // === Settings ===

    pub fn settings(&self) -> &BookSettings {
        &self.settings
    }

    pub fn ref_r1c1(&self) -> bool {
        self.settings.ref_r1c1
    }

    pub fn set_ref_r1c1(&mut self, value: bool) {
        self.settings.ref_r1c1 = value;
    }

    pub fn rgb_mode(&self) -> bool {
        self.settings.rgb_mode
    }

    pub fn set_rgb_mode(&mut self, value: bool) {
        self.settings.rgb_mode = value;
    }

    pub fn is_date1904(&self) -> bool {
        self.settings.date1904
    }

    pub fn set_date1904(&mut self, value: bool) {
        self.settings.date1904 = value;
    }

    pub fn is_template(&self) -> bool {
        self.settings.template
    }

    pub fn set_template(&mut self, value: bool) {
        self.settings.template = value;
    }

    pub fn version(&self) -> i32 {
        VERSION
    }

    /// BIFF version of xls books, 0 for xlsx
    pub fn biff_version(&self) -> i32 {
        match self.book_type {
            BookType::Xls => 0x600,
            BookType::Xlsx => 0,
        }
    }

    pub fn set_locale(&mut self, locale: &str) -> bool {
        let result = if locale.trim().is_empty() {
            Err(NativeError::InvalidArgument("empty locale".into()))
        } else {
            self.settings.locale = locale.to_string();
            Ok(())
        };
        self.record(result).is_some()
    }

    // === Core properties ===

    pub fn core_properties(&mut self) -> Option<CorePropertiesId> {
        let result = self.require_xlsx("core properties").map(|_| CorePropertiesId);
        self.record(result)
    }

    pub fn with_core_properties<T>(&mut self, _id: CorePropertiesId, f: impl FnOnce(&mut CoreProperties) -> Result<T>) -> Option<T> {
        let result = self.require_xlsx("core properties").and_then(|_| f(&mut self.core));
        self.record(result)
    }

    // === Conditional formats ===

    fn conditional_format_ref(&self, id: ConditionalFormatId) -> Result<&ConditionalFormat> {
        self.conditional_formats
            .get(id.index())
            .ok_or(NativeError::UnknownHandle("conditional format"))
    }

    /// Add a conditional format with its own font
    pub fn add_conditional_format(&mut self) -> Option<ConditionalFormatId> {
        let result = self.require_xlsx("conditional formatting").and_then(|_| {
            let font = self.push_font(None)?;
            self.conditional_formats.push(ConditionalFormat::new(font));
            Ok(ConditionalFormatId(self.conditional_formats.len() as u32 - 1))
        });
        self.record(result)
    }

    /// Run a call against one conditional format
    pub fn with_conditional_format<T>(
        &mut self,
        id: ConditionalFormatId,
        f: impl FnOnce(&mut ConditionalFormat) -> Result<T>,
    ) -> Option<T> {
        let result = self
            .conditional_formats
            .get_mut(id.index())
            .ok_or(NativeError::UnknownHandle("conditional format"))
            .and_then(f);
        self.record(result)
    }

    pub fn conditional_format_set_num_format(&mut self, id: ConditionalFormatId, num_format: i32) -> bool {
        match self.check_num_format(num_format) {
            Ok(()) => self
                .with_conditional_format(id, |cf| {
                    cf.num_format = num_format;
                    Ok(())
                })
                .is_some(),
            Err(e) => self.record::<()>(Err(e)).is_some(),
        }
    }

    // === Sheet-scoped objects ===

    /// Run a call against an auto filter
    pub fn with_auto_filter<T>(&mut self, id: AutoFilterId, f: impl FnOnce(&mut AutoFilter) -> Result<T>) -> Option<T> {
        let result = self.sheet_mut(id.sheet).and_then(|s| f(s.auto_filter_mut()));
        self.record(result)
    }

    /// Set the range of an auto filter after checking it against the sheet
    pub fn auto_filter_set_ref(&mut self, id: AutoFilterId, range: CellRange) -> bool {
        let result = self.sheet_mut(id.sheet).and_then(|s| {
            s.check_range(&range)?;
            s.auto_filter_mut().set_reference(range);
            Ok(())
        });
        self.record(result).is_some()
    }

    /// Column with offset `col_id`, created when missing
    pub fn auto_filter_column(&mut self, id: AutoFilterId, col_id: i32) -> Option<FilterColumnId> {
        let result = self.sheet_mut(id.sheet).and_then(|s| {
            let slot = s.auto_filter_mut().column_slot(col_id)?;
            Ok(FilterColumnId {
                sheet: id.sheet,
                slot: slot as u32,
            })
        });
        self.record(result)
    }

    /// Existing column by position
    pub fn auto_filter_column_by_index(&mut self, id: AutoFilterId, index: i32) -> Option<FilterColumnId> {
        let result = self.sheet_mut(id.sheet).and_then(|s| {
            let slot = s.auto_filter().column_by_index(index)?;
            Ok(FilterColumnId {
                sheet: id.sheet,
                slot: slot as u32,
            })
        });
        self.record(result)
    }

    /// Run a call against a filter column
    pub fn with_filter_column<T>(&mut self, id: FilterColumnId, f: impl FnOnce(&mut FilterColumn) -> Result<T>) -> Option<T> {
        let result = self.sheet_mut(id.sheet).and_then(|s| {
            s.auto_filter_mut()
                .column_mut(id.slot)
                .ok_or(NativeError::UnknownHandle("filter column"))
                .and_then(f)
        });
        self.record(result)
    }

    /// Run a call against a conditional formatting range-set
    pub fn with_conditional_formatting<T>(
        &mut self,
        id: ConditionalFormattingId,
        f: impl FnOnce(&mut ConditionalFormatting) -> Result<T>,
    ) -> Option<T> {
        let result = self.sheet_mut(id.sheet).and_then(|s| {
            s.formattings
                .get_mut(id.slot as usize)
                .ok_or(NativeError::UnknownHandle("conditional formatting"))
                .and_then(f)
        });
        self.record(result)
    }

    /// Cover another range after checking it against the sheet
    pub fn conditional_formatting_add_range(&mut self, id: ConditionalFormattingId, range: CellRange) -> bool {
        let result = self.sheet_ref(id.sheet).and_then(|s| s.check_range(&range));
        match result {
            Ok(()) => self
                .with_conditional_formatting(id, |cf| {
                    cf.add_range(range);
                    Ok(())
                })
                .is_some(),
            Err(e) => self.record::<()>(Err(e)).is_some(),
        }
    }

    /// Append a rule after checking the conditional format it references
    pub fn conditional_formatting_add_rule(&mut self, id: ConditionalFormattingId, rule: CfRule, stop_if_true: bool) -> bool {
        let checked = match rule.format() {
            Some(format) => self.conditional_format_ref(format).map(|_| ()),
            None => Ok(()),
        };
        match checked {
            Ok(()) => self
                .with_conditional_formatting(id, |cf| cf.add_rule(rule, stop_if_true))
                .is_some(),
            Err(e) => self.record::<()>(Err(e)).is_some(),
        }
    }

    /// Run a call against a form control
    pub fn with_form_control<T>(&mut self, id: FormControlId, f: impl FnOnce(&mut FormControl) -> Result<T>) -> Option<T> {
        let result = self.sheet_mut(id.sheet).and_then(|s| {
            s.form_controls
                .get_mut(id.slot as usize)
                .ok_or(NativeError::UnknownHandle("form control"))
                .and_then(f)
        });
        self.record(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CellType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_book_has_default_font_and_format() {
        let book = NativeBook::new(BookType::Xlsx);
        assert_eq!(book.font_size(), 1);
        assert_eq!(book.format_size(), 1);
        assert_eq!(book.default_font(), ("Calibri".to_string(), 11));
        assert_eq!(book.error_message(), OK_MESSAGE);
    }

    #[test]
    fn test_failure_leaves_message_until_next_success() {
        let mut book = NativeBook::new(BookType::Xls);
        assert_eq!(book.get_sheet(0), None);
        assert_eq!(book.error_message(), "sheet index 0 out of range");

        book.add_sheet("Sheet1", None).unwrap();
        assert_eq!(book.error_message(), OK_MESSAGE);
    }

    #[test]
    fn test_sheet_names_are_unique() {
        let mut book = NativeBook::new(BookType::Xlsx);
        book.add_sheet("Data", None).unwrap();
        assert_eq!(book.add_sheet("data", None), None);
        assert_eq!(book.error_message(), "sheet name already exists: data");
        assert_eq!(book.add_sheet("a/b", None), None);
    }

    #[test]
    fn test_deleted_sheet_handle_is_invalid() {
        let mut book = NativeBook::new(BookType::Xlsx);
        let first = book.add_sheet("One", None).unwrap();
        let second = book.add_sheet("Two", None).unwrap();

        assert!(book.del_sheet(0));
        assert!(!book.is_valid_sheet(first));
        assert!(book.is_valid_sheet(second));
        assert_eq!(book.get_sheet(0), Some(second));
        assert!(!book.sheet_write(first, 0, 0, CellValue::Number(1.0), None));
        assert_eq!(book.error_message(), "sheet not found");
    }

    #[test]
    fn test_invalid_formula_leaves_cell_unchanged() {
        let mut book = NativeBook::new(BookType::Xls);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        assert!(book.sheet_write(sheet, 0, 0, CellValue::Number(7.0), None));

        let bad = CellValue::Formula {
            text: "=SUM(A1".into(),
            cached: None,
        };
        assert!(!book.sheet_write(sheet, 0, 0, bad, None));
        assert!(book.error_message().starts_with("invalid formula"));
        assert_eq!(book.with_sheet(sheet, |s| s.read_num(0, 0)), Some((7.0, None)));
    }

    #[test]
    fn test_template_sheet_is_copied() {
        let mut book = NativeBook::new(BookType::Xlsx);
        let tpl = book.add_sheet("Template", None).unwrap();
        book.sheet_write(tpl, 1, 1, CellValue::String("x".into()), None);
        let copy = book.insert_sheet(0, "Copy", Some(tpl)).unwrap();

        assert_eq!(book.sheet_name(0).as_deref(), Some("Copy"));
        assert_eq!(book.with_sheet(copy, |s| s.cell_type(1, 1)), Some(CellType::String));
    }

    #[test]
    fn test_rich_string_round_trip_through_cell() {
        let mut book = NativeBook::new(BookType::Xlsx);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        let rich = book.add_rich_string().unwrap();
        let font = book.rich_string_add_font(rich, None).unwrap();
        assert!(book.rich_string_add_text(rich, "bold", Some(font)));
        assert!(book.rich_string_add_text(rich, " text", None));

        assert!(book.sheet_write_rich_str(sheet, 0, 0, rich, None));
        let (copy, _) = book.sheet_read_rich_str(sheet, 0, 0).unwrap();
        assert_ne!(copy, rich);
        assert_eq!(book.with_rich_string(copy, |r| Ok(r.text_size())), Some(2));
        assert_eq!(book.with_sheet(sheet, |s| s.read_str(0, 0)).map(|r| r.0).as_deref(), Some("bold text"));
    }

    #[test]
    fn test_custom_num_format_and_is_date() {
        let mut book = NativeBook::new(BookType::Xlsx);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        let id = book.add_custom_num_format("yyyy-mm-dd").unwrap();
        assert_eq!(id, num_format::FIRST_CUSTOM);
        assert_eq!(book.add_custom_num_format("yyyy-mm-dd"), Some(id));

        let format = book.add_format(None).unwrap();
        assert!(book.format_set_num_format(format, id));
        assert!(!book.format_set_num_format(format, 999));

        book.sheet_write(sheet, 0, 0, CellValue::Number(45292.0), Some(format));
        book.sheet_write(sheet, 1, 0, CellValue::Number(1.0), None);
        assert_eq!(book.sheet_is_date(sheet, 0, 0), Some(true));
        assert_eq!(book.sheet_is_date(sheet, 1, 0), Some(false));
    }

    #[test]
    fn test_xlsx_only_features() {
        let mut book = NativeBook::new(BookType::Xls);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        assert_eq!(book.core_properties(), None);
        assert_eq!(book.error_message(), "core properties is available only in xlsx format");
        assert_eq!(book.add_conditional_format(), None);
        assert_eq!(book.sheet_add_conditional_formatting(sheet), None);
        assert_eq!(book.sheet_add_form_control(sheet, ObjectType::CheckBox), None);
    }

    #[test]
    fn test_conditional_rule_needs_known_format() {
        let mut book = NativeBook::new(BookType::Xlsx);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        let cf = book.sheet_add_conditional_formatting(sheet).unwrap();
        let format = book.add_conditional_format().unwrap();

        assert!(book.conditional_formatting_add_range(cf, CellRange::new(0, 9, 0, 0)));
        let rule = CfRule::OpNum {
            op: crate::types::CfOperator::GreaterThan,
            format,
            value1: 5.0,
            value2: 0.0,
        };
        assert!(book.conditional_formatting_add_rule(cf, rule, false));

        let dangling = CfRule::TimePeriod {
            format: ConditionalFormatId(42),
            period: crate::types::CfTimePeriod::Today,
        };
        assert!(!book.conditional_formatting_add_rule(cf, dangling, false));
        assert_eq!(book.error_message(), "conditional format not found");
    }

    #[test]
    fn test_removed_filter_invalidates_columns() {
        let mut book = NativeBook::new(BookType::Xlsx);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        let filter = book.sheet_auto_filter(sheet).unwrap();
        assert!(book.auto_filter_set_ref(filter, CellRange::new(0, 5, 0, 2)));
        let column = book.auto_filter_column(filter, 1).unwrap();
        assert_eq!(book.with_filter_column(column, |c| Ok(c.index())), Some(1));

        book.with_sheet(sheet, |s| {
            s.remove_filter();
            Ok(())
        });
        assert_eq!(book.with_filter_column(column, |c| Ok(c.index())), None);
    }
}
