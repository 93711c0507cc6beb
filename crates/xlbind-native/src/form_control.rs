//! Form controls (check boxes, lists, spinners and friends)

use crate::error::{NativeError, Result};
use crate::types::{CheckedType, ObjectType};

/// A form control placed on a sheet
#[derive(Debug, Clone, PartialEq)]
pub struct FormControl {
    object_type: ObjectType,
    checked: CheckedType,
    pub fmla_group: String,
    pub fmla_link: String,
    pub fmla_range: String,
    pub fmla_txbx: String,
    pub name: String,
    pub linked_cell: String,
    pub list_fill_range: String,
    pub macro_name: String,
    pub alt_text: String,
    pub locked: bool,
    pub default_size: bool,
    pub print: bool,
    pub disabled: bool,
    items: Vec<String>,
    drop_lines: i32,
    pub dx: i32,
    pub first_button: bool,
    pub horiz: bool,
    inc: i32,
    max: i32,
    min: i32,
    pub multi_sel: String,
    sel: i32,
}

impl FormControl {
    /// New control of the given kind with default settings
    pub fn new(object_type: ObjectType, name: impl Into<String>) -> Self {
        Self {
            object_type,
            checked: CheckedType::Unchecked,
            fmla_group: String::new(),
            fmla_link: String::new(),
            fmla_range: String::new(),
            fmla_txbx: String::new(),
            name: name.into(),
            linked_cell: String::new(),
            list_fill_range: String::new(),
            macro_name: String::new(),
            alt_text: String::new(),
            locked: true,
            default_size: true,
            print: true,
            disabled: false,
            items: Vec::new(),
            drop_lines: 8,
            dx: 16,
            first_button: false,
            horiz: false,
            inc: 1,
            max: 100,
            min: 0,
            multi_sel: String::new(),
            sel: 0,
        }
    }

    /// Kind of control
    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Check state
    pub fn checked(&self) -> CheckedType {
        self.checked
    }

    /// Set the check state; only check boxes and radio buttons have one
    pub fn set_checked(&mut self, checked: CheckedType) -> Result<()> {
        if !matches!(self.object_type, ObjectType::CheckBox | ObjectType::Radio) {
            return Err(self.unsupported("check state"));
        }
        self.checked = checked;
        Ok(())
    }

    /// List item at `index`
    pub fn item(&self, index: i32) -> Result<&str> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
            .ok_or(NativeError::Index { what: "item", index })
    }

    /// Number of list items
    pub fn item_size(&self) -> i32 {
        self.items.len() as i32
    }

    /// Append a list item
    pub fn add_item(&mut self, value: &str) -> Result<()> {
        self.check_list()?;
        self.items.push(value.to_string());
        Ok(())
    }

    /// Insert a list item before `index`
    pub fn insert_item(&mut self, index: i32, value: &str) -> Result<()> {
        self.check_list()?;
        let at = usize::try_from(index)
            .ok()
            .filter(|i| *i <= self.items.len())
            .ok_or(NativeError::Index { what: "item", index })?;
        self.items.insert(at, value.to_string());
        Ok(())
    }

    /// Remove all list items
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.sel = 0;
    }

    /// Visible lines of a drop-down
    pub fn drop_lines(&self) -> i32 {
        self.drop_lines
    }

    /// Set the visible lines of a drop-down
    pub fn set_drop_lines(&mut self, lines: i32) -> Result<()> {
        if self.object_type != ObjectType::DropDown {
            return Err(self.unsupported("drop lines"));
        }
        if lines < 1 {
            return Err(NativeError::InvalidArgument(format!("drop lines {lines}")));
        }
        self.drop_lines = lines;
        Ok(())
    }

    /// Step of a spinner or scroll bar
    pub fn inc(&self) -> i32 {
        self.inc
    }

    pub fn set_inc(&mut self, inc: i32) -> Result<()> {
        if inc < 1 {
            return Err(NativeError::InvalidArgument(format!("increment {inc}")));
        }
        self.inc = inc;
        Ok(())
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn set_max(&mut self, max: i32) -> Result<()> {
        if max < self.min {
            return Err(NativeError::InvalidArgument(format!("max {max} below min {}", self.min)));
        }
        self.max = max;
        Ok(())
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn set_min(&mut self, min: i32) -> Result<()> {
        if min > self.max {
            return Err(NativeError::InvalidArgument(format!("min {min} above max {}", self.max)));
        }
        self.min = min;
        Ok(())
    }

    /// Selected item (1-based, 0 for none)
    pub fn sel(&self) -> i32 {
        self.sel
    }

    pub fn set_sel(&mut self, sel: i32) -> Result<()> {
        if sel < 0 || sel > self.item_size() {
            return Err(NativeError::Index { what: "selection", index: sel });
        }
        self.sel = sel;
        Ok(())
    }

    fn check_list(&self) -> Result<()> {
        if !matches!(self.object_type, ObjectType::List | ObjectType::DropDown) {
            return Err(self.unsupported("items"));
        }
        Ok(())
    }

    fn unsupported(&self, what: &str) -> NativeError {
        NativeError::InvalidArgument(format!("{what} not supported by {:?} control", self.object_type))
    }
}
