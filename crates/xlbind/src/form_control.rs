//! The form control proxy

use xlbind_native as native;
use xlbind_native::{CheckedType, FormControlId, ObjectType};

use crate::error::Result;
use crate::proxy::{proxy_class, proxy_props, Proxy};

proxy_class!(
    /// A form control placed on a sheet (xlsx only)
    FormControl,
    FormControlId,
    "FormControl"
);

impl FormControl {
    fn with<T>(&self, f: impl FnOnce(&mut native::FormControl) -> native::Result<T>) -> Result<T> {
        let (id, book) = self.scope()?;
        book.call(|native| native.with_form_control(id, f))
    }

    pub fn object_type(&self) -> Result<ObjectType> {
        self.with(|control| Ok(control.object_type()))
    }

    pub fn checked(&self) -> Result<CheckedType> {
        self.with(|control| Ok(control.checked()))
    }

    /// Check state; only check boxes and radio buttons accept one
    pub fn set_checked(&self, checked: CheckedType) -> Result<()> {
        self.with(|control| control.set_checked(checked))
    }

    // === List items ===

    pub fn item(&self, index: i32) -> Result<String> {
        self.with(|control| control.item(index).map(str::to_string))
    }

    pub fn item_size(&self) -> Result<i32> {
        self.with(|control| Ok(control.item_size()))
    }

    pub fn add_item(&self, value: &str) -> Result<()> {
        self.with(|control| control.add_item(value))
    }

    pub fn insert_item(&self, index: i32, value: &str) -> Result<()> {
        self.with(|control| control.insert_item(index, value))
    }

    pub fn clear_items(&self) -> Result<()> {
        self.with(|control| {
            control.clear_items();
            Ok(())
        })
    }

    // === Ranges ===

    pub fn drop_lines(&self) -> Result<i32> {
        self.with(|control| Ok(control.drop_lines()))
    }

    pub fn set_drop_lines(&self, lines: i32) -> Result<()> {
        self.with(|control| control.set_drop_lines(lines))
    }

    pub fn inc(&self) -> Result<i32> {
        self.with(|control| Ok(control.inc()))
    }

    pub fn set_inc(&self, inc: i32) -> Result<()> {
        self.with(|control| control.set_inc(inc))
    }

    pub fn min(&self) -> Result<i32> {
        self.with(|control| Ok(control.min()))
    }

    pub fn set_min(&self, min: i32) -> Result<()> {
        self.with(|control| control.set_min(min))
    }

    pub fn max(&self) -> Result<i32> {
        self.with(|control| Ok(control.max()))
    }

    pub fn set_max(&self, max: i32) -> Result<()> {
        self.with(|control| control.set_max(max))
    }

    /// Selected item, 1-based; 0 when nothing is selected
    pub fn sel(&self) -> Result<i32> {
        self.with(|control| Ok(control.sel()))
    }

    pub fn set_sel(&self, sel: i32) -> Result<()> {
        self.with(|control| control.set_sel(sel))
    }
}

proxy_props!(FormControl {
    fmla_group, set_fmla_group: String => fmla_group;
    /// Cell linked to the control's value
    fmla_link, set_fmla_link: String => fmla_link;
    /// Source range of list items
    fmla_range, set_fmla_range: String => fmla_range;
    fmla_txbx, set_fmla_txbx: String => fmla_txbx;
    name, set_name: String => name;
    linked_cell, set_linked_cell: String => linked_cell;
    list_fill_range, set_list_fill_range: String => list_fill_range;
    macro_name, set_macro_name: String => macro_name;
    alt_text, set_alt_text: String => alt_text;
    multi_sel, set_multi_sel: String => multi_sel;
    locked, set_locked: bool => locked;
    default_size, set_default_size: bool => default_size;
    print, set_print: bool => print;
    disabled, set_disabled: bool => disabled;
    first_button, set_first_button: bool => first_button;
    horiz, set_horiz: bool => horiz;
    dx, set_dx: i32 => dx;
});
