//! Host runtime values
//!
//! A small model of the values a scripting runtime passes across the
//! binding boundary. Objects are a tagged enum over every proxy class, so
//! the owning book of a type-erased object is found by matching rather
//! than by downcasting.

use std::ffi::c_void;

use crate::auto_filter::AutoFilter;
use crate::book::Book;
use crate::conditional_format::ConditionalFormat;
use crate::conditional_formatting::ConditionalFormatting;
use crate::core_properties::CoreProperties;
use crate::filter_column::FilterColumn;
use crate::font::Font;
use crate::form_control::FormControl;
use crate::format::Format;
use crate::holder::HasBook;
use crate::rich_string::RichString;
use crate::sheet::Sheet;

/// An opaque pointer payload, kept as an address and never dereferenced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct External(usize);

impl External {
    /// External with a null payload
    pub fn null() -> Self {
        External(0)
    }

    pub fn new(ptr: *mut c_void) -> Self {
        External(ptr as usize)
    }

    pub fn is_null(&self) -> bool {
        self.0 == 0
    }
}

/// An instance of a registered class
#[derive(Debug, Clone)]
pub enum Object {
    Book(Book),
    Sheet(Sheet),
    Format(Format),
    Font(Font),
    AutoFilter(AutoFilter),
    FilterColumn(FilterColumn),
    ConditionalFormat(ConditionalFormat),
    ConditionalFormatting(ConditionalFormatting),
    RichString(RichString),
    FormControl(FormControl),
    CoreProperties(CoreProperties),
    /// A host object that is not backed by any proxy
    Plain,
}

impl Object {
    /// Registered class name, `None` for plain objects
    pub fn class_name(&self) -> Option<&'static str> {
        use crate::proxy::Proxy;

        Some(match self {
            Object::Book(_) => Book::CLASS,
            Object::Sheet(_) => Sheet::CLASS,
            Object::Format(_) => Format::CLASS,
            Object::Font(_) => Font::CLASS,
            Object::AutoFilter(_) => AutoFilter::CLASS,
            Object::FilterColumn(_) => FilterColumn::CLASS,
            Object::ConditionalFormat(_) => ConditionalFormat::CLASS,
            Object::ConditionalFormatting(_) => ConditionalFormatting::CLASS,
            Object::RichString(_) => RichString::CLASS,
            Object::FormControl(_) => FormControl::CLASS,
            Object::CoreProperties(_) => CoreProperties::CLASS,
            Object::Plain => return None,
        })
    }

    /// Owning book of the object; a book owns itself
    pub fn book(&self) -> Option<&Book> {
        match self {
            Object::Book(b) => Some(b),
            Object::Sheet(p) => p.owning_book(),
            Object::Format(p) => p.owning_book(),
            Object::Font(p) => p.owning_book(),
            Object::AutoFilter(p) => p.owning_book(),
            Object::FilterColumn(p) => p.owning_book(),
            Object::ConditionalFormat(p) => p.owning_book(),
            Object::ConditionalFormatting(p) => p.owning_book(),
            Object::RichString(p) => p.owning_book(),
            Object::FormControl(p) => p.owning_book(),
            Object::CoreProperties(p) => p.owning_book(),
            Object::Plain => None,
        }
    }
}

/// A value crossing the binding boundary
#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
    External(External),
    Object(Object),
}

impl Value {
    /// Integer value, if the number is integral and fits in 32 bits
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Number(n) if n.fract() == 0.0 && *n >= f64::from(i32::MIN) && *n <= f64::from(i32::MAX) => {
                Some(*n as i32)
            }
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<External> for Value {
    fn from(e: External) -> Self {
        Value::External(e)
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}
