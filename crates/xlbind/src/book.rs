//! The book proxy
//!
//! A [`Book`] is the only class callers construct directly. It owns the
//! native book behind a mutex, answers last-error queries for every entity
//! it owns and counts async work units in flight so that an explicit
//! [`Book::dispose`] can be deferred until they finish.

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use xlbind_native::{BookType, Color, DateParts, NativeBook, SheetType};

use crate::conditional_format::ConditionalFormat;
use crate::core_properties::CoreProperties;
use crate::env::Env;
use crate::error::{Error, Result, ASYNC_PENDING, BOOK_RELEASED, INVALID_BOOK_TYPE};
use crate::font::Font;
use crate::format::Format;
use crate::holder::{ensure_same_book, HasBook};
use crate::host::{Arguments, CallInfo, Object};
use crate::proxy::Proxy;
use crate::rich_string::RichString;
use crate::sheet::Sheet;

/// Outcome of [`Book::dispose`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposal {
    /// The native book was released immediately
    Released,
    /// Async work is pending; the release runs when the last unit completes
    Deferred,
}

struct BookInner {
    id: u64,
    kind: BookType,
    native: Mutex<Option<NativeBook>>,
    pending: AtomicUsize,
    release_requested: AtomicBool,
    env: Arc<Env>,
}

impl Drop for BookInner {
    fn drop(&mut self) {
        tracing::debug!("book {} dropped", self.id);
    }
}

/// A workbook and the error source of everything it owns
#[derive(Clone)]
pub struct Book(Arc<BookInner>);

impl fmt::Debug for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Book")
            .field("id", &self.0.id)
            .field("kind", &self.0.kind)
            .field("pending", &self.async_pending())
            .finish()
    }
}

impl HasBook for Book {
    fn owning_book(&self) -> Option<&Book> {
        Some(self)
    }
}

impl Book {
    pub const CLASS: &'static str = "Book";

    pub(crate) fn create(env: &Arc<Env>, kind: BookType) -> Self {
        let mut native = NativeBook::new(kind);
        if !native.set_locale(&env.config.locale) {
            tracing::warn!("ignoring locale {:?}: {}", env.config.locale, native.error_message());
        }
        let id = env.next_book_id();
        tracing::debug!("book {id} created ({kind:?})");
        Book(Arc::new(BookInner {
            id,
            kind,
            native: Mutex::new(Some(native)),
            pending: AtomicUsize::new(0),
            release_requested: AtomicBool::new(false),
            env: Arc::clone(env),
        }))
    }

    /// Public constructor body: one integer selecting xls (0) or xlsx (1)
    ///
    /// A plain call is treated as a construct call.
    pub fn construct(env: &Arc<Env>, info: &CallInfo) -> Result<Object> {
        if !info.is_construct_call() {
            return Self::construct(env, &info.clone().into_construct());
        }
        let mut args = Arguments::new(info);
        let selector = args.get_int(0);
        args.check()?;
        let kind = BookType::from_code(selector).ok_or_else(|| Error::type_error(INVALID_BOOK_TYPE))?;
        Ok(Object::Book(Self::create(env, kind)))
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn kind(&self) -> BookType {
        self.0.kind
    }

    /// Identity comparison
    pub fn ptr_eq(&self, other: &Book) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn env(&self) -> &Arc<Env> {
        &self.0.env
    }

    // === Native access ===

    fn lock(&self) -> Result<MutexGuard<'_, Option<NativeBook>>> {
        self.0
            .native
            .lock()
            .map_err(|_| Error::generic("internal error: book lock poisoned"))
    }

    /// Run one native call; a `None` result raises the book's last error
    ///
    /// The message is read before the lock is released, so no other call
    /// can replace it in between.
    pub(crate) fn call<T>(&self, f: impl FnOnce(&mut NativeBook) -> Option<T>) -> Result<T> {
        let mut guard = self.lock()?;
        let native = guard.as_mut().ok_or_else(|| Error::generic(BOOK_RELEASED))?;
        match f(native) {
            Some(value) => Ok(value),
            None => {
                let error = Error::native(native.error_message());
                tracing::trace!("book {}: native call failed: {error}", self.0.id);
                Err(error)
            }
        }
    }

    /// Run one native call reporting success as a flag
    pub(crate) fn call_ok(&self, f: impl FnOnce(&mut NativeBook) -> bool) -> Result<()> {
        self.call(|native| f(native).then_some(()))
    }

    /// Run one native call that cannot fail
    pub(crate) fn read<T>(&self, f: impl FnOnce(&mut NativeBook) -> T) -> Result<T> {
        self.call(|native| Some(f(native)))
    }

    fn instance<T: Proxy>(&self, handle: T::Native) -> Result<T> {
        self.env().new_instance(handle, self)
    }

    // === Async guard ===

    /// Record one async work unit in flight
    pub fn start_async(&self) {
        let pending = self.0.pending.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!("book {}: {pending} async operations pending", self.0.id);
    }

    /// Record completion of one async work unit; never goes below zero
    pub fn stop_async(&self) {
        match self.0.pending.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1)) {
            Ok(1) if self.0.release_requested.load(Ordering::SeqCst) => {
                tracing::debug!("book {}: running deferred release", self.0.id);
                self.release();
            }
            Ok(_) => {}
            Err(_) => tracing::warn!("book {}: stop_async without pending work", self.0.id),
        }
    }

    /// Number of async work units in flight
    pub fn async_pending(&self) -> usize {
        self.0.pending.load(Ordering::SeqCst)
    }

    /// Release the native book now, or once pending async work completes
    ///
    /// The request is recorded before the counter is read, so a completion
    /// racing with this call either sees the request or leaves a zero count.
    pub fn dispose(&self) -> Disposal {
        self.0.release_requested.store(true, Ordering::SeqCst);
        let pending = self.async_pending();
        if pending > 0 {
            tracing::debug!("book {}: release deferred, {pending} async operations pending", self.0.id);
            return Disposal::Deferred;
        }
        self.release();
        Disposal::Released
    }

    /// Whether the native book has been released
    pub fn is_released(&self) -> bool {
        self.0
            .native
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    fn release(&self) {
        let mut guard = self.0.native.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.take().is_some() {
            tracing::debug!("book {} released", self.0.id);
        }
    }

    // === Errors ===

    /// Message of the last native call made through this book
    pub fn error_message(&self) -> Result<String> {
        self.read(|native| native.error_message().to_string())
    }

    // === Sheets ===

    fn template_id(&self, template: Option<&Sheet>) -> Result<Option<xlbind_native::SheetId>> {
        match template {
            Some(sheet) => {
                ensure_same_book!(Some(self), sheet.owning_book());
                Ok(Some(sheet.live()?.0))
            }
            None => Ok(None),
        }
    }

    /// Append a sheet, optionally copying `template`
    pub fn add_sheet(&self, name: &str, template: Option<&Sheet>) -> Result<Sheet> {
        let template = self.template_id(template)?;
        let id = self.call(|native| native.add_sheet(name, template))?;
        self.instance(id)
    }

    /// Insert a sheet before position `index`
    pub fn insert_sheet(&self, index: i32, name: &str, template: Option<&Sheet>) -> Result<Sheet> {
        let template = self.template_id(template)?;
        let id = self.call(|native| native.insert_sheet(index, name, template))?;
        self.instance(id)
    }

    pub fn get_sheet(&self, index: i32) -> Result<Sheet> {
        let id = self.call(|native| native.get_sheet(index))?;
        self.instance(id)
    }

    pub fn sheet_name(&self, index: i32) -> Result<String> {
        self.call(|native| native.sheet_name(index))
    }

    pub fn sheet_type(&self, index: i32) -> Result<SheetType> {
        self.call(|native| native.sheet_type(index))
    }

    pub fn move_sheet(&self, src: i32, dst: i32) -> Result<()> {
        self.call_ok(|native| native.move_sheet(src, dst))
    }

    /// Delete a sheet; proxies of it report "sheet has been discarded"
    pub fn del_sheet(&self, index: i32) -> Result<()> {
        self.call_ok(|native| native.del_sheet(index))
    }

    pub fn sheet_count(&self) -> Result<i32> {
        self.read(|native| native.sheet_count())
    }

    pub fn active_sheet(&self) -> Result<i32> {
        self.read(|native| native.active_sheet())
    }

    pub fn set_active_sheet(&self, index: i32) -> Result<()> {
        self.call_ok(|native| native.set_active_sheet(index))
    }

    // === Formats and fonts ===

    /// Add a format, copying `parent` when given
    pub fn add_format(&self, parent: Option<&Format>) -> Result<Format> {
        let parent = match parent {
            Some(format) => {
                ensure_same_book!(Some(self), format.owning_book());
                if format.scope()?.1.async_pending() > 0 {
                    return Err(Error::generic(ASYNC_PENDING));
                }
                Some(format.scope()?.0)
            }
            None => None,
        };
        let id = self.call(|native| native.add_format(parent))?;
        self.instance(id)
    }

    /// Add a font, copying `parent` when given
    pub fn add_font(&self, parent: Option<&Font>) -> Result<Font> {
        let parent = match parent {
            Some(font) => {
                ensure_same_book!(Some(self), font.owning_book());
                Some(font.scope()?.0)
            }
            None => None,
        };
        let id = self.call(|native| native.add_font(parent))?;
        self.instance(id)
    }

    pub fn format(&self, index: i32) -> Result<Format> {
        let id = self.call(|native| native.format(index))?;
        self.instance(id)
    }

    pub fn format_size(&self) -> Result<i32> {
        self.read(|native| native.format_size())
    }

    pub fn font(&self, index: i32) -> Result<Font> {
        let id = self.call(|native| native.font(index))?;
        self.instance(id)
    }

    pub fn font_size(&self) -> Result<i32> {
        self.read(|native| native.font_size())
    }

    pub fn add_rich_string(&self) -> Result<RichString> {
        let id = self.call(|native| native.add_rich_string())?;
        self.instance(id)
    }

    /// Add the style used by conditional formatting rules (xlsx only)
    pub fn add_conditional_format(&self) -> Result<ConditionalFormat> {
        let id = self.call(|native| native.add_conditional_format())?;
        self.instance(id)
    }

    /// Register a custom number format and return its id
    pub fn add_custom_num_format(&self, format: &str) -> Result<i32> {
        self.call(|native| native.add_custom_num_format(format))
    }

    pub fn custom_num_format(&self, id: i32) -> Result<String> {
        self.call(|native| native.custom_num_format(id))
    }

    /// Family and size of the default font
    pub fn default_font(&self) -> Result<(String, i32)> {
        self.read(|native| native.default_font())
    }

    pub fn set_default_font(&self, name: &str, size: i32) -> Result<()> {
        self.call_ok(|native| native.set_default_font(name, size))
    }

    // === Dates and colors ===

    pub fn date_pack(&self, parts: DateParts) -> Result<f64> {
        self.call(|native| native.date_pack(parts))
    }

    pub fn date_unpack(&self, serial: f64) -> Result<DateParts> {
        self.call(|native| native.date_unpack(serial))
    }

    pub fn color_pack(&self, red: u8, green: u8, blue: u8) -> Result<Color> {
        self.read(|native| native.color_pack(red, green, blue))
    }

    pub fn color_unpack(&self, color: Color) -> Result<(u8, u8, u8)> {
        self.call(|native| native.color_unpack(color))
    }

    // === Settings ===

    pub fn ref_r1c1(&self) -> Result<bool> {
        self.read(|native| native.ref_r1c1())
    }

    pub fn set_ref_r1c1(&self, value: bool) -> Result<()> {
        self.read(|native| native.set_ref_r1c1(value))
    }

    pub fn rgb_mode(&self) -> Result<bool> {
        self.read(|native| native.rgb_mode())
    }

    pub fn set_rgb_mode(&self, value: bool) -> Result<()> {
        self.read(|native| native.set_rgb_mode(value))
    }

    pub fn is_date1904(&self) -> Result<bool> {
        self.read(|native| native.is_date1904())
    }

    pub fn set_date1904(&self, value: bool) -> Result<()> {
        self.read(|native| native.set_date1904(value))
    }

    pub fn is_template(&self) -> Result<bool> {
        self.read(|native| native.is_template())
    }

    pub fn set_template(&self, value: bool) -> Result<()> {
        self.read(|native| native.set_template(value))
    }

    pub fn biff_version(&self) -> Result<i32> {
        self.read(|native| native.biff_version())
    }

    pub fn version(&self) -> Result<i32> {
        self.read(|native| native.version())
    }

    pub fn set_locale(&self, locale: &str) -> Result<()> {
        self.call_ok(|native| native.set_locale(locale))
    }

    /// Document properties (xlsx only)
    pub fn core_properties(&self) -> Result<CoreProperties> {
        let id = self.call(|native| native.core_properties())?;
        self.instance(id)
    }
}
