//! Structural sheet edits run off the calling thread
//!
//! A work unit keeps the sheet proxy, and through it the book, alive until
//! its completion has run. The book's pending counter is raised before the
//! unit is queued and lowered on the loop thread just before the callback.

use xlbind_native as native;

use crate::error::Result;
use crate::proxy::Proxy;
use crate::sheet::Sheet;

/// Queue one native edit of `sheet` and report its outcome to `callback`
pub(crate) fn queue_sheet_edit<F, C>(sheet: &Sheet, name: &'static str, edit: F, callback: C) -> Result<()>
where
    F: FnOnce(&mut native::Sheet) -> native::Result<()> + Send + 'static,
    C: FnOnce(Result<()>) + Send + 'static,
{
    let (_, book) = sheet.live()?;
    let book = book.clone();
    book.start_async();
    tracing::debug!("book {}: queued {name}", book.id());

    let queue = book.env().queue.clone();
    let target = sheet.clone();
    queue.queue(
        move || {
            let (id, book) = target.scope()?;
            tracing::trace!("book {}: running {name}", book.id());
            book.call(|native| native.with_sheet(id, edit))
        },
        move |result| {
            book.stop_async();
            match &result {
                Ok(()) => tracing::debug!("book {}: {name} completed", book.id()),
                Err(e) => tracing::debug!("book {}: {name} failed: {e}", book.id()),
            }
            callback(result);
        },
    );
    Ok(())
}
