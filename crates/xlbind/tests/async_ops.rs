//! Async structural edits and the book's pending counter

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use xlbind::{Bindings, BookType, CellType, Config, Disposal, Error, Result};

type Outcomes = Arc<Mutex<Vec<(&'static str, Result<()>)>>>;

fn record(outcomes: &Outcomes, name: &'static str) -> impl FnOnce(Result<()>) + Send + 'static {
    let outcomes = Arc::clone(outcomes);
    move |result| outcomes.lock().unwrap().push((name, result))
}

#[test]
fn test_counter_tracks_each_unit() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(2)).unwrap();
    let book = bindings.new_book(BookType::Xlsx);
    let first = book.add_sheet("One", None).unwrap();
    let second = book.add_sheet("Two", None).unwrap();
    let outcomes = Outcomes::default();

    first.insert_row_async(0, 0, record(&outcomes, "rows")).unwrap();
    second.insert_col_async(0, 2, record(&outcomes, "cols")).unwrap();
    assert_eq!(book.async_pending(), 2);

    let ran = bindings.run_until_idle();

    assert_eq!(ran, 2);
    assert_eq!(book.async_pending(), 0);
    let mut outcomes = outcomes.lock().unwrap().clone();
    outcomes.sort_by_key(|(name, _)| *name);
    assert_eq!(outcomes, vec![("cols", Ok(())), ("rows", Ok(()))]);
}

#[test]
fn test_pending_counter_is_raised_before_return() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
    let book = bindings.new_book(BookType::Xls);
    let sheet = book.add_sheet("Sheet1", None).unwrap();

    sheet.remove_col_async(0, 0, |_| {}).unwrap();
    // Completions only run on the loop thread, so the unit is still counted
    assert_eq!(book.async_pending(), 1);

    bindings.run_until_idle();
    assert_eq!(book.async_pending(), 0);
}

#[test]
fn test_failure_is_delivered_once() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
    let book = bindings.new_book(BookType::Xls);
    let sheet = book.add_sheet("Sheet1", None).unwrap();
    let outcomes = Outcomes::default();

    sheet.remove_row_async(10, 2, record(&outcomes, "remove")).unwrap();
    bindings.run_until_idle();
    bindings.run_pending();

    let outcomes = outcomes.lock().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].1, Err(Error::Native("invalid range 10:2".into())));
    assert_eq!(book.error_message().unwrap(), "invalid range 10:2");
    assert_eq!(book.async_pending(), 0);
}

#[test]
fn test_dispose_waits_for_async_work() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
    let book = bindings.new_book(BookType::Xlsx);
    let sheet = book.add_sheet("Sheet1", None).unwrap();
    sheet.write_str(0, 0, "kept", None).unwrap();
    let outcomes = Outcomes::default();

    sheet.insert_row_async(0, 4, record(&outcomes, "insert")).unwrap();
    assert_eq!(book.dispose(), Disposal::Deferred);
    assert!(!book.is_released());

    bindings.run_until_idle();

    assert_eq!(outcomes.lock().unwrap()[0].1, Ok(()));
    assert!(book.is_released());
    assert_eq!(sheet.read_str(5, 0), Err(Error::Generic("book has been released".into())));
}

#[test]
fn test_dropped_handles_keep_book_alive_for_pending_work() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
    let outcome = Arc::new(Mutex::new(None));
    {
        let book = bindings.new_book(BookType::Xlsx);
        let sheet = book.add_sheet("Sheet1", None).unwrap();
        sheet.write_num(0, 0, 1.0, None).unwrap();

        let slot = Arc::clone(&outcome);
        let target = sheet.clone();
        let observer = book.clone();
        sheet
            .insert_row_async(0, 2, move |result| {
                let moved = target.read_num(3, 0);
                *slot.lock().unwrap() = Some((result, moved, observer.async_pending()));
            })
            .unwrap();
        assert_eq!(book.async_pending(), 1);
    }

    assert_eq!(bindings.run_until_idle(), 1);
    assert_eq!(*outcome.lock().unwrap(), Some((Ok(()), Ok(1.0), 0)));
}

#[test]
fn test_discarded_sheet_cannot_queue_work() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
    let book = bindings.new_book(BookType::Xlsx);
    let sheet = book.add_sheet("Sheet1", None).unwrap();
    book.del_sheet(0).unwrap();

    let err = sheet.insert_row_async(0, 0, |_| {}).unwrap_err();

    assert_eq!(err, Error::Generic("sheet has been discarded and is no longer valid".into()));
    assert_eq!(book.async_pending(), 0);
    assert_eq!(bindings.run_until_idle(), 0);
}

#[test]
fn test_sync_and_async_edits_agree() {
    let mut bindings = Bindings::new(Config::default().with_worker_threads(1)).unwrap();
    let book = bindings.new_book(BookType::Xlsx);
    let sync_sheet = book.add_sheet("Sync", None).unwrap();
    let async_sheet = book.add_sheet("Async", None).unwrap();
    for sheet in [&sync_sheet, &async_sheet] {
        sheet.write_num(0, 0, 1.0, None).unwrap();
        sheet.write_num(4, 3, 2.0, None).unwrap();
    }

    sync_sheet.remove_row(1, 2).unwrap();
    sync_sheet.insert_col(0, 0).unwrap();
    async_sheet.remove_row_async(1, 2, |_| {}).unwrap();
    bindings.run_until_idle();
    async_sheet.insert_col_async(0, 0, |_| {}).unwrap();
    bindings.run_until_idle();

    for sheet in [&sync_sheet, &async_sheet] {
        assert_eq!(sheet.read_num(0, 1).unwrap(), 1.0);
        assert_eq!(sheet.read_num(2, 4).unwrap(), 2.0);
        assert_eq!(sheet.cell_type(4, 3).unwrap(), CellType::Empty);
    }
}
