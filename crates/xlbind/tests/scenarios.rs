//! End-to-end scenarios driven through the public proxies

use std::sync::{Arc, Mutex};

use pretty_assertions::assert_eq;
use xlbind::{Bindings, BookType, CellType, Config, Error};

fn bindings() -> Bindings {
    Bindings::new(Config::default().with_worker_threads(2)).unwrap()
}

/// Write a string and read it back on a fresh xls book
#[test]
fn test_write_then_read_string() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xls);
    let sheet = book.add_sheet("Sheet1", None).unwrap();

    sheet.write_str(0, 0, "hello", None).unwrap();

    assert_eq!(sheet.read_str(0, 0).unwrap(), "hello");
    assert_eq!(sheet.cell_type(0, 0).unwrap(), CellType::String);
    assert_eq!(book.error_message().unwrap(), "ok");
}

/// A format from one book cannot style a cell of another
#[test]
fn test_cross_book_format_is_rejected() {
    let bindings = bindings();
    let first = bindings.new_book(BookType::Xlsx);
    let second = bindings.new_book(BookType::Xlsx);
    let format = first.add_format(None).unwrap();
    let sheet = second.add_sheet("Sheet1", None).unwrap();

    let err = sheet.write_str(0, 0, "x", Some(&format)).unwrap_err();

    assert_eq!(err, Error::Type("parent books differ".into()));
    assert_eq!(sheet.cell_type(0, 0).unwrap(), CellType::Empty);
}

/// Async row insertion shifts rows and restores the pending counter
#[test]
fn test_async_insert_row() {
    let mut bindings = bindings();
    let book = bindings.new_book(BookType::Xlsx);
    let sheet = book.add_sheet("Sheet1", None).unwrap();
    sheet.write_num(5, 0, 1.0, None).unwrap();
    sheet.write_num(12, 0, 2.0, None).unwrap();

    let outcome = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&outcome);
    sheet
        .insert_row_async(5, 10, move |result| {
            *seen.lock().unwrap() = Some(result);
        })
        .unwrap();
    assert!(book.async_pending() >= 1);

    bindings.run_until_idle();

    assert_eq!(book.async_pending(), 0);
    assert_eq!(*outcome.lock().unwrap(), Some(Ok(())));
    assert_eq!(sheet.read_num(11, 0).unwrap(), 1.0);
    assert_eq!(sheet.read_num(18, 0).unwrap(), 2.0);
    assert_eq!(sheet.cell_type(5, 0).unwrap(), CellType::Empty);
}

/// An invalid formula raises the book's last error and leaves the cell alone
#[test]
fn test_invalid_formula() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xlsx);
    let sheet = book.add_sheet("Sheet1", None).unwrap();
    sheet.write_num(3, 3, 7.0, None).unwrap();

    let err = sheet.write_formula(3, 3, "=SUM(A1:", None).unwrap_err();

    let message = book.error_message().unwrap();
    assert!(message.starts_with("invalid formula"));
    assert_eq!(err, Error::Native(message));
    assert_eq!(sheet.read_num(3, 3).unwrap(), 7.0);
    assert!(!sheet.is_formula(3, 3).unwrap());
}

/// Errors raised through child entities are readable from the book
#[test]
fn test_error_message_is_shared_by_children() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xls);
    let sheet = book.add_sheet("Sheet1", None).unwrap();

    let err = sheet.read_num(70_000, 0).unwrap_err();

    assert_eq!(err.message(), "invalid row index 70000");
    assert_eq!(book.error_message().unwrap(), "invalid row index 70000");

    sheet.write_num(0, 0, 1.0, None).unwrap();
    assert_eq!(book.error_message().unwrap(), "ok");
}

#[test]
fn test_template_sheet_is_copied() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xlsx);
    let template = book.add_sheet("Template", None).unwrap();
    template.write_str(1, 1, "header", None).unwrap();

    let copy = book.insert_sheet(0, "Copy", Some(&template)).unwrap();
    copy.write_str(1, 1, "changed", None).unwrap();

    assert_eq!(book.sheet_name(0).unwrap(), "Copy");
    assert_eq!(template.read_str(1, 1).unwrap(), "header");
    assert_eq!(book.get_sheet(1).unwrap().read_str(1, 1).unwrap(), "header");
}

#[test]
fn test_dates_follow_book_date_system() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xlsx);
    let parts = xlbind::DateParts::ymd(2024, 3, 1);

    let serial = book.date_pack(parts).unwrap();
    book.set_date1904(true).unwrap();
    let serial_1904 = book.date_pack(parts).unwrap();

    assert_eq!(serial - serial_1904, 1462.0);
    assert_eq!(book.date_unpack(serial_1904).unwrap(), parts);
}
