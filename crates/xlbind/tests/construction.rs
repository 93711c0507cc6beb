//! Constructor paths seen from the host side

use pretty_assertions::assert_eq;
use xlbind::host::{CallInfo, External, Object, Value};
use xlbind::{Bindings, BookType, CellRange, Config, Error, ErrorClass, Proxy};

fn bindings() -> Bindings {
    Bindings::new(Config::default().with_worker_threads(1)).unwrap()
}

fn sentinel() -> CallInfo {
    CallInfo::construct(vec![Value::External(External::null())])
}

const STUB_CLASSES: [&str; 10] = [
    "Sheet",
    "Format",
    "Font",
    "AutoFilter",
    "FilterColumn",
    "ConditionalFormat",
    "ConditionalFormatting",
    "RichString",
    "FormControl",
    "CoreProperties",
];

#[test]
fn test_direct_construction_is_refused() {
    let bindings = bindings();
    let shapes = [
        CallInfo::construct(Vec::new()),
        CallInfo::construct(vec![Value::from(1)]),
        CallInfo::construct(vec![Value::External(External::null()), Value::Null]),
        CallInfo::call(vec![Value::External(External::null())]),
    ];

    for class in STUB_CLASSES {
        for info in &shapes {
            let err = bindings.construct(class, info).unwrap_err();
            assert_eq!(err, Error::Type("You are not supposed to call this constructor directly".into()));
            assert_eq!(err.class(), ErrorClass::TypeError);
        }
    }
}

#[test]
fn test_sentinel_yields_unwrapped_stub() {
    let bindings = bindings();
    for class in STUB_CLASSES {
        let object = bindings.construct(class, &sentinel()).unwrap();
        assert_eq!(object.class_name(), Some(class));
        assert!(object.book().is_none());
    }
}

#[test]
fn test_stub_methods_raise_invalid_scope() {
    let bindings = bindings();
    let invalid_scope = Error::Type("invalid scope".into());

    let Object::Sheet(sheet) = bindings.construct("Sheet", &sentinel()).unwrap() else {
        panic!("expected a sheet");
    };
    assert!(!sheet.is_wrapped());
    assert_eq!(sheet.read_str(0, 0), Err(invalid_scope.clone()));
    assert_eq!(sheet.insert_row_async(0, 0, |_| {}), Err(invalid_scope.clone()));

    let Object::Format(format) = bindings.construct("Format", &sentinel()).unwrap() else {
        panic!("expected a format");
    };
    assert_eq!(format.set_wrap(true), Err(invalid_scope.clone()));

    let Object::AutoFilter(filter) = bindings.construct("AutoFilter", &sentinel()).unwrap() else {
        panic!("expected an auto filter");
    };
    assert_eq!(filter.set_ref(CellRange::new(0, 1, 0, 1)), Err(invalid_scope));
}

#[test]
fn test_stub_does_not_poison_real_entities() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xlsx);
    let sheet = book.add_sheet("Sheet1", None).unwrap();

    let Object::Format(stub) = bindings.construct("Format", &sentinel()).unwrap() else {
        panic!("expected a format");
    };

    // An unattached entity passes the ownership check, then fails on its scope
    assert_eq!(sheet.write_num(0, 0, 1.0, Some(&stub)), Err(Error::Type("invalid scope".into())));
    assert_eq!(sheet.cell_type(0, 0).unwrap(), xlbind::CellType::Empty);
}

#[test]
fn test_book_constructor() {
    let bindings = bindings();

    let Object::Book(book) = bindings.construct("Book", &CallInfo::construct(vec![Value::from(1)])).unwrap() else {
        panic!("expected a book");
    };
    assert_eq!(book.kind(), BookType::Xlsx);

    let err = bindings.construct("Book", &CallInfo::construct(vec![Value::from(7)])).unwrap_err();
    assert_eq!(err, Error::Type("invalid book type".into()));

    let err = bindings.construct("Book", &CallInfo::construct(Vec::new())).unwrap_err();
    assert_eq!(err, Error::Type("integer required at position 0".into()));
}

#[test]
fn test_factories_wrap_before_returning() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xlsx);
    let sheet = book.add_sheet("Sheet1", None).unwrap();
    let format = book.format(0).unwrap();

    assert!(sheet.is_wrapped());
    assert!(format.is_wrapped());
    assert!(Object::Sheet(sheet).book().unwrap().ptr_eq(&book));
}

#[test]
fn test_failed_factory_creates_nothing() {
    let bindings = bindings();
    let book = bindings.new_book(BookType::Xls);

    assert_eq!(
        book.add_sheet("bad/name", None).unwrap_err().class(),
        ErrorClass::Error
    );
    assert_eq!(book.sheet_count().unwrap(), 0);
    assert!(book.get_sheet(0).is_err());
}
