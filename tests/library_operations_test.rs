use library_catalog::{
    Author, Book, ErrorKind, Library, LibraryError, Member, MemoryNotifier, SearchField,
};

fn book(title: &str, category: &str, isbn: &str) -> Book {
    Book::new(title, Author::new("Gabriel", "García Márquez"), category, isbn)
}

fn catalog() -> Library<MemoryNotifier> {
    let mut library = Library::with_notifier(MemoryNotifier::default());
    library.add_book(book("T1", "Ficción", "A")).unwrap();
    library.add_book(book("T2", "Clásico", "B")).unwrap();
    library
        .register_member(Member::new("Clinton Alvarado", "001"))
        .unwrap();
    library
}

#[test]
fn test_add_book_then_lookup() {
    let mut library = Library::with_notifier(MemoryNotifier::default());
    let original = book("Cien años de soledad", "Ficción", "978-3-16-148410-0");

    library.add_book(original.clone()).unwrap();
    assert_eq!(library.book("978-3-16-148410-0"), Some(&original));
    assert_eq!(
        library.notifier().last().as_deref(),
        Some("Book 'Cien años de soledad' added to the library.")
    );
}

#[test]
fn test_duplicate_isbn_keeps_original() {
    let mut library = catalog();
    let err = library
        .add_book(book("Impostor", "Ficción", "A"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(library.book("A").unwrap().title, "T1");
    assert_eq!(library.book_count(), 2);
}

#[test]
fn test_remove_missing_book() {
    let mut library = catalog();
    let err = library.remove_book("Z").unwrap_err();

    assert!(matches!(err, LibraryError::BookNotFound { ref isbn } if isbn == "Z"));
    assert_eq!(library.book_count(), 2);
}

#[test]
fn test_remove_book() {
    let mut library = catalog();
    let removed = library.remove_book("B").unwrap();

    assert_eq!(removed.title, "T2");
    assert!(library.book("B").is_none());
    assert_eq!(library.book_count(), 1);
}

#[test]
fn test_register_unregister_restores_member_set() {
    let mut library = catalog();
    let before: Vec<String> = library.members().map(|m| m.id.clone()).collect();

    library
        .register_member(Member::new("María Pérez", "002"))
        .unwrap();
    assert_eq!(library.member_count(), 2);

    let removed = library.unregister_member("002").unwrap();
    assert_eq!(removed.name, "María Pérez");

    let after: Vec<String> = library.members().map(|m| m.id.clone()).collect();
    assert_eq!(before, after);
}

#[test]
fn test_duplicate_member_rejected() {
    let mut library = Library::with_notifier(MemoryNotifier::default());
    library
        .register_member(Member::new("María Pérez", "002"))
        .unwrap();

    let err = library
        .register_member(Member::new("Someone Else", "002"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(library.member_count(), 1);
    assert_eq!(library.member("002").unwrap().name, "María Pérez");
}

#[test]
fn test_unregister_missing_member() {
    let mut library = catalog();
    let err = library.unregister_member("404").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn test_loan_then_return_restores_loans() {
    let mut library = catalog();
    library.loan_book("B", "001").unwrap();
    let before: Vec<String> = library
        .list_loans("001")
        .unwrap()
        .iter()
        .map(|b| b.isbn.clone())
        .collect();

    library.loan_book("A", "001").unwrap();
    let returned = library.return_book("A", "001").unwrap();
    assert_eq!(returned.isbn, "A");

    let after: Vec<String> = library
        .list_loans("001")
        .unwrap()
        .iter()
        .map(|b| b.isbn.clone())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_loan_failures() {
    let mut library = catalog();

    let err = library.loan_book("Z", "001").unwrap_err();
    assert!(matches!(err, LibraryError::BookNotFound { .. }));

    let err = library.loan_book("A", "404").unwrap_err();
    assert!(matches!(err, LibraryError::MemberNotFound { .. }));

    library.loan_book("A", "001").unwrap();
    let err = library.loan_book("A", "001").unwrap_err();
    assert!(matches!(err, LibraryError::AlreadyLoaned { .. }));
    assert_eq!(library.loans("001").unwrap().len(), 1);
}

#[test]
fn test_missing_book_reported_before_missing_member() {
    let mut library = catalog();
    let err = library.loan_book("Z", "404").unwrap_err();
    assert!(matches!(err, LibraryError::BookNotFound { .. }));
}

#[test]
fn test_return_failures() {
    let mut library = catalog();

    let err = library.return_book("A", "404").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = library.return_book("A", "001").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotLoanedToMember);
}

#[test]
fn test_search_by_category() {
    let library = catalog();

    let found = library.search_books(SearchField::Category, "ficción");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].isbn, "A");

    let none = library.search_books(SearchField::Category, "Poesía");
    assert!(none.is_empty());
    assert_eq!(
        library.notifier().last().as_deref(),
        Some("No books found with category 'Poesía'.")
    );
}

#[test]
fn test_search_by_author_and_title() {
    let library = catalog();

    assert_eq!(
        library
            .search_books(SearchField::Author, "gabriel garcía márquez")
            .len(),
        2
    );
    assert_eq!(library.search_books(SearchField::Title, "t2").len(), 1);
}

#[test]
fn test_loan_scenario() {
    let mut library = catalog();

    library.loan_book("A", "001").unwrap();
    let loans = library.list_loans("001").unwrap();
    assert_eq!(loans.len(), 1);
    assert_eq!(loans[0].title, "T1");

    library.return_book("A", "001").unwrap();
    assert!(library.list_loans("001").unwrap().is_empty());
    assert_eq!(
        library.notifier().last().as_deref(),
        Some("No books loaned to 'Clinton Alvarado'.")
    );
}

#[test]
fn test_list_loans_keeps_loan_order() {
    let mut library = catalog();
    library.loan_book("B", "001").unwrap();
    library.loan_book("A", "001").unwrap();

    let titles: Vec<&str> = library
        .list_loans("001")
        .unwrap()
        .into_iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(titles, ["T2", "T1"]);

    let loans = library.loans("001").unwrap();
    assert!(loans[0].loaned_at <= loans[1].loaned_at);
}

#[test]
fn test_every_operation_notifies_once() {
    let mut library = catalog();
    library.notifier().clear();

    let _ = library.loan_book("A", "001");
    let _ = library.loan_book("A", "001");
    let _ = library.list_loans("001");
    let _ = library.search_books(SearchField::Isbn, "a");
    let _ = library.return_book("A", "001");
    let _ = library.remove_book("Z");

    assert_eq!(library.notifier().len(), 6);
    assert_eq!(library.notifier().failure_count(), 2);
}

#[test]
fn test_cascading_removals_notify_once() {
    let mut library = catalog();
    library.add_book(book("T3", "Ficción", "C")).unwrap();
    library
        .register_member(Member::new("María Pérez", "002"))
        .unwrap();
    library.loan_book("A", "001").unwrap();
    library.loan_book("B", "002").unwrap();
    library.loan_book("C", "002").unwrap();
    library.notifier().clear();

    library.remove_book("A").unwrap();
    assert_eq!(library.notifier().len(), 1);
    assert!(library.list_loans("001").unwrap().is_empty());
    library.notifier().clear();

    let member = library.unregister_member("002").unwrap();
    assert!(member.loans().is_empty());
    assert_eq!(library.notifier().len(), 1);
    assert_eq!(library.notifier().failure_count(), 0);
}
