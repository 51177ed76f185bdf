use bookshelf_core::db::open_db_in_memory;
use bookshelf_core::{
    Book, BookDraft, BookRepository, BookService, Catalog, Rating, RepoError, SqliteBookRepository,
};
use rusqlite::Connection;

fn dune() -> BookDraft {
    BookDraft::new("Dune", "Herbert", "Shelf A")
        .read(true)
        .rated(Rating::new(9))
}

#[test]
fn create_then_list_contains_exactly_one_new_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    repo.create_book(&BookDraft::new("Emma", "Austen", "Den"))
        .unwrap();

    let before = repo.list_books().unwrap();
    let id = repo.create_book(&dune()).unwrap();
    let after = repo.list_books().unwrap();

    assert_eq!(after.len(), before.len() + 1);
    let created = after
        .iter()
        .filter(|book| !before.contains(book))
        .collect::<Vec<_>>();
    assert_eq!(created, vec![&Book::from_draft(id, dune())]);
}

#[test]
fn identifiers_are_unique_and_stable_across_updates() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let first = repo.create_book(&dune()).unwrap();
    let second = repo.create_book(&dune()).unwrap();
    assert_ne!(first, second);

    let edited = BookDraft::new("Dune Messiah", "Herbert", "Shelf B");
    repo.update_book(first, &edited).unwrap();

    let loaded = repo.get_book(first).unwrap().unwrap();
    assert_eq!(loaded, Book::from_draft(first, edited));
    assert_eq!(repo.get_book(second).unwrap().unwrap().title, "Dune");
}

#[test]
fn update_overwrites_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let id = repo.create_book(&dune()).unwrap();

    let edited = BookDraft::new("Children of Dune", "F. Herbert", "Box 3")
        .read(false)
        .rated(Rating::parse_lenient("15"));
    repo.update_book(id, &edited).unwrap();

    let loaded = repo.get_book(id).unwrap().unwrap();
    assert_eq!(loaded.title, "Children of Dune");
    assert_eq!(loaded.author, "F. Herbert");
    assert_eq!(loaded.location, "Box 3");
    assert!(!loaded.read_before);
    assert_eq!(loaded.rating, None);
}

#[test]
fn delete_removes_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let id = repo.create_book(&dune()).unwrap();

    repo.delete_book(id).unwrap();
    assert!(repo.get_book(id).unwrap().is_none());
    assert!(repo.list_books().unwrap().is_empty());
}

#[test]
fn update_and_delete_of_unknown_id_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let update_err = repo.update_book(404, &dune()).unwrap_err();
    assert!(matches!(update_err, RepoError::NotFound(404)));

    let delete_err = repo.delete_book(404).unwrap_err();
    assert!(matches!(delete_err, RepoError::NotFound(404)));
    assert!(!delete_err.is_storage());
}

#[test]
fn read_before_is_stored_as_zero_or_one() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let read_id = repo.create_book(&dune()).unwrap();
    let unread_id = repo
        .create_book(&BookDraft::new("Emma", "Austen", "Den"))
        .unwrap();

    assert_eq!(raw_read_before(&conn, read_id), 1);
    assert_eq!(raw_read_before(&conn, unread_id), 0);
}

#[test]
fn corrupt_read_before_is_rejected_on_read() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books (title, author, location, readBefore, rating)
         VALUES ('X', 'Y', 'Z', 7, NULL);",
        [],
    )
    .unwrap();

    let err = SqliteBookRepository::new(&conn).list_books().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("readBefore")));
}

#[test]
fn out_of_range_stored_rating_reads_back_absent() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO books (title, author, location, readBefore, rating)
         VALUES ('Legacy', 'Import', 'Attic', 0, 15);",
        [],
    )
    .unwrap();

    let books = SqliteBookRepository::new(&conn).list_books().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].rating, None);
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::new(&conn));

    let id = service.add_book(&dune()).unwrap();
    assert_eq!(service.get_book(id).unwrap().unwrap().title, "Dune");
    assert_eq!(service.all_books().unwrap().len(), 1);
    service.delete_book(id).unwrap();
    assert!(service.all_books().unwrap().is_empty());
}

#[test]
fn catalog_persists_across_per_operation_connections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.db");

    let catalog = Catalog::open(&path).unwrap();
    let id = catalog.create(&dune()).unwrap();

    let reopened = Catalog::open(&path).unwrap();
    assert_eq!(reopened.get(id).unwrap(), Some(Book::from_draft(id, dune())));

    reopened
        .update(id, &dune().rated(Rating::new(10)))
        .unwrap();
    assert_eq!(
        catalog.get(id).unwrap().unwrap().rating,
        Rating::new(10)
    );

    catalog.delete(id).unwrap();
    assert!(reopened.get_all().unwrap().is_empty());
}

#[test]
fn catalog_open_reports_unreachable_store_as_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("books.db");

    let err = Catalog::open(&path).unwrap_err();
    assert!(err.is_storage());
}

fn raw_read_before(conn: &Connection, id: i64) -> i64 {
    conn.query_row("SELECT readBefore FROM books WHERE id = ?1;", [id], |row| {
        row.get(0)
    })
    .unwrap()
}
