use kinbook_core::db::migrations::latest_version;
use kinbook_core::db::{open_db, open_db_in_memory, DbError};
use kinbook_core::{AddressBook, BookRepository, Name, Record, RepoError, SqliteBookRepository};
use rusqlite::params;

#[test]
fn empty_database_loads_an_empty_book() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let book = repo.load_book().unwrap();
    assert!(book.is_empty());
}

#[test]
fn save_and_load_round_trip_preserves_contacts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let mut book = AddressBook::new();
    let mut alice = Record::new(Name::new("Alice").unwrap());
    alice.add_phone("1234567890").unwrap();
    alice.add_phone("0987654321").unwrap();
    alice.set_birthday("12.06.1990").unwrap();
    book.add_record(alice);

    let bob = Record::new(Name::new("Bob").unwrap());
    book.add_record(bob);

    repo.save_book(&book).unwrap();
    let loaded = repo.load_book().unwrap();
    assert_eq!(loaded, book);
}

#[test]
fn phone_order_survives_the_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let mut book = AddressBook::new();
    let mut record = Record::new(Name::new("Carol").unwrap());
    record.add_phone("3333333333").unwrap();
    record.add_phone("1111111111").unwrap();
    record.add_phone("2222222222").unwrap();
    book.add_record(record);

    repo.save_book(&book).unwrap();
    let loaded = repo.load_book().unwrap();

    let digits: Vec<_> = loaded
        .find("Carol")
        .unwrap()
        .phones()
        .iter()
        .map(|p| p.as_str())
        .collect();
    assert_eq!(digits, ["3333333333", "1111111111", "2222222222"]);
}

#[test]
fn save_replaces_the_previous_snapshot() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteBookRepository::new(&conn);

    let mut first = AddressBook::new();
    first.add_record(Record::new(Name::new("Old").unwrap()));
    repo.save_book(&first).unwrap();

    let mut second = AddressBook::new();
    second.add_record(Record::new(Name::new("New").unwrap()));
    repo.save_book(&second).unwrap();

    let loaded = repo.load_book().unwrap();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.find("Old").is_none());
    assert!(loaded.find("New").is_some());
}

#[test]
fn book_persists_across_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("book.sqlite3");

    {
        let conn = open_db(&db_path).unwrap();
        let repo = SqliteBookRepository::new(&conn);

        let mut book = AddressBook::new();
        let mut record = Record::new(Name::new("Dora").unwrap());
        record.add_phone("5555555555").unwrap();
        record.set_birthday("01.01.2000").unwrap();
        book.add_record(record);
        repo.save_book(&book).unwrap();
    }

    let conn = open_db(&db_path).unwrap();
    let repo = SqliteBookRepository::new(&conn);
    let loaded = repo.load_book().unwrap();

    let dora = loaded.find("Dora").unwrap();
    assert_eq!(dora.phones()[0].as_str(), "5555555555");
    assert_eq!(dora.birthday().unwrap().as_str(), "01.01.2000");
}

#[test]
fn load_rejects_corrupt_birthday_text() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contacts (name, birthday) VALUES (?1, ?2);",
        params!["Eve", "not-a-date"],
    )
    .unwrap();

    let repo = SqliteBookRepository::new(&conn);
    let err = repo.load_book().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
    assert!(err.to_string().contains("Eve"));
}

#[test]
fn load_rejects_corrupt_phone_digits() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contacts (name, birthday) VALUES (?1, NULL);",
        params!["Eve"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO phones (contact_name, position, digits) VALUES (?1, 0, ?2);",
        params!["Eve", "12345"],
    )
    .unwrap();

    let repo = SqliteBookRepository::new(&conn);
    let err = repo.load_book().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn open_db_applies_migrations_and_sets_user_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(version > 0);
}

#[test]
fn open_db_rejects_database_from_a_newer_binary() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("future.sqlite3");

    {
        let conn = open_db(&db_path).unwrap();
        conn.execute_batch(&format!(
            "PRAGMA user_version = {};",
            latest_version() + 1
        ))
        .unwrap();
    }

    let err = open_db(&db_path).unwrap_err();
    assert!(matches!(err, DbError::UnsupportedSchemaVersion { .. }));
}

#[test]
fn deleting_a_contact_cascades_to_its_phones() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contacts (name, birthday) VALUES (?1, NULL);",
        params!["Frank"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO phones (contact_name, position, digits) VALUES (?1, 0, ?2);",
        params!["Frank", "1234567890"],
    )
    .unwrap();

    conn.execute("DELETE FROM contacts WHERE name = ?1;", params!["Frank"])
        .unwrap();

    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM phones;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(remaining, 0);
}
