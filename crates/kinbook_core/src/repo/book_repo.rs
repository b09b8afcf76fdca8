//! Address-book persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Snapshot the whole in-memory book to durable storage and back.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `save_book` replaces the previous snapshot atomically (one transaction).
//! - `load_book` re-validates persisted values instead of masking bad state.
//! - Phone order within a contact survives the round trip.

use crate::book::AddressBook;
use crate::db::DbError;
use crate::model::field::{Birthday, Name};
use crate::model::record::Record;
use log::info;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised by address-book persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for whole-book snapshots.
///
/// Any durable round-trip of the full book satisfies the contract; callers
/// never depend on the encoding behind it.
pub trait BookRepository {
    fn save_book(&self, book: &AddressBook) -> RepoResult<()>;
    fn load_book(&self) -> RepoResult<AddressBook>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn save_book(&self, book: &AddressBook) -> RepoResult<()> {
        let started_at = Instant::now();

        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM phones;", [])?;
        tx.execute("DELETE FROM contacts;", [])?;

        {
            let mut insert_contact =
                tx.prepare("INSERT INTO contacts (name, birthday) VALUES (?1, ?2);")?;
            let mut insert_phone = tx.prepare(
                "INSERT INTO phones (contact_name, position, digits) VALUES (?1, ?2, ?3);",
            )?;

            for record in book.iter() {
                insert_contact.execute(params![
                    record.name().as_str(),
                    record.birthday().map(Birthday::as_str),
                ])?;

                for (position, phone) in record.phones().iter().enumerate() {
                    insert_phone.execute(params![
                        record.name().as_str(),
                        position as i64,
                        phone.as_str(),
                    ])?;
                }
            }
        }

        tx.commit()?;

        info!(
            "event=book_save module=repo status=ok contacts={} duration_ms={}",
            book.len(),
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn load_book(&self) -> RepoResult<AddressBook> {
        let started_at = Instant::now();
        let mut book = AddressBook::new();

        let mut contacts = self.conn.prepare("SELECT name, birthday FROM contacts;")?;
        let mut rows = contacts.query([])?;
        while let Some(row) = rows.next()? {
            let name_text: String = row.get("name")?;
            let name = Name::new(&name_text).map_err(|err| {
                RepoError::InvalidData(format!("bad name `{name_text}` in contacts.name: {err}"))
            })?;

            let mut record = Record::new(name);
            if let Some(birthday_text) = row.get::<_, Option<String>>("birthday")? {
                record.set_birthday(&birthday_text).map_err(|err| {
                    RepoError::InvalidData(format!(
                        "bad birthday `{birthday_text}` for contact `{name_text}`: {err}"
                    ))
                })?;
            }
            book.add_record(record);
        }

        let mut phones = self.conn.prepare(
            "SELECT contact_name, digits FROM phones ORDER BY contact_name ASC, position ASC;",
        )?;
        let mut rows = phones.query([])?;
        while let Some(row) = rows.next()? {
            let contact_name: String = row.get("contact_name")?;
            let digits: String = row.get("digits")?;

            let record = book.find_mut(&contact_name).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "phone row references unknown contact `{contact_name}`"
                ))
            })?;
            record.add_phone(&digits).map_err(|err| {
                RepoError::InvalidData(format!(
                    "bad phone `{digits}` for contact `{contact_name}`: {err}"
                ))
            })?;
        }

        info!(
            "event=book_load module=repo status=ok contacts={} duration_ms={}",
            book.len(),
            started_at.elapsed().as_millis()
        );
        Ok(book)
    }
}
