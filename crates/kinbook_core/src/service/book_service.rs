//! Address-book use-case service.
//!
//! # Responsibility
//! - Own the in-memory book plus its repository and expose shell use cases.
//! - Translate absent contacts into typed not-found errors where the use
//!   case requires existence.
//!
//! # Invariants
//! - Service APIs never bypass field validation or repository contracts.
//! - A failed operation leaves the book unchanged.

use crate::book::{AddressBook, UpcomingBirthday};
use crate::model::field::{Birthday, FieldError, Name};
use crate::model::record::{Record, RecordError};
use crate::repo::book_repo::{BookRepository, RepoResult};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BookResult<T> = Result<T, BookError>;

/// Error raised by book-level use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookError {
    Record(RecordError),
    ContactNotFound(String),
}

impl Display for BookError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Record(err) => write!(f, "{err}"),
            Self::ContactNotFound(name) => write!(f, "contact {name} not found"),
        }
    }
}

impl Error for BookError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Record(err) => Some(err),
            Self::ContactNotFound(_) => None,
        }
    }
}

impl From<RecordError> for BookError {
    fn from(value: RecordError) -> Self {
        Self::Record(value)
    }
}

impl From<FieldError> for BookError {
    fn from(value: FieldError) -> Self {
        Self::Record(RecordError::Field(value))
    }
}

/// Whether `add_contact` created a fresh record or extended an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddContactOutcome {
    Created,
    Updated,
}

/// Use-case service wrapper around the address book and its repository.
pub struct BookService<R: BookRepository> {
    book: AddressBook,
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service by loading the persisted book through `repo`.
    ///
    /// A repository with no prior data yields an empty book.
    pub fn load(repo: R) -> RepoResult<Self> {
        let book = repo.load_book()?;
        Ok(Self { book, repo })
    }

    /// Snapshots the current book through the repository.
    pub fn persist(&self) -> RepoResult<()> {
        self.repo.save_book(&self.book)
    }

    /// Read access to the underlying book, for rendering.
    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Adds `phone` to the contact `name`, creating the contact when absent.
    ///
    /// # Contract
    /// - Existing contact: the validated phone is appended,
    ///   returns [`AddContactOutcome::Updated`].
    /// - Absent contact: a record is created with the phone,
    ///   returns [`AddContactOutcome::Created`].
    /// - Validation failure leaves the book untouched; in particular a
    ///   half-built record is never inserted.
    pub fn add_contact(&mut self, name: &str, phone: &str) -> BookResult<AddContactOutcome> {
        let name = Name::new(name)?;
        match self.book.find_mut(name.as_str()) {
            Some(record) => {
                record.add_phone(phone)?;
                Ok(AddContactOutcome::Updated)
            }
            None => {
                let mut record = Record::new(name);
                record.add_phone(phone)?;
                self.book.add_record(record);
                Ok(AddContactOutcome::Created)
            }
        }
    }

    /// Replaces `old` with `new` on the contact `name`.
    ///
    /// Inherits `edit_phone` atomicity: an invalid `new` phone changes
    /// nothing.
    pub fn change_phone(&mut self, name: &str, old: &str, new: &str) -> BookResult<()> {
        let record = self
            .book
            .find_mut(name)
            .ok_or_else(|| BookError::ContactNotFound(name.to_string()))?;
        record.edit_phone(old, new)?;
        Ok(())
    }

    /// Looks up the contact `name`, failing when it does not exist.
    pub fn contact(&self, name: &str) -> BookResult<&Record> {
        self.book
            .find(name)
            .ok_or_else(|| BookError::ContactNotFound(name.to_string()))
    }

    /// Sets the birthday of the contact `name`, replacing a previous value.
    pub fn set_birthday(&mut self, name: &str, raw: &str) -> BookResult<()> {
        let record = self
            .book
            .find_mut(name)
            .ok_or_else(|| BookError::ContactNotFound(name.to_string()))?;
        record.set_birthday(raw)?;
        Ok(())
    }

    /// Birthday of the contact `name`; `Ok(None)` when the contact exists
    /// but has no birthday recorded.
    pub fn birthday_of(&self, name: &str) -> BookResult<Option<&Birthday>> {
        Ok(self.contact(name)?.birthday())
    }

    /// Removes the contact `name`, returning whether it existed.
    pub fn delete_contact(&mut self, name: &str) -> bool {
        self.book.delete(name)
    }

    /// Upcoming-birthday report relative to `today`.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<UpcomingBirthday> {
        self.book.upcoming_birthdays(today)
    }
}
