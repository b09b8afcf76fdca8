//! Contact record model.
//!
//! # Responsibility
//! - Hold one contact's name, ordered phone numbers and optional birthday.
//! - Provide phone mutation that validates before touching state.
//!
//! # Invariants
//! - Phones keep insertion order; duplicate numbers are allowed.
//! - `edit_phone` either fully replaces one phone or changes nothing.
//! - At most one birthday exists; re-setting replaces the previous value.

use crate::model::field::{canonical_digits, Birthday, FieldError, FieldResult, Name, Phone};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RecordResult<T> = Result<T, RecordError>;

/// Error raised by record-level phone operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    Field(FieldError),
    PhoneNotFound(String),
}

impl Display for RecordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(err) => write!(f, "{err}"),
            Self::PhoneNotFound(digits) => write!(f, "phone number {digits} not found"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Field(err) => Some(err),
            Self::PhoneNotFound(_) => None,
        }
    }
}

impl From<FieldError> for RecordError {
    fn from(value: FieldError) -> Self {
        Self::Field(value)
    }
}

/// One contact: a name, ordered phone numbers and an optional birthday.
///
/// A record is owned exclusively by the address-book entry holding it; there
/// are no shared or back references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: Name,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

impl Record {
    /// Creates an empty record for `name`: no phones, no birthday.
    pub fn new(name: Name) -> Self {
        Self {
            name,
            phones: Vec::new(),
            birthday: None,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    pub fn birthday(&self) -> Option<&Birthday> {
        self.birthday.as_ref()
    }

    /// Validates and appends a phone number.
    ///
    /// Duplicates are kept; repeated adds of the same digits grow the list
    /// each time.
    pub fn add_phone(&mut self, raw: &str) -> FieldResult<()> {
        let phone = Phone::new(raw)?;
        self.phones.push(phone);
        Ok(())
    }

    /// Removes the first phone matching `raw` after normalization.
    ///
    /// Returns whether a removal happened; a missing number is a no-op, not
    /// an error.
    pub fn remove_phone(&mut self, raw: &str) -> bool {
        let digits = canonical_digits(raw);
        match self.phones.iter().position(|phone| phone.as_str() == digits) {
            Some(index) => {
                self.phones.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the first phone matching `old_raw` with a phone built from
    /// `new_raw`.
    ///
    /// The replacement is validated before the list is searched, so a
    /// malformed `new_raw` leaves the record untouched.
    pub fn edit_phone(&mut self, old_raw: &str, new_raw: &str) -> RecordResult<()> {
        let replacement = Phone::new(new_raw)?;
        let digits = canonical_digits(old_raw);
        let index = self
            .phones
            .iter()
            .position(|phone| phone.as_str() == digits)
            .ok_or(RecordError::PhoneNotFound(digits))?;
        self.phones[index] = replacement;
        Ok(())
    }

    /// Finds the first phone matching `raw` after normalization.
    pub fn find_phone(&self, raw: &str) -> Option<&Phone> {
        let digits = canonical_digits(raw);
        self.phones.iter().find(|phone| phone.as_str() == digits)
    }

    /// Validates and sets the birthday, replacing any previous value.
    pub fn set_birthday(&mut self, raw: &str) -> FieldResult<()> {
        self.birthday = Some(Birthday::new(raw)?);
        Ok(())
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.phones.is_empty() {
            write!(f, "{}, phones: No phones", self.name)?;
        } else {
            let phones = self
                .phones
                .iter()
                .map(Phone::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            write!(f, "{}, phones: {phones}", self.name)?;
        }
        if let Some(birthday) = &self.birthday {
            write!(f, ", birthday: {birthday}")?;
        }
        Ok(())
    }
}
