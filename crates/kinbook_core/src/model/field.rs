//! Validated field value types for contact records.
//!
//! # Responsibility
//! - Enforce construction-time syntax rules for names, phones and birthdays.
//! - Keep canonical string forms stable for display and persistence.
//!
//! # Invariants
//! - A constructed value never holds an out-of-contract string.
//! - `Phone` stores exactly [`PHONE_DIGITS`] ASCII digits and nothing else.
//! - `Birthday` keeps the original `DD.MM.YYYY` text and its parsed date in sync.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Display and parse format for birthday values (`DD.MM.YYYY`).
pub const BIRTHDAY_FORMAT: &str = "%d.%m.%Y";

/// Required digit count of a canonical phone number.
pub const PHONE_DIGITS: usize = 10;

static NON_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9]").expect("non-digit pattern must compile"));

// Why: chrono's `%d.%m.%Y` also accepts un-padded day/month, so the shape is
// pinned with a pattern check before the calendar validation.
static BIRTHDAY_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("birthday pattern must compile"));

pub type FieldResult<T> = Result<T, FieldError>;

/// Validation failure raised by field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    EmptyName,
    PhoneDigitCount { found: usize },
    InvalidBirthday { input: String },
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::PhoneDigitCount { found } => write!(
                f,
                "phone number must consist of exactly {PHONE_DIGITS} digits, got {found}"
            ),
            Self::InvalidBirthday { input } => {
                write!(f, "invalid birthday `{input}`; expected DD.MM.YYYY")
            }
        }
    }
}

impl Error for FieldError {}

/// Strips every non-digit character from raw phone input.
///
/// Shared by the `Phone` constructor and by lookups that must match user
/// input against stored canonical values.
pub fn canonical_digits(value: &str) -> String {
    NON_DIGITS.replace_all(value, "").into_owned()
}

/// Contact name, trimmed and guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    pub fn new(value: &str) -> FieldResult<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(FieldError::EmptyName);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Name {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Name> for String {
    fn from(value: Name) -> Self {
        value.0
    }
}

/// Phone number in canonical 10-digit form.
///
/// Input may carry separators (`123-456-7890`, `(123) 456 7890`); everything
/// except ASCII digits is stripped before the length check, so equality and
/// lookup always compare canonical digit strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    pub fn new(value: &str) -> FieldResult<Self> {
        let digits = canonical_digits(value);
        if digits.len() != PHONE_DIGITS {
            return Err(FieldError::PhoneDigitCount {
                found: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Phone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Phone {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Phone> for String {
    fn from(value: Phone) -> Self {
        value.0
    }
}

/// Birthday stored as both the original `DD.MM.YYYY` text and a parsed date.
///
/// The text form is what users typed and what gets rendered back; the parsed
/// date drives the upcoming-birthday arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday {
    value: String,
    date: NaiveDate,
}

impl Birthday {
    pub fn new(value: &str) -> FieldResult<Self> {
        if !BIRTHDAY_SHAPE.is_match(value) {
            return Err(FieldError::InvalidBirthday {
                input: value.to_string(),
            });
        }
        let date = NaiveDate::parse_from_str(value, BIRTHDAY_FORMAT).map_err(|_| {
            FieldError::InvalidBirthday {
                input: value.to_string(),
            }
        })?;
        Ok(Self {
            value: value.to_string(),
            date,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Display for Birthday {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl TryFrom<String> for Birthday {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Birthday> for String {
    fn from(value: Birthday) -> Self {
        value.value
    }
}
