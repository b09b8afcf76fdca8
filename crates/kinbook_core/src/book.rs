//! Address book: the keyed collection of contact records.
//!
//! # Responsibility
//! - Map contact names to records while keeping key and embedded name in sync.
//! - Answer the upcoming-birthday query over all records.
//!
//! # Invariants
//! - Every entry's key equals its record's name string.
//! - Iteration order is name order, so reports are deterministic.
//! - `upcoming_birthdays` never fails as a whole; unprojectable records are
//!   skipped individually.

use crate::model::field::{Birthday, BIRTHDAY_FORMAT};
use crate::model::record::Record;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Inclusive width of the upcoming-birthday window, in days from today.
const BIRTHDAY_WINDOW_DAYS: i64 = 7;

/// One entry of the upcoming-birthday report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingBirthday {
    pub name: String,
    pub congratulation_date: NaiveDate,
}

impl UpcomingBirthday {
    /// Congratulation date rendered in the `DD.MM.YYYY` display format.
    pub fn congratulation_date_string(&self) -> String {
        self.congratulation_date.format(BIRTHDAY_FORMAT).to_string()
    }
}

/// Keyed collection of all contact records.
///
/// The underlying map is never exposed; all mutation goes through methods
/// that keep the key equal to the record's own name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressBook {
    records: BTreeMap<String, Record>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `record` keyed by its name string.
    ///
    /// An existing entry under the same name is overwritten (last write
    /// wins); callers that need add-vs-update semantics check `find` first.
    pub fn add_record(&mut self, record: Record) {
        self.records
            .insert(record.name().as_str().to_string(), record);
    }

    /// Exact-name lookup; absence is `None`, never an error.
    pub fn find(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    /// Mutable variant of [`AddressBook::find`].
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    /// Removes the entry for `name`, returning whether it existed.
    pub fn delete(&mut self, name: &str) -> bool {
        self.records.remove(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    /// Contacts whose birthday falls within the next seven days of `today`
    /// (an inclusive window: today through seven days out).
    ///
    /// Each stored birthday is projected onto the current year, or onto the
    /// next year when the date has already passed. Projections landing on a
    /// weekend shift the congratulation date to the following Monday.
    /// Records whose birthday cannot be projected (Feb 29 outside a leap
    /// year) are skipped without affecting the rest of the report.
    pub fn upcoming_birthdays(&self, today: NaiveDate) -> Vec<UpcomingBirthday> {
        let mut upcoming = Vec::new();

        for record in self.records.values() {
            let Some(birthday) = record.birthday() else {
                continue;
            };
            let Some(next) = next_occurrence(birthday, today) else {
                debug!(
                    "event=birthday_skip module=book name={} birthday={} reason=unprojectable",
                    record.name(),
                    birthday
                );
                continue;
            };

            let days_until = (next - today).num_days();
            if !(0..=BIRTHDAY_WINDOW_DAYS).contains(&days_until) {
                continue;
            }

            upcoming.push(UpcomingBirthday {
                name: record.name().as_str().to_string(),
                congratulation_date: congratulation_date(next),
            });
        }

        upcoming
    }
}

impl Display for AddressBook {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.records.is_empty() {
            return write!(f, "Address book is empty");
        }
        let rendered = self
            .records
            .values()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        write!(f, "{rendered}")
    }
}

/// Projects `birthday` onto its next occurrence at or after `today`.
///
/// Returns `None` when the month/day pair does not exist in the target year,
/// which only happens for Feb 29 outside leap years.
fn next_occurrence(birthday: &Birthday, today: NaiveDate) -> Option<NaiveDate> {
    let date = birthday.date();
    let this_year = NaiveDate::from_ymd_opt(today.year(), date.month(), date.day())?;
    if this_year < today {
        return NaiveDate::from_ymd_opt(today.year() + 1, date.month(), date.day());
    }
    Some(this_year)
}

/// Shifts weekend dates forward to the following Monday.
fn congratulation_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Days::new(2),
        Weekday::Sun => date + Days::new(1),
        _ => date,
    }
}
