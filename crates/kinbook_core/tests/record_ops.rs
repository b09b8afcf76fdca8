use kinbook_core::{FieldError, Name, Record, RecordError};

#[test]
fn new_record_has_no_phones_and_no_birthday() {
    let record = record_for("Alice");
    assert!(record.phones().is_empty());
    assert!(record.birthday().is_none());
}

#[test]
fn add_phone_preserves_insertion_order() {
    let mut record = record_for("Alice");
    record.add_phone("1111111111").unwrap();
    record.add_phone("2222222222").unwrap();
    record.add_phone("3333333333").unwrap();

    let digits: Vec<_> = record.phones().iter().map(|p| p.as_str()).collect();
    assert_eq!(digits, ["1111111111", "2222222222", "3333333333"]);
}

#[test]
fn add_phone_allows_duplicates() {
    let mut record = record_for("Alice");
    record.add_phone("1234567890").unwrap();
    record.add_phone("123-456-7890").unwrap();
    assert_eq!(record.phones().len(), 2);
}

#[test]
fn add_phone_rejects_invalid_input_without_changing_state() {
    let mut record = record_for("Alice");
    record.add_phone("1234567890").unwrap();

    let err = record.add_phone("555").unwrap_err();
    assert_eq!(err, FieldError::PhoneDigitCount { found: 3 });
    assert_eq!(record.phones().len(), 1);
}

#[test]
fn find_phone_matches_normalized_input() {
    let mut record = record_for("Alice");
    record.add_phone("123-456-7890").unwrap();

    assert!(record.find_phone("1234567890").is_some());
    assert!(record.find_phone("(123) 456-7890").is_some());
    assert!(record.find_phone("0000000000").is_none());
}

#[test]
fn remove_phone_removes_first_match_only() {
    let mut record = record_for("Alice");
    record.add_phone("1234567890").unwrap();
    record.add_phone("1234567890").unwrap();

    assert!(record.remove_phone("123-456-7890"));
    assert_eq!(record.phones().len(), 1);

    assert!(record.remove_phone("1234567890"));
    assert!(!record.remove_phone("1234567890"));
    assert!(record.phones().is_empty());
}

#[test]
fn edit_phone_replaces_in_place() {
    let mut record = record_for("Alice");
    record.add_phone("1111111111").unwrap();
    record.add_phone("2222222222").unwrap();

    record.edit_phone("1111111111", "999-888-7777").unwrap();

    let digits: Vec<_> = record.phones().iter().map(|p| p.as_str()).collect();
    assert_eq!(digits, ["9998887777", "2222222222"]);
}

#[test]
fn edit_phone_with_invalid_replacement_changes_nothing() {
    let mut record = record_for("Alice");
    record.add_phone("1111111111").unwrap();

    let err = record.edit_phone("1111111111", "12").unwrap_err();
    assert!(matches!(
        err,
        RecordError::Field(FieldError::PhoneDigitCount { found: 2 })
    ));
    assert_eq!(record.phones()[0].as_str(), "1111111111");
}

#[test]
fn edit_phone_missing_old_number_is_an_error() {
    let mut record = record_for("Alice");
    record.add_phone("1111111111").unwrap();

    let err = record.edit_phone("2222222222", "3333333333").unwrap_err();
    assert!(matches!(err, RecordError::PhoneNotFound(ref digits) if digits == "2222222222"));
    assert_eq!(err.to_string(), "phone number 2222222222 not found");
}

#[test]
fn set_birthday_replaces_previous_value() {
    let mut record = record_for("Alice");
    record.set_birthday("01.01.1990").unwrap();
    record.set_birthday("02.02.1991").unwrap();
    assert_eq!(record.birthday().unwrap().as_str(), "02.02.1991");
}

#[test]
fn set_birthday_keeps_old_value_on_invalid_input() {
    let mut record = record_for("Alice");
    record.set_birthday("01.01.1990").unwrap();

    assert!(record.set_birthday("bogus").is_err());
    assert_eq!(record.birthday().unwrap().as_str(), "01.01.1990");
}

#[test]
fn display_renders_phones_and_optional_birthday() {
    let mut record = record_for("Alice");
    assert_eq!(record.to_string(), "Alice, phones: No phones");

    record.add_phone("1234567890").unwrap();
    record.add_phone("0987654321").unwrap();
    assert_eq!(record.to_string(), "Alice, phones: 1234567890; 0987654321");

    record.set_birthday("12.06.1990").unwrap();
    assert_eq!(
        record.to_string(),
        "Alice, phones: 1234567890; 0987654321, birthday: 12.06.1990"
    );
}

fn record_for(name: &str) -> Record {
    Record::new(Name::new(name).unwrap())
}
