//! Field-level validation of incoming records.
//!
//! Validators are pure: they never touch storage, and an empty result means
//! the record may be handed to the store.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::Book;

/// Digit groups separated by single hyphens.
static ISBN_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(?:-[0-9]+)*$").expect("valid isbn regex"));

pub const INVALID_ISBN: &str = "Invalid ISBN format";

/// A single rejected field, serialized as `{propertyName, errorMessage}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    pub property_name: String,
    pub error_message: String,
}

impl ValidationFailure {
    pub fn new(property_name: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            property_name: property_name.into(),
            error_message: error_message.into(),
        }
    }
}

pub trait Validator<T>: Send + Sync {
    /// Returns every rule `value` breaks, in field order.
    fn validate(&self, value: &T) -> Vec<ValidationFailure>;
}

/// Rules applied to a [`Book`] before create and update.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookValidator;

impl Validator<Book> for BookValidator {
    fn validate(&self, book: &Book) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();

        if !is_valid_isbn(&book.isbn) {
            failures.push(ValidationFailure::new("Isbn", INVALID_ISBN));
        }
        if book.title.trim().is_empty() {
            failures.push(not_empty("Title", "Title"));
        }
        if book.author.trim().is_empty() {
            failures.push(not_empty("Author", "Author"));
        }
        if book.page_count <= 0 {
            failures.push(ValidationFailure::new(
                "PageCount",
                "'Page Count' must be greater than '0'.",
            ));
        }

        failures
    }
}

fn not_empty(property: &str, label: &str) -> ValidationFailure {
    ValidationFailure::new(property, format!("'{label}' must not be empty."))
}

/// Accepts ISBN-10 and ISBN-13 shapes: hyphen-grouped digits, 10 or 13 digits total.
pub fn is_valid_isbn(isbn: &str) -> bool {
    if !ISBN_SHAPE_RE.is_match(isbn) {
        return false;
    }
    let digits = isbn.bytes().filter(u8::is_ascii_digit).count();
    digits == 10 || digits == 13
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_book() -> Book {
        Book {
            isbn: "123-1234567890".into(),
            title: "Test Book".into(),
            author: "Jane Doe".into(),
            short_description: "A book used in tests".into(),
            page_count: 100,
            release_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
        }
    }

    #[test]
    fn accepts_a_valid_book() {
        assert!(BookValidator.validate(&valid_book()).is_empty());
    }

    #[test]
    fn accepts_isbn_10_and_13_shapes() {
        for isbn in [
            "0306406152",
            "0-306-40615-2",
            "9780306406157",
            "978-0-306-40615-7",
            "123-1234567890",
        ] {
            assert!(is_valid_isbn(isbn), "expected {isbn} to be accepted");
        }
    }

    #[test]
    fn rejects_malformed_isbns() {
        for isbn in [
            "",
            "Invalid ISBN",
            "12345",
            "123456789012",
            "12345678901234",
            "-0306406152",
            "0306406152-",
            "0306--406152",
            "030640615X",
            "0306 406152",
        ] {
            assert!(!is_valid_isbn(isbn), "expected {isbn:?} to be rejected");
        }
    }

    #[test]
    fn reports_invalid_isbn() {
        let book = Book {
            isbn: "Invalid ISBN".into(),
            ..valid_book()
        };

        assert_eq!(
            BookValidator.validate(&book),
            vec![ValidationFailure::new("Isbn", "Invalid ISBN format")]
        );
    }

    #[test]
    fn rejects_whitespace_only_title_and_author() {
        let book = Book {
            title: "   ".into(),
            author: "\t".into(),
            ..valid_book()
        };

        let failures = BookValidator.validate(&book);
        let fields: Vec<_> = failures.iter().map(|f| f.property_name.as_str()).collect();
        assert_eq!(fields, ["Title", "Author"]);
        assert_eq!(failures[0].error_message, "'Title' must not be empty.");
    }

    #[test]
    fn rejects_non_positive_page_count() {
        for page_count in [0, -1] {
            let book = Book {
                page_count,
                ..valid_book()
            };
            let failures = BookValidator.validate(&book);
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].property_name, "PageCount");
        }
    }

    #[test]
    fn reports_every_failure_in_field_order() {
        let failures = BookValidator.validate(&Book::default());
        let fields: Vec<_> = failures.iter().map(|f| f.property_name.as_str()).collect();
        assert_eq!(fields, ["Isbn", "Title", "Author", "PageCount"]);
    }
}
