use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A catalog entry, keyed by its ISBN.
///
/// Fields missing from an incoming JSON payload fall back to their defaults so
/// that the validator, not the deserializer, reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub short_description: String,
    pub page_count: i32,
    pub release_date: NaiveDate,
}

impl Default for Book {
    fn default() -> Self {
        Self {
            isbn: String::new(),
            title: String::new(),
            author: String::new(),
            short_description: String::new(),
            page_count: 0,
            release_date: NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_with_camel_case_keys() {
        let book = Book {
            isbn: "978-0132350884".into(),
            title: "Clean Code".into(),
            author: "Robert C. Martin".into(),
            short_description: "A handbook of agile software craftsmanship".into(),
            page_count: 464,
            release_date: NaiveDate::from_ymd_opt(2008, 8, 1).unwrap(),
        };

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(
            value,
            json!({
                "isbn": "978-0132350884",
                "title": "Clean Code",
                "author": "Robert C. Martin",
                "shortDescription": "A handbook of agile software craftsmanship",
                "pageCount": 464,
                "releaseDate": "2008-08-01"
            })
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let book: Book = serde_json::from_value(json!({ "isbn": "1234567890" })).unwrap();
        assert_eq!(book.isbn, "1234567890");
        assert!(book.title.is_empty());
        assert_eq!(book.page_count, 0);
        assert_eq!(book.release_date, NaiveDate::from_ymd_opt(1, 1, 1).unwrap());
    }
}
