use anyhow::{Context, Result};
use rusqlite::{ffi, params, Connection, OptionalExtension, Row};

use super::Database;
use crate::models::Book;

const BOOK_SELECT_SQL: &str =
    "SELECT Isbn, Title, Author, ShortDescription, PageCount, ReleaseDate FROM Books";

/// Data access for the book catalog.
///
/// Mutations report a missing or conflicting `isbn` as `Ok(false)`; `Err` is
/// reserved for store faults.
pub trait BookStore: Send + Sync {
    /// Inserts `book` unless a record with the same ISBN exists.
    fn create(&self, book: &Book) -> Result<bool>;
    fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>>;
    fn get_all(&self) -> Result<Vec<Book>>;
    /// Books whose title contains `term` (ASCII case-insensitive).
    fn search_by_title(&self, term: &str) -> Result<Vec<Book>>;
    /// Overwrites every non-key field of the record stored under `book.isbn`.
    fn update(&self, book: &Book) -> Result<bool>;
    fn delete(&self, isbn: &str) -> Result<bool>;
}

/// [`BookStore`] over the `Books` table. Each call opens its own connection.
#[derive(Debug, Clone)]
pub struct SqliteBookStore {
    db: Database,
}

impl SqliteBookStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

impl BookStore for SqliteBookStore {
    fn create(&self, book: &Book) -> Result<bool> {
        let conn = self.db.connect()?;

        if exists(&conn, &book.isbn)? {
            tracing::debug!(isbn = %book.isbn, "create rejected: duplicate isbn");
            return Ok(false);
        }

        let inserted = conn.execute(
            "INSERT INTO Books (Isbn, Title, Author, ShortDescription, PageCount, ReleaseDate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                book.isbn,
                book.title,
                book.author,
                book.short_description,
                book.page_count,
                book.release_date,
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::debug!(isbn = %book.isbn, "book created");
                Ok(true)
            }
            // Another writer took the key between the check and the insert.
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                tracing::debug!(isbn = %book.isbn, "create rejected: primary key conflict");
                Ok(false)
            }
            Err(err) => Err(err).context("failed to insert book"),
        }
    }

    fn get_by_isbn(&self, isbn: &str) -> Result<Option<Book>> {
        let conn = self.db.connect()?;
        conn.query_row(
            &format!("{BOOK_SELECT_SQL} WHERE Isbn = ?1"),
            [isbn],
            parse_book_row,
        )
        .optional()
        .context("failed to look up book")
    }

    fn get_all(&self) -> Result<Vec<Book>> {
        let conn = self.db.connect()?;
        let mut stmt = conn.prepare(BOOK_SELECT_SQL)?;
        let books = stmt
            .query_map([], parse_book_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to list books")?;
        Ok(books)
    }

    fn search_by_title(&self, term: &str) -> Result<Vec<Book>> {
        let conn = self.db.connect()?;
        let pattern = format!("%{}%", escape_like(term));
        let mut stmt = conn.prepare(&format!(
            "{BOOK_SELECT_SQL} WHERE Title LIKE ?1 ESCAPE '\\'"
        ))?;
        let books = stmt
            .query_map([pattern], parse_book_row)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("failed to search books")?;
        Ok(books)
    }

    fn update(&self, book: &Book) -> Result<bool> {
        let conn = self.db.connect()?;
        let changed = conn
            .execute(
                "UPDATE Books
                 SET Title = ?1,
                     Author = ?2,
                     ShortDescription = ?3,
                     PageCount = ?4,
                     ReleaseDate = ?5
                 WHERE Isbn = ?6",
                params![
                    book.title,
                    book.author,
                    book.short_description,
                    book.page_count,
                    book.release_date,
                    book.isbn,
                ],
            )
            .context("failed to update book")?;

        tracing::debug!(isbn = %book.isbn, found = changed > 0, "book update");
        Ok(changed > 0)
    }

    fn delete(&self, isbn: &str) -> Result<bool> {
        let conn = self.db.connect()?;
        let changed = conn
            .execute("DELETE FROM Books WHERE Isbn = ?1", [isbn])
            .context("failed to delete book")?;

        tracing::debug!(isbn, found = changed > 0, "book delete");
        Ok(changed > 0)
    }
}

fn exists(conn: &Connection, isbn: &str) -> Result<bool> {
    let found = conn
        .query_row("SELECT 1 FROM Books WHERE Isbn = ?1", [isbn], |_| Ok(()))
        .optional()
        .context("failed to check for existing book")?;
    Ok(found.is_some())
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        isbn: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        short_description: row.get(3)?,
        page_count: row.get(4)?,
        release_date: row.get(5)?,
    })
}

/// Escapes `LIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn escapes_like_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("plain"), "plain");
    }
}
