//! SQLite storage for the book catalog.
//!
//! [`Database`] is the connection provider: it only remembers where the store
//! lives and hands out a fresh connection per operation. Connections are
//! closed when dropped, so every store call releases its connection on both
//! the success and error paths.

mod books;
mod connection;
mod schema;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use rusqlite::Connection;

pub use books::{BookStore, SqliteBookStore};
pub use connection::{parse_data_source, ConnectionStringError};
pub use schema::SCHEMA;

/// Blocking; async callers run store operations off the runtime threads.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct Database {
    path: Arc<PathBuf>,
}

impl Database {
    /// Resolves a connection string (`Data Source=books.db` or a bare path).
    ///
    /// Creates the parent directory of the database file if it is missing.
    pub fn open(connection_string: &str) -> Result<Self> {
        let path = parse_data_source(connection_string)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        Ok(Self::from_path(path))
    }

    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a short-lived connection. Callers drop it when their operation ends.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(self.path.as_path())
            .with_context(|| format!("failed to open database {}", self.path.display()))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// Creates the `Books` table if it does not exist yet.
    pub fn migrate(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute_batch(SCHEMA)
            .context("failed to initialize database schema")?;
        tracing::info!("Database schema ready at {}", self.path.display());
        Ok(())
    }
}
