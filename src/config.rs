//! Runtime settings, taken from command-line flags or environment variables.

use anyhow::Result;
use clap::Args;
use directories::ProjectDirs;

use crate::db::Database;

#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Connection string for the book store (`Data Source=books.db` or a bare path)
    #[arg(long, env = "BOOKSHELF_DATABASE", global = true)]
    pub database: Option<String>,

    /// Address to bind the HTTP listener to
    #[arg(long, env = "BOOKSHELF_HOST", default_value = "127.0.0.1", global = true)]
    pub host: String,

    /// Port for the HTTP API
    #[arg(short, long, env = "BOOKSHELF_PORT", default_value_t = 5000, global = true)]
    pub port: u16,
}

impl Settings {
    pub fn connection_string(&self) -> String {
        self.database
            .clone()
            .unwrap_or_else(default_connection_string)
    }

    pub fn open_database(&self) -> Result<Database> {
        Database::open(&self.connection_string())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// `books.db` in the platform data directory, or the working directory when
/// no home directory can be resolved.
pub fn default_connection_string() -> String {
    ProjectDirs::from("", "", "bookshelf")
        .map(|dirs| dirs.data_dir().join("books.db").display().to_string())
        .unwrap_or_else(|| "books.db".to_string())
}
