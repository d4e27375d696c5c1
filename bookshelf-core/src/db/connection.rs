use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConnectionStringError {
    #[error("connection string is empty")]
    Empty,
    #[error("connection string has no data source (expected `Data Source=<path>`)")]
    MissingDataSource,
    #[error("in-memory databases are not supported; configure a file path")]
    InMemory,
    #[error("malformed connection string segment `{0}`")]
    Malformed(String),
}

/// Extracts the database file path from a connection string.
///
/// Accepts either a bare path or `;`-separated `key=value` pairs where the
/// path is given by `Data Source`, `DataSource` or `Filename` (any case).
/// Unknown keys are ignored.
pub fn parse_data_source(connection_string: &str) -> Result<PathBuf, ConnectionStringError> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
        return Err(ConnectionStringError::Empty);
    }

    let source = if trimmed.contains('=') {
        let mut source = None;
        for segment in trimmed.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment
                .split_once('=')
                .ok_or_else(|| ConnectionStringError::Malformed(segment.to_string()))?;
            if is_data_source_key(key) {
                source = Some(value.trim());
            }
        }
        source.ok_or(ConnectionStringError::MissingDataSource)?
    } else {
        trimmed
    };

    if source.is_empty() {
        return Err(ConnectionStringError::MissingDataSource);
    }
    if source.eq_ignore_ascii_case(":memory:") {
        return Err(ConnectionStringError::InMemory);
    }

    Ok(PathBuf::from(source))
}

fn is_data_source_key(key: &str) -> bool {
    let key = key.trim();
    ["data source", "datasource", "filename"]
        .iter()
        .any(|k| key.eq_ignore_ascii_case(k))
}
