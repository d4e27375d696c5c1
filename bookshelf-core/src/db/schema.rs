pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS Books (
    Isbn TEXT PRIMARY KEY,
    Title TEXT NOT NULL,
    Author TEXT NOT NULL,
    ShortDescription TEXT NOT NULL,
    PageCount INTEGER NOT NULL,
    ReleaseDate TEXT NOT NULL
);
"#;
