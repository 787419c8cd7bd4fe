//! # SQLite Specific SQL
//!
//! Centralizes the SQL statements for the SQLite corpus index, keeping the
//! provider logic free of database-specific syntax.

/// Creates the `articles` table holding the corpus.
pub const CREATE_ARTICLES_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS articles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        article_number TEXT NOT NULL,
        content TEXT NOT NULL,
        part TEXT NOT NULL,
        chapter TEXT,
        section TEXT,
        created_at TEXT NOT NULL
    );
";

/// Enforces the corpus invariant that an `(article_number, content)` pair is
/// stored at most once.
pub const CREATE_ARTICLES_UNIQUE_INDEX: &str = "
    CREATE UNIQUE INDEX IF NOT EXISTS idx_articles_number_content
    ON articles (article_number, content);
";

/// All statements required to bring a database up to the current schema.
/// Idempotent and safe to run on every startup.
pub const ALL_TABLE_CREATION_SQL: &[&str] = &[CREATE_ARTICLES_TABLE, CREATE_ARTICLES_UNIQUE_INDEX];

/// The column list shared by every article-returning query.
pub const ARTICLE_COLUMNS: &str = "id, article_number, content, part, chapter, section";
