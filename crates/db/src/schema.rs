//! Idempotent schema bootstrap.
//!
//! Every statement is `CREATE ... IF NOT EXISTS`, so running this against an
//! existing database is a no-op. There is no versioned migration history.

use crate::DbPool;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS team_members (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        title TEXT NOT NULL,
        degree TEXT,
        research TEXT NOT NULL,
        email TEXT NOT NULL,
        category TEXT NOT NULL
            CHECK (category IN ('professor', 'associate', 'postdoc', 'student')),
        google_scholar TEXT,
        research_gate TEXT,
        orcid TEXT,
        bio TEXT,
        photo_url TEXT,
        is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1)),
        join_date TEXT NOT NULL,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_team_members_category ON team_members(category)",
    "CREATE TABLE IF NOT EXISTS publications (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        authors TEXT NOT NULL,
        journal TEXT NOT NULL,
        year INTEGER NOT NULL,
        volume TEXT,
        issue TEXT,
        pages TEXT,
        doi TEXT,
        abstract TEXT,
        pdf_url TEXT,
        citation_count INTEGER NOT NULL DEFAULT 0,
        is_highlighted INTEGER NOT NULL DEFAULT 1 CHECK (is_highlighted IN (0, 1)),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_publications_year ON publications(year)",
    "CREATE TABLE IF NOT EXISTS publication_keywords (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        publication_id INTEGER NOT NULL REFERENCES publications(id) ON DELETE CASCADE,
        keyword TEXT NOT NULL,
        position INTEGER NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_publication_keywords_publication
        ON publication_keywords(publication_id)",
    "CREATE TABLE IF NOT EXISTS patents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        inventors TEXT NOT NULL,
        inventor_ids TEXT,
        patent_number TEXT NOT NULL,
        application_date TEXT NOT NULL,
        grant_date TEXT,
        abstract TEXT,
        keywords TEXT NOT NULL DEFAULT '[]',
        status TEXT NOT NULL CHECK (status IN ('pending', 'granted', 'expired')),
        patent_type TEXT NOT NULL CHECK (patent_type IN ('invention', 'utility', 'design')),
        pdf_url TEXT,
        is_highlighted INTEGER NOT NULL DEFAULT 1 CHECK (is_highlighted IN (0, 1)),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_patents_application_date ON patents(application_date)",
    "CREATE INDEX IF NOT EXISTS idx_patents_status ON patents(status)",
    "CREATE INDEX IF NOT EXISTS idx_patents_type ON patents(patent_type)",
    "CREATE TABLE IF NOT EXISTS projects (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT,
        funding_source TEXT NOT NULL DEFAULT '',
        funding_amount REAL,
        start_date TEXT NOT NULL,
        end_date TEXT,
        leader TEXT NOT NULL DEFAULT '',
        is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1)),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_projects_leader ON projects(leader)",
    "CREATE TABLE IF NOT EXISTS news (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        publish_date TEXT NOT NULL,
        author TEXT NOT NULL DEFAULT '',
        image_url TEXT,
        is_published INTEGER NOT NULL DEFAULT 1 CHECK (is_published IN (0, 1)),
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_news_publish_date ON news(publish_date)",
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        role TEXT NOT NULL DEFAULT 'editor' CHECK (role IN ('admin', 'editor')),
        is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1)),
        last_login TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        text TEXT NOT NULL,
        deadline TEXT,
        completed INTEGER NOT NULL DEFAULT 0 CHECK (completed IN (0, 1)),
        priority TEXT NOT NULL DEFAULT 'medium' CHECK (priority IN ('high', 'medium', 'low')),
        created_by INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        completed_at TEXT,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS research_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        kind TEXT NOT NULL CHECK (kind IN ('area', 'direction', 'feature')),
        title TEXT NOT NULL,
        description TEXT,
        link TEXT,
        sort_order INTEGER NOT NULL CHECK (sort_order >= 1),
        is_active INTEGER NOT NULL DEFAULT 1 CHECK (is_active IN (0, 1)),
        created_at TEXT,
        updated_at TEXT
    )",
    "CREATE INDEX IF NOT EXISTS idx_research_items_kind_order
        ON research_items(kind, sort_order)",
];

/// Create every table and index the repositories rely on.
pub async fn initialize_schema(pool: &DbPool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    tracing::debug!(statements = STATEMENTS.len(), "Schema initialised");
    Ok(())
}
