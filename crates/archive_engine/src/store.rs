use std::path::{Path, PathBuf};

use archive_core::{Entry, VersionRecord};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

pub const DATA_TABLE: &str = "data";
pub const VERSIONS_TABLE: &str = "data_versions";

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS data (
        url TEXT PRIMARY KEY,
        date TEXT NOT NULL,
        title TEXT NOT NULL,
        explanation TEXT NOT NULL,
        picture_url TEXT NOT NULL,
        video_url TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS data_versions (
        url TEXT PRIMARY KEY,
        data_version TEXT NOT NULL
    );
";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("cannot open store at {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("store access failed: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("unknown table {0:?}")]
    UnknownTable(String),
}

/// Url-keyed storage for entries and the version they were captured with.
pub trait EntryStore: Send {
    /// Whether `name` exists in the store's schema. Access failures are
    /// errors, never "absent".
    fn has_table(&self, name: &str) -> Result<bool, StoreError>;

    /// Stored extraction version for `url`, if any.
    fn data_version(&self, url: &str) -> Result<Option<String>, StoreError>;

    /// Create or overwrite the entry and its version record as one unit.
    fn upsert(&mut self, entry: &Entry, record: &VersionRecord) -> Result<(), StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
    schema_ready: bool,
}

impl SqliteStore {
    /// Open (or create) a database file. Tables are only created by the
    /// first write, so a fresh file reports no tables.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::with_connection(conn))
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(|source| StoreError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Ok(Self::with_connection(conn))
    }

    fn with_connection(conn: Connection) -> Self {
        Self {
            conn,
            schema_ready: false,
        }
    }

    pub fn entry(&self, url: &str) -> Result<Option<Entry>, StoreError> {
        if !self.has_table(DATA_TABLE)? {
            return Ok(None);
        }
        let entry = self
            .conn
            .query_row(
                "SELECT url, date, title, explanation, picture_url, video_url
                 FROM data WHERE url = ?1",
                params![url],
                |row| {
                    Ok(Entry {
                        url: row.get(0)?,
                        date: row.get(1)?,
                        title: row.get(2)?,
                        explanation: row.get(3)?,
                        picture_url: row.get(4)?,
                        video_url: row.get(5)?,
                    })
                },
            )
            .optional()?;
        Ok(entry)
    }

    /// Number of rows in one of the two tables; zero if it does not exist yet.
    pub fn row_count(&self, table: &str) -> Result<u64, StoreError> {
        if table != DATA_TABLE && table != VERSIONS_TABLE {
            return Err(StoreError::UnknownTable(table.to_string()));
        }
        if !self.has_table(table)? {
            return Ok(0);
        }
        let count: i64 = self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }
}

impl EntryStore for SqliteStore {
    fn has_table(&self, name: &str) -> Result<bool, StoreError> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)",
            params![name],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn data_version(&self, url: &str) -> Result<Option<String>, StoreError> {
        if !self.schema_ready && !self.has_table(VERSIONS_TABLE)? {
            return Ok(None);
        }
        let version = self
            .conn
            .query_row(
                "SELECT data_version FROM data_versions WHERE url = ?1 LIMIT 1",
                params![url],
                |row| row.get(0),
            )
            .optional()?;
        Ok(version)
    }

    fn upsert(&mut self, entry: &Entry, record: &VersionRecord) -> Result<(), StoreError> {
        debug_assert_eq!(entry.url, record.url);

        let tx = self.conn.transaction()?;
        if !self.schema_ready {
            tx.execute_batch(SCHEMA)?;
        }
        tx.execute(
            "INSERT INTO data (url, date, title, explanation, picture_url, video_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(url) DO UPDATE SET
                 date = excluded.date,
                 title = excluded.title,
                 explanation = excluded.explanation,
                 picture_url = excluded.picture_url,
                 video_url = excluded.video_url",
            params![
                entry.url,
                entry.date,
                entry.title,
                entry.explanation,
                entry.picture_url,
                entry.video_url
            ],
        )?;
        tx.execute(
            "INSERT INTO data_versions (url, data_version) VALUES (?1, ?2)
             ON CONFLICT(url) DO UPDATE SET data_version = excluded.data_version",
            params![record.url, record.data_version],
        )?;
        tx.commit()?;

        self.schema_ready = true;
        Ok(())
    }
}
