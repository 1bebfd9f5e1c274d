use rusqlite::types::Type;
use rusqlite::Row;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Backing table for [`Todo`]. `AUTOINCREMENT` keeps ids from being handed out
/// again after the highest row is deleted.
pub const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS todos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        title TEXT NOT NULL,
        content TEXT,
        completed INTEGER NOT NULL DEFAULT 0,
        created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
        updated_at INTEGER
    );
";

/// Column list matching the field order read by [`Todo::from_row`].
pub const TODO_COLUMNS: &str = "id, title, content, completed, created_at, updated_at";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    /// Markdown body.
    pub content: Option<String>,
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl Todo {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            completed: row.get::<_, i32>(3)? != 0,
            created_at: timestamp(4, row.get(4)?)?,
            updated_at: row
                .get::<_, Option<i64>>(5)?
                .map(|secs| timestamp(5, secs))
                .transpose()?,
        })
    }
}

fn timestamp(column: usize, secs: i64) -> rusqlite::Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp(secs).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(column, Type::Integer, Box::new(err))
    })
}
