use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mars_core::{Error, MarsRecord, RecordStorage, Result};
use sqlx::{sqlite::SqliteConnectOptions, sqlite::SqlitePool, Row};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::StorageBackend;

const DEFAULT_DB_PATH: &str = "mars.db";

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS mars (
        id INTEGER PRIMARY KEY CHECK (id = 1),
        data TEXT NOT NULL,
        last_modified TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

/// Stores the record as JSON in a one-row table.
pub struct SQLiteStorage {
    pool: SqlitePool,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be writable at ./mars.db"
    }

    async fn connect(url: Option<&str>) -> Result<Self> {
        let path = url
            .map(|url| url.trim_start_matches("sqlite://").trim_start_matches("sqlite:"))
            .unwrap_or(DEFAULT_DB_PATH);
        Self::new_with_path(Path::new(path)).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))
            .map_err(|e| Error::Database(format!("Invalid database path: {}", e)))?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }
        debug!("SQLite storage ready at {}", db_path.display());

        Ok(Self { pool })
    }
}

#[async_trait]
impl RecordStorage for SQLiteStorage {
    async fn find_singleton(&self) -> Result<Option<MarsRecord>> {
        let row = sqlx::query("SELECT data FROM mars WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to load record: {}", e)))?;

        match row {
            Some(row) => {
                let data: String = row.get("data");
                Ok(Some(serde_json::from_str(&data)?))
            }
            None => Ok(None),
        }
    }

    async fn upsert_singleton(&self, record: &MarsRecord) -> Result<()> {
        let data = serde_json::to_string(record)?;
        let last_modified: DateTime<Utc> = record.last_modified;

        sqlx::query(
            r#"
            INSERT INTO mars (id, data, last_modified)
            VALUES (1, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                data = excluded.data,
                last_modified = excluded.last_modified
            "#,
        )
        .bind(data)
        .bind(last_modified.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to store record: {}", e)))?;

        Ok(())
    }
}
