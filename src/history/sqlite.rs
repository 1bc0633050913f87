use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::path::PathBuf;
use uuid::Uuid;

use super::{RecordStore, TranslationRecord};

/// SQLite-backed history store.
pub struct SqliteHistory {
    db_path: PathBuf,
}

impl SqliteHistory {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create history directory: {}", parent.display())
            })?;
        }

        let store = Self { db_path };
        store.init_db()?;

        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = self.connect()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS translations (
                id TEXT PRIMARY KEY,
                client_ip TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                source_language TEXT NOT NULL,
                target_language TEXT NOT NULL,
                text TEXT NOT NULL,
                translated_text TEXT NOT NULL
            )",
            [],
        )
        .context("Failed to create translations table")?;

        Ok(())
    }

    fn connect(&self) -> Result<Connection> {
        Connection::open(&self.db_path).with_context(|| {
            format!("Failed to open history database: {}", self.db_path.display())
        })
    }

    /// Most recently recorded translations, newest first.
    pub fn recent(&self, limit: usize) -> Result<Vec<TranslationRecord>> {
        let conn = self.connect()?;

        let mut stmt = conn.prepare(
            "SELECT id, client_ip, timestamp, source_language, target_language,
                    text, translated_text
             FROM translations
             ORDER BY timestamp DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (id, client_ip, timestamp, source_language, target_language, text, translated_text) =
                row?;

            records.push(TranslationRecord {
                id: Uuid::parse_str(&id).with_context(|| format!("Malformed record id: {id}"))?,
                client_ip,
                timestamp: DateTime::parse_from_rfc3339(&timestamp)
                    .with_context(|| format!("Malformed record timestamp: {timestamp}"))?
                    .with_timezone(&Utc),
                source_language,
                target_language,
                text,
                translated_text,
            });
        }

        Ok(records)
    }
}

impl RecordStore for SqliteHistory {
    fn insert(&self, record: &TranslationRecord) -> Result<usize> {
        let conn = self.connect()?;

        // OR IGNORE turns an id collision into the zero-row result the
        // writer's retry loop expects; every other failure still errors out
        // of execute(). The id column is the only constraint that can
        // conflict here.
        let rows = conn
            .execute(
                "INSERT OR IGNORE INTO translations
                 (id, client_ip, timestamp, source_language, target_language,
                  text, translated_text)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id.to_string(),
                    record.client_ip,
                    record.timestamp.to_rfc3339(),
                    record.source_language,
                    record.target_language,
                    record.text,
                    record.translated_text,
                ],
            )
            .context("Failed to insert history record")?;

        Ok(rows)
    }
}
