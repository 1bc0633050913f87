//! Durable history of completed translations.
//!
//! Records are written once, after a translation fully succeeds, and never
//! updated or deleted.

mod sqlite;

pub use sqlite::SqliteHistory;

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::translation::TranslationRequest;

/// One persisted translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub id: Uuid,
    pub client_ip: String,
    pub timestamp: DateTime<Utc>,
    pub source_language: String,
    pub target_language: String,
    pub text: String,
    pub translated_text: String,
}

/// Insert-only view of the history store.
pub trait RecordStore {
    /// Inserts one record and reports the number of rows affected.
    ///
    /// 1 means stored. 0 means, and only means, that `record.id` collided
    /// with an existing row; every other failure mode must be an `Err`.
    fn insert(&self, record: &TranslationRecord) -> Result<usize>;
}

impl<S: RecordStore> RecordStore for std::sync::Arc<S> {
    fn insert(&self, record: &TranslationRecord) -> Result<usize> {
        (**self).insert(record)
    }
}

/// Writes records, drawing fresh ids until one lands.
pub struct RecordWriter<S> {
    store: S,
    max_insert_attempts: Option<u32>,
}

impl<S: RecordStore> RecordWriter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_insert_attempts: None,
        }
    }

    /// Caps the insert loop at `cap` attempts.
    ///
    /// Off by default; the loop then runs until a row lands.
    pub fn with_max_insert_attempts(mut self, cap: Option<u32>) -> Self {
        self.max_insert_attempts = cap;
        self
    }

    /// Builds the record for a finished translation and inserts it.
    ///
    /// A zero-row insert is an id collision and nothing else, so the id is
    /// regenerated and the insert repeated. With 122 random bits per id a
    /// collision is negligible in practice, though not impossible, so the
    /// default loop is unbounded. Hard store failures surface immediately.
    pub fn write(
        &self,
        request: &TranslationRequest,
        translated_text: &str,
        client_ip: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<TranslationRecord> {
        let mut record = TranslationRecord {
            id: Uuid::new_v4(),
            client_ip: client_ip.to_string(),
            timestamp,
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            text: request.text.clone(),
            translated_text: translated_text.to_string(),
        };

        let mut attempts = 0u32;
        loop {
            if self.store.insert(&record)? > 0 {
                return Ok(record);
            }

            attempts += 1;
            if let Some(cap) = self.max_insert_attempts
                && attempts >= cap
            {
                bail!("Gave up recording translation after {attempts} id collisions");
            }

            tracing::warn!(attempt = attempts, id = %record.id, "history id collision, regenerating");
            record.id = Uuid::new_v4();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedStore {
        zero_rows_first: Mutex<u32>,
        inserted_ids: Mutex<Vec<Uuid>>,
    }

    impl ScriptedStore {
        fn new(zero_rows_first: u32) -> Self {
            Self {
                zero_rows_first: Mutex::new(zero_rows_first),
                inserted_ids: Mutex::new(Vec::new()),
            }
        }
    }

    impl RecordStore for ScriptedStore {
        fn insert(&self, record: &TranslationRecord) -> Result<usize> {
            self.inserted_ids.lock().unwrap().push(record.id);

            let mut remaining = self.zero_rows_first.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                Ok(0)
            } else {
                Ok(1)
            }
        }
    }

    struct BrokenStore;

    impl RecordStore for BrokenStore {
        fn insert(&self, _record: &TranslationRecord) -> Result<usize> {
            bail!("connection refused")
        }
    }

    fn request() -> TranslationRequest {
        TranslationRequest {
            text: "hello world".to_string(),
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
        }
    }

    #[test]
    fn test_first_insert_usually_lands() {
        let writer = RecordWriter::new(ScriptedStore::new(0));

        let record = writer
            .write(&request(), "bonjour monde", "127.0.0.1", Utc::now())
            .unwrap();

        assert_eq!(record.translated_text, "bonjour monde");
        assert_eq!(writer.store.inserted_ids.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_collisions_retry_with_fresh_ids() {
        let writer = RecordWriter::new(ScriptedStore::new(2));

        let record = writer
            .write(&request(), "bonjour monde", "127.0.0.1", Utc::now())
            .unwrap();

        let ids = writer.store.inserted_ids.lock().unwrap();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);
        assert_ne!(ids[1], ids[2]);
        assert_ne!(ids[0], ids[2]);
        assert_eq!(record.id, ids[2]);
    }

    #[test]
    fn test_hard_store_failure_is_not_retried() {
        let writer = RecordWriter::new(BrokenStore);

        let result = writer.write(&request(), "bonjour monde", "127.0.0.1", Utc::now());

        assert!(result.is_err());
    }

    #[test]
    fn test_safety_valve_caps_attempts() {
        let writer = RecordWriter::new(ScriptedStore::new(u32::MAX)).with_max_insert_attempts(Some(3));

        let result = writer.write(&request(), "bonjour monde", "127.0.0.1", Utc::now());

        assert!(result.is_err());
        assert_eq!(writer.store.inserted_ids.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_record_fields_come_from_the_request() {
        let writer = RecordWriter::new(ScriptedStore::new(0));
        let timestamp = Utc::now();

        let record = writer
            .write(&request(), "bonjour monde", "10.1.2.3", timestamp)
            .unwrap();

        assert_eq!(record.client_ip, "10.1.2.3");
        assert_eq!(record.timestamp, timestamp);
        assert_eq!(record.source_language, "en");
        assert_eq!(record.target_language, "fr");
        assert_eq!(record.text, "hello world");
    }
}
