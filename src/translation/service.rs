//! The translation pipeline: tokenize, dispatch, aggregate, record.

use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;

use crate::history::{RecordStore, RecordWriter};

use super::aggregate::aggregate;
use super::client::TranslationBackend;
use super::dispatch::dispatch;
use super::error::TranslateError;
use super::pool::WorkerPool;
use super::tokenize::tokenize;

/// One translation request, already validated by the caller: all fields are
/// non-empty by the time they reach the pipeline.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub source_language: String,
    pub target_language: String,
}

/// The finished translation of a whole request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOutcome {
    pub translated_text: String,
}

/// Orchestrates translation requests against a backend, a worker pool and a
/// history store.
///
/// Both collaborators sit behind traits so the pipeline can be exercised
/// without a network or a database.
pub struct Translator<B, S> {
    backend: Arc<B>,
    pool: WorkerPool,
    writer: RecordWriter<S>,
    unit_timeout: Option<Duration>,
}

impl<B, S> Translator<B, S>
where
    B: TranslationBackend,
    S: RecordStore,
{
    pub fn new(backend: Arc<B>, pool: WorkerPool, writer: RecordWriter<S>) -> Self {
        Self {
            backend,
            pool,
            writer,
            unit_timeout: None,
        }
    }

    /// Bounds how long any single unit may be waited on.
    ///
    /// Off by default, matching the backing deployment: without a bound, a
    /// hung backend call hangs the request.
    pub fn with_unit_timeout(mut self, unit_timeout: Option<Duration>) -> Self {
        self.unit_timeout = unit_timeout;
        self
    }

    /// Translates `request.text` unit by unit and records the result.
    ///
    /// Units are translated concurrently through the pool, but the output
    /// always preserves input token order. The history record is written
    /// only after every unit succeeded; any failure leaves no trace in the
    /// store.
    pub async fn translate_text(
        &self,
        request: &TranslationRequest,
        client_ip: &str,
    ) -> Result<TranslationOutcome, TranslateError> {
        let units = tokenize(&request.text);
        tracing::debug!(
            units = units.len(),
            source = %request.source_language,
            target = %request.target_language,
            "dispatching translation"
        );

        let cancel = self.pool.request_token();
        let handles = dispatch(&self.pool, &self.backend, &units, request, &cancel);
        let translated_text = aggregate(handles, &cancel, self.unit_timeout).await?;

        let record = self
            .writer
            .write(request, &translated_text, client_ip, Utc::now())
            .map_err(TranslateError::Storage)?;
        tracing::debug!(id = %record.id, "translation recorded");

        Ok(TranslationOutcome { translated_text })
    }
}
