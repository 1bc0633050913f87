//! Fan-out of translation units onto the worker pool.

use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::client::{TranslationBackend, UnitFailure, UnitReply};
use super::pool::WorkerPool;
use super::service::TranslationRequest;

/// What one unit's worker task resolved to.
#[derive(Debug)]
pub enum UnitOutcome {
    Translated(String),
    Failed(UnitFailure),
    /// The task observed cancellation before its backend call finished.
    Cancelled,
}

/// An in-flight unit translation that can be awaited.
#[derive(Debug)]
pub struct UnitHandle {
    pub(crate) task: JoinHandle<UnitOutcome>,
}

/// Spawns one worker task per unit, returning handles in unit order.
///
/// Handle `i` translates unit `i` with the request's language pair. Each
/// task waits for a pool permit, then calls the backend, racing both steps
/// against `cancel`. Cancellation is cooperative: a task that already
/// started its call may still run it to completion, its result just no
/// longer counts.
pub fn dispatch<B: TranslationBackend>(
    pool: &WorkerPool,
    backend: &Arc<B>,
    units: &[&str],
    request: &TranslationRequest,
    cancel: &CancellationToken,
) -> Vec<UnitHandle> {
    units
        .iter()
        .map(|unit| {
            let backend = Arc::clone(backend);
            let permits = pool.permits();
            let cancel = cancel.clone();
            let text = (*unit).to_string();
            let source = request.source_language.clone();
            let target = request.target_language.clone();

            let task = tokio::spawn(async move {
                let _permit = tokio::select! {
                    () = cancel.cancelled() => return UnitOutcome::Cancelled,
                    permit = permits.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        // The semaphore only closes when the pool shuts down.
                        Err(_) => return UnitOutcome::Cancelled,
                    },
                };

                tokio::select! {
                    () = cancel.cancelled() => UnitOutcome::Cancelled,
                    reply = backend.translate_unit(&text, &source, &target) => match reply {
                        Ok(UnitReply::Translated(translated)) => UnitOutcome::Translated(translated),
                        Ok(UnitReply::Failed(failure)) => UnitOutcome::Failed(failure),
                        // The backend contract is success-or-HTTP-failure;
                        // anything else means a broken collaborator and must
                        // not be reported as a translation result.
                        Err(fault) => panic!("translation backend broke its contract: {fault:#}"),
                    },
                }
            });

            UnitHandle { task }
        })
        .collect()
}
