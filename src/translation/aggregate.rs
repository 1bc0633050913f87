//! Collecting unit results back into one translation.

use std::time::Duration;
use tokio::time;
use tokio_util::sync::CancellationToken;

use super::dispatch::{UnitHandle, UnitOutcome};
use super::error::TranslateError;

/// Awaits handles in unit order and joins their texts with single spaces.
///
/// The first backend failure cancels everything still pending and fails the
/// whole request; there are no partial results. Output order is unit order
/// no matter how completion interleaves, because each handle is awaited at
/// its own index.
///
/// `unit_timeout` bounds the wait on any single handle. When unset, a hung
/// backend call hangs the request.
pub async fn aggregate(
    handles: Vec<UnitHandle>,
    cancel: &CancellationToken,
    unit_timeout: Option<Duration>,
) -> Result<String, TranslateError> {
    let mut parts: Vec<String> = Vec::with_capacity(handles.len());
    let mut skipped_cancelled = false;

    for handle in handles {
        let joined = match unit_timeout {
            Some(limit) => match time::timeout(limit, handle.task).await {
                Ok(joined) => joined,
                Err(_) => {
                    cancel.cancel();
                    return Err(TranslateError::Timeout);
                }
            },
            None => handle.task.await,
        };

        let outcome = match joined {
            Ok(outcome) => outcome,
            Err(join_error) if join_error.is_cancelled() => UnitOutcome::Cancelled,
            Err(join_error) => {
                // A worker task only panics when a collaborator broke its
                // contract; re-raise rather than degrade to an error value.
                cancel.cancel();
                std::panic::resume_unwind(join_error.into_panic());
            }
        };

        match outcome {
            UnitOutcome::Translated(text) => parts.push(text),
            UnitOutcome::Failed(failure) => {
                cancel.cancel();
                return Err(TranslateError::Backend {
                    status: failure.status,
                    message: failure.message,
                });
            }
            // Cancellation raced ahead of us; the unit contributes nothing
            // and the request as a whole reports the cancellation below.
            UnitOutcome::Cancelled => skipped_cancelled = true,
        }
    }

    if skipped_cancelled || cancel.is_cancelled() {
        return Err(TranslateError::Timeout);
    }

    Ok(parts.join(" "))
}
