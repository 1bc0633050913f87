//! Bounded pool of translation workers.
//!
//! One pool is built at startup and handed to every request; there is no
//! ambient global. The pool is shared process-wide, so a burst of large
//! texts competes for the same permits as everyone else.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Matches the fixed thread pool size of the backing deployment.
pub const DEFAULT_WORKERS: usize = 10;

/// Handle to the shared pool: a permit per concurrently running backend call
/// plus the process-level shutdown token.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    permits: Arc<Semaphore>,
    shutdown: CancellationToken,
}

impl WorkerPool {
    /// Creates a pool allowing `workers` concurrent backend calls.
    ///
    /// Submissions beyond that are queued, never rejected.
    pub fn new(workers: usize) -> Self {
        Self {
            permits: Arc::new(Semaphore::new(workers)),
            shutdown: CancellationToken::new(),
        }
    }

    pub(crate) fn permits(&self) -> Arc<Semaphore> {
        Arc::clone(&self.permits)
    }

    /// Derives a cancellation token for one request.
    ///
    /// Cancelling the returned token stops that request's pending units;
    /// shutting the pool down cancels every derived token.
    pub fn request_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Stops the pool: pending and future work observes cancellation.
    ///
    /// Cooperative only; calls already in flight may still complete.
    pub fn shutdown(&self) {
        self.permits.close();
        self.shutdown.cancel();
    }
}
