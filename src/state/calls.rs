use crate::error::ApiError;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio_util::sync::CancellationToken;

pub(crate) const CANCELLED_MESSAGE: &str = "Request cancelled";

/// Sequencing and lifetime for the calls of one controller.
pub(crate) struct CallTracker {
    latest: AtomicU64,
    cancel: CancellationToken,
}

impl CallTracker {
    pub(crate) fn new() -> Self {
        Self {
            latest: AtomicU64::new(0),
            cancel: CancellationToken::new(),
        }
    }

    /// Start a call and return its sequence number.
    pub(crate) fn begin(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Make every call started so far stale.
    pub(crate) fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn is_latest(&self, seq: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == seq
    }

    pub(crate) fn cancel(&self) {
        self.cancel.cancel();
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub(crate) fn cancelled_error() -> ApiError {
        ApiError::new(0, CANCELLED_MESSAGE)
    }

    /// Race a call against the owner's lifetime.
    pub(crate) async fn run<T, F>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = crate::Result<T>>,
    {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Self::cancelled_error()),
            r = fut => r.map_err(|e| e.to_api_error()),
        }
    }
}
