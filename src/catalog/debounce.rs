//! Debounced search input.
//!
//! The catalog engine is not re-run on every keystroke: a submission only
//! settles after a quiet period, and a newer submission supersedes any
//! still-pending one. Responsiveness only; the settled result for a
//! settled query is the same as running the filter directly.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    generation: Arc<AtomicU64>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Submit a query. Resolves to `Some(query)` if it is still the
    /// latest submission after the quiet period, `None` if a newer
    /// submission superseded it while it waited.
    pub async fn submit(&self, query: String) -> Option<String> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;
        if self.generation.load(Ordering::SeqCst) == ticket {
            Some(query)
        } else {
            None
        }
    }
}
