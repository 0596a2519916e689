use parking_lot::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::config::SEARCH_DEBOUNCE_DELAY;

/// Delays a callback until calls stop arriving for `delay`. Each new call
/// cancels the pending one rather than queueing behind it, so a burst of
/// keystrokes triggers exactly one invocation once input pauses.
///
/// Independent of any UI; requires a tokio runtime.
pub struct Debouncer {
    delay: Duration,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: Mutex::new(None),
        }
    }

    /// Debouncer tuned for search inputs.
    pub fn for_search() -> Self {
        Self::new(SEARCH_DEBOUNCE_DELAY)
    }

    /// Schedule `callback` to run after the delay, cancelling any
    /// previously scheduled callback.
    pub fn call<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            callback();
        });
        if let Some(previous) = self.pending.lock().replace(handle) {
            previous.abort();
        }
    }

    /// Drop any pending callback without running it.
    pub fn cancel(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
