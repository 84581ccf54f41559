//! Fetch lifecycle controller
//!
//! One controller per mounted view. It owns at most one in-flight request,
//! tracks `loading`/`error`/`data`, and only ever commits the result of the
//! most recent request:
//!
//! - every request is tagged with a generation number; completions whose
//!   generation is not current are dropped
//! - superseded requests are aborted, which drops the HTTP future
//!
//! Requests run as tokio tasks and report back over a channel, so the UI
//! loop stays single-threaded: it calls [`FetchController::poll`] each tick
//! (or [`FetchController::settle`] when it can just wait).

use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};

/// Observable state of a controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    /// User-facing message; the underlying error is only logged
    pub error: Option<String>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

struct Completion<T> {
    generation: u64,
    outcome: FetchResult<T>,
}

/// What woke [`FetchController::settle`]
enum Wake<T> {
    Completed(Completion<T>),
    /// Task finished; true when it was cancelled rather than panicking
    Exited(bool),
}

/// Runs requests keyed by a dependency key, applying only the latest result
pub struct FetchController<K, T> {
    label: &'static str,
    error_message: &'static str,
    discard_on_rekey: bool,
    state: FetchState<T>,
    key: Option<K>,
    generation: u64,
    inflight: Option<JoinHandle<()>>,
    tx: mpsc::UnboundedSender<Completion<T>>,
    rx: mpsc::UnboundedReceiver<Completion<T>>,
}

impl<K, T> FetchController<K, T>
where
    K: PartialEq + fmt::Debug,
    T: Send + 'static,
{
    /// `label` names the controller in logs; `error_message` is what the
    /// view shows for any non-abort failure.
    pub fn new(label: &'static str, error_message: &'static str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            label,
            error_message,
            discard_on_rekey: false,
            state: FetchState::default(),
            key: None,
            generation: 0,
            inflight: None,
            tx,
            rx,
        }
    }

    /// Clear `data` whenever a new request starts instead of keeping the
    /// previous value on screen
    pub fn discarding_stale_data(mut self) -> Self {
        self.discard_on_rekey = true;
        self
    }

    /// Activate for `key`
    ///
    /// Issues `request` on first activation or when `key` differs from the
    /// current one; otherwise does nothing. Returns whether a request was
    /// issued. Must be called within a tokio runtime.
    pub fn observe<F, Fut>(&mut self, key: K, request: F) -> bool
    where
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.issue(key, request);
        true
    }

    /// Re-issue the request for the current key, if any
    pub fn reload<F, Fut>(&mut self, request: F) -> bool
    where
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        match self.key.take() {
            Some(key) => {
                self.issue(key, request);
                true
            }
            None => false,
        }
    }

    /// Abort the in-flight request and forget the key
    ///
    /// Anything the aborted request might still deliver is ignored.
    pub fn teardown(&mut self) {
        self.cancel_inflight();
        self.generation += 1;
        self.key = None;
        self.state.loading = false;
    }

    /// Teardown plus dropping whatever data and error were held
    pub fn reset(&mut self) {
        self.teardown();
        self.state = FetchState::default();
    }

    /// Apply any completed results without blocking
    ///
    /// Returns true if the visible state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = self.drain();
        let exited = self.inflight.as_ref().is_some_and(JoinHandle::is_finished);
        if self.state.loading && exited {
            // The task sends before it finishes, so drain once more
            changed |= self.drain();
            if self.state.loading {
                self.task_lost(false);
                changed = true;
            }
        }
        changed
    }

    /// Wait until the current request has been applied
    ///
    /// Also returns when the request task dies without reporting back.
    pub async fn settle(&mut self) {
        while self.state.loading {
            let Some(handle) = self.inflight.as_mut() else {
                break;
            };
            let wake = tokio::select! {
                biased;
                Some(completion) = self.rx.recv() => Wake::Completed(completion),
                joined = handle => Wake::Exited(joined.err().is_some_and(|e| e.is_cancelled())),
            };
            match wake {
                Wake::Completed(completion) => {
                    self.apply(completion);
                }
                Wake::Exited(cancelled) => {
                    self.drain();
                    if self.state.loading {
                        self.task_lost(cancelled);
                    }
                }
            }
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn data(&self) -> Option<&T> {
        self.state.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    /// Key of the current (or last completed) request
    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    fn issue<F, Fut>(&mut self, key: K, request: F)
    where
        F: FnOnce(&K) -> Fut,
        Fut: Future<Output = FetchResult<T>> + Send + 'static,
    {
        self.cancel_inflight();
        self.generation += 1;
        let generation = self.generation;

        self.state.loading = true;
        self.state.error = None;
        if self.discard_on_rekey {
            self.state.data = None;
        }

        debug!(controller = self.label, key = ?key, generation, "request issued");
        let future = request(&key);
        self.key = Some(key);

        let tx = self.tx.clone();
        self.inflight = Some(tokio::spawn(async move {
            let outcome = future.await;
            // Receiver is gone only when the controller was dropped
            let _ = tx.send(Completion { generation, outcome });
        }));
    }

    fn drain(&mut self) -> bool {
        let mut changed = false;
        while let Ok(completion) = self.rx.try_recv() {
            changed |= self.apply(completion);
        }
        changed
    }

    /// The current task ended without sending a completion
    ///
    /// Cancellation goes through the regular abort path; anything else
    /// (a panic) is reported like a failed request.
    fn task_lost(&mut self, cancelled: bool) {
        if cancelled {
            let generation = self.generation;
            self.apply(Completion {
                generation,
                outcome: Err(FetchError::aborted(self.label)),
            });
            return;
        }
        warn!(controller = self.label, "request task exited without a result");
        self.inflight = None;
        self.state.error = Some(self.error_message.to_string());
        self.state.loading = false;
    }

    fn cancel_inflight(&mut self) {
        if let Some(handle) = self.inflight.take() {
            if !handle.is_finished() {
                debug!(
                    controller = self.label,
                    generation = self.generation,
                    "aborting stale request"
                );
            }
            handle.abort();
        }
    }

    fn apply(&mut self, completion: Completion<T>) -> bool {
        if completion.generation != self.generation {
            debug!(
                controller = self.label,
                stale = completion.generation,
                current = self.generation,
                "dropping stale response"
            );
            return false;
        }

        self.inflight = None;
        match completion.outcome {
            Ok(data) => {
                self.state.data = Some(data);
                self.state.error = None;
            }
            Err(err) if err.is_abort() => {
                debug!(controller = self.label, error = %err, "request aborted");
            }
            Err(err) => {
                warn!(controller = self.label, error = %err, "request failed");
                self.state.error = Some(self.error_message.to_string());
            }
        }
        self.state.loading = false;
        true
    }
}

impl<K, T> Drop for FetchController<K, T> {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    const ERR: &str = "Unable to load things right now.";

    fn controller() -> FetchController<u32, u32> {
        FetchController::new("test", ERR)
    }

    async fn delayed(value: u32, millis: u64) -> FetchResult<u32> {
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(value)
    }

    #[tokio::test]
    async fn test_success_sets_data() {
        let mut fetch = controller();
        assert!(!fetch.is_loading());

        assert!(fetch.observe(1, |_| async { Ok(10) }));
        assert!(fetch.is_loading());
        assert_eq!(fetch.error(), None);

        fetch.settle().await;
        assert!(!fetch.is_loading());
        assert_eq!(fetch.data(), Some(&10));
    }

    #[tokio::test]
    async fn test_same_key_does_not_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut fetch = controller();

        for _ in 0..3 {
            let calls = calls.clone();
            fetch.observe(5, move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(50) }
            });
        }
        fetch.settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(fetch.data(), Some(&50));
    }

    #[tokio::test]
    async fn test_error_uses_generic_message_and_keeps_data() {
        let mut fetch = controller();
        fetch.observe(1, |_| async { Ok(10) });
        fetch.settle().await;

        fetch.observe(2, |_| async { Err(FetchError::http(503, "/things")) });
        assert_eq!(fetch.data(), Some(&10));
        fetch.settle().await;

        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), Some(ERR));
        assert_eq!(fetch.data(), Some(&10));
    }

    #[tokio::test]
    async fn test_discarding_controller_clears_on_rekey() {
        let mut fetch = controller().discarding_stale_data();
        fetch.observe(1, |_| async { Ok(10) });
        fetch.settle().await;

        fetch.observe(2, |_| async { Err(FetchError::http(404, "/things/2")) });
        assert_eq!(fetch.data(), None);
        fetch.settle().await;
        assert_eq!(fetch.data(), None);
        assert_eq!(fetch.error(), Some(ERR));
    }

    #[tokio::test]
    async fn test_new_request_clears_previous_error() {
        let mut fetch = controller();
        fetch.observe(1, |_| async { Err(FetchError::network("/things", "refused")) });
        fetch.settle().await;
        assert_eq!(fetch.error(), Some(ERR));

        fetch.observe(2, |_| async { Ok(20) });
        assert_eq!(fetch.error(), None);
        fetch.settle().await;
        assert_eq!(fetch.data(), Some(&20));
    }

    #[tokio::test]
    async fn test_stale_completion_is_ignored() {
        let mut fetch = controller();
        fetch.observe(1, |_| async { Ok(10) });
        fetch.settle().await;
        fetch.observe(2, |_| delayed(20, 50));

        // A response from the superseded generation shows up late
        let stale_generation = fetch.generation - 1;
        fetch
            .tx
            .send(Completion {
                generation: stale_generation,
                outcome: Ok(999),
            })
            .unwrap();

        assert!(!fetch.poll());
        assert!(fetch.is_loading());
        assert_eq!(fetch.data(), Some(&10));

        fetch.settle().await;
        assert_eq!(fetch.data(), Some(&20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_rekey_commits_only_last_key() {
        let mut fetch = controller();

        // Earlier keys are slower, so without the guard they would land last
        fetch.observe(1, |k| delayed(*k * 10, 300));
        fetch.observe(2, |k| delayed(*k * 10, 200));
        fetch.observe(3, |k| delayed(*k * 10, 100));

        fetch.settle().await;
        assert_eq!(fetch.data(), Some(&30));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(!fetch.poll());
        assert_eq!(fetch.data(), Some(&30));
        assert_eq!(fetch.key(), Some(&3));
    }

    #[tokio::test]
    async fn test_abort_is_dropped_silently() {
        let mut fetch = controller();
        fetch.observe(1, |_| async { Err(FetchError::aborted("/things")) });
        fetch.settle().await;

        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), None);
        assert_eq!(fetch.data(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_ignores_inflight_result() {
        let mut fetch = controller();
        fetch.observe(1, |_| delayed(10, 100));
        fetch.teardown();
        assert!(!fetch.is_loading());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!fetch.poll());
        assert_eq!(fetch.data(), None);
        assert_eq!(fetch.key(), None);
    }

    #[tokio::test]
    async fn test_reload_reissues_current_key() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut fetch = controller();

        let counter = calls.clone();
        fetch.observe(7, move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Ok(1) }
        });
        fetch.settle().await;

        let counter = calls.clone();
        assert!(fetch.reload(move |k| {
            counter.fetch_add(1, Ordering::SeqCst);
            let k = *k;
            async move { Ok(k) }
        }));
        fetch.settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(fetch.data(), Some(&7));
    }

    #[tokio::test]
    async fn test_reload_without_key_is_noop() {
        let mut fetch = controller();
        assert!(!fetch.reload(|_| async { Ok(1) }));
        assert!(!fetch.is_loading());
    }

    async fn explode() -> FetchResult<u32> {
        panic!("request task exploded")
    }

    #[tokio::test]
    async fn test_settle_returns_when_task_panics() {
        let mut fetch = controller();
        fetch.observe(1, |_| explode());

        tokio::time::timeout(Duration::from_secs(1), fetch.settle())
            .await
            .expect("settle hung on a panicked task");
        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), Some(ERR));
    }

    #[tokio::test]
    async fn test_poll_notices_panicked_task() {
        let mut fetch = controller();
        fetch.observe(1, |_| explode());

        tokio::time::timeout(Duration::from_secs(1), async {
            while !fetch.poll() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("poll never noticed the dead task");
        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), Some(ERR));
    }

    #[tokio::test]
    async fn test_cancelled_task_settles_as_abort() {
        let mut fetch = controller();
        fetch.observe(1, |_| delayed(1, 10_000));
        if let Some(handle) = &fetch.inflight {
            handle.abort();
        }

        fetch.settle().await;
        assert!(!fetch.is_loading());
        assert_eq!(fetch.error(), None);
        assert!(fetch.inflight.is_none());
    }
}
