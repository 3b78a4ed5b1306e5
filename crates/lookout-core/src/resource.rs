//! Generic asynchronous fetch lifecycle.
//!
//! [`AsyncResource`] owns the load/success/error state for a single remote
//! data source and enforces the generation discipline that keeps overlapping
//! fetches consistent: every invocation captures a generation number at start,
//! and a completion only applies if the resource is still attached and its
//! generation is still the newest started. A stale response can never
//! overwrite a newer one, and nothing is written after teardown.

use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures_util::future::BoxFuture;
use tracing::{debug, trace};

/// Fallback message when a producer failure carries no text.
const GENERIC_FETCH_ERROR: &str = "request failed";

/// Lifecycle status of an [`AsyncResource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No fetch has been started yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The most recent applied fetch succeeded
    Success,
    /// The most recent applied fetch failed
    Error,
}

/// Snapshot of a resource's state at one point in time.
///
/// `data` from a previous success is retained through subsequent loads and
/// failures so the UI never flickers back to empty on a transient error.
#[derive(Debug, Clone)]
pub struct AsyncState<T> {
    /// Last successfully fetched value, if any
    pub data: Option<T>,
    /// Current lifecycle status
    pub status: LoadStatus,
    /// Human-readable message from the last failure
    pub error: Option<String>,
}

// Manual impl: the derive would require `T: Default`, which the data type
// never needs to satisfy.
impl<T> Default for AsyncState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: LoadStatus::default(),
            error: None,
        }
    }
}

impl<T> AsyncState<T> {
    /// Returns true if a fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Returns true if the last applied fetch failed.
    pub fn is_error(&self) -> bool {
        self.status == LoadStatus::Error
    }

    /// Returns true if there is data to display (possibly stale).
    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

type Producer<T> = Arc<dyn Fn() -> BoxFuture<'static, anyhow::Result<T>> + Send + Sync>;

struct Inner<T> {
    /// Sole unit of mutation; written only by the winning generation
    state: Mutex<AsyncState<T>>,
    /// Newest started generation
    generation: AtomicU64,
    /// Cleared on detach; checked before every state write
    live: AtomicBool,
}

/// A single asynchronous data source with retry and cancellation.
///
/// Cloning is cheap and shares the underlying state, so a handle can be kept
/// by the UI while the polling task drives refreshes.
pub struct AsyncResource<T> {
    name: String,
    producer: Producer<T>,
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AsyncResource<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            producer: Arc::clone(&self.producer),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone + Send + 'static> AsyncResource<T> {
    /// Create a new resource around a zero-argument producer.
    ///
    /// The resource starts Idle; call [`start`](Self::start) to kick off the
    /// first fetch.
    pub fn new<F, Fut>(name: impl Into<String>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
    {
        Self {
            name: name.into(),
            producer: Arc::new(move || Box::pin(producer())),
            inner: Arc::new(Inner {
                state: Mutex::new(AsyncState::default()),
                generation: AtomicU64::new(0),
                live: AtomicBool::new(true),
            }),
        }
    }

    /// Name of this resource (used in logs).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current state snapshot.
    pub fn state(&self) -> AsyncState<T> {
        self.inner.state.lock().expect("resource state poisoned").clone()
    }

    /// Start the initial fetch.
    pub fn start(&self) {
        self.spawn_fetch();
    }

    /// Re-fetch. Idempotent: concurrent calls each get their own generation
    /// and only the latest live one is applied.
    pub fn refresh(&self) {
        self.spawn_fetch();
    }

    fn spawn_fetch(&self) {
        // Liveness check and the Loading transition share the lock, so a
        // concurrent detach either sees this fetch whole or suppresses it.
        let generation = {
            let mut state = self.inner.state.lock().expect("resource state poisoned");
            if !self.inner.live.load(Ordering::SeqCst) {
                trace!(resource = %self.name, "fetch skipped, resource detached");
                return;
            }
            let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.status = LoadStatus::Loading;
            state.error = None;
            // state.data retained for display continuity
            generation
        };
        trace!(resource = %self.name, generation, "fetch started");

        let future = (self.producer)();
        let inner = Arc::clone(&self.inner);
        let name = self.name.clone();
        tokio::spawn(async move {
            let result = future.await;

            // Liveness and generation checks at completion time, under the
            // state lock so check-and-write is one step: detach takes the
            // same lock, so a result can never land after detach returns. A
            // result from a superseded or detached invocation is discarded
            // whole.
            let mut state = inner.state.lock().expect("resource state poisoned");
            if !inner.live.load(Ordering::SeqCst) {
                trace!(resource = %name, generation, "result discarded, detached");
                return;
            }
            if inner.generation.load(Ordering::SeqCst) != generation {
                trace!(resource = %name, generation, "result discarded, superseded");
                return;
            }

            match result {
                Ok(data) => {
                    state.data = Some(data);
                    state.status = LoadStatus::Success;
                    state.error = None;
                    debug!(resource = %name, generation, "fetch succeeded");
                }
                Err(e) => {
                    let mut message = e.to_string();
                    if message.is_empty() {
                        message = GENERIC_FETCH_ERROR.to_string();
                    }
                    // Prior data stays in place on a failed refresh
                    state.status = LoadStatus::Error;
                    state.error = Some(message);
                    debug!(resource = %name, generation, "fetch failed");
                }
            }
        });
    }
}

// Teardown needs no bounds on `T`; keeping it unbounded lets Drop impls
// holding an `AsyncResource<T>` call it.
impl<T> AsyncResource<T> {
    /// Detach the resource: no in-flight or future completion may write state
    /// after this returns. Unconditional; safe to call more than once.
    pub fn detach(&self) {
        // Taking the lock orders this against any in-flight completion
        let _state = self.inner.state.lock().expect("resource state poisoned");
        self.inner.live.store(false, Ordering::SeqCst);
        debug!(resource = %self.name, "resource detached");
    }

    /// Returns true if the resource has not been detached.
    pub fn is_live(&self) -> bool {
        self.inner.live.load(Ordering::SeqCst)
    }
}
