//! Coalescing of regeneration requests
//!
//! Two pieces keep the engine from seeing half-applied or redundant input:
//! a [`Debouncer`] that releases a continuously adjusted value only after it
//! has settled, and a [`Regenerator`] that runs at most one regeneration at a
//! time on a worker thread. A request arriving while one is running waits in
//! a single slot; a newer request replaces whatever is waiting there. Running
//! work is never cancelled.

use crate::io::configuration::DEBOUNCE_SETTLE_MS;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Holds back a changing value until it stops changing
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    settle: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_SETTLE_MS))
    }
}

impl<T> Debouncer<T> {
    /// Debouncer releasing values unchanged for `settle`
    pub const fn new(settle: Duration) -> Self {
        Self {
            settle,
            pending: None,
        }
    }

    /// Record a new value observed at `now`, replacing any unreleased one
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value if it has been stable for the settle time
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let settled = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.settle);
        if settled {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Release the pending value immediately
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Whether a value is waiting to settle
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[derive(Debug)]
struct QueueState<Req> {
    queued: Option<Req>,
    in_flight: bool,
    shutdown: bool,
    superseded: u64,
}

#[derive(Debug)]
struct Shared<Req> {
    state: Mutex<QueueState<Req>>,
    changed: Condvar,
}

impl<Req> Shared<Req> {
    fn lock(&self) -> MutexGuard<'_, QueueState<Req>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single-flight, latest-wins regeneration worker
///
/// Results are delivered in completion order on [`Regenerator::results`].
/// Dropping the regenerator discards any queued request and waits for the
/// running one to finish.
pub struct Regenerator<Req, Out> {
    shared: Arc<Shared<Req>>,
    results: Receiver<Out>,
    worker: Option<JoinHandle<()>>,
}

impl<Req, Out> Regenerator<Req, Out>
where
    Req: Send + 'static,
    Out: Send + 'static,
{
    /// Start the worker thread running `job` for each accepted request
    pub fn spawn<F>(job: F) -> Self
    where
        F: FnMut(Req) -> Out + Send + 'static,
    {
        let shared = Arc::new(Shared {
            state: Mutex::new(QueueState {
                queued: None,
                in_flight: false,
                shutdown: false,
                superseded: 0,
            }),
            changed: Condvar::new(),
        });
        let (sender, results) = mpsc::channel();
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || run_worker(&worker_shared, job, &sender));

        Self {
            shared,
            results,
            worker: Some(worker),
        }
    }

    /// Queue `request`, replacing a queued request that has not started
    ///
    /// Returns `true` if an earlier queued request was superseded.
    pub fn request(&self, request: Req) -> bool {
        let mut state = self.shared.lock();
        let superseded = state.queued.replace(request).is_some();
        if superseded {
            state.superseded += 1;
            trace!("queued regeneration superseded");
        }
        drop(state);
        self.shared.changed.notify_all();
        superseded
    }

    /// Completed regeneration results
    pub const fn results(&self) -> &Receiver<Out> {
        &self.results
    }

    /// Whether nothing is running or queued
    pub fn is_idle(&self) -> bool {
        let state = self.shared.lock();
        !state.in_flight && state.queued.is_none()
    }

    /// Number of queued requests replaced before they started
    pub fn superseded_count(&self) -> u64 {
        self.shared.lock().superseded
    }

    /// Block until nothing is running or queued, or `timeout` elapses
    ///
    /// Returns `true` if the worker became idle.
    pub fn wait_idle(&self, timeout: Duration) -> bool {
        let state = self.shared.lock();
        let (state, _timeout) = self
            .shared
            .changed
            .wait_timeout_while(state, timeout, |s| s.in_flight || s.queued.is_some())
            .unwrap_or_else(PoisonError::into_inner);
        !state.in_flight && state.queued.is_none()
    }
}

impl<Req, Out> Drop for Regenerator<Req, Out> {
    fn drop(&mut self) {
        {
            let mut state = self.shared.lock();
            state.shutdown = true;
            state.queued = None;
        }
        self.shared.changed.notify_all();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                debug!("regeneration worker panicked");
            }
        }
    }
}

fn run_worker<Req, Out, F>(shared: &Shared<Req>, mut job: F, sender: &Sender<Out>)
where
    F: FnMut(Req) -> Out,
{
    loop {
        let request = {
            let state = shared.lock();
            let mut state = shared
                .changed
                .wait_while(state, |s| s.queued.is_none() && !s.shutdown)
                .unwrap_or_else(PoisonError::into_inner);
            if state.shutdown {
                return;
            }
            let Some(request) = state.queued.take() else {
                continue;
            };
            state.in_flight = true;
            request
        };

        let output = job(request);
        let delivered = sender.send(output).is_ok();

        shared.lock().in_flight = false;
        shared.changed.notify_all();

        if !delivered {
            return;
        }
    }
}
