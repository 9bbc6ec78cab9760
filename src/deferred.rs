//! Values that become available later.
//!
//! A [`Deferred`] is resolved when it is encoded, waiting at most the encoder's
//! `deref_timeout`. Decoding always produces an already-resolved `Deferred`.

use crate::{errors::DeferredFailure, Value};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::{
    fmt,
    sync::{Arc, Mutex},
    thread,
    time::Duration,
};

type Outcome = Result<Value, DeferredFailure>;

/// Something that can produce a value, possibly after blocking.
pub trait Resolve: Send + Sync {
    /// Wait up to `timeout` for the value.
    fn resolve(&self, timeout: Duration) -> Outcome;

    /// The outcome, if it is available without blocking.
    fn peek(&self) -> Option<Outcome> { None }
}

/// A shared handle on a [`Resolve`].
#[derive(Clone)]
pub struct Deferred(Arc<dyn Resolve>);

struct Ready(Value);

impl Resolve for Ready {
    fn resolve(&self, _: Duration) -> Outcome { Ok(self.0.clone()) }

    fn peek(&self) -> Option<Outcome> { Some(Ok(self.0.clone())) }
}

struct Pending {
    rx: Receiver<Result<Value, String>>,
    settled: Mutex<Option<Outcome>>,
}

impl Pending {
    fn settle(&self, received: Result<Value, String>) -> Outcome {
        received.map_err(|cause| DeferredFailure::Failed { cause })
    }
}

impl Resolve for Pending {
    fn resolve(&self, timeout: Duration) -> Outcome {
        let mut settled = self.settled.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(out) = settled.as_ref() {
            return out.clone();
        }
        let out = match self.rx.recv_timeout(timeout) {
            Ok(received) => self.settle(received),
            Err(RecvTimeoutError::Disconnected) => Err(DeferredFailure::Interrupted),
            Err(RecvTimeoutError::Timeout) => {
                return Err(DeferredFailure::TimedOut {
                    timeout_ms: timeout.as_millis() as u64,
                })
            }
        };
        *settled = Some(out.clone());
        out
    }

    fn peek(&self) -> Option<Outcome> {
        let mut settled = self.settled.lock().unwrap_or_else(|e| e.into_inner());
        if settled.is_none() {
            *settled = match self.rx.try_recv() {
                Ok(received) => Some(self.settle(received)),
                Err(TryRecvError::Disconnected) => Some(Err(DeferredFailure::Interrupted)),
                Err(TryRecvError::Empty) => None,
            };
        }
        settled.clone()
    }
}

/// The producing half of [`Deferred::promise`].
///
/// Dropping it without completing interrupts the paired `Deferred`.
pub struct Promise {
    tx: Sender<Result<Value, String>>,
}

impl Promise {
    /// Delivers the value.
    pub fn complete(self, value: Value) {
        // the receiver may already be gone
        let _ = self.tx.send(Ok(value));
    }

    /// Reports that the value could not be produced.
    pub fn fail<S: Into<String>>(self, cause: S) { let _ = self.tx.send(Err(cause.into())); }
}

impl Deferred {
    /// A deferred value that is already available.
    pub fn resolved(value: Value) -> Self { Deferred(Arc::new(Ready(value))) }

    /// A deferred value completed through the returned [`Promise`].
    pub fn promise() -> (Promise, Deferred) {
        let (tx, rx) = bounded(1);
        let pending = Pending {
            rx,
            settled: Mutex::new(None),
        };
        (Promise { tx }, Deferred(Arc::new(pending)))
    }

    /// Computes the value on a new thread. A panic in `f` interrupts the result.
    pub fn spawn<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Value, String> + Send + 'static,
    {
        let (promise, deferred) = Deferred::promise();
        thread::spawn(move || match f() {
            Ok(v) => promise.complete(v),
            Err(e) => promise.fail(e),
        });
        deferred
    }

    /// Wraps a custom [`Resolve`].
    pub fn from_resolve<R: Resolve + 'static>(r: R) -> Self { Deferred(Arc::new(r)) }

    pub fn resolve(&self, timeout: Duration) -> Outcome { self.0.resolve(timeout) }

    pub fn peek(&self) -> Option<Outcome> { self.0.peek() }
}

impl PartialEq for Deferred {
    fn eq(&self, other: &Deferred) -> bool {
        if Arc::ptr_eq(&self.0, &other.0) {
            return true;
        }
        match (self.peek(), other.peek()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.peek() {
            Some(Ok(v)) => write!(f, "Deferred({:?})", v),
            Some(Err(e)) => write!(f, "Deferred(<{}>)", e),
            None => write!(f, "Deferred(<pending>)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    const SHORT: Duration = Duration::from_millis(50);

    #[test]
    fn resolved_is_immediate() {
        let d = Deferred::resolved(Value::Int(3));
        assert_eq!(d.resolve(Duration::from_millis(0)), Ok(Value::Int(3)));
        assert_eq!(d, Deferred::resolved(Value::Int(3)));
    }

    #[test]
    fn promise_completes() {
        let (p, d) = Deferred::promise();
        assert_eq!(d.peek(), None);
        p.complete(Value::from("done"));
        assert_eq!(d.resolve(SHORT), Ok(Value::from("done")));
        // cached after the first resolution
        assert_eq!(d.resolve(SHORT), Ok(Value::from("done")));
    }

    #[test]
    fn dropped_promise_interrupts() {
        let (p, d) = Deferred::promise();
        drop(p);
        assert_eq!(d.resolve(SHORT), Err(DeferredFailure::Interrupted));
    }

    #[test]
    fn failure_is_reported() {
        let d = Deferred::spawn(|| Err("boom".to_string()));
        assert_eq!(
            d.resolve(Duration::from_secs(5)),
            Err(DeferredFailure::Failed {
                cause: "boom".to_string()
            })
        );
    }

    #[test]
    fn times_out_within_margin() {
        let (_p, d) = Deferred::promise();
        let start = Instant::now();
        assert_eq!(d.resolve(SHORT), Err(DeferredFailure::TimedOut { timeout_ms: 50 }));
        let waited = start.elapsed();
        assert!(waited >= SHORT);
        assert!(waited < Duration::from_secs(2));
    }
}
