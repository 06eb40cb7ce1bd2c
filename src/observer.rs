//! Diagnostic observers for resolution events.
//!
//! Observers see every construction the resolver performs (cache hits are not
//! reported). Keep implementations cheap: they run inline on the resolving task.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::DiError;

/// Observer trait for component construction events.
///
/// # Examples
///
/// ```
/// use ferrous_wiring::{DiError, ResolutionObserver};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl ResolutionObserver for Counter {
///     fn resolving(&self, _name: &str, _depth: usize) {}
///
///     fn resolved(&self, _name: &str, _duration: Duration) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait ResolutionObserver: Send + Sync {
    /// Called before a component under `name` is constructed; `depth` is its
    /// position on the resolution path.
    fn resolving(&self, name: &str, depth: usize);

    /// Called after construction, wiring and hooks completed.
    fn resolved(&self, name: &str, duration: Duration);

    /// Called when construction failed; the error still propagates.
    fn failed(&self, name: &str, error: &DiError) {
        let _ = (name, error);
    }
}

/// Container for registered observers.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn ResolutionObserver>>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Arc<dyn ResolutionObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn resolving(&self, name: &str, depth: usize) {
        for observer in &self.observers {
            observer.resolving(name, depth);
        }
    }

    pub(crate) fn resolved(&self, name: &str, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(name, duration);
        }
    }

    pub(crate) fn failed(&self, name: &str, error: &DiError) {
        for observer in &self.observers {
            observer.failed(name, error);
        }
    }
}

/// Built-in observer that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ResolutionObserver for TracingObserver {
    fn resolving(&self, name: &str, depth: usize) {
        debug!(component = name, depth, "Resolving");
    }

    fn resolved(&self, name: &str, duration: Duration) {
        debug!(component = name, ?duration, "Resolved");
    }

    fn failed(&self, name: &str, error: &DiError) {
        warn!(component = name, %error, "Resolution failed");
    }
}
