//! Post-commit hook registry.
//!
//! The host framework runs entry points inside a database transaction. Work
//! that must not observe pre-commit state — like the webcast ping — is
//! registered on a [`CommitHooks`] value owned by the caller, which runs the
//! callbacks after a successful commit and discards them on rollback.

use std::future::Future;
use std::pin::Pin;

use tracing::debug;

/// A boxed future, as stored by [`CommitHooks`].
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Callbacks deferred until the enclosing data transaction has committed.
#[derive(Default)]
pub struct CommitHooks {
    callbacks: Vec<BoxFuture<()>>,
}

impl CommitHooks {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback to run after a successful commit.
    pub fn on_commit<F>(&mut self, callback: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.callbacks.push(Box::pin(callback));
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Returns true if no callbacks are registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Runs the registered callbacks in registration order.
    pub async fn commit(self) {
        debug!(count = self.callbacks.len(), "Running post-commit callbacks");
        for callback in self.callbacks {
            callback.await;
        }
    }

    /// Discards the registered callbacks without running them.
    pub fn rollback(self) {
        debug!(
            count = self.callbacks.len(),
            "Discarding post-commit callbacks"
        );
    }
}
