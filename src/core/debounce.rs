//! Delay-and-coalesce scheduling.
//!
//! A [`Debouncer`] keeps at most one pending task. Scheduling a new task aborts
//! the pending one, so only the most recent request runs, and only after it
//! has been left alone for the whole delay.
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug)]
struct Pending<K> {
    key: K,
    task: JoinHandle<()>,
}

#[derive(Debug)]
pub struct Debouncer<K> {
    pending: Option<Pending<K>>,
}

impl<K> Default for Debouncer<K> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<K: Debug> Debouncer<K> {
    /// Runs `action` after `delay` unless another task is scheduled or the
    /// debouncer is cancelled first. Any pending task is aborted.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&mut self, key: K, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        if let Some(replaced) = self.cancel() {
            tracing::debug!("Debounced task for {replaced:?} replaced by {key:?}");
        }

        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            action.await;
        });

        self.pending = Some(Pending { key, task });
    }

    /// Aborts the pending task, if any, and returns its key.
    ///
    /// Returns `None` when nothing was pending or the task already ran.
    pub fn cancel(&mut self) -> Option<K> {
        let pending = self.pending.take()?;
        if pending.task.is_finished() {
            return None;
        }
        pending.task.abort();
        Some(pending.key)
    }

    /// Key of the task waiting to run.
    #[must_use]
    pub fn pending_key(&self) -> Option<&K> {
        self.pending
            .as_ref()
            .filter(|pending| !pending.task.is_finished())
            .map(|pending| &pending.key)
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.task.abort();
        }
    }
}
