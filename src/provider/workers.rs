// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Bounded worker pool with fail-fast cancellation.
//!
//! Every unit of work (one zone to list, one change to apply) is pushed into a
//! closed queue before any worker starts. At most `workers` tasks drain the queue
//! concurrently. The first error cancels the whole group: workers stop taking new
//! items and in-flight handlers are abandoned at their next await point. The pool
//! returns only after every worker has exited.
//!
//! Items are processed in no particular order, so handlers must not depend on
//! each other.

use crate::dns_errors::{ProviderError, Result};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Holds the first error reported by any worker and cancels the group.
#[derive(Debug)]
pub struct FirstError {
    error: Mutex<Option<ProviderError>>,
    cancel: CancellationToken,
}

impl FirstError {
    /// Create an aggregator that cancels `cancel` on the first error.
    #[must_use]
    pub fn new(cancel: CancellationToken) -> Self {
        Self {
            error: Mutex::new(None),
            cancel,
        }
    }

    /// Keep `error` if no error was recorded yet, then cancel the group.
    pub fn record(&self, error: ProviderError) {
        {
            let mut slot = self.error.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.is_none() {
                *slot = Some(error);
            } else {
                debug!(error = %error, "Dropping error reported after the first one");
            }
        }
        self.cancel.cancel();
    }

    /// Take the recorded error, if any.
    pub fn take(&self) -> Option<ProviderError> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// Run `handler` over `items` on at most `workers` concurrent tasks.
///
/// The group's cancellation token is a child of `parent`, so cancelling `parent`
/// (for example on shutdown) stops the pool as well.
///
/// # Arguments
///
/// * `workers` - Maximum number of concurrent tasks; 0 is treated as 1
/// * `items` - Units of work; an empty list returns immediately
/// * `parent` - Token whose cancellation aborts the pool
/// * `handler` - Called once per item
///
/// # Returns
///
/// The outputs of all handlers, in no particular order.
///
/// # Errors
///
/// - the first error returned by any handler
/// - `ProviderError::Cancelled` if `parent` was cancelled before every item ran
/// - `ProviderError::WorkerPanicked` if a worker task panicked
pub async fn run_worker_pool<T, R, F, Fut>(
    workers: usize,
    items: Vec<T>,
    parent: &CancellationToken,
    handler: F,
) -> Result<Vec<R>>
where
    T: Send + 'static,
    R: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let (queue, tasks) = async_channel::bounded(total);
    for item in items {
        if queue.try_send(item).is_err() {
            return Err(ProviderError::WorkerPanicked(
                "task queue rejected an item".to_string(),
            ));
        }
    }
    queue.close();

    let cancel = parent.child_token();
    let first_error = Arc::new(FirstError::new(cancel.clone()));
    let handler = Arc::new(handler);
    let worker_count = workers.clamp(1, total);

    debug!(workers = worker_count, items = total, "Starting worker pool");

    let mut set = JoinSet::new();
    for worker_id in 0..worker_count {
        let tasks = tasks.clone();
        let cancel = cancel.clone();
        let first_error = Arc::clone(&first_error);
        let handler = Arc::clone(&handler);

        set.spawn(async move {
            let mut outputs = Vec::new();
            loop {
                let item = tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    next = tasks.recv() => match next {
                        Ok(item) => item,
                        Err(_) => break,
                    },
                };

                let result = tokio::select! {
                    biased;
                    () = cancel.cancelled() => Err(ProviderError::Cancelled),
                    result = (*handler)(item) => result,
                };

                match result {
                    Ok(output) => outputs.push(output),
                    Err(e) => {
                        first_error.record(e);
                        break;
                    }
                }
            }
            debug!(worker_id, processed = outputs.len(), "Worker finished");
            outputs
        });
    }
    drop(tasks);

    let mut outputs = Vec::with_capacity(total);
    while let Some(joined) = set.join_next().await {
        match joined {
            Ok(worker_outputs) => outputs.extend(worker_outputs),
            Err(e) => {
                warn!(error = %e, "Worker task failed");
                first_error.record(ProviderError::WorkerPanicked(e.to_string()));
            }
        }
    }

    if let Some(error) = first_error.take() {
        return Err(error);
    }
    if outputs.len() < total {
        return Err(ProviderError::Cancelled);
    }

    Ok(outputs)
}

#[cfg(test)]
#[path = "workers_tests.rs"]
mod workers_tests;
