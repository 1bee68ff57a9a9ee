//! Per-run worker pool
//!
//! A pool is created for a single benchmark run, sized to the run's world size,
//! and torn down once every worker has reported. Dropping a pool aborts any
//! worker that is still running, so a failed run never leaves tasks behind.

use crate::{
    error::{AppError, Result},
    executor::validate_world_size,
    models::TransferResult,
};
use futures::future::try_join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::{
    sync::Semaphore,
    task::{AbortHandle, JoinHandle},
};

/// Bounded pool of concurrently running transfer workers
pub struct WorkerPool {
    /// Concurrency limiter with one permit per worker
    permits: Arc<Semaphore>,
    /// Spawned worker tasks awaiting collection
    handles: Vec<JoinHandle<Result<TransferResult>>>,
    /// Abort handles kept for teardown
    abort_handles: Vec<AbortHandle>,
}

impl WorkerPool {
    /// Create a pool with room for `size` concurrent workers
    pub fn new(size: usize) -> Result<Self> {
        validate_world_size(size)?;

        Ok(Self {
            permits: Arc::new(Semaphore::new(size)),
            handles: Vec::with_capacity(size),
            abort_handles: Vec::with_capacity(size),
        })
    }

    /// Number of workers spawned so far
    pub fn spawned(&self) -> usize {
        self.handles.len()
    }

    /// Start a worker on the runtime
    ///
    /// The worker begins as soon as a permit is free; with one permit per
    /// participant every worker of a run proceeds concurrently.
    pub fn spawn<F>(&mut self, work: F)
    where
        F: Future<Output = Result<TransferResult>> + Send + 'static,
    {
        let permits = self.permits.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits.acquire_owned().await?;
            work.await
        });

        self.abort_handles.push(handle.abort_handle());
        self.handles.push(handle);
    }

    /// Wait for every worker and return their results ordered by rank
    ///
    /// The first failing worker fails the whole collection; the remaining
    /// workers are aborted when the pool is dropped.
    pub async fn join(mut self) -> Result<Vec<TransferResult>> {
        let handles = std::mem::take(&mut self.handles);

        let mut results = try_join_all(handles.into_iter().map(|handle| async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(join_error) => Err(AppError::from(join_error)),
            }
        }))
        .await?;

        results.sort_by_key(|result| result.rank);
        Ok(results)
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.permits.close();
        for handle in &self.abort_handles {
            handle.abort();
        }
    }
}
