//! Worker pool processing queued jobs with bounded concurrency.
//!
//! Dispatcher tasks poll the queue and spawn one task per job, limited by a
//! semaphore. Jobs sharing an exclusion key never run at the same time. A
//! hard per-job timeout keeps a stuck cycle from occupying a permit during
//! an extended upstream outage.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{Notify, RwLock, Semaphore};
use tokio::task::JoinHandle;

use crate::error::{worker::WorkerError, Error};
use crate::model::worker::WorkerJob;
use crate::worker::{handler::WorkerJobHandler, queue::WorkerQueue};

#[derive(Debug, Clone)]
pub struct WorkerPoolConfig {
    pub max_concurrent_jobs: usize,
    /// Number of dispatcher tasks polling the queue.
    pub dispatcher_count: usize,
    /// Wait between polls when the queue is empty.
    pub poll_interval: Duration,
    /// Hard wall-clock budget per job invocation.
    pub job_timeout: Duration,
    /// How long to wait for a dispatcher to stop during shutdown.
    pub shutdown_timeout: Duration,
}

impl WorkerPoolConfig {
    pub fn new(max_concurrent_jobs: usize, job_timeout: Duration) -> Self {
        // One dispatcher per 40 concurrent jobs, minimum 1.
        let dispatcher_count = max_concurrent_jobs.div_ceil(40).max(1);
        Self {
            max_concurrent_jobs,
            dispatcher_count,
            poll_interval: Duration::from_millis(250),
            job_timeout,
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

struct WorkerPoolRef {
    config: WorkerPoolConfig,
    queue: WorkerQueue,
    handler: Arc<WorkerJobHandler>,
    semaphore: Arc<Semaphore>,
    shutdown: Arc<Notify>,
    busy_keys: Arc<Mutex<HashSet<String>>>,
    dispatcher_handles: RwLock<Vec<JoinHandle<()>>>,
}

#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<WorkerPoolRef>,
}

impl WorkerPool {
    pub fn new(config: WorkerPoolConfig, queue: WorkerQueue, handler: WorkerJobHandler) -> Self {
        let semaphore = Arc::new(Semaphore::new(config.max_concurrent_jobs));
        Self {
            inner: Arc::new(WorkerPoolRef {
                config,
                queue,
                handler: Arc::new(handler),
                semaphore,
                shutdown: Arc::new(Notify::new()),
                busy_keys: Arc::new(Mutex::new(HashSet::new())),
                dispatcher_handles: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Start the dispatcher tasks. Idempotent: calling while running logs a
    /// warning and returns.
    pub async fn start(&self) -> Result<(), Error> {
        let mut handles = self.inner.dispatcher_handles.write().await;
        if !handles.is_empty() {
            tracing::warn!("Worker pool is already running");
            return Ok(());
        }

        tracing::info!(
            "Starting worker pool with {} dispatcher(s) (max {} concurrent jobs)",
            self.inner.config.dispatcher_count,
            self.inner.config.max_concurrent_jobs
        );

        for id in 0..self.inner.config.dispatcher_count {
            handles.push(self.spawn_dispatcher(id));
        }
        Ok(())
    }

    fn spawn_dispatcher(&self, id: usize) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);

        tokio::spawn(async move {
            tracing::debug!("Dispatcher {id} started");
            loop {
                tokio::select! {
                    biased;

                    _ = inner.shutdown.notified() => {
                        tracing::debug!("Dispatcher {id} received shutdown signal");
                        break;
                    }

                    _ = Self::process_next(&inner) => {}
                }
            }
            tracing::debug!("Dispatcher {id} stopped");
        })
    }

    async fn process_next(inner: &Arc<WorkerPoolRef>) {
        let job = {
            let busy = inner.busy_keys.lock().expect("busy key lock poisoned");
            inner.queue.pop_ready(&busy)
        };

        let Some(job) = job else {
            tokio::time::sleep(inner.config.poll_interval).await;
            return;
        };

        let key = job.exclusion_key();
        inner
            .busy_keys
            .lock()
            .expect("busy key lock poisoned")
            .insert(key.clone());

        match Arc::clone(&inner.semaphore).acquire_owned().await {
            Ok(permit) => {
                let handler = Arc::clone(&inner.handler);
                let busy_keys = Arc::clone(&inner.busy_keys);
                let timeout = inner.config.job_timeout;

                tokio::spawn(async move {
                    Self::execute_job(job, handler, timeout, permit).await;
                    busy_keys
                        .lock()
                        .expect("busy key lock poisoned")
                        .remove(&key);
                });
            }
            Err(_) => {
                // Semaphore closed, shutting down: requeue the job.
                inner
                    .busy_keys
                    .lock()
                    .expect("busy key lock poisoned")
                    .remove(&key);
                inner.queue.push(job);
            }
        }
    }

    async fn execute_job(
        job: WorkerJob,
        handler: Arc<WorkerJobHandler>,
        timeout: Duration,
        _permit: tokio::sync::OwnedSemaphorePermit,
    ) {
        match tokio::time::timeout(timeout, handler.handle(&job)).await {
            Ok(Ok(())) => tracing::debug!("Job completed: {job}"),
            Ok(Err(err)) => tracing::error!("Job failed: {job}, error: {err:?}"),
            Err(_) => {
                let err = Error::from(WorkerError::TimedOut {
                    job: job.to_string(),
                    limit_secs: timeout.as_secs(),
                });
                tracing::error!("{err}");
            }
        }
    }

    /// Stop gracefully: no new jobs start, in-flight jobs run to completion.
    pub async fn stop(&self) -> Result<(), Error> {
        let mut handles = self.inner.dispatcher_handles.write().await;
        if handles.is_empty() {
            tracing::debug!("Worker pool is already stopped");
            return Ok(());
        }

        tracing::info!("Shutting down worker pool...");
        self.inner.semaphore.close();
        self.inner.shutdown.notify_waiters();

        for (id, handle) in handles.drain(..).enumerate() {
            match tokio::time::timeout(self.inner.config.shutdown_timeout, handle).await {
                Ok(Ok(())) => tracing::debug!("Dispatcher {id} stopped cleanly"),
                Ok(Err(err)) => tracing::error!("Dispatcher {id} panicked: {err:?}"),
                Err(_) => tracing::warn!("Dispatcher {id} did not stop within timeout"),
            }
        }

        tracing::info!("Worker pool shut down, in-flight jobs will complete");
        Ok(())
    }

    pub async fn is_running(&self) -> bool {
        !self.inner.dispatcher_handles.read().await.is_empty()
    }

    pub fn available_permits(&self) -> usize {
        self.inner.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatcher_scaling() {
        assert_eq!(WorkerPoolConfig::new(1, Duration::from_secs(60)).dispatcher_count, 1);
        assert_eq!(WorkerPoolConfig::new(40, Duration::from_secs(60)).dispatcher_count, 1);
        assert_eq!(WorkerPoolConfig::new(41, Duration::from_secs(60)).dispatcher_count, 2);
        assert_eq!(WorkerPoolConfig::new(100, Duration::from_secs(60)).dispatcher_count, 3);
    }

    #[test]
    fn test_config_carries_job_timeout() {
        let config = WorkerPoolConfig::new(10, Duration::from_secs(600));
        assert_eq!(config.job_timeout, Duration::from_secs(600));
        assert_eq!(config.max_concurrent_jobs, 10);
    }
}
