pub mod handler;
pub mod pool;
pub mod queue;

use std::time::Duration;

pub use pool::WorkerPool;
pub use queue::WorkerQueue;

use crate::worker::{handler::WorkerJobHandler, pool::WorkerPoolConfig};

#[derive(Clone)]
pub struct Worker {
    pub queue: WorkerQueue,
    pub pool: WorkerPool,
}

impl Worker {
    pub fn new(
        max_concurrent_jobs: usize,
        job_timeout: Duration,
        queue: WorkerQueue,
        handler: WorkerJobHandler,
    ) -> Self {
        let config = WorkerPoolConfig::new(max_concurrent_jobs, job_timeout);
        let pool = WorkerPool::new(config, queue.clone(), handler);

        Self { queue, pool }
    }
}
