//! Staggering of per-owner jobs across a scheduling window.
//!
//! Syncing every owner at once would burst against ESI's rate limits, so
//! each scheduling pass spreads its jobs evenly across the window.

use chrono::{DateTime, Duration, Utc};

use crate::model::worker::WorkerJob;

/// Pair each job with an execution time spread evenly across the window,
/// starting now.
pub fn create_job_schedule(
    jobs: Vec<WorkerJob>,
    schedule_interval: Duration,
) -> Vec<(WorkerJob, DateTime<Utc>)> {
    let count = jobs.len();
    if count == 0 {
        return Vec::new();
    }

    let now = Utc::now();
    let step_ms = schedule_interval.num_milliseconds() / count as i64;

    jobs.into_iter()
        .enumerate()
        .map(|(index, job)| (job, now + Duration::milliseconds(step_ms * index as i64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_job_list() {
        let schedule = create_job_schedule(Vec::new(), Duration::minutes(30));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_single_job_runs_immediately() {
        let before = Utc::now();
        let schedule = create_job_schedule(
            vec![WorkerJob::UpdateStructures { owner_id: 1 }],
            Duration::minutes(30),
        );
        assert_eq!(schedule.len(), 1);
        assert!(schedule[0].1 >= before);
        assert!(schedule[0].1 <= Utc::now() + Duration::seconds(1));
    }

    #[test]
    fn test_jobs_are_spread_evenly() {
        let jobs: Vec<WorkerJob> = (1..=6)
            .map(|owner_id| WorkerJob::UpdateStructures { owner_id })
            .collect();
        let schedule = create_job_schedule(jobs, Duration::minutes(30));

        assert_eq!(schedule.len(), 6);
        // 30 minutes / 6 jobs = 5 minutes apart.
        for pair in schedule.windows(2) {
            let gap = pair[1].1 - pair[0].1;
            assert_eq!(gap, Duration::minutes(5));
        }
    }
}
