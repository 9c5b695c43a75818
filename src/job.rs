/*! Job records as found in an execution log. */

use thiserror::Error;

use crate::time::{Duration, Instant};

/// Error returned when a record's timestamps are not ordered as
/// `submit <= start <= stop`.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum InvalidJob {
    #[error("job started at {start} before it was submitted at {submit}")]
    StartedBeforeSubmit { submit: Instant, start: Instant },
    #[error("job stopped at {stop} before it started at {start}")]
    StoppedBeforeStart { start: Instant, stop: Instant },
}

/// One unit of work: when it was submitted, when it started running,
/// and when it stopped.
///
/// The fields are public so that callers can build records directly;
/// the analysis assumes `submit <= start <= stop` but does not
/// re-check it. Use [Job::new] to construct a validated record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Job {
    pub submit: Instant,
    pub start: Instant,
    pub stop: Instant,
}

impl Job {
    /// Construct a new job record, checking that
    /// `submit <= start <= stop`.
    pub fn new(submit: Instant, start: Instant, stop: Instant) -> Result<Self, InvalidJob> {
        if start < submit {
            return Err(InvalidJob::StartedBeforeSubmit { submit, start });
        }
        if stop < start {
            return Err(InvalidJob::StoppedBeforeStart { start, stop });
        }
        Ok(Job {
            submit,
            start,
            stop,
        })
    }

    /// How long the job was running.
    pub fn run_time(&self) -> Duration {
        self.stop.since(self.start)
    }
}

/// Total run time of all jobs, irrespective of any overlap.
pub fn total_run_time(jobs: &[Job]) -> Duration {
    jobs.iter().map(Job::run_time).sum()
}
