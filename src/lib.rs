/*! Wait-time analysis of batch job logs.

Given a log of jobs, each described by the time it was submitted, the
time it started, and the time it stopped, this crate computes

- the total **run time** of all jobs (overlap counted repeatedly),
- the total **busy time**, i.e., how long at least one job was
  running, based on the merged [busy periods][busy::merge], and
- the total **wait time**, i.e., how long submitted jobs had to wait
  for the machine to become busy, where an idle gap into which
  several jobs are submitted is charged only once (see
  [wait::total_wait_time]).

The main entry point is [analysis::analyze]; [trace] reads job logs
in the usual `submit start stop` text format.
*/

pub mod analysis;
pub mod busy;
pub mod job;
pub mod time;
pub mod trace;
pub mod wait;

pub use analysis::{analyze, AnalysisError, Summary};
pub use job::Job;

#[cfg(test)]
mod tests {
    use crate::job::Job;
    use crate::time::{Duration, Instant, Time};

    // helpers to make tests less verbose

    pub fn t(val: Time) -> Instant {
        Instant::from(val)
    }

    pub fn d(val: Time) -> Duration {
        Duration::from(val)
    }

    pub fn job(submit: Time, start: Time, stop: Time) -> Job {
        Job::new(t(submit), t(start), t(stop)).unwrap()
    }
}
