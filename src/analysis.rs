/*! The complete analysis pipeline: merge busy periods, then attribute
wait time, and summarize the results. */

use std::fmt;

use thiserror::Error;
use tracing::{info, instrument};

use crate::busy::{self, BusySet};
use crate::job::{self, Job};
use crate::time::{Duration, Instant};
use crate::wait;

/// Error type returned when the analysis cannot produce a result.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum AnalysisError {
    /// Not enough memory to hold the busy periods of all jobs.
    #[error("out of memory while building busy periods for {jobs} jobs")]
    OutOfMemory { jobs: usize },
    /// A submission was found that lies after the start of every
    /// busy period without being covered by one. This means that the
    /// input violated `submit <= start <= stop`.
    #[error("no busy period starts after the submission at {submitted}")]
    InconsistentState { submitted: Instant },
}

/// The aggregate statistics of a job log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of jobs analyzed.
    pub jobs: usize,
    /// Number of distinct busy periods.
    pub busy_periods: usize,
    /// Time between submissions and the machine next becoming busy,
    /// with shared idle gaps charged once.
    pub wait_time: Duration,
    /// Sum of the run times of all jobs.
    pub run_time: Duration,
    /// Time during which at least one job was running.
    pub busy_time: Duration,
    /// Earliest submission and latest completion, if there are any jobs.
    pub window: Option<(Instant, Instant)>,
}

impl Summary {
    /// Average wait time per job.
    pub fn mean_wait(&self) -> Option<f64> {
        if self.jobs > 0 {
            Some(self.wait_time.as_f64() / self.jobs as f64)
        } else {
            None
        }
    }

    /// Fraction of the observation window during which the machine
    /// was busy.
    pub fn utilization(&self) -> Option<f64> {
        let (first, last) = self.window?;
        let length = last.since(first);
        if length.is_zero() {
            None
        } else {
            Some(self.busy_time.as_f64() / length.as_f64())
        }
    }

    /// Render the three totals, labelled with the given time unit.
    pub fn report(&self, unit: &str) -> String {
        format!(
            "Total wait time: {} {unit}\nTotal run time:  {} {unit}\nTotal busy time: {} {unit}\n",
            self.wait_time,
            self.run_time,
            self.busy_time,
            unit = unit
        )
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.report("seconds"))
    }
}

/// The earliest submission and the latest completion among `jobs`.
fn observation_window(jobs: &[Job]) -> Option<(Instant, Instant)> {
    let first = jobs.iter().map(|j| j.submit).min()?;
    let last = jobs.iter().map(|j| j.stop).max()?;
    Some((first, last))
}

/// Summarize `jobs` given their merged busy periods.
///
/// The busy time is taken from `busy` before the set is handed over
/// to (and consumed by) the wait-time attribution.
#[instrument(level = "debug", skip_all, fields(jobs = jobs.len()))]
pub fn summarize(jobs: &[Job], busy: BusySet) -> Result<Summary, AnalysisError> {
    let busy_periods = busy.len();
    let busy_time = busy.total_time();
    let run_time = job::total_run_time(jobs);
    let wait_time = wait::total_wait_time(jobs, busy)?;

    let summary = Summary {
        jobs: jobs.len(),
        busy_periods,
        wait_time,
        run_time,
        busy_time,
        window: observation_window(jobs),
    };
    info!(
        jobs = summary.jobs,
        busy_periods,
        %wait_time,
        %run_time,
        %busy_time,
        "analysis complete"
    );
    Ok(summary)
}

/// Analyze a job log: merge the busy periods and summarize.
pub fn analyze(jobs: &[Job]) -> Result<Summary, AnalysisError> {
    let busy = busy::merge(jobs)?;
    summarize(jobs, busy)
}
