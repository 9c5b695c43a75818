/*! Wait-time attribution

A job *waits* from its submission until the machine next becomes busy.
Jobs submitted while the machine is already busy do not wait at all,
and when several jobs are submitted into the same idle gap, the gap is
charged only once.
*/

use tracing::{debug, instrument, trace};

use crate::analysis::AnalysisError;
use crate::busy::BusySet;
use crate::job::Job;
use crate::time::Duration;

/// Compute the total wait time of `jobs`, given their merged busy
/// periods.
///
/// The busy set is consumed: every time a job is charged for an idle
/// gap, the start of the busy period ending that gap is pulled back to
/// the job's submission time, so that later jobs submitted into the
/// same gap are found to be submitted "while busy" and are not charged
/// again. Consequently, the outcome depends on the order of `jobs`, and
/// the busy set no longer describes the actual busy periods afterwards.
/// Compute anything else derived from it (e.g.,
/// [BusySet::total_time]) before calling this function.
///
/// Fails with [AnalysisError::InconsistentState] if a job is submitted
/// after the start of every busy period without being covered by one,
/// which cannot happen for jobs that satisfy `submit <= start`.
#[instrument(level = "debug", skip_all, fields(jobs = jobs.len(), busy_periods = busy.len()))]
pub fn total_wait_time(jobs: &[Job], mut busy: BusySet) -> Result<Duration, AnalysisError> {
    let mut total = Duration::zero();

    for job in jobs {
        let mut submitted = job.submit;

        // A job submitted while the machine is busy can only be
        // considered waiting once the busy period is over.
        if let Some(b) = busy.covering(submitted) {
            submitted = b.stop;
            // ... but the busy period already started when the job was
            // submitted, so something was running: no wait.
            if b.start <= submitted {
                trace!(submit = %job.submit, "submitted while busy");
                continue;
            }
        }

        let next = busy
            .next_after_mut(submitted)
            .ok_or(AnalysisError::InconsistentState { submitted })?;
        let wait = next.start.since(submitted);
        trace!(submit = %job.submit, busy_from = %next.start, %wait, "charged idle gap");
        total += wait;

        // Absorb the gap into the busy period so that it is charged
        // only once.
        next.start = submitted;
    }

    debug!(wait_time = %total, "attributed wait time");
    Ok(total)
}
