/*! Busy periods: when was the machine occupied by at least one job?

This module provides [merge], which turns the (arbitrarily
overlapping) execution spans of a set of [Job]s into the minimal set
of disjoint, non-touching [BusyInterval]s covering them, as well as
[brute_force_merge], a naive pairwise fixed-point version of the same
computation that serves as a reference.
*/

use std::fmt;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::analysis::AnalysisError;
use crate::job::Job;
use crate::time::{Duration, Instant};

/// A contiguous period during which the machine is occupied.
///
/// Intervals are closed: an interval that stops at the very instant
/// another one starts is considered to overlap with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BusyInterval {
    pub start: Instant,
    pub stop: Instant,
}

impl BusyInterval {
    pub fn new(start: Instant, stop: Instant) -> Self {
        BusyInterval { start, stop }
    }

    /// The interval during which `job` was running.
    pub fn of_job(job: &Job) -> Self {
        BusyInterval::new(job.start, job.stop)
    }

    pub fn length(&self) -> Duration {
        self.stop.since(self.start)
    }

    /// Does the interval contain the point in time `t`?
    pub fn contains(&self, t: Instant) -> bool {
        self.start <= t && t <= self.stop
    }

    /// Do the two intervals overlap or share an endpoint, i.e., must
    /// they be merged into one busy period?
    pub fn touches(&self, other: &BusyInterval) -> bool {
        self.start <= other.stop && other.start <= self.stop
    }

    /// The smallest interval covering both `self` and `other`.
    ///
    /// Only meaningful if the two intervals [touch][Self::touches].
    pub fn union(&self, other: &BusyInterval) -> BusyInterval {
        BusyInterval::new(self.start.min(other.start), self.stop.max(other.stop))
    }
}

impl fmt::Display for BusyInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.stop)
    }
}

/// The working set of busy periods.
///
/// Sets produced by [merge] are sorted by start time and no two of
/// their intervals touch. The order carries no meaning beyond that.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusySet {
    intervals: Vec<BusyInterval>,
}

impl BusySet {
    /// Merge an arbitrary collection of intervals into a set of
    /// disjoint busy periods.
    pub fn from_intervals(mut intervals: Vec<BusyInterval>) -> Self {
        intervals.sort_unstable();
        // Sorted by start, so each interval either extends the most
        // recently retained one or opens a new busy period.
        intervals.dedup_by(|next, current| {
            if current.touches(next) {
                *current = current.union(next);
                true
            } else {
                false
            }
        });
        BusySet { intervals }
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BusyInterval> {
        self.intervals.iter()
    }

    pub fn as_slice(&self) -> &[BusyInterval] {
        &self.intervals
    }

    /// Total time during which the machine was busy.
    pub fn total_time(&self) -> Duration {
        self.intervals.iter().map(BusyInterval::length).sum()
    }

    /// The first interval that contains `t`, if any.
    pub fn covering(&self, t: Instant) -> Option<&BusyInterval> {
        self.intervals.iter().find(|b| b.contains(t))
    }

    /// The interval that starts soonest after `t` (strictly). Among
    /// equally close intervals, the first one wins.
    pub fn next_after_mut(&mut self, t: Instant) -> Option<&mut BusyInterval> {
        let mut best: Option<&mut BusyInterval> = None;
        for b in self.intervals.iter_mut().filter(|b| b.start > t) {
            let closer = match &best {
                Some(current) => b.start < current.start,
                None => true,
            };
            if closer {
                best = Some(b);
            }
        }
        best
    }
}

impl fmt::Display for BusySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Busy periods:")?;
        for b in &self.intervals {
            writeln!(f, "  {}", b)?;
        }
        Ok(())
    }
}

/// Beyond this many jobs, debug builds skip the cross-check against
/// [brute_force_merge], which is cubic in the number of jobs.
const BRUTE_FORCE_CHECK_LIMIT: usize = 256;

/// Copy the execution span of every job into a fresh interval.
fn seed(jobs: &[Job]) -> Result<Vec<BusyInterval>, AnalysisError> {
    let mut intervals = Vec::new();
    intervals
        .try_reserve_exact(jobs.len())
        .map_err(|_| AnalysisError::OutOfMemory { jobs: jobs.len() })?;
    intervals.extend(jobs.iter().map(BusyInterval::of_job));
    Ok(intervals)
}

/// Compute the busy periods of the given jobs.
///
/// The result covers exactly the union of all `[start, stop]` spans
/// of the jobs, is sorted by start time, and contains no two
/// intervals that touch. An empty job set yields an empty set.
#[instrument(level = "debug", skip_all, fields(jobs = jobs.len()))]
pub fn merge(jobs: &[Job]) -> Result<BusySet, AnalysisError> {
    let busy = BusySet::from_intervals(seed(jobs)?);
    debug!(
        busy_periods = busy.len(),
        busy_time = %busy.total_time(),
        "merged job spans"
    );
    // In debug mode, compare against the brute-force solution.
    if cfg!(debug_assertions) && jobs.len() <= BRUTE_FORCE_CHECK_LIMIT {
        debug_assert_eq!(brute_force_merge(jobs).as_ref(), Ok(&busy));
    }
    Ok(busy)
}

/// Very slow, naive version of [merge]: repeatedly look for any pair
/// of touching intervals, replace the pair by its union, and start
/// over, until a full scan finds nothing left to merge. Do not use
/// --- use [merge] instead.
///
/// Each step removes one interval, so the search terminates after at
/// most as many steps as there are jobs.
pub fn brute_force_merge(jobs: &[Job]) -> Result<BusySet, AnalysisError> {
    let mut intervals = seed(jobs)?;
    while let Some((i, j)) = (0..intervals.len())
        .tuple_combinations()
        .find(|&(i, j)| intervals[i].touches(&intervals[j]))
    {
        // i < j, so removing j leaves i in place
        let absorbed = intervals.swap_remove(j);
        intervals[i] = intervals[i].union(&absorbed);
    }
    intervals.sort_unstable();
    Ok(BusySet { intervals })
}
