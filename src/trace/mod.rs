/*! Reading job logs

A job log is a text file with one job per line, each consisting of
three whitespace-separated non-negative integers:

```text
submit start stop
```

Fields beyond the third are ignored. Blank lines and lines starting
with `#` are skipped.
*/

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::job::{InvalidJob, Job};
use crate::time::{Instant, Time};

/// Error type returned when a job log cannot be read.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read job log")]
    Io(#[from] io::Error),
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("line {line}: invalid job")]
    InvalidJob {
        line: usize,
        #[source]
        source: InvalidJob,
    },
}

const FIELDS: [&str; 3] = ["submit", "start", "stop"];

/// Parse a single (non-blank) line into a job.
fn parse_line(text: &str, line: usize) -> Result<Job, TraceError> {
    let mut fields = text.split_whitespace();
    let mut times = [Instant::epoch(); 3];
    for (slot, name) in times.iter_mut().zip(FIELDS) {
        let field = fields.next().ok_or_else(|| TraceError::Malformed {
            line,
            reason: format!("missing {} time", name),
        })?;
        let value: Time = field.parse().map_err(|e| TraceError::Malformed {
            line,
            reason: format!("bad {} time {:?}: {}", name, field, e),
        })?;
        *slot = Instant::from(value);
    }
    let [submit, start, stop] = times;
    Job::new(submit, start, stop).map_err(|source| TraceError::InvalidJob { line, source })
}

/// Read all jobs from a job log, in the order in which they appear.
pub fn parse_jobs(reader: impl BufRead) -> Result<Vec<Job>, TraceError> {
    let mut jobs = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        jobs.push(parse_line(text, i + 1)?);
    }
    debug!(jobs = jobs.len(), "parsed job log");
    Ok(jobs)
}

/// Read all jobs from the job log stored at `path`.
pub fn load_jobs(path: impl AsRef<Path>) -> Result<Vec<Job>, TraceError> {
    let file = File::open(path.as_ref())?;
    parse_jobs(BufReader::new(file))
}
