//! Query timing metrics.

use metrics::histogram;
use std::time::Instant;

/// Times one repository query and reports it to the
/// `database_query_duration_seconds` histogram, labelled by query name.
///
/// Repository methods create a timer before running their query and call
/// `record` once the result is in, so failed queries are timed too.
pub struct QueryTimer {
    name: &'static str,
    started: Instant,
}

impl QueryTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            started: Instant::now(),
        }
    }

    pub fn record(self) {
        histogram!("database_query_duration_seconds", "query" => self.name)
            .record(self.started.elapsed().as_secs_f64());
    }
}
