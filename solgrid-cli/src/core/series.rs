mod difference;
mod resample;

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use itertools::Itertools;

pub use self::{
    difference::{Difference, Differences},
    resample::ResampleDaily,
};

/// Site-local timestamp.
pub type Timestamp = DateTime<Tz>;

pub type Point<V> = (Timestamp, V);
pub type Series<V> = Vec<Point<V>>;

/// Deviations of consecutive timestamps from the nominal sampling interval.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct SamplingReport {
    /// Consecutive samples sharing a timestamp.
    pub n_duplicates: usize,

    /// Consecutive samples further apart than the nominal interval.
    pub n_gaps: usize,

    /// Consecutive samples closer than the nominal interval, or out of order.
    pub n_irregular: usize,
}

impl SamplingReport {
    pub fn inspect<V>(series: &[Point<V>], interval: TimeDelta) -> Self {
        series.iter().map(|(timestamp, _)| *timestamp).tuple_windows().fold(
            Self::default(),
            |mut report, (previous, current)| {
                let elapsed = current - previous;
                if elapsed == TimeDelta::zero() {
                    report.n_duplicates += 1;
                } else if elapsed > interval {
                    report.n_gaps += 1;
                } else if elapsed < interval {
                    report.n_irregular += 1;
                }
                report
            },
        )
    }

    #[must_use]
    pub const fn is_regular(&self) -> bool {
        self.n_duplicates == 0 && self.n_gaps == 0 && self.n_irregular == 0
    }
}
