//! Ramp rates and worst-case swings of a power series.

use itertools::Itertools;
use solgrid_quantities::{Kilowatts, WattsPerSecond};

use crate::{
    core::series::{Differences, Point, Series, Timestamp},
    prelude::*,
};

/// The largest absolute change of power between two consecutive samples.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SwingEvent {
    /// Timestamp of the later sample.
    pub timestamp: Timestamp,

    pub before: Kilowatts,
    pub after: Kilowatts,
    pub magnitude: Kilowatts,
}

#[must_use]
#[derive(Clone, Debug, Default)]
pub struct RampAnalysis {
    /// Ramp rate at each sample, zero at the first one.
    pub rates: Series<WattsPerSecond>,

    pub swing: Option<SwingEvent>,

    /// Rate with the largest magnitude, sign preserved.
    pub max_ramp: Option<Point<WattsPerSecond>>,
}

impl RampAnalysis {
    /// Ties resolve to the earliest sample.
    #[instrument(skip_all, fields(n_samples = series.len()))]
    pub fn analyze(series: &[Point<Kilowatts>]) -> Self {
        let Some((first_timestamp, _)) = series.first() else {
            return Self::default();
        };
        let rates = std::iter::once((*first_timestamp, WattsPerSecond::ZERO))
            .chain(
                series
                    .iter()
                    .copied()
                    .differences()
                    .map(|difference| (difference.to, difference.rate().finite_or_zero())),
            )
            .collect_vec();
        let swing = series
            .iter()
            .tuple_windows()
            .map(|((_, before), (timestamp, after))| SwingEvent {
                timestamp: *timestamp,
                before: *before,
                after: *after,
                magnitude: (*after - *before).abs(),
            })
            .filter(|event| event.magnitude.is_finite())
            .reduce(|worst, event| if event.magnitude > worst.magnitude { event } else { worst });
        let max_ramp = rates
            .iter()
            .copied()
            .reduce(|worst, point| if point.1.abs() > worst.1.abs() { point } else { worst });
        if let Some(swing) = swing {
            debug!(?swing.timestamp, ?swing.magnitude, "worst swing");
        }
        Self { rates, swing, max_ramp }
    }
}
