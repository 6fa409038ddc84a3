use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta};
use solgrid_quantities::{KilowattHours, Kilowatts, Percentage};

use crate::{
    core::series::{Point, ResampleDaily},
    prelude::*,
};

/// Daily and annual energy of one power series.
#[must_use]
#[derive(Clone, Debug, Default)]
pub struct EnergyResult {
    /// Local calendar day to the energy produced on it.
    pub daily: BTreeMap<NaiveDate, KilowattHours>,

    pub annual: KilowattHours,

    /// Samples with a non-finite power, or unusable reference cells, counted as zero.
    pub n_non_finite: usize,
}

impl EnergyResult {
    /// Wrap daily totals that come from elsewhere, such as an external reference series.
    pub fn from_daily(daily: BTreeMap<NaiveDate, KilowattHours>, n_non_finite: usize) -> Self {
        let annual = daily.values().copied().sum();
        Self { daily, annual, n_non_finite }
    }

    /// Integrate the power over the nominal sampling interval.
    #[instrument(skip_all, fields(n_samples = series.len()))]
    pub fn integrate(series: &[Point<Kilowatts>], interval: TimeDelta) -> Self {
        let n_non_finite = series.iter().filter(|(_, power)| !power.is_finite()).count();
        if n_non_finite != 0 {
            warn!(n_non_finite, "non-finite power treated as zero");
        }
        let daily = series
            .iter()
            .map(|(timestamp, power)| (*timestamp, power.finite_or_zero() * interval))
            .sum_daily();
        Self::from_daily(daily, n_non_finite)
    }

    /// The most productive day, the earliest one on a tie.
    #[must_use]
    pub fn best_day(&self) -> Option<(NaiveDate, KilowattHours)> {
        self.daily
            .iter()
            .map(|(date, energy)| (*date, *energy))
            .reduce(|best, day| if day.1 > best.1 { day } else { best })
    }

    #[must_use]
    pub fn worst_day(&self) -> Option<(NaiveDate, KilowattHours)> {
        self.daily
            .iter()
            .map(|(date, energy)| (*date, *energy))
            .reduce(|worst, day| if day.1 < worst.1 { day } else { worst })
    }
}

/// Annual energy of one model relative to another.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct EnergyComparison {
    pub difference: KilowattHours,

    /// The difference relative to the reference, when the reference is non-zero.
    pub relative: Option<Percentage>,
}

impl EnergyComparison {
    pub fn new(annual: KilowattHours, reference: KilowattHours) -> Self {
        let difference = annual - reference;
        let relative = (reference != KilowattHours::ZERO)
            .then(|| Percentage::from_ratio(difference / reference));
        Self { difference, relative }
    }
}
