//! Battery dispatch that holds a day's output to a smoothed target.

use chrono::{NaiveDate, TimeDelta};
use itertools::Itertools;
use solgrid_quantities::{KilowattHours, Kilowatts, Percentage};

use crate::{
    advisor::{sizing::BatterySizing, smoothing::Smoother},
    core::series::{Point, Series},
    prelude::*,
};

/// Samples of one local calendar day.
pub fn select_day(series: &[Point<Kilowatts>], date: NaiveDate) -> Series<Kilowatts> {
    series.iter().copied().filter(|(timestamp, _)| timestamp.date_naive() == date).collect()
}

#[must_use]
#[derive(Clone, Debug)]
pub struct Dispatch {
    pub smoother: Smoother,

    pub target: Series<Kilowatts>,

    /// Raw minus target: positive when charging, negative when discharging.
    pub battery: Series<Kilowatts>,

    pub peak_charge: Kilowatts,
    pub peak_discharge: Kilowatts,

    /// Largest battery power magnitude relative to the power rating.
    pub utilization: Percentage,

    /// Peak-to-trough range of the cumulative battery energy.
    pub energy_excursion: KilowattHours,
}

impl Dispatch {
    #[instrument(skip_all, fields(smoother = %smoother, n_samples = day.len()))]
    pub fn simulate(
        day: &[Point<Kilowatts>],
        smoother: Smoother,
        sizing: &BatterySizing,
        interval: TimeDelta,
    ) -> Self {
        let raw = day.iter().map(|(_, power)| power.finite_or_zero()).collect_vec();
        let target =
            day.iter().map(|(timestamp, _)| *timestamp).zip(smoother.smooth(&raw)).collect_vec();
        let battery = day
            .iter()
            .zip(&raw)
            .zip(&target)
            .map(|(((timestamp, _), raw), (_, target))| (*timestamp, *raw - *target))
            .collect_vec();

        let peak_charge = battery.iter().map(|(_, power)| *power).max().unwrap_or_default();
        let peak_discharge = battery.iter().map(|(_, power)| *power).min().unwrap_or_default();
        let utilization = utilization(peak_charge, peak_discharge, sizing.power_rating);

        let (_, lowest, highest) = battery.iter().fold(
            (KilowattHours::ZERO, KilowattHours::ZERO, KilowattHours::ZERO),
            |(stored, lowest, highest), (_, power)| {
                let stored = stored + *power * interval;
                (stored, lowest.min(stored), highest.max(stored))
            },
        );

        let this = Self {
            smoother,
            target,
            battery,
            peak_charge,
            peak_discharge,
            utilization,
            energy_excursion: highest - lowest,
        };
        debug!(?this.utilization, ?this.energy_excursion, "simulated");
        this
    }

    /// Whether a battery of the size can follow the target all day.
    ///
    /// The sizing may differ from the one simulated against.
    #[must_use]
    pub fn is_feasible(&self, sizing: &BatterySizing) -> bool {
        utilization(self.peak_charge, self.peak_discharge, sizing.power_rating) <= Percentage::HUNDRED
            && self.energy_excursion <= sizing.energy_capacity
    }
}

/// Largest battery power magnitude against the rating, infinite when a zero rating has to move.
fn utilization(peak_charge: Kilowatts, peak_discharge: Kilowatts, power_rating: Kilowatts) -> Percentage {
    let peak = peak_charge.abs().max(peak_discharge.abs());
    if power_rating > Kilowatts::ZERO {
        Percentage::from_ratio(peak / power_rating)
    } else if peak == Kilowatts::ZERO {
        Percentage::ZERO
    } else {
        Percentage(f64::INFINITY)
    }
}
