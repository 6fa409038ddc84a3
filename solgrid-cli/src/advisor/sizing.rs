use bon::Builder;
use solgrid_quantities::{Hours, KilowattHours, Kilowatts, Percentage};

use crate::statistics::ramp::SwingEvent;

/// Fixed multipliers turning a worst-case swing into a battery size.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct SizingPolicy {
    /// Power rating over the swing magnitude.
    #[builder(default = 1.2)]
    pub safety_factor: f64,

    /// Assumed full-power discharge duration.
    #[builder(default = Hours(2.0))]
    pub discharge_duration: Hours,
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct BatterySizing {
    pub swing: Kilowatts,
    pub power_rating: Kilowatts,
    pub energy_capacity: KilowattHours,

    /// Power rating over the swing.
    pub coverage: Percentage,

    /// Coverage beyond the full swing.
    pub margin: Percentage,
}

impl SizingPolicy {
    pub fn size(&self, swing: &SwingEvent) -> BatterySizing {
        let power_rating = swing.magnitude * self.safety_factor;
        let coverage = if swing.magnitude == Kilowatts::ZERO {
            Percentage::from_ratio(self.safety_factor)
        } else {
            Percentage::from_ratio(power_rating / swing.magnitude)
        };
        BatterySizing {
            swing: swing.magnitude,
            power_rating,
            energy_capacity: power_rating * self.discharge_duration,
            coverage,
            margin: coverage - Percentage::HUNDRED,
        }
    }
}
