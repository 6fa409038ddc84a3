use std::ops::{Div, Mul};

use chrono::TimeDelta;

use crate::{energy::KilowattHours, ramp::WattsPerSecond, time::Hours};

quantity!(Watts, via: f64, suffix: "W", precision: 0);
quantity!(Kilowatts, via: f64, suffix: "kW", precision: 3);

impl From<Kilowatts> for Watts {
    fn from(kilowatts: Kilowatts) -> Self {
        Self(kilowatts.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(watts: Watts) -> Self {
        Self(watts.0 / 1000.0)
    }
}

impl Mul<Hours> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, hours: Hours) -> Self::Output {
        KilowattHours(self.0 * hours.0)
    }
}

impl Mul<TimeDelta> for Kilowatts {
    type Output = KilowattHours;

    fn mul(self, time_delta: TimeDelta) -> Self::Output {
        self * Hours::from(time_delta)
    }
}

impl Div<TimeDelta> for Kilowatts {
    type Output = WattsPerSecond;

    /// Power change per elapsed time.
    ///
    /// Zero or negative elapsed time yields zero rather than an infinity.
    fn div(self, time_delta: TimeDelta) -> Self::Output {
        let seconds = time_delta.as_seconds_f64();
        if seconds > 0.0 { WattsPerSecond(self.0 * 1000.0 / seconds) } else { WattsPerSecond::ZERO }
    }
}
