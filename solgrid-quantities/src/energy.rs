use std::ops::Div;

use crate::{power::Kilowatts, time::Hours};

quantity!(KilowattHours, via: f64, suffix: "kWh", precision: 2);

impl Div<Hours> for KilowattHours {
    type Output = Kilowatts;

    fn div(self, hours: Hours) -> Self::Output {
        Kilowatts(self.0 / hours.0)
    }
}
