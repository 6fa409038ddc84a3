//! Monthly diurnal profile of the weather.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use average::{Estimate, Mean};
use chrono::{Datelike, Timelike};

use crate::core::weather::WeatherSample;

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum ClimateVariable {
    /// Global horizontal irradiance.
    Ghi,

    RelativeHumidity,

    CloudOpacity,

    AirTemperature,
}

impl ClimateVariable {
    const fn value(self, sample: &WeatherSample) -> f64 {
        match self {
            Self::Ghi => sample.ghi.0,
            Self::RelativeHumidity => sample.relative_humidity.0,
            Self::CloudOpacity => sample.cloud_opacity.0,
            Self::AirTemperature => sample.air_temperature.0,
        }
    }

    pub const fn unit(self) -> &'static str {
        match self {
            Self::Ghi => "W/m²",
            Self::RelativeHumidity | Self::CloudOpacity => "%",
            Self::AirTemperature => "°C",
        }
    }
}

impl Display for ClimateVariable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ghi => write!(f, "GHI"),
            Self::RelativeHumidity => write!(f, "Relative humidity"),
            Self::CloudOpacity => write!(f, "Cloud opacity"),
            Self::AirTemperature => write!(f, "Air temperature"),
        }
    }
}

/// Mean of a variable per local `(month, hour)`.
#[must_use]
#[derive(Clone, Debug)]
pub struct DiurnalProfile {
    pub variable: ClimateVariable,
    means: BTreeMap<(u32, u32), Mean>,
}

impl DiurnalProfile {
    pub fn new(variable: ClimateVariable, samples: &[WeatherSample]) -> Self {
        let mut means = BTreeMap::<_, Mean>::new();
        for sample in samples {
            means
                .entry((sample.timestamp.month(), sample.timestamp.hour()))
                .or_default()
                .add(variable.value(sample));
        }
        Self { variable, means }
    }

    /// `None` for a month and hour without samples.
    #[must_use]
    pub fn mean(&self, month: u32, hour: u32) -> Option<f64> {
        self.means.get(&(month, hour)).map(Mean::mean)
    }

    /// Months with at least one sample.
    pub fn months(&self) -> impl Iterator<Item = u32> {
        let mut months = self.means.keys().map(|(month, _)| *month).collect::<Vec<_>>();
        months.dedup();
        months.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone};
    use chrono_tz::Africa::Johannesburg;
    use solgrid_quantities::{Celsius, WattsPerSquareMeter};

    use super::*;

    #[test]
    fn test_profile() {
        let start = Johannesburg.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let samples = [0, 30, 60 * 24]
            .into_iter()
            .enumerate()
            .map(|(i, minutes)| {
                WeatherSample::builder()
                    .timestamp(start + TimeDelta::minutes(minutes))
                    .ghi(WattsPerSquareMeter(100.0 * (i + 1) as f64))
                    .air_temperature(Celsius(20.0))
                    .build()
            })
            .collect::<Vec<_>>();

        let ghi = DiurnalProfile::new(ClimateVariable::Ghi, &samples);
        assert_abs_diff_eq!(ghi.mean(1, 12).unwrap(), 150.0);
        assert_abs_diff_eq!(ghi.mean(2, 12).unwrap(), 300.0);
        assert!(ghi.mean(1, 13).is_none());
        assert_eq!(ghi.months().collect::<Vec<_>>(), [1, 2]);

        let temperature = DiurnalProfile::new(ClimateVariable::AirTemperature, &samples);
        assert_abs_diff_eq!(temperature.mean(2, 12).unwrap(), 20.0);
    }
}
