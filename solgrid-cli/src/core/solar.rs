//! Sun position for a site.
//!
//! The NOAA solar calculator equations (fractional-year series for the equation of time and
//! declination) with the NOAA approximation of atmospheric refraction on top. Good to a fraction
//! of a degree, which is well within what a 5-minute irradiance series can resolve.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate, Timelike, Utc};

use crate::core::{
    series::Timestamp,
    weather::{SolarPosition, WeatherSample},
};

pub trait SolarPositionProvider {
    fn position(&self, timestamp: Timestamp) -> SolarPosition;

    /// Positions aligned one-to-one with the samples.
    fn positions(&self, samples: &[WeatherSample]) -> Vec<SolarPosition> {
        samples.iter().map(|sample| self.position(sample.timestamp)).collect()
    }
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct Noaa {
    pub latitude_deg: f64,

    /// Positive towards the east.
    pub longitude_deg: f64,
}

impl SolarPositionProvider for Noaa {
    fn position(&self, timestamp: Timestamp) -> SolarPosition {
        let timestamp = timestamp.with_timezone(&Utc);
        let hour = f64::from(timestamp.hour())
            + f64::from(timestamp.minute()) / 60.0
            + f64::from(timestamp.second()) / 3600.0;
        let days_in_year = if NaiveDate::from_yo_opt(timestamp.year(), 366).is_some() {
            366.0
        } else {
            365.0
        };
        let gamma =
            2.0 * PI / days_in_year * (f64::from(timestamp.ordinal0()) + (hour - 12.0) / 24.0);

        let equation_of_time = 229.18
            * (0.000_075 + 0.001_868 * gamma.cos()
                - 0.032_077 * gamma.sin()
                - 0.014_615 * (2.0 * gamma).cos()
                - 0.040_849 * (2.0 * gamma).sin());
        let declination = 0.006_918 - 0.399_912 * gamma.cos() + 0.070_257 * gamma.sin()
            - 0.006_758 * (2.0 * gamma).cos()
            + 0.000_907 * (2.0 * gamma).sin()
            - 0.002_697 * (3.0 * gamma).cos()
            + 0.001_48 * (3.0 * gamma).sin();

        let true_solar_minutes = hour * 60.0 + equation_of_time + 4.0 * self.longitude_deg;
        let hour_angle = (true_solar_minutes / 4.0 - 180.0).to_radians();
        let latitude = self.latitude_deg.to_radians();

        let cos_zenith = (latitude.sin() * declination.sin()
            + latitude.cos() * declination.cos() * hour_angle.cos())
        .clamp(-1.0, 1.0);
        let zenith = cos_zenith.acos();

        // Both terms are scaled by `cos(latitude) · sin(zenith)`, which cancels out in `atan2`:
        let east = -hour_angle.sin() * declination.cos() * latitude.cos();
        let north = declination.sin() - latitude.sin() * zenith.cos();
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);

        let elevation_deg = 90.0 - zenith.to_degrees();
        SolarPosition {
            apparent_zenith_deg: 90.0 - (elevation_deg + refraction_deg(elevation_deg)),
            azimuth_deg,
        }
    }
}

/// Approximate atmospheric refraction in degrees for the true solar elevation.
#[must_use]
pub fn refraction_deg(elevation_deg: f64) -> f64 {
    let tan_elevation = elevation_deg.to_radians().tan();
    let arc_seconds = if elevation_deg > 85.0 {
        0.0
    } else if elevation_deg > 5.0 {
        58.1 / tan_elevation - 0.07 / tan_elevation.powi(3) + 0.000_086 / tan_elevation.powi(5)
    } else if elevation_deg > -0.575 {
        1735.0
            + elevation_deg
                * (-518.2 + elevation_deg * (103.4 + elevation_deg * (-12.79 + elevation_deg * 0.711)))
    } else {
        -20.772 / tan_elevation
    };
    arc_seconds / 3600.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use chrono_tz::Africa::Johannesburg;

    use super::*;

    const DURBAN: Noaa = Noaa { latitude_deg: -29.815_268, longitude_deg: 30.946_439 };

    #[test]
    fn test_summer_solar_noon() {
        // Solar noon in Durban is just before 12:00 SAST; the sun stands ~6° from the zenith.
        let position = DURBAN.position(Johannesburg.with_ymd_and_hms(2024, 12, 21, 11, 55, 0).unwrap());
        assert!(
            (5.0..8.0).contains(&position.apparent_zenith_deg),
            "{}",
            position.apparent_zenith_deg,
        );
    }

    #[test]
    fn test_winter_solar_noon() {
        let position = DURBAN.position(Johannesburg.with_ymd_and_hms(2024, 6, 21, 11, 55, 0).unwrap());
        // Latitude minus the northern declination:
        assert!(
            (52.0..54.5).contains(&position.apparent_zenith_deg),
            "{}",
            position.apparent_zenith_deg,
        );
        // The sun culminates due north in the southern hemisphere winter:
        assert!(position.azimuth_deg < 10.0 || position.azimuth_deg > 350.0);
    }

    #[test]
    fn test_morning_sun_is_east() {
        let position = DURBAN.position(Johannesburg.with_ymd_and_hms(2024, 3, 20, 8, 0, 0).unwrap());
        assert!((45.0..135.0).contains(&position.azimuth_deg), "{}", position.azimuth_deg);
        assert!(position.apparent_zenith_deg < 90.0);
    }

    #[test]
    fn test_night() {
        let position = DURBAN.position(Johannesburg.with_ymd_and_hms(2024, 3, 20, 0, 0, 0).unwrap());
        assert!(position.apparent_zenith_deg > 90.0);
    }

    #[test]
    fn test_refraction() {
        assert_abs_diff_eq!(refraction_deg(89.0), 0.0);
        assert_abs_diff_eq!(refraction_deg(0.0), 1735.0 / 3600.0);
        assert!(refraction_deg(10.0) > refraction_deg(45.0));
    }

    #[test]
    fn test_positions_are_aligned() {
        let start = Johannesburg.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let samples: Vec<_> = (0..3)
            .map(|i| WeatherSample::builder().timestamp(start + chrono::TimeDelta::hours(i)).build())
            .collect();
        assert_eq!(DURBAN.positions(&samples).len(), 3);
    }
}
