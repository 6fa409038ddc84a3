use bon::Builder;
use solgrid_quantities::{Celsius, Percentage, WattsPerSquareMeter};

use crate::core::series::Timestamp;

/// Meteorological fields at one timestamp.
///
/// Absent fields are zero, never missing.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct WeatherSample {
    pub timestamp: Timestamp,

    /// Direct normal irradiance.
    #[builder(default)]
    pub dni: WattsPerSquareMeter,

    /// Global horizontal irradiance.
    #[builder(default)]
    pub ghi: WattsPerSquareMeter,

    /// Diffuse horizontal irradiance.
    #[builder(default)]
    pub dhi: WattsPerSquareMeter,

    #[builder(default)]
    pub air_temperature: Celsius,

    /// Ground reflectance, `0..=1`.
    #[builder(default)]
    pub albedo: f64,

    /// Solar zenith as reported by the weather source, degrees.
    #[builder(default)]
    pub zenith_deg: f64,

    /// Solar azimuth as reported by the weather source, degrees clockwise from north.
    #[builder(default)]
    pub azimuth_deg: f64,

    #[builder(default)]
    pub cloud_opacity: Percentage,

    #[builder(default)]
    pub relative_humidity: Percentage,

    /// Wind speed at 10 m, metres per second.
    #[builder(default)]
    pub wind_speed: f64,
}

/// Sun position from a dedicated solar-position provider.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SolarPosition {
    /// Refraction-corrected zenith angle, degrees.
    pub apparent_zenith_deg: f64,

    /// Degrees clockwise from north.
    pub azimuth_deg: f64,
}
