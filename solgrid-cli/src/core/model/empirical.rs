//! Empirical model working from the zenith and azimuth reported in the weather feed.

use bon::Builder;
use solgrid_quantities::Kilowatts;

use crate::core::{
    irradiance::{PlaneOfArray, angle_of_incidence_deg, ground_reflected, isotropic_sky_diffuse},
    model::{PowerModel, derated_dc_power},
    segment::{RoofSegment, SystemConfig},
    thermal::{EMPIRICAL_REFERENCE_TEMPERATURE, empirical_module_temperature},
    weather::{SolarPosition, WeatherSample},
};

/// Relative DC loss per percentage point of relative humidity.
pub const HUMIDITY_DERATE: f64 = 0.002;

#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct EmpiricalModel {
    #[builder(default = 0.01)]
    pub loss_fraction: f64,

    #[builder(default = HUMIDITY_DERATE)]
    pub humidity_derate: f64,
}

impl PowerModel for EmpiricalModel {
    /// Ignores the computed position: the geometry comes from the sample itself.
    fn plane_of_array(
        &self,
        segment: &RoofSegment,
        sample: &WeatherSample,
        _position: &SolarPosition,
    ) -> PlaneOfArray {
        let aoi_deg = angle_of_incidence_deg(
            sample.zenith_deg,
            sample.azimuth_deg,
            segment.tilt_deg,
            segment.azimuth_deg,
        );
        let clear_fraction = 1.0 - sample.cloud_opacity.to_ratio();
        PlaneOfArray {
            direct: (sample.dni * aoi_deg.to_radians().cos() * clear_fraction).non_negative(),
            sky_diffuse: isotropic_sky_diffuse(sample.dhi, segment.tilt_deg),
            ground_reflected: ground_reflected(sample.ghi, sample.albedo, segment.tilt_deg),
        }
    }

    fn dc_power(
        &self,
        system: &SystemConfig,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> Kilowatts {
        let poa = self.plane_of_array(segment, sample, position).global();
        let module_temperature = empirical_module_temperature(poa, sample.air_temperature);
        derated_dc_power(system, segment, poa, module_temperature - EMPIRICAL_REFERENCE_TEMPERATURE)
            * (1.0 - self.humidity_derate * sample.relative_humidity.0)
    }

    fn system_loss(&self) -> f64 {
        self.loss_fraction
    }
}
