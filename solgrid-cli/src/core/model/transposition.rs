use bon::Builder;
use solgrid_quantities::{Kilowatts, temperature::STC_TEMPERATURE};

use crate::core::{
    irradiance::{PlaneOfArray, ground_reflected, incidence_cosine, isotropic_sky_diffuse},
    model::{PowerModel, derated_dc_power},
    segment::{RoofSegment, SystemConfig},
    thermal::SapmCoefficients,
    weather::{SolarPosition, WeatherSample},
};

/// Fixed ground reflectance: the weather feed's albedo is only used by the empirical model.
pub const DEFAULT_GROUND_ALBEDO: f64 = 0.25;

/// Isotropic transposition driven by the computed sun position.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct TranspositionModel {
    pub thermal: SapmCoefficients,

    #[builder(default = DEFAULT_GROUND_ALBEDO)]
    pub ground_albedo: f64,

    #[builder(default)]
    pub loss_fraction: f64,
}

impl PowerModel for TranspositionModel {
    fn plane_of_array(
        &self,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> PlaneOfArray {
        let cos_aoi = incidence_cosine(
            position.apparent_zenith_deg,
            position.azimuth_deg,
            segment.tilt_deg,
            segment.azimuth_deg,
        );
        PlaneOfArray {
            direct: (sample.dni * cos_aoi).non_negative(),
            sky_diffuse: isotropic_sky_diffuse(sample.dhi, segment.tilt_deg),
            ground_reflected: ground_reflected(sample.ghi, self.ground_albedo, segment.tilt_deg),
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
        let cell_temperature =
            self.thermal.cell_temperature(poa, sample.air_temperature, sample.wind_speed);
        derated_dc_power(system, segment, poa, cell_temperature - STC_TEMPERATURE)
    }

    fn system_loss(&self) -> f64 {
        self.loss_fraction
    }
}
