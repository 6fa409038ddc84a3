mod empirical;
mod transposition;

use std::fmt::{Display, Formatter};

use comfy_table::Color;
use solgrid_quantities::{Celsius, Kilowatts, WattsPerSquareMeter};

pub use self::{empirical::EmpiricalModel, transposition::TranspositionModel};
use crate::core::{
    irradiance::PlaneOfArray,
    segment::{RoofSegment, SystemConfig},
    thermal::{Mount, SapmCoefficients},
    weather::{SolarPosition, WeatherSample},
};

/// Irradiance-to-power conversion for a single roof segment at a single timestamp.
pub trait PowerModel {
    fn plane_of_array(
        &self,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> PlaneOfArray;

    fn dc_power(
        &self,
        system: &SystemConfig,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> Kilowatts;

    /// Fraction of the inverter output lost to wiring, soiling and the like.
    fn system_loss(&self) -> f64;

    fn ac_power(
        &self,
        system: &SystemConfig,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> Kilowatts {
        self.dc_power(system, segment, sample, position)
            * system.inverter_efficiency
            * (1.0 - self.system_loss())
    }
}

/// Nameplate power scaled by irradiance and derated by the temperature excess.
fn derated_dc_power(
    system: &SystemConfig,
    segment: &RoofSegment,
    poa: WattsPerSquareMeter,
    temperature_excess: Celsius,
) -> Kilowatts {
    let derate = system.module.temperature_coefficient.mul_add(temperature_excess.0, 1.0);
    Kilowatts::from(system.module.rated_power * f64::from(segment.n_modules))
        * poa.to_stc_ratio()
        * derate
}

#[derive(Debug, clap::ValueEnum, enumset::EnumSetType)]
pub enum ModelKind {
    /// Isotropic transposition with the Sandia cell temperature model.
    Transposition,

    /// OSM-MEPS: geometric incidence with cloud, humidity and linear heat-balance corrections.
    Empirical,

    /// PVWatts-style: transposition on a close-roof mount with 1% system losses.
    #[value(name = "pvwatts")]
    PvWatts,
}

impl ModelKind {
    /// Instantiate the model, the transposition model taking the thermal preset of the mount.
    pub fn model(self, mount: Mount) -> Model {
        match self {
            Self::Transposition => {
                Model::Transposition(TranspositionModel::builder().thermal(mount.coefficients()).build())
            }
            Self::Empirical => Model::Empirical(EmpiricalModel::builder().build()),
            Self::PvWatts => Model::Transposition(
                TranspositionModel::builder()
                    .thermal(SapmCoefficients::CLOSE_ROOF)
                    .loss_fraction(0.01)
                    .build(),
            ),
        }
    }

    /// Column-safe identifier.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Transposition => "transposition",
            Self::Empirical => "empirical",
            Self::PvWatts => "pvwatts",
        }
    }

    pub const fn color(self) -> Color {
        match self {
            Self::Transposition => Color::DarkYellow,
            Self::Empirical => Color::Green,
            Self::PvWatts => Color::Magenta,
        }
    }
}

impl Display for ModelKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transposition => write!(f, "Transposition"),
            Self::Empirical => write!(f, "OSM-MEPS"),
            Self::PvWatts => write!(f, "PVWatts"),
        }
    }
}

#[must_use]
#[derive(Copy, Clone, Debug)]
pub enum Model {
    Transposition(TranspositionModel),
    Empirical(EmpiricalModel),
}

impl PowerModel for Model {
    fn plane_of_array(
        &self,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> PlaneOfArray {
        match self {
            Self::Transposition(model) => model.plane_of_array(segment, sample, position),
            Self::Empirical(model) => model.plane_of_array(segment, sample, position),
        }
    }

    fn dc_power(
        &self,
        system: &SystemConfig,
        segment: &RoofSegment,
        sample: &WeatherSample,
        position: &SolarPosition,
    ) -> Kilowatts {
        match self {
            Self::Transposition(model) => model.dc_power(system, segment, sample, position),
            Self::Empirical(model) => model.dc_power(system, segment, sample, position),
        }
    }

    fn system_loss(&self) -> f64 {
        match self {
            Self::Transposition(model) => model.system_loss(),
            Self::Empirical(model) => model.system_loss(),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::TimeZone;
    use chrono_tz::Africa::Johannesburg;
    use solgrid_quantities::{Percentage, Watts};

    use super::*;
    use crate::core::segment::ModuleSpec;

    fn single_module_system() -> SystemConfig {
        SystemConfig {
            module: ModuleSpec { rated_power: Watts(600.0), temperature_coefficient: -0.0045 },
            inverter_efficiency: 0.95,
            segments: vec![RoofSegment::new(0.0, 180.0, 1)],
        }
    }

    fn clear_noon() -> (WeatherSample, SolarPosition) {
        let sample = WeatherSample::builder()
            .timestamp(Johannesburg.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap())
            .dni(WattsPerSquareMeter(1000.0))
            .ghi(WattsPerSquareMeter(1000.0))
            .dhi(WattsPerSquareMeter::ZERO)
            .zenith_deg(0.0)
            .azimuth_deg(180.0)
            .air_temperature(Celsius(25.0))
            .albedo(0.2)
            .build();
        (sample, SolarPosition { apparent_zenith_deg: 0.0, azimuth_deg: 180.0 })
    }

    /// No convective heating at all: the cell stays at the air temperature.
    const NO_HEATING: SapmCoefficients =
        SapmCoefficients { a: f64::NEG_INFINITY, b: 0.0, delta_t: Celsius(0.0) };

    #[test]
    fn test_flat_module_at_normal_incidence() {
        let system = single_module_system();
        let segment = system.segments[0];
        let (sample, position) = clear_noon();

        let transposition = TranspositionModel::builder().thermal(NO_HEATING).build();
        assert_abs_diff_eq!(
            transposition.plane_of_array(&segment, &sample, &position).global().0,
            1000.0,
            epsilon = 1e-9,
        );
        assert_abs_diff_eq!(
            transposition.dc_power(&system, &segment, &sample, &position).0,
            0.6,
            epsilon = 1e-12,
        );
        assert_abs_diff_eq!(
            transposition.ac_power(&system, &segment, &sample, &position).0,
            0.57,
            epsilon = 1e-12,
        );

        let empirical = EmpiricalModel::builder().build();
        let poa = empirical.plane_of_array(&segment, &sample, &position);
        assert_abs_diff_eq!(poa.direct.0, 1000.0, epsilon = 1e-9);
        assert_abs_diff_eq!(poa.global().0, 1000.0, epsilon = 1e-9);
    }

    /// The open-rack cell heats up above STC and derates the output.
    #[test]
    fn test_transposition_temperature_derate() {
        let system = single_module_system();
        let (sample, position) = clear_noon();
        let model = ModelKind::Transposition.model(Mount::OpenRack);
        let cell_temperature = SapmCoefficients::OPEN_RACK.cell_temperature(
            WattsPerSquareMeter(1000.0),
            Celsius(25.0),
            0.0,
        );
        assert_abs_diff_eq!(
            model.dc_power(&system, &system.segments[0], &sample, &position).0,
            0.6 * (1.0 - 0.0045 * (cell_temperature.0 - 25.0)),
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_full_cloud_opacity_blocks_empirical_beam_only() {
        let system = single_module_system();
        let segment = system.segments[0];
        let (mut sample, position) = clear_noon();
        sample.cloud_opacity = Percentage(100.0);

        let empirical = ModelKind::Empirical.model(Mount::OpenRack);
        assert_abs_diff_eq!(empirical.plane_of_array(&segment, &sample, &position).direct.0, 0.0);

        let transposition = ModelKind::Transposition.model(Mount::OpenRack);
        assert_abs_diff_eq!(
            transposition.plane_of_array(&segment, &sample, &position).direct.0,
            1000.0,
            epsilon = 1e-9,
        );
    }

    #[test]
    fn test_pvwatts_losses() {
        let system = single_module_system();
        let segment = system.segments[0];
        let (sample, position) = clear_noon();
        let model = ModelKind::PvWatts.model(Mount::OpenRack);
        assert_abs_diff_eq!(model.system_loss(), 0.01);
        assert_abs_diff_eq!(
            model.ac_power(&system, &segment, &sample, &position).0,
            model.dc_power(&system, &segment, &sample, &position).0 * 0.95 * 0.99,
            epsilon = 1e-12,
        );
    }

    #[test]
    fn test_negative_albedo_reflects_nothing() {
        let segment = RoofSegment::new(30.0, 0.0, 1);
        let (template, position) = clear_noon();
        let sample = WeatherSample {
            dni: WattsPerSquareMeter::ZERO,
            ghi: WattsPerSquareMeter(800.0),
            albedo: -1.0,
            ..template
        };
        let poa = ModelKind::Empirical.model(Mount::OpenRack).plane_of_array(&segment, &sample, &position);
        assert_abs_diff_eq!(poa.ground_reflected.0, 0.0);
        assert!(poa.global() >= WattsPerSquareMeter::ZERO);
    }

    #[test]
    fn test_plane_of_array_is_never_negative() {
        let (template, _) = clear_noon();
        let models = [
            ModelKind::Transposition.model(Mount::OpenRack),
            ModelKind::Empirical.model(Mount::OpenRack),
            ModelKind::PvWatts.model(Mount::CloseRoof),
        ];
        for tilt_deg in [0.0, 5.6, 30.0, 60.0, 90.0] {
            for surface_azimuth_deg in [0.0, 134.65, 180.0, 319.88] {
                let segment = RoofSegment::new(tilt_deg, surface_azimuth_deg, 1);
                for zenith_deg in [0.0, 45.0, 85.0, 95.0, 120.0] {
                    for sun_azimuth_deg in [0.0, 90.0, 200.0, 350.0] {
                        let sample = WeatherSample {
                            zenith_deg,
                            azimuth_deg: sun_azimuth_deg,
                            dhi: WattsPerSquareMeter(120.0),
                            cloud_opacity: Percentage(35.0),
                            albedo: -0.5,
                            ..template
                        };
                        let position =
                            SolarPosition { apparent_zenith_deg: zenith_deg, azimuth_deg: sun_azimuth_deg };
                        for model in &models {
                            let poa = model.plane_of_array(&segment, &sample, &position);
                            assert!(poa.direct >= WattsPerSquareMeter::ZERO);
                            assert!(poa.global() >= WattsPerSquareMeter::ZERO);
                        }
                    }
                }
            }
        }
    }
}
