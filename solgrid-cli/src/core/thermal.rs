//! Module and cell temperature models.

use std::fmt::{Display, Formatter};

use solgrid_quantities::{Celsius, WattsPerSquareMeter, irradiance::STC_IRRADIANCE};

/// Sandia array performance model coefficients for convective cooling.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SapmCoefficients {
    /// Upper limit of the module temperature at low wind speed.
    pub a: f64,

    /// Cooling rate with wind speed.
    pub b: f64,

    /// Temperature difference between the cell and the module back at 1000 W/m².
    pub delta_t: Celsius,
}

impl SapmCoefficients {
    pub const OPEN_RACK: Self = Self { a: -3.47, b: -0.0594, delta_t: Celsius(3.0) };
    pub const CLOSE_ROOF: Self = Self { a: -2.98, b: -0.0471, delta_t: Celsius(1.0) };

    pub fn cell_temperature(
        &self,
        poa: WattsPerSquareMeter,
        air_temperature: Celsius,
        wind_speed: f64,
    ) -> Celsius {
        let module_temperature = Celsius(poa.0 * (self.a + self.b * wind_speed).exp()) + air_temperature;
        module_temperature + self.delta_t * poa.to_stc_ratio()
    }
}

/// Mounting configuration selecting the thermal coefficients.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum Mount {
    /// Glass/glass modules on an open rack.
    OpenRack,

    /// Glass/glass modules mounted close to the roof.
    CloseRoof,
}

impl Mount {
    pub const fn coefficients(self) -> SapmCoefficients {
        match self {
            Self::OpenRack => SapmCoefficients::OPEN_RACK,
            Self::CloseRoof => SapmCoefficients::CLOSE_ROOF,
        }
    }
}

impl Display for Mount {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenRack => write!(f, "open rack"),
            Self::CloseRoof => write!(f, "close roof"),
        }
    }
}

/// Reference module temperature of the linear heat-balance approximation.
pub const EMPIRICAL_REFERENCE_TEMPERATURE: Celsius = Celsius(45.0);

/// Linear heat balance around 45 °C, pivoting on 28 °C ambient.
pub fn empirical_module_temperature(
    poa: WattsPerSquareMeter,
    air_temperature: Celsius,
) -> Celsius {
    EMPIRICAL_REFERENCE_TEMPERATURE + (Celsius(28.0) - air_temperature) * (poa / STC_IRRADIANCE)
}
