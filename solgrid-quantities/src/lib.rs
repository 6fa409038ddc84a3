#[macro_use]
mod macros;

pub mod energy;
pub mod irradiance;
pub mod power;
pub mod proportions;
pub mod ramp;
pub mod temperature;
pub mod time;

pub use self::{
    energy::KilowattHours,
    irradiance::WattsPerSquareMeter,
    power::{Kilowatts, Watts},
    proportions::Percentage,
    ramp::WattsPerSecond,
    temperature::Celsius,
    time::Hours,
};
