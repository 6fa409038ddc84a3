pub mod diurnal;
pub mod energy;
pub mod power;
pub mod ramp;
