pub mod engine;
pub mod irradiance;
pub mod model;
pub mod segment;
pub mod series;
pub mod solar;
pub mod thermal;
pub mod weather;
