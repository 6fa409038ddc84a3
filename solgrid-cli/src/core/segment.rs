//! Static description of the rooftop installation.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use solgrid_quantities::{Kilowatts, Watts};

use crate::prelude::*;

/// Mounting geometry of a group of identical modules sharing one plane.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoofSegment {
    /// Surface tilt from horizontal, degrees.
    #[serde(rename = "tilt_degrees")]
    pub tilt_deg: f64,

    /// Surface azimuth clockwise from north, degrees.
    #[serde(rename = "azimuth_degrees")]
    pub azimuth_deg: f64,

    pub n_modules: u32,
}

impl RoofSegment {
    pub const fn new(tilt_deg: f64, azimuth_deg: f64, n_modules: u32) -> Self {
        Self { tilt_deg, azimuth_deg, n_modules }
    }

    pub fn validate(&self) -> Result {
        ensure!(
            (0.0..=90.0).contains(&self.tilt_deg),
            "tilt must be within 0..=90°, got {}",
            self.tilt_deg,
        );
        ensure!(
            (0.0..360.0).contains(&self.azimuth_deg),
            "azimuth must be within 0..360°, got {}",
            self.azimuth_deg,
        );
        ensure!(self.n_modules > 0, "segment must have at least one module");
        Ok(())
    }
}

#[must_use]
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Nameplate DC power at standard test conditions.
    #[serde(rename = "rated_power_watts")]
    pub rated_power: Watts,

    /// Relative power change per °C, negative for derating with heat.
    #[serde(rename = "temperature_coefficient_per_celsius")]
    pub temperature_coefficient: f64,
}

/// Segment registry together with the process-wide module and inverter constants.
#[must_use]
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SystemConfig {
    pub module: ModuleSpec,

    /// DC-to-AC conversion efficiency, `0..=1`.
    pub inverter_efficiency: f64,

    pub segments: Vec<RoofSegment>,
}

impl Default for SystemConfig {
    /// The reference installation: 192 modules of 600 W over five low-tilt roof planes.
    fn default() -> Self {
        Self {
            module: ModuleSpec { rated_power: Watts(600.0), temperature_coefficient: -0.0045 },
            inverter_efficiency: 0.95,
            segments: vec![
                RoofSegment::new(5.6, 319.882_14, 32),
                RoofSegment::new(2.8, 146.612_20, 32),
                RoofSegment::new(5.0, 326.423_46, 32),
                RoofSegment::new(3.0, 315.205_87, 32),
                RoofSegment::new(3.0, 134.653_46, 64),
            ],
        }
    }
}

impl SystemConfig {
    /// Read the registry from a TOML file and validate it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let this: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        this.validated()
    }

    /// Fail fast on structural misconfiguration.
    pub fn validated(self) -> Result<Self> {
        ensure!(!self.segments.is_empty(), "at least one roof segment is required");
        for (index, segment) in self.segments.iter().enumerate() {
            segment.validate().with_context(|| format!("invalid roof segment #{}", index + 1))?;
        }
        ensure!(
            self.module.rated_power > Watts::ZERO && self.module.rated_power.is_finite(),
            "invalid module rated power: {}",
            self.module.rated_power,
        );
        ensure!(
            self.module.temperature_coefficient.is_finite(),
            "invalid temperature coefficient: {}",
            self.module.temperature_coefficient,
        );
        ensure!(
            self.inverter_efficiency > 0.0 && self.inverter_efficiency <= 1.0,
            "inverter efficiency must be within (0, 1], got {}",
            self.inverter_efficiency,
        );
        Ok(self)
    }

    pub fn n_modules(&self) -> u32 {
        self.segments.iter().map(|segment| segment.n_modules).sum()
    }

    /// Total DC capacity at standard test conditions.
    pub fn nameplate_capacity(&self) -> Kilowatts {
        Kilowatts::from(self.module.rated_power * f64::from(self.n_modules()))
    }
}
