use clap::Parser;
use solgrid_quantities::Hours;

use crate::{advisor::sizing::SizingPolicy, core::model::ModelKind, prelude::*};

#[derive(Parser)]
pub struct SizingArgs {
    /// Model whose worst swing sizes the battery.
    #[clap(long = "sizing-model", env = "SIZING_MODEL", default_value = "transposition")]
    pub model: ModelKind,

    /// Battery power rating over the worst swing.
    #[clap(long, env = "SAFETY_FACTOR", default_value = "1.2")]
    pub safety_factor: f64,

    /// Assumed discharge duration at the full power rating.
    #[clap(long, env = "DISCHARGE_DURATION", default_value = "2h")]
    discharge_duration: humantime::Duration,
}

impl SizingArgs {
    pub fn policy(&self) -> Result<SizingPolicy> {
        ensure!(
            self.safety_factor.is_finite() && self.safety_factor > 0.0,
            "safety factor must be positive, got {}",
            self.safety_factor,
        );
        let discharge_duration = std::time::Duration::from(self.discharge_duration);
        ensure!(!discharge_duration.is_zero(), "discharge duration must be positive");
        Ok(SizingPolicy::builder()
            .safety_factor(self.safety_factor)
            .discharge_duration(Hours(discharge_duration.as_secs_f64() / 3600.0))
            .build())
    }
}
