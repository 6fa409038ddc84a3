use std::path::PathBuf;

use clap::Parser;
use enumset::EnumSet;
use solgrid_quantities::Kilowatts;

use crate::{
    core::{
        engine::estimate_power,
        model::ModelKind,
        segment::SystemConfig,
        series::Series,
        solar::SolarPositionProvider,
        thermal::Mount,
        weather::WeatherSample,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct SystemArgs {
    /// TOML roof segment registry, replacing the built-in installation.
    #[clap(long = "system-file", env = "SYSTEM_FILE")]
    pub path: Option<PathBuf>,

    /// Thermal mount of the transposition model.
    #[clap(long, env = "MOUNT", default_value = "open-rack")]
    pub mount: Mount,
}

#[derive(Parser)]
pub struct ModelsArgs {
    #[clap(
        long = "models",
        env = "MODELS",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "transposition,empirical",
    )]
    pub models: Vec<ModelKind>,
}

impl ModelsArgs {
    #[must_use]
    pub fn models(&self) -> EnumSet<ModelKind> {
        self.models.iter().copied().collect()
    }
}

impl SystemArgs {
    pub fn load(&self) -> Result<SystemConfig> {
        let system = match &self.path {
            Some(path) => SystemConfig::from_file(path)?,
            None => SystemConfig::default().validated()?,
        };
        info!(
            n_segments = system.segments.len(),
            n_modules = system.n_modules(),
            nameplate_capacity = %system.nameplate_capacity(),
            "system",
        );
        Ok(system)
    }

    /// System-level power series of each model, in the model order.
    #[instrument(skip_all, fields(mount = %self.mount))]
    pub fn estimate(
        &self,
        models: EnumSet<ModelKind>,
        samples: &[WeatherSample],
        provider: &impl SolarPositionProvider,
    ) -> Result<Vec<(ModelKind, Series<Kilowatts>)>> {
        let system = self.load()?;
        let positions = provider.positions(samples);
        models
            .iter()
            .map(|kind| {
                let series = estimate_power(&kind.model(self.mount), &system, samples, &positions)
                    .with_context(|| format!("failed to run the {kind} model"))?;
                Ok((kind, series))
            })
            .collect()
    }
}
