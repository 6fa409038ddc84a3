use clap::Parser;
use itertools::Itertools;

use crate::{
    cli::{
        sizing::SizingArgs,
        system::{ModelsArgs, SystemArgs},
        weather::WeatherArgs,
    },
    prelude::*,
    statistics::ramp::RampAnalysis,
    tables::{build_ramp_table, build_sizing_table},
};

#[derive(Parser)]
pub struct RampArgs {
    #[clap(flatten)]
    pub weather: WeatherArgs,

    #[clap(flatten)]
    pub system: SystemArgs,

    #[clap(flatten)]
    pub models: ModelsArgs,

    #[clap(flatten)]
    pub sizing: SizingArgs,
}

impl RampArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let policy = self.sizing.policy()?;
        let samples = self.weather.load()?;
        let provider = self.weather.solar_position_provider()?;
        let mut models = self.models.models();
        models.insert(self.sizing.model);
        let estimates = self.system.estimate(models, &samples, &provider)?;

        let analyses = estimates
            .iter()
            .map(|(kind, series)| (*kind, RampAnalysis::analyze(series)))
            .collect_vec();
        let rows = analyses.iter().map(|(kind, analysis)| (*kind, analysis)).collect_vec();
        println!("{}", build_ramp_table(&rows));

        let swing = analyses
            .iter()
            .find(|(kind, _)| *kind == self.sizing.model)
            .and_then(|(_, analysis)| analysis.swing);
        match swing {
            Some(swing) => {
                let sizing = policy.size(&swing);
                info!(power_rating = %sizing.power_rating, energy_capacity = %sizing.energy_capacity, "sized");
                println!("{}", build_sizing_table(self.sizing.model, &sizing));
            }
            None => warn!(model = %self.sizing.model, "no swing to size the battery on"),
        }
        Ok(())
    }
}
