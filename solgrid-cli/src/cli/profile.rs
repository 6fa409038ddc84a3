use clap::Parser;

use crate::{
    cli::weather::WeatherArgs,
    prelude::*,
    statistics::diurnal::{ClimateVariable, DiurnalProfile},
    tables::build_profile_table,
};

#[derive(Parser)]
pub struct ProfileArgs {
    #[clap(flatten)]
    pub weather: WeatherArgs,

    #[clap(
        long = "variables",
        env = "PROFILE_VARIABLES",
        value_delimiter = ',',
        num_args = 1..,
        default_value = "ghi,relative-humidity,cloud-opacity,air-temperature",
    )]
    pub variables: Vec<ClimateVariable>,
}

impl ProfileArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let samples = self.weather.load()?;
        for variable in self.variables {
            println!("{}", build_profile_table(&DiurnalProfile::new(variable, &samples)));
        }
        Ok(())
    }
}
