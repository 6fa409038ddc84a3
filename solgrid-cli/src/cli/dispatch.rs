use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Parser;
use enumset::EnumSet;
use itertools::Itertools;
use solgrid_quantities::Kilowatts;

use crate::{
    advisor::{
        dispatch::{Dispatch, select_day},
        smoothing::Smoother,
    },
    cli::{sizing::SizingArgs, system::SystemArgs, weather::WeatherArgs},
    core::series::Point,
    prelude::*,
    statistics::ramp::RampAnalysis,
    tables::{build_dispatch_table, build_sizing_table},
};

#[derive(Parser)]
pub struct DispatchArgs {
    #[clap(flatten)]
    pub weather: WeatherArgs,

    #[clap(flatten)]
    pub system: SystemArgs,

    #[clap(flatten)]
    pub sizing: SizingArgs,

    /// Local day to simulate, defaults to the day of the worst swing.
    #[clap(long, env = "DISPATCH_DAY")]
    pub day: Option<NaiveDate>,

    /// Smoothed targets: `moving-average:<window>`, `triangular:<window>`, `hann:<window>`,
    /// or `gaussian:<window>:<sigma>`, the window being an odd number of samples.
    #[clap(
        long = "smoothers",
        env = "SMOOTHERS",
        value_delimiter = ',',
        num_args = 1..,
        required = true,
    )]
    pub smoothers: Vec<Smoother>,

    /// Export the raw power, the targets and the battery power as CSV.
    #[clap(long = "output-file", env = "OUTPUT_FILE")]
    pub output_path: Option<PathBuf>,
}

impl DispatchArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let policy = self.sizing.policy()?;
        let samples = self.weather.load()?;
        let interval = self.weather.interval()?;
        let provider = self.weather.solar_position_provider()?;
        let (_, series) = self
            .system
            .estimate(EnumSet::only(self.sizing.model), &samples, &provider)?
            .into_iter()
            .next()
            .context("the sizing model produced no series")?;

        let swing = RampAnalysis::analyze(&series)
            .swing
            .context("at least two samples are needed to size the battery")?;
        let sizing = policy.size(&swing);
        println!("{}", build_sizing_table(self.sizing.model, &sizing));

        let day = self.day.unwrap_or_else(|| swing.timestamp.date_naive());
        let day_series = select_day(&series, day);
        if day_series.is_empty() {
            warn!(%day, "no samples on the day");
        }
        info!(%day, n_samples = day_series.len(), "simulating");

        let dispatches = self
            .smoothers
            .iter()
            .map(|smoother| Dispatch::simulate(&day_series, *smoother, &sizing, interval))
            .collect_vec();
        println!("{}", build_dispatch_table(&dispatches, &sizing));

        if let Some(path) = &self.output_path {
            export(path, &day_series, &dispatches)?;
            info!(path = %path.display(), "exported");
        }
        Ok(())
    }
}

fn export(path: &Path, day: &[Point<Kilowatts>], dispatches: &[Dispatch]) -> Result {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    let mut header = vec!["timestamp".to_string(), "power_kw".to_string()];
    for dispatch in dispatches {
        header.push(format!("{} target_kw", dispatch.smoother));
        header.push(format!("{} battery_kw", dispatch.smoother));
    }
    writer.write_record(&header)?;
    for (index, (timestamp, power)) in day.iter().enumerate() {
        let mut record = vec![timestamp.to_rfc3339(), power.0.to_string()];
        for dispatch in dispatches {
            record.push(dispatch.target[index].1.0.to_string());
            record.push(dispatch.battery[index].1.0.to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
