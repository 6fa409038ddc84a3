use std::path::PathBuf;

use chrono::TimeDelta;
use chrono_tz::Tz;
use clap::Parser;

use crate::{
    core::{series::SamplingReport, solar::Noaa, weather::WeatherSample},
    ingest::WeatherLoader,
    prelude::*,
};

#[derive(Parser)]
pub struct WeatherArgs {
    /// Weather CSV export with a `period_end` column in RFC 3339.
    #[clap(long = "weather-file", env = "WEATHER_FILE")]
    pub path: PathBuf,

    /// Site timezone: daily totals and the year filter follow its calendar.
    #[clap(long, env = "SITE_TIMEZONE", default_value = "Africa/Johannesburg")]
    pub timezone: Tz,

    #[clap(long, env = "YEAR", default_value = "2024")]
    pub year: i32,

    #[clap(
        long = "latitude",
        env = "SITE_LATITUDE",
        default_value = "-29.815268",
        allow_negative_numbers = true
    )]
    pub latitude_deg: f64,

    #[clap(
        long = "longitude",
        env = "SITE_LONGITUDE",
        default_value = "30.946439",
        allow_negative_numbers = true
    )]
    pub longitude_deg: f64,

    /// Nominal sampling interval of the weather series.
    #[clap(long = "sampling-interval", env = "SAMPLING_INTERVAL", default_value = "5min")]
    interval: humantime::Duration,
}

impl WeatherArgs {
    pub fn interval(&self) -> Result<TimeDelta> {
        let interval = TimeDelta::from_std(self.interval.into())
            .context("sampling interval is out of range")?;
        ensure!(interval > TimeDelta::zero(), "sampling interval must be positive");
        Ok(interval)
    }

    pub fn solar_position_provider(&self) -> Result<Noaa> {
        ensure!(
            (-90.0..=90.0).contains(&self.latitude_deg),
            "latitude must be within -90..=90°, got {}",
            self.latitude_deg,
        );
        ensure!(
            (-180.0..=180.0).contains(&self.longitude_deg),
            "longitude must be within -180..=180°, got {}",
            self.longitude_deg,
        );
        Ok(Noaa { latitude_deg: self.latitude_deg, longitude_deg: self.longitude_deg })
    }

    /// Load the samples and report irregular sampling.
    pub fn load(&self) -> Result<Vec<WeatherSample>> {
        let samples = WeatherLoader::builder()
            .timezone(self.timezone)
            .year(self.year)
            .build()
            .load(&self.path)?;
        let timestamps = samples.iter().map(|sample| (sample.timestamp, ())).collect::<Vec<_>>();
        let report = SamplingReport::inspect(&timestamps, self.interval()?);
        if !report.is_regular() {
            warn!(
                report.n_duplicates,
                report.n_gaps,
                report.n_irregular,
                "irregular sampling, energy uses the nominal interval",
            );
        }
        Ok(samples)
    }
}
