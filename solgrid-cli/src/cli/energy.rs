use std::path::{Path, PathBuf};

use clap::Parser;
use itertools::Itertools;
use solgrid_quantities::Kilowatts;

use crate::{
    cli::{
        system::{ModelsArgs, SystemArgs},
        weather::WeatherArgs,
    },
    core::{model::ModelKind, series::Series},
    ingest::ReferenceLoader,
    prelude::*,
    statistics::{
        energy::{EnergyComparison, EnergyResult},
        power::PowerStatistics,
        ramp::RampAnalysis,
    },
    tables::{Subject, build_comparison_table, build_energy_table},
};

#[derive(Parser)]
pub struct EnergyArgs {
    #[clap(flatten)]
    pub weather: WeatherArgs,

    #[clap(flatten)]
    pub system: SystemArgs,

    #[clap(flatten)]
    pub models: ModelsArgs,

    #[clap(flatten)]
    pub reference: ReferenceArgs,

    /// Export the aligned power and ramp rate series as CSV.
    #[clap(long = "output-file", env = "OUTPUT_FILE")]
    pub output_path: Option<PathBuf>,
}

/// External daily energy series to benchmark the models against.
#[derive(Parser)]
pub struct ReferenceArgs {
    /// CSV with one daily kWh value per row, dated by an optional `date` column.
    #[clap(long = "reference-file", env = "REFERENCE_FILE")]
    pub path: Option<PathBuf>,

    #[clap(long = "reference-column", env = "REFERENCE_COLUMN", default_value = "Year_2021_kWh")]
    pub column: String,

    #[clap(long = "reference-name", env = "REFERENCE_NAME", default_value = "Aurora")]
    pub name: String,
}

impl ReferenceArgs {
    pub fn load(&self, year: i32) -> Result<Option<EnergyResult>> {
        self.path
            .as_deref()
            .map(|path| ReferenceLoader::builder().year(year).column(&self.column).build().load(path))
            .transpose()
    }
}

impl EnergyArgs {
    #[instrument(skip_all)]
    pub fn run(self) -> Result {
        let samples = self.weather.load()?;
        let external = self.reference.load(self.weather.year)?;
        let interval = self.weather.interval()?;
        let provider = self.weather.solar_position_provider()?;
        let estimates = self.system.estimate(self.models.models(), &samples, &provider)?;

        let energies = estimates
            .iter()
            .map(|(kind, series)| (*kind, EnergyResult::integrate(series, interval)))
            .collect_vec();
        for (kind, energy) in &energies {
            info!(
                model = %kind,
                annual = %energy.annual,
                n_days = energy.daily.len(),
                n_non_finite = energy.n_non_finite,
                "integrated",
            );
        }

        let external =
            external.as_ref().map(|energy| (Subject::Reference(self.reference.name.as_str()), energy));

        let mut rows = energies
            .iter()
            .zip(&estimates)
            .map(|((kind, energy), (_, series))| {
                (Subject::Model(*kind), energy, PowerStatistics::from_series(series))
            })
            .collect_vec();
        rows.extend(external.map(|(subject, energy)| (subject, energy, None)));
        println!("{}", build_energy_table(&rows));

        if let Some(((reference, reference_energy), others)) = energies.split_last() {
            let comparisons = others
                .iter()
                .map(|(kind, energy)| (Subject::Model(*kind), energy.annual))
                .chain(external.map(|(subject, energy)| (subject, energy.annual)))
                .map(|(subject, annual)| {
                    (subject, EnergyComparison::new(annual, reference_energy.annual))
                })
                .collect_vec();
            if !comparisons.is_empty() {
                println!("{}", build_comparison_table(*reference, &comparisons));
            }
        }

        if let Some(path) = &self.output_path {
            export(path, &estimates)?;
            info!(path = %path.display(), "exported");
        }
        Ok(())
    }
}

/// One row per timestamp: the power and ramp rate of each model.
fn export(path: &Path, estimates: &[(ModelKind, Series<Kilowatts>)]) -> Result {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create `{}`", path.display()))?;
    let mut header = vec!["timestamp".to_string()];
    for (kind, _) in estimates {
        header.push(format!("{}_power_kw", kind.key()));
        header.push(format!("{}_ramp_w_per_s", kind.key()));
    }
    writer.write_record(&header)?;

    let ramps = estimates.iter().map(|(_, series)| RampAnalysis::analyze(series).rates).collect_vec();
    let Some((_, first)) = estimates.first() else {
        return Ok(());
    };
    for (index, (timestamp, _)) in first.iter().enumerate() {
        let mut record = vec![timestamp.to_rfc3339()];
        for ((_, series), rates) in estimates.iter().zip(&ramps) {
            record.push(series[index].1.0.to_string());
            record.push(rates[index].1.0.to_string());
        }
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}
