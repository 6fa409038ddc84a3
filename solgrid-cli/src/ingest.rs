//! Weather CSV ingestion.

use std::{collections::BTreeMap, fs::File, io::Read, ops::RangeInclusive, path::Path, time::Instant};

use bon::Builder;
use chrono::{DateTime, Datelike, Days, NaiveDate};
use chrono_tz::Tz;
use solgrid_quantities::{Celsius, KilowattHours, Percentage, WattsPerSquareMeter};

use crate::{core::weather::WeatherSample, prelude::*, statistics::energy::EnergyResult};

pub const TIMESTAMP_HEADER: &str = "period_end";

/// Optional column of a reference series; rows without it are consecutive days from January 1.
pub const DATE_HEADER: &str = "date";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Column {
    Dni,
    Ghi,
    Dhi,
    AirTemperature,
    Albedo,
    Zenith,
    Azimuth,
    CloudOpacity,
    RelativeHumidity,
    WindSpeed,
}

impl Column {
    /// In discriminant order.
    const ALL: [Self; 10] = [
        Self::Dni,
        Self::Ghi,
        Self::Dhi,
        Self::AirTemperature,
        Self::Albedo,
        Self::Zenith,
        Self::Azimuth,
        Self::CloudOpacity,
        Self::RelativeHumidity,
        Self::WindSpeed,
    ];

    const fn header(self) -> &'static str {
        match self {
            Self::Dni => "dni",
            Self::Ghi => "ghi",
            Self::Dhi => "dhi",
            Self::AirTemperature => "air_temp",
            Self::Albedo => "albedo",
            Self::Zenith => "zenith",
            Self::Azimuth => "azimuth",
            Self::CloudOpacity => "cloud_opacity",
            Self::RelativeHumidity => "relative_humidity",
            Self::WindSpeed => "wind_speed_10m",
        }
    }

    /// Physically meaningful values; anything else is rejected.
    const fn valid_range(self) -> Option<RangeInclusive<f64>> {
        match self {
            Self::Dni | Self::Ghi | Self::Dhi => Some(0.0..=f64::INFINITY),
            Self::Albedo => Some(0.0..=1.0),
            Self::CloudOpacity | Self::RelativeHumidity => Some(0.0..=100.0),
            Self::AirTemperature | Self::Zenith | Self::Azimuth | Self::WindSpeed => None,
        }
    }
}

/// Reads a header-driven weather export into site-local samples of one calendar year.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct WeatherLoader {
    timezone: Tz,

    /// Local calendar year to keep.
    year: i32,
}

impl WeatherLoader {
    pub fn load(&self, path: &Path) -> Result<Vec<WeatherSample>> {
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        self.read(file).with_context(|| format!("failed to read `{}`", path.display()))
    }

    /// Parse the samples and sort them by timestamp.
    ///
    /// Missing columns and unusable cells degrade to zero; only a missing timestamp column or
    /// a malformed CSV record is an error.
    #[instrument(skip_all, fields(year = self.year, timezone = %self.timezone))]
    pub fn read<R: Read>(&self, reader: R) -> Result<Vec<WeatherSample>> {
        let start_time = Instant::now();
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers().context("failed to read the header")?.clone();
        let position = |name: &str| headers.iter().position(|header| header == name);

        let timestamp_index = position(TIMESTAMP_HEADER)
            .with_context(|| format!("missing `{TIMESTAMP_HEADER}` column"))?;
        let indices = Column::ALL.map(|column| {
            let index = position(column.header());
            if index.is_none() {
                warn!(column = column.header(), "missing column, defaulting to zero");
            }
            index
        });

        let mut n_rejected_cells = 0_usize;
        let mut n_rejected_rows = 0_usize;
        let mut samples = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("failed to read row #{}", row + 1))?;
            let Some(timestamp) = record
                .get(timestamp_index)
                .and_then(|field| DateTime::parse_from_rfc3339(field).ok())
            else {
                n_rejected_rows += 1;
                continue;
            };
            let timestamp = timestamp.with_timezone(&self.timezone);
            if timestamp.year() != self.year {
                continue;
            }

            let mut value = |column: Column| {
                let Some(field) = indices[column as usize].and_then(|index| record.get(index))
                else {
                    return 0.0;
                };
                match field.parse::<f64>() {
                    Ok(value)
                        if value.is_finite()
                            && column.valid_range().is_none_or(|range| range.contains(&value)) =>
                    {
                        value
                    }
                    _ => {
                        n_rejected_cells += 1;
                        0.0
                    }
                }
            };
            samples.push(
                WeatherSample::builder()
                    .timestamp(timestamp)
                    .dni(WattsPerSquareMeter(value(Column::Dni)))
                    .ghi(WattsPerSquareMeter(value(Column::Ghi)))
                    .dhi(WattsPerSquareMeter(value(Column::Dhi)))
                    .air_temperature(Celsius(value(Column::AirTemperature)))
                    .albedo(value(Column::Albedo))
                    .zenith_deg(value(Column::Zenith))
                    .azimuth_deg(value(Column::Azimuth))
                    .cloud_opacity(Percentage(value(Column::CloudOpacity)))
                    .relative_humidity(Percentage(value(Column::RelativeHumidity)))
                    .wind_speed(value(Column::WindSpeed))
                    .build(),
            );
        }

        if n_rejected_rows != 0 {
            warn!(n_rejected_rows, "skipped rows without a valid timestamp");
        }
        if n_rejected_cells != 0 {
            warn!(n_rejected_cells, "replaced unparseable or out-of-range cells with zero");
        }
        if samples.is_empty() {
            warn!("no samples within the selected year");
        }

        samples.sort_by_key(|sample| sample.timestamp);
        info!(n_samples = samples.len(), elapsed = ?start_time.elapsed(), "loaded");
        Ok(samples)
    }
}

/// Reads an external series of daily energy, such as a design tool's yearly estimate.
#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct ReferenceLoader {
    year: i32,

    /// Header of the daily kWh column.
    #[builder(into)]
    column: String,
}

impl ReferenceLoader {
    pub fn load(&self, path: &Path) -> Result<EnergyResult> {
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        self.read(file).with_context(|| format!("failed to read `{}`", path.display()))
    }

    /// Unusable energy cells count as zero; a malformed date is an error.
    #[instrument(skip_all, fields(year = self.year, column = %self.column))]
    pub fn read<R: Read>(&self, reader: R) -> Result<EnergyResult> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let headers = reader.headers().context("failed to read the header")?.clone();
        let energy_index = headers
            .iter()
            .position(|header| header == self.column)
            .with_context(|| format!("missing `{}` column", self.column))?;
        let date_index = headers.iter().position(|header| header == DATE_HEADER);
        let new_year = NaiveDate::from_yo_opt(self.year, 1)
            .with_context(|| format!("invalid year {}", self.year))?;

        let mut daily = BTreeMap::<NaiveDate, KilowattHours>::new();
        let mut n_rejected_cells = 0_usize;
        let mut n_outside = 0_usize;

        for (row, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("failed to read row #{}", row + 1))?;
            let date = match date_index {
                Some(index) => {
                    let field = record.get(index).unwrap_or_default();
                    Some(NaiveDate::parse_from_str(field, "%Y-%m-%d").with_context(|| {
                        format!("invalid date `{field}` in row #{}", row + 1)
                    })?)
                }
                None => new_year.checked_add_days(Days::new(row as u64)),
            };
            let Some(date) = date.filter(|date| date.year() == self.year) else {
                n_outside += 1;
                continue;
            };
            let energy = match record.get(energy_index).map(str::parse::<f64>) {
                Some(Ok(energy)) if energy.is_finite() => KilowattHours(energy),
                _ => {
                    n_rejected_cells += 1;
                    KilowattHours::ZERO
                }
            };
            *daily.entry(date).or_default() += energy;
        }

        if n_outside != 0 {
            warn!(n_outside, "skipped reference days outside the selected year");
        }
        if n_rejected_cells != 0 {
            warn!(n_rejected_cells, "replaced unparseable reference cells with zero");
        }
        let reference = EnergyResult::from_daily(daily, n_rejected_cells);
        info!(n_days = reference.daily.len(), annual = %reference.annual, "loaded the reference");
        Ok(reference)
    }
}
