//! System-level power: per-segment contributions summed into one series per model.

use std::time::Instant;

use itertools::Itertools;
use solgrid_quantities::Kilowatts;

use crate::{
    core::{
        model::PowerModel,
        segment::{RoofSegment, SystemConfig},
        series::Series,
        weather::{SolarPosition, WeatherSample},
    },
    prelude::*,
};

/// AC power of one segment, aligned with the samples.
pub fn segment_power<M: PowerModel>(
    model: &M,
    system: &SystemConfig,
    segment: &RoofSegment,
    samples: &[WeatherSample],
    positions: &[SolarPosition],
) -> Vec<Kilowatts> {
    samples
        .iter()
        .zip(positions)
        .map(|(sample, position)| model.ac_power(system, segment, sample, position))
        .collect()
}

/// Sum the per-segment AC power into the system-level series.
#[instrument(skip_all, fields(n_samples = samples.len(), n_segments = system.segments.len()))]
pub fn estimate_power<M: PowerModel>(
    model: &M,
    system: &SystemConfig,
    samples: &[WeatherSample],
    positions: &[SolarPosition],
) -> Result<Series<Kilowatts>> {
    ensure!(
        samples.len() == positions.len(),
        "{} solar positions for {} weather samples",
        positions.len(),
        samples.len(),
    );
    let start_time = Instant::now();
    let total = system
        .segments
        .iter()
        .map(|segment| segment_power(model, system, segment, samples, positions))
        .fold(vec![Kilowatts::ZERO; samples.len()], |total, segment| {
            total.into_iter().zip(segment).map(|(lhs, rhs)| lhs + rhs).collect()
        });
    let series = samples.iter().map(|sample| sample.timestamp).zip(total).collect_vec();
    debug!(elapsed = ?start_time.elapsed(), "estimated");
    Ok(series)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use chrono_tz::Africa::Johannesburg;
    use solgrid_quantities::{Celsius, Percentage, WattsPerSquareMeter};

    use super::*;
    use crate::core::{
        model::ModelKind,
        solar::{Noaa, SolarPositionProvider},
        thermal::Mount,
    };

    fn summer_day() -> Vec<WeatherSample> {
        let start = Johannesburg.with_ymd_and_hms(2024, 12, 21, 6, 0, 0).unwrap();
        (0..144)
            .map(|i| {
                let hours = f64::from(i) / 12.0;
                let clear_sky = (hours / 12.0 * std::f64::consts::PI).sin().max(0.0);
                WeatherSample::builder()
                    .timestamp(start + TimeDelta::minutes(5 * i64::from(i)))
                    .dni(WattsPerSquareMeter(850.0 * clear_sky))
                    .ghi(WattsPerSquareMeter(1000.0 * clear_sky))
                    .dhi(WattsPerSquareMeter(120.0 * clear_sky))
                    .air_temperature(Celsius(27.0))
                    .albedo(0.2)
                    .zenith_deg(90.0 - 80.0 * clear_sky)
                    .azimuth_deg(if hours < 6.0 { 100.0 } else { 260.0 })
                    .cloud_opacity(Percentage(10.0))
                    .relative_humidity(Percentage(70.0))
                    .wind_speed(2.5)
                    .build()
            })
            .collect()
    }

    const DURBAN: Noaa = Noaa { latitude_deg: -29.815_268, longitude_deg: 30.946_439 };

    #[test]
    fn test_segments_add_up() {
        let system = SystemConfig::default();
        let samples = summer_day();
        let positions = DURBAN.positions(&samples);
        let model = ModelKind::Transposition.model(Mount::OpenRack);

        let total = estimate_power(&model, &system, &samples, &positions).unwrap();
        let by_segment = system
            .segments
            .iter()
            .map(|segment| segment_power(&model, &system, segment, &samples, &positions))
            .collect_vec();
        for (i, (timestamp, power)) in total.iter().enumerate() {
            assert_eq!(*timestamp, samples[i].timestamp);
            let expected: Kilowatts = by_segment.iter().map(|segment| segment[i]).sum();
            approx::assert_relative_eq!(power.0, expected.0, max_relative = 1e-12);
        }
        assert!(total.iter().any(|(_, power)| *power > Kilowatts(10.0)));
    }

    #[test]
    fn test_models_are_aligned_and_idempotent() {
        let system = SystemConfig::default();
        let samples = summer_day();
        let positions = DURBAN.positions(&samples);
        for kind in [ModelKind::Transposition, ModelKind::Empirical, ModelKind::PvWatts] {
            let model = kind.model(Mount::CloseRoof);
            let first = estimate_power(&model, &system, &samples, &positions).unwrap();
            let second = estimate_power(&model, &system, &samples, &positions).unwrap();
            assert_eq!(first.len(), samples.len());
            assert!(
                first
                    .iter()
                    .zip(&second)
                    .all(|(lhs, rhs)| lhs.0 == rhs.0 && lhs.1.0.to_bits() == rhs.1.0.to_bits())
            );
        }
    }

    #[test]
    fn test_misaligned_positions() {
        let samples = summer_day();
        let positions = DURBAN.positions(&samples[1..]);
        let model = ModelKind::Empirical.model(Mount::OpenRack);
        assert!(estimate_power(&model, &SystemConfig::default(), &samples, &positions).is_err());
    }

    #[test]
    fn test_empty_input() {
        let model = ModelKind::Empirical.model(Mount::OpenRack);
        let series = estimate_power(&model, &SystemConfig::default(), &[], &[]).unwrap();
        assert!(series.is_empty());
    }
}
