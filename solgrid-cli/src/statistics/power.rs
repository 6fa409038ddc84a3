use average::Mean;
use solgrid_quantities::Kilowatts;

use crate::core::series::Point;

/// Extremes and mean of a power series.
#[must_use]
#[derive(Copy, Clone, Debug)]
pub struct PowerStatistics {
    pub max: Point<Kilowatts>,
    pub mean: Kilowatts,
    pub min: Point<Kilowatts>,
}

impl PowerStatistics {
    /// Non-finite samples are skipped; `None` when nothing remains.
    pub fn from_series(series: &[Point<Kilowatts>]) -> Option<Self> {
        let finite = || series.iter().copied().filter(|(_, power)| power.is_finite());
        let max = finite().reduce(|max, point| if point.1 > max.1 { point } else { max })?;
        let min = finite().reduce(|min, point| if point.1 < min.1 { point } else { min })?;
        let mean: Mean = finite().map(|(_, power)| power.0).collect();
        Some(Self { max, mean: Kilowatts(mean.mean()), min })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::{TimeDelta, TimeZone};
    use chrono_tz::Africa::Johannesburg;

    use super::*;

    #[test]
    fn test_from_series() {
        let start = Johannesburg.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap();
        let series = [0.0, 30.0, f64::NAN, 90.0, 0.0]
            .into_iter()
            .enumerate()
            .map(|(i, power)| (start + TimeDelta::hours(i as i64), Kilowatts(power)))
            .collect::<Vec<_>>();
        let statistics = PowerStatistics::from_series(&series).unwrap();
        assert_eq!(statistics.max, series[3]);
        assert_eq!(statistics.min, series[0]);
        assert_abs_diff_eq!(statistics.mean.0, 30.0);
    }

    #[test]
    fn test_empty() {
        assert!(PowerStatistics::from_series(&[]).is_none());
    }
}
