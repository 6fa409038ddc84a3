use std::ops::{Div, Sub};

use itertools::Itertools;

/// Change of the value between two consecutive points.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Difference<K, D> {
    pub from: K,
    pub to: K,
    pub delta: D,
}

impl<K, D> Difference<K, D>
where
    K: Sub,
    D: Div<K::Output>,
{
    /// Change per unit of the key span.
    pub fn rate(self) -> D::Output {
        self.delta / (self.to - self.from)
    }
}

impl<I> Differences for I where I: Iterator {}

pub trait Differences: Iterator + Sized {
    /// Pair up consecutive points, ordered as they come.
    fn differences<K, V>(self) -> impl Iterator<Item = Difference<K, V::Output>>
    where
        Self: Iterator<Item = (K, V)>,
        K: Copy,
        V: Copy + Sub,
    {
        self.tuple_windows()
            .map(|((from, before), (to, after))| Difference { from, to, delta: after - before })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};
    use chrono_tz::Africa::Johannesburg;
    use solgrid_quantities::{Kilowatts, WattsPerSecond};

    use super::*;

    #[test]
    fn test_differences() {
        let differences = [(2, 100), (3, 200), (5, 600)].into_iter().differences().collect_vec();
        assert_eq!(
            differences,
            [Difference { from: 2, to: 3, delta: 100 }, Difference { from: 3, to: 5, delta: 400 }],
        );
        assert_eq!(differences[1].rate(), 200);
    }

    #[test]
    fn test_power_rate() {
        let start = Johannesburg.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let differences = [(start, Kilowatts(10.0)), (start + TimeDelta::minutes(5), Kilowatts(13.0))]
            .into_iter()
            .differences()
            .collect_vec();
        let [difference] = differences.as_slice() else {
            panic!("expected exactly one difference, got {}", differences.len());
        };
        assert_eq!(difference.rate(), WattsPerSecond(10.0));
    }

    #[test]
    fn test_single_point() {
        assert_eq!([(0, 1.0)].into_iter().differences().count(), 0);
    }
}
