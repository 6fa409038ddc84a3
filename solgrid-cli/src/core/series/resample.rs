use std::{collections::BTreeMap, iter::Sum};

use chrono::{DateTime, NaiveDate, TimeZone};
use itertools::Itertools;

impl<T> ResampleDaily for T where T: ?Sized {}

pub trait ResampleDaily {
    /// Sum the values into calendar-day buckets of the timestamps' own timezone.
    ///
    /// Days without any samples are absent from the result.
    #[must_use]
    fn sum_daily<Tz, V>(self) -> BTreeMap<NaiveDate, V>
    where
        Self: Sized + IntoIterator<Item = (DateTime<Tz>, V)>,
        Tz: TimeZone,
        V: Sum<V>,
    {
        self.into_iter()
            .into_group_map_by(|(timestamp, _)| timestamp.date_naive())
            .into_iter()
            .map(|(date, points)| (date, points.into_iter().map(|(_, value)| value).sum()))
            .collect()
    }
}
