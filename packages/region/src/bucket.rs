//! Daily bucketing of selected requests.
//!
//! Groups request locations by calendar day into the frames of a
//! time-animated heatmap. Days come out in ascending order; within a day
//! points keep input order. Days without requests are not filled in.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use nc_map_request_models::{Location, Observation};

/// Format used for frame labels on the animation timeline.
pub const DAY_LABEL_FORMAT: &str = "%Y-%m-%d";

/// All request locations observed on one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    /// The calendar day.
    pub day: NaiveDate,
    /// Locations in input order.
    pub points: Vec<Location>,
}

impl DayBucket {
    /// Returns the timeline label for this day (`YYYY-MM-DD`).
    #[must_use]
    pub fn label(&self) -> String {
        self.day.format(DAY_LABEL_FORMAT).to_string()
    }

    /// Returns the points as `[lat, lng]` pairs.
    #[must_use]
    pub fn lat_lngs(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|point| point.lat_lng()).collect()
    }
}

/// Day buckets in strictly ascending day order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayBuckets {
    buckets: Vec<DayBucket>,
}

impl DayBuckets {
    /// Returns the buckets as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[DayBucket] {
        &self.buckets
    }

    /// Iterates buckets in day order.
    pub fn iter(&self) -> std::slice::Iter<'_, DayBucket> {
        self.buckets.iter()
    }

    /// Number of frames (distinct days).
    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `true` if there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of points across all frames.
    #[must_use]
    pub fn total_points(&self) -> usize {
        self.buckets.iter().map(|bucket| bucket.points.len()).sum()
    }

    /// Frame labels in order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.buckets.iter().map(DayBucket::label).collect()
    }

    /// First and last day, if any.
    #[must_use]
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.buckets.first()?.day, self.buckets.last()?.day))
    }
}

impl IntoIterator for DayBuckets {
    type Item = DayBucket;
    type IntoIter = std::vec::IntoIter<DayBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.into_iter()
    }
}

impl<'a> IntoIterator for &'a DayBuckets {
    type Item = &'a DayBucket;
    type IntoIter = std::slice::Iter<'a, DayBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}

/// Groups observations by day.
///
/// Builds a day-keyed ordered map, then drains it in key order, so the
/// result is sorted ascending with each observed day exactly once. Empty
/// input yields empty buckets.
#[must_use]
pub fn bucket<'a, I>(observations: I) -> DayBuckets
where
    I: IntoIterator<Item = &'a Observation>,
{
    let mut by_day: BTreeMap<NaiveDate, Vec<Location>> = BTreeMap::new();

    for observation in observations {
        by_day
            .entry(observation.day)
            .or_default()
            .push(observation.location);
    }

    DayBuckets {
        buckets: by_day
            .into_iter()
            .map(|(day, points)| DayBucket { day, points })
            .collect(),
    }
}
