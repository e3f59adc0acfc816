//! Shared parsing utilities for observation fields.
//!
//! Exports come out of spreadsheets and dataframes, so the same field shows
//! up in a few spellings: ids as `52` or `52.0`, days as a bare date or a
//! full timestamp. These helpers accept all of them and return `None` for
//! anything else.

use chrono::{NaiveDate, NaiveDateTime};
use nc_map_request_models::{Location, RegionId};

/// Parses a calendar day.
///
/// Accepts `YYYY-MM-DD`, `MM/DD/YYYY`, and ISO 8601 datetimes (with `T` or
/// a space separator, optional fractional seconds). Only the date part of
/// a datetime is kept.
#[must_use]
pub fn parse_day(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%m/%d/%Y") {
        return Some(date);
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.date());
        }
    }
    // Timezone-suffixed timestamps: the date prefix is all we need.
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// Parses a region id written as an integer or an integral float.
#[must_use]
pub fn parse_region_id(s: &str) -> Option<RegionId> {
    let s = s.trim();
    if let Ok(id) = s.parse::<i32>() {
        return Some(RegionId(id));
    }
    let value = s.parse::<f64>().ok()?;
    region_id_from_f64(value)
}

/// Converts an integral float to a region id.
#[must_use]
pub fn region_id_from_f64(value: f64) -> Option<RegionId> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(RegionId(value as i32))
}

/// Parses a lat/lng pair from strings. Returns `None` if either value is
/// unparseable, out of range, or zero.
#[must_use]
pub fn parse_lat_lng_str(lat: &str, lng: &str) -> Option<Location> {
    let latitude = lat.trim().parse::<f64>().ok()?;
    let longitude = lng.trim().parse::<f64>().ok()?;
    valid_location(latitude, longitude)
}

/// Validates a lat/lng pair. Zero coordinates are treated as missing.
#[must_use]
pub fn valid_location(latitude: f64, longitude: f64) -> Option<Location> {
    if latitude == 0.0 || longitude == 0.0 {
        return None;
    }
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return None;
    }
    Some(Location::new(latitude, longitude))
}

/// Reads a region id from a JSON property (number or numeric string).
#[must_use]
pub fn region_id_from_json(value: &serde_json::Value) -> Option<RegionId> {
    match value {
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|id| i32::try_from(id).ok())
            .map(RegionId)
            .or_else(|| n.as_f64().and_then(region_id_from_f64)),
        serde_json::Value::String(s) => parse_region_id(s),
        _ => None,
    }
}

/// Reads a day from a JSON string property.
#[must_use]
pub fn day_from_json(value: &serde_json::Value) -> Option<NaiveDate> {
    value.as_str().and_then(parse_day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_day("2020-01-02"), Some(date(2020, 1, 2)));
    }

    #[test]
    fn parses_mdy_date() {
        assert_eq!(parse_day("01/15/2020"), Some(date(2020, 1, 15)));
    }

    #[test]
    fn keeps_date_part_of_timestamp() {
        assert_eq!(parse_day("2020-03-04T23:59:59.000"), Some(date(2020, 3, 4)));
        assert_eq!(parse_day("2020-03-04 08:15:00"), Some(date(2020, 3, 4)));
        assert_eq!(parse_day("2020-03-04T08:15:00-07:00"), Some(date(2020, 3, 4)));
    }

    #[test]
    fn rejects_invalid_day() {
        assert!(parse_day("not-a-date").is_none());
        assert!(parse_day("").is_none());
    }

    #[test]
    fn parses_float_region_id() {
        assert_eq!(parse_region_id("52"), Some(RegionId(52)));
        assert_eq!(parse_region_id("52.0"), Some(RegionId(52)));
        assert!(parse_region_id("52.5").is_none());
        assert!(parse_region_id("").is_none());
    }

    #[test]
    fn parses_lat_lng_strings() {
        let loc = parse_lat_lng_str("34.0522", "-118.2437").unwrap();
        assert!((loc.latitude - 34.0522).abs() < f64::EPSILON);
        assert!((loc.longitude - -118.2437).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_zero_and_out_of_range_coords() {
        assert!(parse_lat_lng_str("0.0", "-118.2437").is_none());
        assert!(parse_lat_lng_str("134.0", "-118.2437").is_none());
        assert!(parse_lat_lng_str("abc", "-118.2437").is_none());
    }

    #[test]
    fn reads_region_id_from_json_values() {
        assert_eq!(region_id_from_json(&serde_json::json!(7)), Some(RegionId(7)));
        assert_eq!(region_id_from_json(&serde_json::json!(7.0)), Some(RegionId(7)));
        assert_eq!(region_id_from_json(&serde_json::json!("7")), Some(RegionId(7)));
        assert!(region_id_from_json(&serde_json::Value::Null).is_none());
    }
}
