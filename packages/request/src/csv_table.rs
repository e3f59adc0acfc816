//! CSV observation reader.
//!
//! Expects a header row. Columns are located by name using
//! [`ObservationColumns`]; extra columns are ignored.

use std::io::Read;

use nc_map_request_models::{Observation, ObservationColumns};

use crate::RequestError;
use crate::parsing::{parse_day, parse_lat_lng_str, parse_region_id};

/// Header positions of the columns we read.
struct ColumnIndexes {
    region_id: usize,
    day: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndexes {
    fn resolve(
        headers: &csv::StringRecord,
        columns: &ObservationColumns,
    ) -> Result<Self, RequestError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| RequestError::MissingColumn {
                    column: name.to_string(),
                })
        };

        Ok(Self {
            region_id: find(&columns.region_id)?,
            day: find(&columns.day)?,
            latitude: find(&columns.latitude)?,
            longitude: find(&columns.longitude)?,
        })
    }
}

/// Reads observations from CSV.
///
/// Rows with a missing, non-UTF-8, or unparseable id, day, or coordinate
/// are skipped; the number skipped is logged once at the end.
///
/// # Errors
///
/// Returns [`RequestError`] if the header row is missing a configured
/// column or the CSV itself is malformed.
pub fn read_observations<R: Read>(
    reader: R,
    columns: &ObservationColumns,
) -> Result<Vec<Observation>, RequestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let indexes = ColumnIndexes::resolve(reader.headers()?, columns)?;

    let mut observations = Vec::new();
    let mut skipped = 0u64;

    for result in reader.byte_records() {
        let record = result?;
        match parse_record(&record, &indexes) {
            Some(observation) => observations.push(observation),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} CSV rows with missing or invalid fields");
    }
    log::debug!("Parsed {} observations from CSV", observations.len());

    Ok(observations)
}

/// Returns the field at `idx` if it is present and valid UTF-8.
fn field(record: &csv::ByteRecord, idx: usize) -> Option<&str> {
    std::str::from_utf8(record.get(idx)?).ok()
}

fn parse_record(record: &csv::ByteRecord, indexes: &ColumnIndexes) -> Option<Observation> {
    let region_id = parse_region_id(field(record, indexes.region_id)?)?;
    let day = parse_day(field(record, indexes.day)?)?;
    let location = parse_lat_lng_str(
        field(record, indexes.latitude)?,
        field(record, indexes.longitude)?,
    )?;

    Some(Observation::new(region_id, day, location))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use nc_map_request_models::RegionId;

    use super::*;

    const SAMPLE: &str = "\
srnumber,nc,day,latitude,longitude
1-001,7,2020-01-02,34.05,-118.25
1-002,7.0,2020-01-01T09:00:00,34.06,-118.26
1-003,9,2020-01-01,34.07,-118.27
1-004,,2020-01-01,34.07,-118.27
1-005,9,yesterday,34.07,-118.27
1-006,9,2020-01-03,0,0
";

    #[test]
    fn reads_valid_rows_and_skips_invalid() {
        let rows = read_observations(SAMPLE.as_bytes(), &ObservationColumns::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].region_id, RegionId(7));
        assert_eq!(rows[0].day, NaiveDate::from_ymd_opt(2020, 1, 2).unwrap());
        assert_eq!(rows[1].region_id, RegionId(7));
        assert_eq!(rows[1].day, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(rows[2].region_id, RegionId(9));
    }

    #[test]
    fn honors_custom_column_names() {
        let input = "council,opened,lat,lon\n12,2021-06-01,34.1,-118.3\n";
        let columns = ObservationColumns {
            region_id: "council".to_string(),
            day: "opened".to_string(),
            latitude: "lat".to_string(),
            longitude: "lon".to_string(),
        };
        let rows = read_observations(input.as_bytes(), &columns).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].region_id, RegionId(12));
        assert!((rows[0].location.latitude - 34.1).abs() < f64::EPSILON);
    }

    #[test]
    fn errors_on_missing_column() {
        let input = "nc,day,latitude\n7,2020-01-01,34.0\n";
        let err = read_observations(input.as_bytes(), &ObservationColumns::default()).unwrap_err();
        assert!(
            matches!(err, RequestError::MissingColumn { ref column } if column == "longitude"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn skips_rows_with_invalid_utf8() {
        let mut input = b"nc,day,latitude,longitude\n7,2020-01-01,34.05,-118.25\n7,2020-01-0".to_vec();
        input.push(0xff);
        input.extend_from_slice(b",34.06,-118.26\n9,2020-01-02,34.07,-118.27\n");

        let rows = read_observations(input.as_slice(), &ObservationColumns::default()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].region_id, RegionId(7));
        assert_eq!(rows[1].region_id, RegionId(9));
    }

    #[test]
    fn empty_body_yields_no_rows() {
        let input = "nc,day,latitude,longitude\n";
        let rows = read_observations(input.as_bytes(), &ObservationColumns::default()).unwrap();
        assert!(rows.is_empty());
    }
}
