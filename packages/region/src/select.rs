//! Region selection.
//!
//! Resolves a council name to its boundary with an exact equality lookup
//! and filters the request table by council id.

use nc_map_boundary::BoundaryTable;
use nc_map_boundary_models::Boundary;
use nc_map_request_models::{Location, Observation, RegionId};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::RegionError;
use crate::bucket::{DayBuckets, bucket};

/// What to do when a region name matches more than one boundary.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Fail with [`RegionError::AmbiguousRegion`].
    #[default]
    Error,
    /// Use the first matching boundary in load order.
    First,
}

/// Non-fatal conditions found while selecting a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionWarning {
    /// The region resolved but has no requests. The map renders the
    /// boundary without animation frames.
    EmptyObservationSet {
        /// Council id of the selected region.
        region_id: RegionId,
    },
}

impl std::fmt::Display for SelectionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyObservationSet { region_id } => {
                write!(f, "no observations found for region {region_id}")
            }
        }
    }
}

/// The result of selecting one region.
#[derive(Debug, Clone)]
pub struct RegionSelection<'a> {
    /// The resolved boundary.
    pub boundary: &'a Boundary,
    /// Map view center (boundary centroid).
    pub center: Location,
    /// Requests whose council id equals the boundary's, in table order.
    pub observations: Vec<&'a Observation>,
    /// Non-fatal conditions.
    pub warnings: Vec<SelectionWarning>,
}

impl RegionSelection<'_> {
    /// Groups the selected requests into ordered per-day frames.
    #[must_use]
    pub fn day_buckets(&self) -> DayBuckets {
        bucket(self.observations.iter().copied())
    }

    /// Returns `true` if at least one request matched.
    #[must_use]
    pub fn has_observations(&self) -> bool {
        !self.observations.is_empty()
    }
}

/// Selects regions from a boundary table and a request table.
#[derive(Debug, Clone, Copy)]
pub struct RegionSelector<'a> {
    boundaries: &'a BoundaryTable,
    observations: &'a [Observation],
    policy: DuplicateNamePolicy,
}

impl<'a> RegionSelector<'a> {
    /// Creates a selector that errors on duplicate names.
    #[must_use]
    pub fn new(boundaries: &'a BoundaryTable, observations: &'a [Observation]) -> Self {
        Self {
            boundaries,
            observations,
            policy: DuplicateNamePolicy::default(),
        }
    }

    /// Sets the duplicate name policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DuplicateNamePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Resolves `name` to a boundary, its centroid, and its requests.
    ///
    /// # Errors
    ///
    /// * [`RegionError::RegionNotFound`] if no boundary has this name.
    /// * [`RegionError::AmbiguousRegion`] if several do and the policy is
    ///   [`DuplicateNamePolicy::Error`].
    /// * [`RegionError::DegenerateGeometry`] if the boundary has no
    ///   centroid.
    pub fn select(&self, name: &str) -> Result<RegionSelection<'a>, RegionError> {
        let boundary = self.resolve(name)?;

        let center = boundary
            .centroid()
            .ok_or_else(|| RegionError::DegenerateGeometry {
                name: boundary.name.clone(),
            })?;

        let observations: Vec<&'a Observation> = self
            .observations
            .iter()
            .filter(|observation| observation.region_id == boundary.region_id)
            .collect();

        log::debug!(
            "Selected region '{}' ({}): {} of {} observations",
            boundary.name,
            boundary.region_id,
            observations.len(),
            self.observations.len()
        );

        let mut warnings = Vec::new();
        if observations.is_empty() {
            warnings.push(SelectionWarning::EmptyObservationSet {
                region_id: boundary.region_id,
            });
        }

        Ok(RegionSelection {
            boundary,
            center,
            observations,
            warnings,
        })
    }

    fn resolve(&self, name: &str) -> Result<&'a Boundary, RegionError> {
        let matches = self.boundaries.find_by_name(name);

        match (matches.as_slice(), self.policy) {
            ([], _) => Err(RegionError::RegionNotFound {
                name: name.to_string(),
            }),
            ([only], _) => Ok(*only),
            ([first, ..], DuplicateNamePolicy::First) => {
                log::warn!(
                    "Region name '{name}' matches {} boundaries; using the first (id {})",
                    matches.len(),
                    first.region_id
                );
                Ok(*first)
            }
            (_, DuplicateNamePolicy::Error) => Err(RegionError::AmbiguousRegion {
                name: name.to_string(),
                matches: matches.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use geo::{LineString, MultiPolygon, Polygon};

    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        let ring = LineString::from(vec![
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
            (x0, y0),
        ]);
        MultiPolygon(vec![Polygon::new(ring, vec![])])
    }

    fn observation(id: i32, day: u32, lat: f64, lng: f64) -> Observation {
        Observation::new(
            RegionId(id),
            NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            Location::new(lat, lng),
        )
    }

    fn table() -> BoundaryTable {
        BoundaryTable::new(vec![
            Boundary::new(RegionId(7), "Downtown".to_string(), square(-118.26, 34.04, 0.02)),
            Boundary::new(RegionId(9), "Arleta".to_string(), square(-118.45, 34.23, 0.02)),
        ])
    }

    #[test]
    fn selects_geometry_and_matching_observations() {
        let boundaries = table();
        let observations = vec![
            observation(7, 2, 34.05, -118.25),
            observation(9, 1, 34.24, -118.44),
            observation(7, 1, 34.06, -118.26),
        ];
        let selector = RegionSelector::new(&boundaries, &observations);

        let selection = selector.select("Downtown").unwrap();

        assert_eq!(selection.boundary.region_id, RegionId(7));
        assert_eq!(selection.boundary.geometry, square(-118.26, 34.04, 0.02));
        assert_eq!(selection.observations.len(), 2);
        assert!(
            selection
                .observations
                .iter()
                .all(|o| o.region_id == RegionId(7))
        );
        assert_eq!(selection.observations[0], &observations[0]);
        assert_eq!(selection.observations[1], &observations[2]);
        assert!(selection.warnings.is_empty());
    }

    #[test]
    fn centers_on_boundary_centroid() {
        let boundaries = table();
        let selector = RegionSelector::new(&boundaries, &[]);
        let selection = selector.select("Downtown").unwrap();
        assert!((selection.center.latitude - 34.05).abs() < 1e-9);
        assert!((selection.center.longitude - -118.25).abs() < 1e-9);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let boundaries = table();
        let selector = RegionSelector::new(&boundaries, &[]);
        let err = selector.select("Atlantis").unwrap_err();
        assert_eq!(
            err,
            RegionError::RegionNotFound {
                name: "Atlantis".to_string()
            }
        );
    }

    #[test]
    fn empty_region_warns_but_succeeds() {
        let boundaries = table();
        let observations = vec![observation(7, 1, 34.05, -118.25)];
        let selector = RegionSelector::new(&boundaries, &observations);

        let selection = selector.select("Arleta").unwrap();

        assert!(!selection.has_observations());
        assert_eq!(
            selection.warnings,
            vec![SelectionWarning::EmptyObservationSet {
                region_id: RegionId(9)
            }]
        );
        assert!(selection.day_buckets().is_empty());
    }

    #[test]
    fn unmatched_observations_are_excluded() {
        let boundaries = table();
        let observations = vec![observation(42, 1, 34.0, -118.0), observation(9, 1, 34.24, -118.44)];
        let selector = RegionSelector::new(&boundaries, &observations);

        let total: usize = ["Downtown", "Arleta"]
            .iter()
            .map(|name| selector.select(name).unwrap().observations.len())
            .sum();

        assert_eq!(total, 1);
    }

    #[test]
    fn duplicate_names_error_by_default() {
        let boundaries = BoundaryTable::new(vec![
            Boundary::new(RegionId(1), "Central".to_string(), square(0.0, 0.0, 1.0)),
            Boundary::new(RegionId(2), "Central".to_string(), square(5.0, 5.0, 1.0)),
        ]);
        let selector = RegionSelector::new(&boundaries, &[]);
        let err = selector.select("Central").unwrap_err();
        assert_eq!(
            err,
            RegionError::AmbiguousRegion {
                name: "Central".to_string(),
                matches: 2
            }
        );
    }

    #[test]
    fn first_policy_takes_first_duplicate() {
        let boundaries = BoundaryTable::new(vec![
            Boundary::new(RegionId(1), "Central".to_string(), square(0.0, 0.0, 1.0)),
            Boundary::new(RegionId(2), "Central".to_string(), square(5.0, 5.0, 1.0)),
        ]);
        let observations = vec![observation(2, 1, 5.5, 5.5), observation(1, 1, 0.5, 0.5)];
        let selector =
            RegionSelector::new(&boundaries, &observations).with_policy(DuplicateNamePolicy::First);

        let selection = selector.select("Central").unwrap();

        assert_eq!(selection.boundary.region_id, RegionId(1));
        assert_eq!(selection.observations.len(), 1);
        assert_eq!(selection.observations[0].region_id, RegionId(1));
    }

    #[test]
    fn empty_geometry_is_degenerate() {
        let boundaries = BoundaryTable::new(vec![Boundary::new(
            RegionId(3),
            "Nowhere".to_string(),
            MultiPolygon(vec![]),
        )]);
        let selector = RegionSelector::new(&boundaries, &[]);
        assert_eq!(
            selector.select("Nowhere").unwrap_err(),
            RegionError::DegenerateGeometry {
                name: "Nowhere".to_string()
            }
        );
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("error".parse::<DuplicateNamePolicy>().unwrap(), DuplicateNamePolicy::Error);
        assert_eq!("first".parse::<DuplicateNamePolicy>().unwrap(), DuplicateNamePolicy::First);
        assert_eq!(DuplicateNamePolicy::default(), DuplicateNamePolicy::Error);
    }
}
