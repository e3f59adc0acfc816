//! In-memory boundary table indexed by display name.

use std::collections::BTreeMap;

use nc_map_boundary_models::Boundary;

/// Read-only boundary table with an exact-match name index.
///
/// Rows keep their load order. The name index maps each name to every row
/// carrying it, so callers can tell a unique match from a duplicate.
#[derive(Debug, Clone, Default)]
pub struct BoundaryTable {
    rows: Vec<Boundary>,
    by_name: BTreeMap<String, Vec<usize>>,
}

impl BoundaryTable {
    /// Builds the table and its name index.
    #[must_use]
    pub fn new(rows: Vec<Boundary>) -> Self {
        let mut by_name: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (idx, row) in rows.iter().enumerate() {
            by_name.entry(row.name.clone()).or_default().push(idx);
        }

        Self { rows, by_name }
    }

    /// Returns all rows in load order.
    #[must_use]
    pub fn rows(&self) -> &[Boundary] {
        &self.rows
    }

    /// Returns the number of boundaries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no boundaries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns every boundary whose name equals `name`, in load order.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Vec<&Boundary> {
        self.by_name
            .get(name)
            .map(|indexes| indexes.iter().map(|&idx| &self.rows[idx]).collect())
            .unwrap_or_default()
    }

    /// Returns the distinct boundary names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.by_name.keys().map(String::as_str).collect()
    }

    /// Returns names that appear on more than one row, with their counts.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<(&str, usize)> {
        self.by_name
            .iter()
            .filter(|(_, indexes)| indexes.len() > 1)
            .map(|(name, indexes)| (name.as_str(), indexes.len()))
            .collect()
    }
}
