//! Named locations on the grid.
//!
//! Labels are matched case-insensitively; they are stored lower-cased.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::PlanError;
use crate::grid::Cell;

/// Label always bound to the depot.
pub const DEPOT_LABEL: &str = "st";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LocationMap {
    cells: BTreeMap<String, Cell>,
}

impl LocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `{"label": [x, y], ...}`.
    ///
    /// Any `st` entry in the input is ignored; `st` is bound to `depot`.
    pub fn from_json(text: &str, depot: Cell) -> Result<Self, PlanError> {
        let raw: BTreeMap<String, Cell> = serde_json::from_str(text)?;
        let mut locations: LocationMap = raw
            .into_iter()
            .filter(|(label, _)| !label.eq_ignore_ascii_case(DEPOT_LABEL))
            .collect();
        locations.insert(DEPOT_LABEL, depot);
        Ok(locations)
    }

    pub fn insert(&mut self, label: &str, cell: Cell) -> Option<Cell> {
        self.cells.insert(label.to_lowercase(), cell)
    }

    pub fn get(&self, label: &str) -> Option<Cell> {
        self.cells.get(&label.to_lowercase()).copied()
    }

    /// Like [`get`](Self::get), but an unknown label is an error.
    pub fn resolve(&self, label: &str) -> Result<Cell, PlanError> {
        self.get(label)
            .ok_or_else(|| PlanError::UnknownLocation(label.to_string()))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Cell)> {
        self.cells.iter().map(|(label, cell)| (label.as_str(), *cell))
    }
}

impl<S: AsRef<str>> FromIterator<(S, Cell)> for LocationMap {
    fn from_iter<I: IntoIterator<Item = (S, Cell)>>(iter: I) -> Self {
        let mut locations = LocationMap::new();
        for (label, cell) in iter {
            locations.insert(label.as_ref(), cell);
        }
        locations
    }
}
