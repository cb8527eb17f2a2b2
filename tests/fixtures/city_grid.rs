//! Reference city grid used across integration tests.

use taxi_planner::{Cell, Grid, GridConfig, LocationMap};

/// A named pickup location.
#[derive(Debug, Clone)]
pub struct Landmark {
    pub name: &'static str,
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub const fn new(name: &'static str, x: i32, y: i32) -> Self {
        Self { name, x, y }
    }

    pub fn cell(&self) -> Cell {
        Cell::new(self.x, self.y)
    }
}

pub const DEPOT: Cell = Cell::new(0, 9);

// ============================================================================
// Landmarks
// ============================================================================

pub const LANDMARKS: &[Landmark] = &[
    Landmark::new("l1", 2, 3),
    Landmark::new("l2", 3, 3),
    Landmark::new("l3", 7, 7),
    Landmark::new("l4", 12, 1),
    Landmark::new("l5", 13, 1),
    Landmark::new("l6", 1, 8),
    Landmark::new("l7", 0, 0),
    Landmark::new("l8", 10, 6),
];

/// Dispatch log: one taxi collects P1 at l1 and brings it back to the depot.
pub const SINGLE_RIDE_LOG: &[&str] = &[
    "(move taxi1 st l1)",
    "(pickup taxi1 p1 l1)",
    "(move taxi1 l1 st)",
    "(dropoff taxi1 p1 st)",
];

/// Dispatch log with two passengers sharing part of the ride.
pub const SHARED_RIDE_LOG: &[&str] = &[
    "(move taxi1 st l6)",
    "(pickup taxi1 p2 l6)",
    "(move taxi1 l6 l1)",
    "(pickup taxi1 p1 l1)",
    "(move taxi1 l1 l2)",
    "(pickup taxi1 p3 l2)",
    "(move taxi1 l2 st)",
    "(dropoff taxi1 p1 st)",
    "(dropoff taxi1 p2 st)",
    "(dropoff taxi1 p3 st)",
];

pub fn city_grid() -> Grid {
    Grid::new(GridConfig::default()).expect("reference grid is valid")
}

pub fn city_locations() -> LocationMap {
    let mut locations: LocationMap = LANDMARKS.iter().map(|l| (l.name, l.cell())).collect();
    locations.insert("st", DEPOT);
    locations
}
