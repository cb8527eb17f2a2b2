//! Grid model: cells, the obstacle grid and Manhattan distance.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::GridConfig;
use crate::error::PlanError;

/// A grid cell `(x, y)`.
///
/// Ordering is lexicographic on `(x, y)`; the A* queue and the pairing
/// tie-breaks rely on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Orthogonal neighbours in the order `+x, -x, +y, -y`.
    pub fn neighbors_4(self) -> [Cell; 4] {
        [
            Cell::new(self.x + 1, self.y),
            Cell::new(self.x - 1, self.y),
            Cell::new(self.x, self.y + 1),
            Cell::new(self.x, self.y - 1),
        ]
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl From<Cell> for (i32, i32) {
    fn from(cell: Cell) -> Self {
        (cell.x, cell.y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// `|dx| + |dy|` between two cells.
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    a.x.abs_diff(b.x) + a.y.abs_diff(b.y)
}

/// Fixed obstacle grid with a single depot.
///
/// Built once from a [`GridConfig`] and never mutated afterwards, so a
/// shared reference can be handed to any number of planners.
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    obstacles: HashSet<Cell>,
    depot: Cell,
    pairing_radius: u32,
}

impl Grid {
    pub fn new(config: GridConfig) -> Result<Self, PlanError> {
        if config.width <= 0 || config.height <= 0 {
            return Err(PlanError::InvalidConfig(format!(
                "grid dimensions must be positive, got {}x{}",
                config.width, config.height
            )));
        }

        let in_bounds =
            |cell: Cell| cell.x >= 0 && cell.x < config.width && cell.y >= 0 && cell.y < config.height;

        if let Some(outside) = config.obstacles.iter().find(|cell| !in_bounds(**cell)) {
            return Err(PlanError::InvalidConfig(format!(
                "obstacle {} lies outside the {}x{} grid",
                outside, config.width, config.height
            )));
        }

        if !in_bounds(config.depot) {
            return Err(PlanError::InvalidConfig(format!(
                "depot {} lies outside the {}x{} grid",
                config.depot, config.width, config.height
            )));
        }

        let obstacles: HashSet<Cell> = config.obstacles.into_iter().collect();
        if obstacles.contains(&config.depot) {
            return Err(PlanError::InvalidConfig(format!(
                "depot {} is an obstacle",
                config.depot
            )));
        }

        Ok(Self {
            width: config.width,
            height: config.height,
            obstacles,
            depot: config.depot,
            pairing_radius: config.pairing_radius,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn depot(&self) -> Cell {
        self.depot
    }

    /// Default pairing radius for the fleet planner.
    pub fn pairing_radius(&self) -> u32 {
        self.pairing_radius
    }

    pub fn obstacles(&self) -> &HashSet<Cell> {
        &self.obstacles
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.width && cell.y >= 0 && cell.y < self.height
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(&cell)
    }

    /// In bounds and not an obstacle.
    pub fn is_free(&self, cell: Cell) -> bool {
        self.in_bounds(cell) && !self.is_obstacle(cell)
    }

    /// Free orthogonal neighbours of `cell`.
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        cell.neighbors_4()
            .into_iter()
            .filter(move |next| self.is_free(*next))
    }
}

impl Default for Grid {
    fn default() -> Self {
        let config = GridConfig::default();
        Self {
            width: config.width,
            height: config.height,
            obstacles: config.obstacles.into_iter().collect(),
            depot: config.depot,
            pairing_radius: config.pairing_radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan(Cell::new(0, 9), Cell::new(2, 3)), 8);
        assert_eq!(manhattan(Cell::new(4, 4), Cell::new(4, 4)), 0);
        assert_eq!(manhattan(Cell::new(3, 1), Cell::new(1, 3)), 4);
    }

    #[test]
    fn test_cell_ordering_is_lexicographic() {
        assert!(Cell::new(1, 9) < Cell::new(2, 0));
        assert!(Cell::new(2, 0) < Cell::new(2, 1));
    }

    #[test]
    fn test_default_grid_matches_reference_city() {
        let grid = Grid::default();
        assert_eq!(grid.width(), 15);
        assert_eq!(grid.height(), 10);
        assert_eq!(grid.depot(), Cell::new(0, 9));
        assert_eq!(grid.pairing_radius(), 2);
        assert!(grid.is_obstacle(Cell::new(0, 4)));
        assert_eq!(grid.obstacles().len(), 7);
    }

    #[test]
    fn test_neighbors_skip_obstacles_and_edges() {
        let grid = Grid::default();
        let around_corner: Vec<Cell> = grid.neighbors(Cell::new(0, 9)).collect();
        assert_eq!(around_corner, vec![Cell::new(1, 9), Cell::new(0, 8)]);

        let next_to_wall: Vec<Cell> = grid.neighbors(Cell::new(0, 5)).collect();
        assert_eq!(next_to_wall, vec![Cell::new(1, 5), Cell::new(0, 6)]);
    }

    #[test]
    fn test_rejects_depot_on_obstacle() {
        let config = GridConfig {
            depot: Cell::new(5, 5),
            ..GridConfig::default()
        };
        assert!(matches!(Grid::new(config), Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_obstacle_outside_grid() {
        let mut config = GridConfig::default();
        config.obstacles.push(Cell::new(15, 0));
        assert!(matches!(Grid::new(config), Err(PlanError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        let config = GridConfig {
            width: 0,
            ..GridConfig::default()
        };
        assert!(Grid::new(config).is_err());
    }
}
