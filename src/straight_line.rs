//! Straight-line router (preview when obstacles do not matter).
//!
//! Walks the x axis first, then the y axis. Ignores obstacles entirely, so
//! routes may cross walls, but it is always available and its length is
//! exactly the Manhattan distance.

use crate::grid::Cell;
use crate::traits::PathProvider;

/// Axis order for the L-shaped route.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AxisOrder {
    #[default]
    XFirst,
    YFirst,
}

/// Obstacle-blind L-shaped router.
#[derive(Debug, Clone, Default)]
pub struct StraightLineRouter {
    pub axis_order: AxisOrder,
}

impl StraightLineRouter {
    pub fn new(axis_order: AxisOrder) -> Self {
        Self { axis_order }
    }

    fn walk(from: Cell, to: Cell, out: &mut Vec<Cell>, along_x: bool) -> Cell {
        let mut current = from;
        loop {
            let (pos, target) = if along_x {
                (current.x, to.x)
            } else {
                (current.y, to.y)
            };
            if pos == target {
                return current;
            }
            let step = (target - pos).signum();
            current = if along_x {
                Cell::new(current.x + step, current.y)
            } else {
                Cell::new(current.x, current.y + step)
            };
            out.push(current);
        }
    }
}

impl PathProvider for StraightLineRouter {
    fn find_path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        let mut cells = Vec::new();
        let x_first = self.axis_order == AxisOrder::XFirst;
        let corner = Self::walk(start, goal, &mut cells, x_first);
        Self::walk(corner, goal, &mut cells, !x_first);
        // The walk ends on the goal itself.
        cells.pop();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::manhattan;

    #[test]
    fn test_same_point_has_no_interior() {
        let router = StraightLineRouter::default();
        assert!(router.find_path(Cell::new(2, 2), Cell::new(2, 2)).is_empty());
    }

    #[test]
    fn test_x_first_corner() {
        let router = StraightLineRouter::default();
        let path = router.find_path(Cell::new(0, 0), Cell::new(2, 2));
        assert_eq!(path, vec![Cell::new(1, 0), Cell::new(2, 0), Cell::new(2, 1)]);
    }

    #[test]
    fn test_y_first_corner() {
        let router = StraightLineRouter::new(AxisOrder::YFirst);
        let path = router.find_path(Cell::new(3, 3), Cell::new(1, 1));
        assert_eq!(path, vec![Cell::new(3, 2), Cell::new(3, 1), Cell::new(2, 1)]);
    }

    #[test]
    fn test_length_matches_manhattan() {
        let router = StraightLineRouter::default();
        let start = Cell::new(0, 9);
        let goal = Cell::new(7, 2);
        let path = router.find_path(start, goal);
        assert_eq!(path.len() + 1, manhattan(start, goal) as usize);
    }

    #[test]
    fn test_route_accepts_adjacent_cells() {
        let router = StraightLineRouter::default();
        assert!(router.route(Cell::new(0, 0), Cell::new(0, 1)).unwrap().is_empty());
    }
}
