//! Core routing traits.
//!
//! Trip and fleet planning only need a way to connect two cells. Concrete
//! routers implement [`PathProvider`]; the planners are generic over it.

use crate::error::PlanError;
use crate::grid::{Cell, manhattan};

/// Connects two grid cells with a cell-by-cell route.
pub trait PathProvider {
    /// Interior cells of a route from `start` to `goal`, excluding both ends.
    ///
    /// Empty when `start == goal`, when the cells are adjacent, and when no
    /// route exists.
    fn find_path(&self, start: Cell, goal: Cell) -> Vec<Cell>;

    /// Whether a route may start or end on `cell`.
    fn is_passable(&self, _cell: Cell) -> bool {
        true
    }

    /// Like [`find_path`](Self::find_path), but reports a missing route
    /// instead of returning an empty interior for non-adjacent cells.
    fn route(&self, start: Cell, goal: Cell) -> Result<Vec<Cell>, PlanError> {
        if !self.is_passable(start) || !self.is_passable(goal) {
            return Err(PlanError::Unreachable {
                from: start,
                to: goal,
            });
        }
        if start == goal {
            return Ok(Vec::new());
        }

        let interior = self.find_path(start, goal);
        if interior.is_empty() && manhattan(start, goal) != 1 {
            return Err(PlanError::Unreachable {
                from: start,
                to: goal,
            });
        }

        Ok(interior)
    }
}

impl<P: PathProvider + ?Sized> PathProvider for &P {
    fn find_path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        (**self).find_path(start, goal)
    }

    fn is_passable(&self, cell: Cell) -> bool {
        (**self).is_passable(cell)
    }
}
