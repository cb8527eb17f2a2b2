//! A* search on the obstacle grid.
//!
//! Moves are orthogonal with unit cost and the heuristic is the Manhattan
//! distance, which is admissible and consistent on this grid, so every path
//! returned is a shortest one. The open queue pops the lowest `f` first and
//! breaks ties on the lowest cell, which keeps the output reproducible.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::grid::{Cell, Grid, manhattan};
use crate::traits::PathProvider;

#[derive(Debug, Clone)]
struct Node {
    cell: Cell,
    g_cost: u32,
    f_cost: u32,
}

// Equality follows the queue order: `g_cost` is implied by `f_cost` and `cell`.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.cell == other.cell
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.cell.cmp(&self.cell))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A* router over a borrowed [`Grid`].
#[derive(Debug, Clone, Copy)]
pub struct AStar<'a> {
    grid: &'a Grid,
}

impl<'a> AStar<'a> {
    pub fn new(grid: &'a Grid) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Full shortest route including both endpoints, or `None` when there
    /// is no route. `start == goal` yields a single-cell route.
    pub fn search(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        trace!(%start, %goal, "astar search");

        if !self.grid.is_free(start) || !self.grid.is_free(goal) {
            debug!(%start, %goal, "astar endpoint out of bounds or blocked");
            return None;
        }
        if start == goal {
            return Some(vec![start]);
        }

        let mut open_set = BinaryHeap::new();
        let mut came_from: HashMap<Cell, Cell> = HashMap::new();
        let mut g_scores: HashMap<Cell, u32> = HashMap::new();

        g_scores.insert(start, 0);
        open_set.push(Node {
            cell: start,
            g_cost: 0,
            f_cost: manhattan(start, goal),
        });

        let mut nodes_expanded = 0usize;

        while let Some(current) = open_set.pop() {
            if current.cell == goal {
                trace!(nodes_expanded, cost = current.g_cost, "astar reached goal");
                return Some(reconstruct(&came_from, goal));
            }

            // Superseded by a cheaper push of the same cell.
            if g_scores
                .get(&current.cell)
                .is_some_and(|best| current.g_cost > *best)
            {
                continue;
            }
            nodes_expanded += 1;

            let tentative_g = current.g_cost + 1;
            for neighbor in self.grid.neighbors(current.cell) {
                let improves = g_scores
                    .get(&neighbor)
                    .is_none_or(|known| tentative_g < *known);
                if improves {
                    g_scores.insert(neighbor, tentative_g);
                    came_from.insert(neighbor, current.cell);
                    open_set.push(Node {
                        cell: neighbor,
                        g_cost: tentative_g,
                        f_cost: tentative_g + manhattan(neighbor, goal),
                    });
                }
            }
        }

        debug!(%start, %goal, nodes_expanded, "astar found no path");
        None
    }

    /// Number of steps on a shortest route; `None` when unreachable.
    pub fn path_length(&self, start: Cell, goal: Cell) -> Option<usize> {
        self.search(start, goal).map(|path| path.len() - 1)
    }

    pub fn path_exists(&self, start: Cell, goal: Cell) -> bool {
        self.search(start, goal).is_some()
    }
}

impl PathProvider for AStar<'_> {
    fn find_path(&self, start: Cell, goal: Cell) -> Vec<Cell> {
        match self.search(start, goal) {
            Some(path) if path.len() > 2 => path[1..path.len() - 1].to_vec(),
            _ => Vec::new(),
        }
    }

    fn is_passable(&self, cell: Cell) -> bool {
        self.grid.is_free(cell)
    }
}

fn reconstruct(came_from: &HashMap<Cell, Cell>, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}

/// Interior cells of a shortest route on `grid`, see [`PathProvider::find_path`].
pub fn find_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    AStar::new(grid).find_path(start, goal)
}
