//! Test fixtures for taxi-planner.
//!
//! Provides the reference city grid:
//! - 15x10 grid with a wall at x = 5, a short barrier at y = 2 and one
//!   blocked cell on the depot column
//! - Named pickup locations and a sample dispatch log

pub mod city_grid;

pub use city_grid::*;
