//! taxi-planner core
//!
//! Route planning for taxis on a fixed obstacle grid: A* search, trips
//! built from dispatch action logs, and a greedy solo/shared fleet planner.

pub mod action;
pub mod astar;
pub mod config;
pub mod error;
pub mod fleet;
pub mod grid;
pub mod locations;
pub mod pairing;
pub mod straight_line;
pub mod traits;
pub mod trip;

pub use action::{DispatchAction, parse_action, parse_action_log, parse_plan_text};
pub use astar::{AStar, find_path};
pub use config::GridConfig;
pub use error::PlanError;
pub use fleet::{FleetPlan, TaxiRole, build_fleet_plan};
pub use grid::{Cell, Grid, manhattan};
pub use locations::LocationMap;
pub use pairing::{Pairing, pair_customers};
pub use straight_line::StraightLineRouter;
pub use traits::PathProvider;
pub use trip::{TripPlan, build_trip};
