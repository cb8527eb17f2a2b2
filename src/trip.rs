//! Trip plans and the action-log trip builder.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::debug;

use crate::action::DispatchAction;
use crate::error::PlanError;
use crate::grid::Cell;
use crate::locations::LocationMap;
use crate::traits::PathProvider;

/// Index into [`TripPlan::path`] → passengers boarding or leaving there.
pub type EventMap = BTreeMap<usize, BTreeSet<String>>;

/// One vehicle's route with pickup and dropoff events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TripPlan {
    pub path: Vec<Cell>,
    pub pickups: EventMap,
    pub dropoffs: EventMap,
}

/// Summary counts for a trip plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripStats {
    pub path_len: usize,
    pub pickup_events: usize,
    pub dropoff_events: usize,
    pub passengers_served: usize,
}

impl TripPlan {
    /// A trip that never leaves the depot.
    pub fn depot_only(depot: Cell) -> Self {
        Self {
            path: vec![depot],
            ..Default::default()
        }
    }

    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    pub fn position_at(&self, index: usize) -> Option<Cell> {
        self.path.get(index).copied()
    }

    pub fn pickups_at(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.pickups.get(&index)
    }

    pub fn dropoffs_at(&self, index: usize) -> Option<&BTreeSet<String>> {
        self.dropoffs.get(&index)
    }

    /// True once `index` has reached the last cell of the path.
    pub fn is_complete_at(&self, index: usize) -> bool {
        index + 1 >= self.path.len()
    }

    pub fn stats(&self) -> TripStats {
        let served: BTreeSet<&str> = self
            .pickups
            .values()
            .flatten()
            .map(String::as_str)
            .collect();
        TripStats {
            path_len: self.path.len(),
            pickup_events: self.pickups.len(),
            dropoff_events: self.dropoffs.len(),
            passengers_served: served.len(),
        }
    }
}

/// Grows a [`TripPlan`] leg by leg. Events attach to the last path index.
#[derive(Debug, Default)]
pub(crate) struct TripAssembler {
    plan: TripPlan,
}

impl TripAssembler {
    pub(crate) fn starting_at(cell: Cell) -> Self {
        Self {
            plan: TripPlan::depot_only(cell),
        }
    }

    pub(crate) fn current(&self) -> Option<Cell> {
        self.plan.path.last().copied()
    }

    /// Seed an empty path with `cell`; no-op otherwise.
    pub(crate) fn seed(&mut self, cell: Cell) {
        if self.plan.path.is_empty() {
            self.plan.path.push(cell);
        }
    }

    /// Route from the current cell to `goal` and append the leg.
    ///
    /// Already standing on `goal` appends nothing, so the next event merges
    /// into the current index.
    pub(crate) fn travel_to<P: PathProvider>(
        &mut self,
        router: &P,
        goal: Cell,
    ) -> Result<(), PlanError> {
        let Some(current) = self.current() else {
            self.plan.path.push(goal);
            return Ok(());
        };
        if current == goal {
            return Ok(());
        }
        let leg = router.route(current, goal)?;
        self.plan.path.extend(leg);
        self.plan.path.push(goal);
        Ok(())
    }

    pub(crate) fn pick_up(&mut self, passenger: &str) {
        let index = self.last_index();
        self.plan
            .pickups
            .entry(index)
            .or_default()
            .insert(passenger.to_string());
    }

    pub(crate) fn drop_off(&mut self, passenger: &str) {
        let index = self.last_index();
        self.plan
            .dropoffs
            .entry(index)
            .or_default()
            .insert(passenger.to_string());
    }

    fn last_index(&self) -> usize {
        self.plan.path.len().saturating_sub(1)
    }

    pub(crate) fn finish(self) -> TripPlan {
        self.plan
    }
}

/// Turn an ordered action log into a concrete trip.
///
/// Returns the trip and the registry of passenger → first pickup cell.
/// Passenger labels are upper-cased. An unknown location label or a leg
/// with no route aborts the whole build. `depot` must be the depot of the
/// grid `router` searches.
pub fn build_trip<P: PathProvider>(
    router: &P,
    depot: Cell,
    actions: &[DispatchAction],
    locations: &LocationMap,
) -> Result<(TripPlan, BTreeMap<String, Cell>), PlanError> {
    let mut trip = TripAssembler::default();
    let mut registry: BTreeMap<String, Cell> = BTreeMap::new();

    for action in actions {
        match action {
            DispatchAction::Move { from, to, .. } => {
                let from_cell = locations.resolve(from)?;
                let to_cell = locations.resolve(to)?;
                trip.seed(from_cell);
                trip.travel_to(router, to_cell)?;
            }
            DispatchAction::Pickup {
                passenger,
                location,
                ..
            } => {
                let passenger = passenger.to_uppercase();
                let cell = locations.resolve(location)?;
                registry.entry(passenger.clone()).or_insert(cell);
                trip.seed(cell);
                trip.pick_up(&passenger);
            }
            DispatchAction::Dropoff { passenger, .. } => {
                trip.seed(depot);
                trip.drop_off(&passenger.to_uppercase());
            }
        }
    }

    let plan = trip.finish();
    debug!(
        actions = actions.len(),
        path_len = plan.len(),
        passengers = registry.len(),
        "built trip from actions"
    );
    Ok((plan, registry))
}
