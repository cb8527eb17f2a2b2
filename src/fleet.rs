//! Two-taxi fleet planner.
//!
//! Customers close enough to each other ride the shared taxi in pairs; the
//! rest are served one at a time by the solo taxi, which returns to the
//! depot after every customer. Visiting order is a greedy nearest-neighbour
//! heuristic, not an optimal tour.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::PlanError;
use crate::grid::{Cell, manhattan};
use crate::locations::LocationMap;
use crate::pairing::pair_customers;
use crate::traits::PathProvider;
use crate::trip::{TripAssembler, TripPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxiRole {
    /// Serves unpaired customers one at a time.
    Solo,
    /// Serves paired customers two at a time.
    Shared,
}

impl TaxiRole {
    pub const ALL: [TaxiRole; 2] = [TaxiRole::Solo, TaxiRole::Shared];

    pub fn as_str(self) -> &'static str {
        match self {
            TaxiRole::Solo => "solo",
            TaxiRole::Shared => "shared",
        }
    }
}

impl fmt::Display for TaxiRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trip plans for the whole fleet plus the customer registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetPlan {
    pub trips: BTreeMap<TaxiRole, TripPlan>,
    /// Passenger → pickup cell.
    pub customers: BTreeMap<String, Cell>,
}

impl FleetPlan {
    pub fn roles(&self) -> impl Iterator<Item = TaxiRole> + '_ {
        self.trips.keys().copied()
    }

    pub fn trip(&self, role: TaxiRole) -> Option<&TripPlan> {
        self.trips.get(&role)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    /// True when every taxi has reached the end of its path. Missing
    /// entries in `indices` count as index 0.
    pub fn all_complete(&self, indices: &BTreeMap<TaxiRole, usize>) -> bool {
        self.trips
            .iter()
            .all(|(role, trip)| trip.is_complete_at(indices.get(role).copied().unwrap_or(0)))
    }
}

/// Plan the solo and shared taxis for a first-pickup map.
///
/// `pickup_map` is passenger → location label. Passengers whose label is
/// not in `locations`, or whose cell cannot be reached from the depot, are
/// left out of the plan.
///
/// `depot` must be the depot of the grid `router` searches (for an
/// [`AStar`](crate::AStar), `router.grid().depot()`). A depot the router
/// cannot stand on is rejected with [`PlanError::InvalidConfig`].
pub fn build_fleet_plan<P: PathProvider>(
    router: &P,
    depot: Cell,
    pickup_map: &BTreeMap<String, String>,
    locations: &LocationMap,
    pair_radius: u32,
) -> Result<FleetPlan, PlanError> {
    if !router.is_passable(depot) {
        return Err(PlanError::InvalidConfig(format!(
            "depot {} is blocked or outside the grid",
            depot
        )));
    }

    let mut customers: BTreeMap<String, Cell> = BTreeMap::new();
    for (passenger, label) in pickup_map {
        let Some(cell) = locations.get(label) else {
            debug!(%passenger, %label, "dropping passenger with unknown location");
            continue;
        };
        if let Err(err) = router.route(depot, cell) {
            warn!(%passenger, %err, "dropping passenger the depot cannot reach");
            continue;
        }
        customers.insert(passenger.clone(), cell);
    }

    if customers.is_empty() {
        debug!("no customers to plan, both taxis stay at the depot");
        return Ok(FleetPlan {
            trips: TaxiRole::ALL
                .into_iter()
                .map(|role| (role, TripPlan::depot_only(depot)))
                .collect(),
            customers,
        });
    }

    let pairing = pair_customers(&customers, pair_radius, depot);
    let solo = plan_solo_trip(router, depot, &pairing.unpaired, &customers)?;
    let shared = plan_shared_trip(router, depot, &pairing.pairs, &[], &customers)?;

    debug!(
        customers = customers.len(),
        pairs = pairing.pairs.len(),
        singles = pairing.unpaired.len(),
        solo_len = solo.len(),
        shared_len = shared.len(),
        "fleet plan built"
    );

    Ok(FleetPlan {
        trips: BTreeMap::from([(TaxiRole::Solo, solo), (TaxiRole::Shared, shared)]),
        customers,
    })
}

/// Serve each customer individually: depot → customer → depot, always
/// picking the nearest remaining customer (ties by label).
pub fn plan_solo_trip<P: PathProvider>(
    router: &P,
    depot: Cell,
    customers: &[String],
    positions: &BTreeMap<String, Cell>,
) -> Result<TripPlan, PlanError> {
    let mut remaining: Vec<&str> = customers.iter().map(String::as_str).collect();
    remaining.sort_unstable();
    remaining.dedup();
    let remaining_cells = lookup_all(&remaining, positions)?;

    let mut trip = TripAssembler::starting_at(depot);
    let mut left: BTreeSet<&str> = remaining.iter().copied().collect();

    // Every leg starts back at the depot.
    while let Some(next) = nearest_customer(depot, left.iter().copied(), positions) {
        let cell = remaining_cells[next];
        trip.travel_to(router, cell)?;
        trip.pick_up(next);
        trip.travel_to(router, depot)?;
        trip.drop_off(next);
        left.remove(next);
    }

    Ok(trip.finish())
}

/// Serve pairs together, closest pairs first, then any `singles` one at a
/// time.
///
/// Within a pair the member nearer the depot is collected first; on a tie
/// the declared order is kept. Both members leave the taxi together back at
/// the depot.
pub fn plan_shared_trip<P: PathProvider>(
    router: &P,
    depot: Cell,
    pairs: &[(String, String)],
    singles: &[String],
    positions: &BTreeMap<String, Cell>,
) -> Result<TripPlan, PlanError> {
    let mut ordered: Vec<(&str, Cell, &str, Cell)> = Vec::with_capacity(pairs.len());
    for (a, b) in pairs {
        let cell_a = lookup(a, positions)?;
        let cell_b = lookup(b, positions)?;
        ordered.push((a.as_str(), cell_a, b.as_str(), cell_b));
    }
    ordered.sort_by_key(|(_, cell_a, _, cell_b)| manhattan(*cell_a, *cell_b));

    let mut trip = TripAssembler::starting_at(depot);

    for (a, cell_a, b, cell_b) in ordered {
        let ((first, first_cell), (second, second_cell)) =
            if manhattan(cell_b, depot) < manhattan(cell_a, depot) {
                ((b, cell_b), (a, cell_a))
            } else {
                ((a, cell_a), (b, cell_b))
            };

        trip.travel_to(router, first_cell)?;
        trip.pick_up(first);
        trip.travel_to(router, second_cell)?;
        trip.pick_up(second);
        trip.travel_to(router, depot)?;
        trip.drop_off(first);
        trip.drop_off(second);
    }

    for passenger in singles {
        let cell = lookup(passenger, positions)?;
        trip.travel_to(router, cell)?;
        trip.pick_up(passenger);
        trip.travel_to(router, depot)?;
        trip.drop_off(passenger);
    }

    Ok(trip.finish())
}

/// Customer nearest to `from` by Manhattan distance, ties by label.
/// Customers without a position are ignored.
pub fn nearest_customer<'a>(
    from: Cell,
    customers: impl IntoIterator<Item = &'a str>,
    positions: &BTreeMap<String, Cell>,
) -> Option<&'a str> {
    customers
        .into_iter()
        .filter_map(|label| positions.get(label).map(|cell| (manhattan(from, *cell), label)))
        .min()
        .map(|(_, label)| label)
}

/// Nearest-neighbour visiting order from `start`, without returning.
pub fn greedy_visit_order(
    customers: &[String],
    positions: &BTreeMap<String, Cell>,
    start: Cell,
) -> Vec<String> {
    let mut left: BTreeSet<&str> = customers.iter().map(String::as_str).collect();
    let mut order = Vec::with_capacity(left.len());
    let mut current = start;

    while let Some(next) = nearest_customer(current, left.iter().copied(), positions) {
        current = positions[next];
        left.remove(next);
        order.push(next.to_string());
    }

    order
}

/// Manhattan length of `base → each customer in order → base`.
/// Customers without a position are skipped.
pub fn tour_cost(order: &[String], positions: &BTreeMap<String, Cell>, base: Cell) -> u32 {
    if order.is_empty() {
        return 0;
    }

    let mut cost = 0;
    let mut current = base;
    for cell in order.iter().filter_map(|label| positions.get(label)) {
        cost += manhattan(current, *cell);
        current = *cell;
    }
    cost + manhattan(current, base)
}

fn lookup(label: &str, positions: &BTreeMap<String, Cell>) -> Result<Cell, PlanError> {
    positions
        .get(label)
        .copied()
        .ok_or_else(|| PlanError::UnknownLocation(label.to_string()))
}

fn lookup_all<'a>(
    labels: &[&'a str],
    positions: &BTreeMap<String, Cell>,
) -> Result<BTreeMap<&'a str, Cell>, PlanError> {
    labels
        .iter()
        .map(|label| lookup(label, positions).map(|cell| (*label, cell)))
        .collect()
}
