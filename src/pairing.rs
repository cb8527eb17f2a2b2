//! Greedy customer pairing within a Manhattan radius.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::grid::{Cell, manhattan};

/// Two customers close enough to share a ride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePair {
    pub first: String,
    pub second: String,
    pub distance: u32,
    /// Sum of both members' distances to the depot.
    pub depot_distance: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pairing {
    /// Accepted pairs, in acceptance order.
    pub pairs: Vec<(String, String)>,
    /// Customers left without a partner, sorted.
    pub unpaired: Vec<String>,
}

/// All pairs within `radius`, best first.
///
/// Sorted by pair distance, then by combined distance to the depot, then by
/// the two labels.
pub fn candidate_pairs(
    positions: &BTreeMap<String, Cell>,
    radius: u32,
    depot: Cell,
) -> Vec<CandidatePair> {
    let entries: Vec<(&String, Cell)> = positions.iter().map(|(label, cell)| (label, *cell)).collect();
    let mut candidates = Vec::new();

    for (i, (a, cell_a)) in entries.iter().enumerate() {
        for (b, cell_b) in &entries[i + 1..] {
            let distance = manhattan(*cell_a, *cell_b);
            if distance <= radius {
                candidates.push(CandidatePair {
                    first: (*a).clone(),
                    second: (*b).clone(),
                    distance,
                    depot_distance: manhattan(*cell_a, depot) + manhattan(*cell_b, depot),
                });
            }
        }
    }

    candidates.sort_by(|x, y| {
        (x.distance, x.depot_distance, &x.first, &x.second)
            .cmp(&(y.distance, y.depot_distance, &y.first, &y.second))
    });
    candidates
}

/// Greedily pair customers that are at most `radius` apart.
///
/// Candidates are scanned best first and accepted when neither member is
/// taken yet. Acceptance is final, so the matching is not globally optimal.
pub fn pair_customers(positions: &BTreeMap<String, Cell>, radius: u32, depot: Cell) -> Pairing {
    let candidates = candidate_pairs(positions, radius, depot);
    debug!(
        radius,
        candidates = ?candidates
            .iter()
            .map(|c| (c.distance, c.first.as_str(), c.second.as_str()))
            .collect::<Vec<_>>(),
        "pairing candidates"
    );

    let mut used: BTreeSet<&str> = BTreeSet::new();
    let mut pairs = Vec::new();
    for candidate in &candidates {
        if used.contains(candidate.first.as_str()) || used.contains(candidate.second.as_str()) {
            continue;
        }
        used.insert(&candidate.first);
        used.insert(&candidate.second);
        pairs.push((candidate.first.clone(), candidate.second.clone()));
    }

    // BTreeMap keys are already sorted.
    let unpaired: Vec<String> = positions
        .keys()
        .filter(|label| !used.contains(label.as_str()))
        .cloned()
        .collect();

    debug!(radius, ?pairs, ?unpaired, "pairing result");
    Pairing { pairs, unpaired }
}
