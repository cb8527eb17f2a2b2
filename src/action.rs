//! Dispatch actions and action-log decoding.
//!
//! An action log line looks like `(move taxi1 st l1)`. Lines are decoded
//! once into [`DispatchAction`]; the planners never look at the text again.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use tracing::warn;

use crate::error::PlanError;

const ACTION_ARGS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchAction {
    Move {
        vehicle: String,
        from: String,
        to: String,
    },
    Pickup {
        vehicle: String,
        passenger: String,
        location: String,
    },
    Dropoff {
        vehicle: String,
        passenger: String,
        location: String,
    },
}

impl DispatchAction {
    pub fn verb(&self) -> &'static str {
        match self {
            DispatchAction::Move { .. } => "move",
            DispatchAction::Pickup { .. } => "pickup",
            DispatchAction::Dropoff { .. } => "dropoff",
        }
    }

    pub fn vehicle(&self) -> &str {
        match self {
            DispatchAction::Move { vehicle, .. }
            | DispatchAction::Pickup { vehicle, .. }
            | DispatchAction::Dropoff { vehicle, .. } => vehicle,
        }
    }
}

impl fmt::Display for DispatchAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchAction::Move { vehicle, from, to } => {
                write!(f, "(move {} {} {})", vehicle, from, to)
            }
            DispatchAction::Pickup {
                vehicle,
                passenger,
                location,
            } => write!(f, "(pickup {} {} {})", vehicle, passenger, location),
            DispatchAction::Dropoff {
                vehicle,
                passenger,
                location,
            } => write!(f, "(dropoff {} {} {})", vehicle, passenger, location),
        }
    }
}

impl FromStr for DispatchAction {
    type Err = PlanError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = line
            .trim()
            .trim_start_matches('(')
            .trim_end_matches(')')
            .split_whitespace()
            .collect();

        let Some((verb, args)) = tokens.split_first() else {
            return Err(PlanError::MalformedAction {
                action: line.to_string(),
                expected: ACTION_ARGS,
                found: 0,
            });
        };

        if !matches!(*verb, "move" | "pickup" | "dropoff") {
            return Err(PlanError::UnknownVerb(verb.to_string()));
        }

        let [vehicle, first, second] = args else {
            return Err(PlanError::MalformedAction {
                action: line.to_string(),
                expected: ACTION_ARGS,
                found: args.len(),
            });
        };
        let (vehicle, first, second) = (vehicle.to_string(), first.to_string(), second.to_string());

        Ok(match *verb {
            "move" => DispatchAction::Move {
                vehicle,
                from: first,
                to: second,
            },
            "pickup" => DispatchAction::Pickup {
                vehicle,
                passenger: first,
                location: second,
            },
            _ => DispatchAction::Dropoff {
                vehicle,
                passenger: first,
                location: second,
            },
        })
    }
}

/// Decode a single action line.
pub fn parse_action(line: &str) -> Result<DispatchAction, PlanError> {
    line.parse()
}

/// Decode every line of an action log, skipping blank lines, unknown verbs
/// and malformed actions with a warning.
pub fn parse_action_log<S: AsRef<str>>(lines: &[S]) -> Vec<DispatchAction> {
    let mut actions = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.as_ref();
        if line.trim().trim_matches(|c| c == '(' || c == ')').trim().is_empty() {
            continue;
        }
        match parse_action(line) {
            Ok(action) => actions.push(action),
            Err(err @ PlanError::UnknownVerb(_)) => warn!(%err, line, "skipping action"),
            Err(err) => warn!(%err, line, "skipping malformed action"),
        }
    }
    actions
}

/// Decode a planner output: one action per line between parentheses,
/// `;` lines are comments. Everything is lower-cased.
pub fn parse_plan_text(text: &str) -> Result<Vec<DispatchAction>, PlanError> {
    let lines: Vec<String> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .filter_map(|line| {
            let line = match (line.find('('), line.rfind(')')) {
                (Some(_), Some(end)) => &line[..=end],
                _ => line,
            };
            (line.starts_with('(') && line.ends_with(')')).then(|| line.to_lowercase())
        })
        .collect();

    if lines.is_empty() {
        return Err(PlanError::EmptyPlan);
    }

    Ok(parse_action_log(&lines))
}

/// First pickup location for each passenger.
///
/// Passenger labels are upper-cased and location labels lower-cased.
pub fn first_pickups(actions: &[DispatchAction]) -> BTreeMap<String, String> {
    let mut pickups = BTreeMap::new();
    for action in actions {
        if let DispatchAction::Pickup {
            passenger,
            location,
            ..
        } = action
        {
            pickups
                .entry(passenger.to_uppercase())
                .or_insert_with(|| location.to_lowercase());
        }
    }
    pickups
}

/// A consistency problem in an action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionIssue {
    DuplicatePickup { index: usize, passenger: String },
    DropoffWithoutPickup { index: usize, passenger: String },
    DuplicateDropoff { index: usize, passenger: String },
    NeverDroppedOff { passenger: String },
}

impl fmt::Display for ActionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionIssue::DuplicatePickup { index, passenger } => {
                write!(f, "action {}: {} already picked up", index + 1, passenger)
            }
            ActionIssue::DropoffWithoutPickup { index, passenger } => {
                write!(f, "action {}: {} was never picked up", index + 1, passenger)
            }
            ActionIssue::DuplicateDropoff { index, passenger } => {
                write!(f, "action {}: {} already dropped off", index + 1, passenger)
            }
            ActionIssue::NeverDroppedOff { passenger } => {
                write!(f, "{} picked up but never dropped off", passenger)
            }
        }
    }
}

/// Check that every passenger is picked up once and dropped off once,
/// in that order.
pub fn validate_actions(actions: &[DispatchAction]) -> Vec<ActionIssue> {
    let mut issues = Vec::new();
    let mut picked_up = BTreeSet::new();
    let mut dropped_off = BTreeSet::new();

    for (index, action) in actions.iter().enumerate() {
        match action {
            DispatchAction::Pickup { passenger, .. } => {
                let passenger = passenger.to_uppercase();
                if !picked_up.insert(passenger.clone()) {
                    issues.push(ActionIssue::DuplicatePickup { index, passenger });
                }
            }
            DispatchAction::Dropoff { passenger, .. } => {
                let passenger = passenger.to_uppercase();
                if !picked_up.contains(&passenger) {
                    issues.push(ActionIssue::DropoffWithoutPickup { index, passenger });
                } else if !dropped_off.insert(passenger.clone()) {
                    issues.push(ActionIssue::DuplicateDropoff { index, passenger });
                }
            }
            DispatchAction::Move { .. } => {}
        }
    }

    for passenger in picked_up.difference(&dropped_off) {
        issues.push(ActionIssue::NeverDroppedOff {
            passenger: passenger.clone(),
        });
    }

    issues
}

/// Summary counts for an action log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionStats {
    pub total: usize,
    pub moves: usize,
    pub pickups: usize,
    pub dropoffs: usize,
    pub unique_passengers: usize,
    pub locations_visited: usize,
}

impl ActionStats {
    pub fn from_actions(actions: &[DispatchAction]) -> Self {
        let mut stats = ActionStats {
            total: actions.len(),
            ..Default::default()
        };
        let mut passengers = BTreeSet::new();
        let mut locations = BTreeSet::new();

        for action in actions {
            match action {
                DispatchAction::Move { from, to, .. } => {
                    stats.moves += 1;
                    locations.insert(from.to_lowercase());
                    locations.insert(to.to_lowercase());
                }
                DispatchAction::Pickup {
                    passenger,
                    location,
                    ..
                } => {
                    stats.pickups += 1;
                    passengers.insert(passenger.to_uppercase());
                    locations.insert(location.to_lowercase());
                }
                DispatchAction::Dropoff { location, .. } => {
                    stats.dropoffs += 1;
                    locations.insert(location.to_lowercase());
                }
            }
        }

        stats.unique_passengers = passengers.len();
        stats.locations_visited = locations.len();
        stats
    }
}
