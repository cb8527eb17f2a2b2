//! Errors raised while planning.

use std::fmt;

use crate::grid::Cell;

#[derive(Debug)]
pub enum PlanError {
    /// An action or pickup entry names a location missing from the location map.
    UnknownLocation(String),
    /// An action log line starts with a verb the planner does not handle.
    UnknownVerb(String),
    /// An action has the wrong number of arguments.
    MalformedAction {
        action: String,
        expected: usize,
        found: usize,
    },
    /// A plan text contained no action lines.
    EmptyPlan,
    /// No route exists between two cells.
    Unreachable { from: Cell, to: Cell },
    InvalidConfig(String),
    Json(serde_json::Error),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::UnknownLocation(label) => {
                write!(f, "location '{}' is not defined in the location map", label)
            }
            PlanError::UnknownVerb(verb) => write!(f, "unknown action verb '{}'", verb),
            PlanError::MalformedAction {
                action,
                expected,
                found,
            } => write!(
                f,
                "malformed action '{}': expected {} arguments, found {}",
                action, expected, found
            ),
            PlanError::EmptyPlan => write!(f, "plan contains no actions"),
            PlanError::Unreachable { from, to } => {
                write!(f, "no route from {} to {}", from, to)
            }
            PlanError::InvalidConfig(msg) => write!(f, "invalid grid configuration: {}", msg),
            PlanError::Json(err) => write!(f, "json decode failed: {}", err),
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PlanError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(err: serde_json::Error) -> Self {
        PlanError::Json(err)
    }
}
