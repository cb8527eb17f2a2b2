//! Static grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::grid::Cell;

const DEFAULT_WIDTH: i32 = 15;
const DEFAULT_HEIGHT: i32 = 10;

/// Maximum Manhattan distance at which two customers may share a taxi.
pub const DEFAULT_PAIRING_RADIUS: u32 = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_width")]
    pub width: i32,
    #[serde(default = "default_height")]
    pub height: i32,
    #[serde(default = "default_obstacles")]
    pub obstacles: Vec<Cell>,
    #[serde(default = "default_depot")]
    pub depot: Cell,
    #[serde(default = "default_pairing_radius")]
    pub pairing_radius: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            obstacles: default_obstacles(),
            depot: default_depot(),
            pairing_radius: DEFAULT_PAIRING_RADIUS,
        }
    }
}

impl GridConfig {
    /// Decode a configuration; missing fields fall back to the defaults.
    pub fn from_json(text: &str) -> Result<Self, PlanError> {
        Ok(serde_json::from_str(text)?)
    }
}

fn default_width() -> i32 {
    DEFAULT_WIDTH
}

fn default_height() -> i32 {
    DEFAULT_HEIGHT
}

// Bottom-left corner.
fn default_depot() -> Cell {
    Cell::new(0, DEFAULT_HEIGHT - 1)
}

fn default_pairing_radius() -> u32 {
    DEFAULT_PAIRING_RADIUS
}

fn default_obstacles() -> Vec<Cell> {
    vec![
        Cell::new(5, 5),
        Cell::new(5, 6),
        Cell::new(5, 7),
        Cell::new(5, 8),
        Cell::new(8, 2),
        Cell::new(9, 2),
        Cell::new(0, 4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json(r#"{"width": 6, "pairing_radius": 3}"#).unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, DEFAULT_HEIGHT);
        assert_eq!(config.pairing_radius, 3);
        assert_eq!(config.depot, Cell::new(0, 9));
        assert_eq!(config.obstacles.len(), 7);
    }

    #[test]
    fn test_cells_decode_from_pairs() {
        let config = GridConfig::from_json(
            r#"{"width": 4, "height": 4, "obstacles": [[1, 1], [2, 2]], "depot": [0, 3]}"#,
        )
        .unwrap();
        assert_eq!(config.obstacles, vec![Cell::new(1, 1), Cell::new(2, 2)]);
        assert_eq!(config.depot, Cell::new(0, 3));
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let err = GridConfig::from_json("{width: }").unwrap_err();
        assert!(matches!(err, PlanError::Json(_)));
    }
}
