use std::fmt;

use super::{bubble::BubbleColor, hex::GridCoord};

/// Why a bubble could not be put on the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    /// The cell already holds a bubble; it is left untouched.
    Occupied {
        coord: GridCoord,
        existing: BubbleColor,
    },
    /// The cell lies outside the playfield columns or above the ceiling.
    OutOfBounds { coord: GridCoord },
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Occupied { coord, existing } => {
                write!(f, "cell {coord} is already occupied by a {existing:?} bubble")
            }
            Self::OutOfBounds { coord } => write!(f, "cell {coord} is outside the playfield"),
        }
    }
}

impl std::error::Error for PlacementError {}

/// Failure to load a [`GameConfig`](super::config::GameConfig).
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// Parsed fine, but a value would break the simulation.
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config: {e}"),
            Self::Parse(e) => write!(f, "failed to parse config: {e}"),
            Self::Invalid { field, reason } => write!(f, "invalid config value `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
