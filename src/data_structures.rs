use crate::error::ParseDirectionError;
use crate::global_variables::LIGHT_COUNT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The four approaches of the intersection.
///
/// Declaration order is the rotation order: North, East, South, West, then
/// back to North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All directions in rotation order.
    pub const ALL: [Direction; LIGHT_COUNT] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Position of this direction in the rotation.
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// Direction at `index` in the rotation, wrapping around.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % LIGHT_COUNT]
    }

    /// The direction that becomes active after this one.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Direction::North => "north",
            Direction::East => "east",
            Direction::South => "south",
            Direction::West => "west",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "north" | "n" => Ok(Direction::North),
            "east" | "e" => Ok(Direction::East),
            "south" | "s" => Ok(Direction::South),
            "west" | "w" => Ok(Direction::West),
            _ => Err(ParseDirectionError(s.trim().to_string())),
        }
    }
}

/// The color a single light shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightColor {
    Red,
    Yellow,
    Green,
}

/// The two non-red states the active direction passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubPhase {
    Green,
    Yellow,
}

impl SubPhase {
    /// Color shown by the active direction during this sub-phase.
    pub fn color(self) -> LightColor {
        match self {
            SubPhase::Green => LightColor::Green,
            SubPhase::Yellow => LightColor::Yellow,
        }
    }
}

/// One directional light as seen by a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrafficLight {
    pub direction: Direction,
    /// Derived from the scheduler state, never set on its own.
    pub color: LightColor,
    #[serde(with = "duration_ms")]
    pub green_duration: Duration,
}

/// Serializes a `Duration` as whole milliseconds.
pub(crate) mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
