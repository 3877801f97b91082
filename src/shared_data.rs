// src/shared_data.rs

use crate::control_system::phase_scheduler::{PendingTimer, SchedulerStats};
use crate::data_structures::{duration_ms, Direction, LightColor, SubPhase, TrafficLight};
use crate::global_variables::LIGHT_COUNT;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Everything a presentation layer needs to draw the intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntersectionSnapshot {
    /// Offset on the simulation timeline.
    pub elapsed_ms: u64,
    pub running: bool,
    /// None until the simulation has been started once.
    pub active: Option<Direction>,
    pub sub_phase: SubPhase,
    /// One entry per direction, in rotation order.
    pub lights: [TrafficLight; LIGHT_COUNT],
    pub pending: Option<PendingTimer>,
    pub stats: SchedulerStats,
}

impl IntersectionSnapshot {
    /// Looks the light up by its `direction`, not its position, so a
    /// deserialized snapshot in any order still answers correctly.
    pub fn light(&self, direction: Direction) -> Option<&TrafficLight> {
        self.lights.iter().find(|light| light.direction == direction)
    }

    pub fn color(&self, direction: Direction) -> Option<LightColor> {
        self.light(direction).map(|light| light.color)
    }

    pub fn colors(&self) -> Vec<LightColor> {
        self.lights.iter().map(|light| light.color).collect()
    }

    /// Label for the start/stop button.
    pub fn control_label(&self) -> &'static str {
        control_label(self.running)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn control_label(running: bool) -> &'static str {
    if running {
        "Stop simulation"
    } else {
        "Start simulation"
    }
}

/// One timer-driven change of the active light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseTransition {
    #[serde(with = "duration_ms")]
    pub at: Duration,
    /// Direction that is lit after the change.
    pub direction: Direction,
    pub sub_phase: SubPhase,
    /// Direction that went back to red, on a hand-over.
    pub released: Option<Direction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control_system::phase_scheduler::PhaseScheduler;
    use crate::global_variables::TimingConfig;

    #[test]
    fn label_follows_running_flag() {
        assert_eq!(control_label(false), "Start simulation");
        assert_eq!(control_label(true), "Stop simulation");
    }

    #[test]
    fn snapshot_json_round_trips() {
        let mut scheduler = PhaseScheduler::new(TimingConfig::default());
        scheduler.start(Duration::ZERO);
        let snapshot = scheduler.snapshot(Duration::from_millis(1200));
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\"active\": \"north\""));
        assert!(json.contains("\"deadline\": 5000"));
        let parsed: IntersectionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, snapshot);
        assert_eq!(parsed.control_label(), "Stop simulation");
    }

    #[test]
    fn lookup_uses_direction_field() {
        let mut scheduler = PhaseScheduler::new(TimingConfig::default());
        scheduler.start(Duration::ZERO);
        let mut snapshot = scheduler.snapshot(Duration::ZERO);
        snapshot.lights.reverse();
        let json = serde_json::to_string(&snapshot).unwrap();
        let parsed: IntersectionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.color(Direction::North), Some(LightColor::Green));
        assert_eq!(parsed.color(Direction::West), Some(LightColor::Red));
        assert_eq!(parsed.light(Direction::West).unwrap().direction, Direction::West);
    }

    #[test]
    fn short_light_list_is_rejected() {
        let mut scheduler = PhaseScheduler::new(TimingConfig::default());
        scheduler.start(Duration::ZERO);
        let mut json = serde_json::to_value(scheduler.snapshot(Duration::ZERO)).unwrap();
        json["lights"].as_array_mut().unwrap().truncate(2);
        assert!(serde_json::from_value::<IntersectionSnapshot>(json).is_err());
    }
}
