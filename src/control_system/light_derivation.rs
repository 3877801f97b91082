use crate::control_system::phase_scheduler::SchedulerState;
use crate::data_structures::{Direction, LightColor};
use crate::global_variables::LIGHT_COUNT;

/// Colors of all four lights, indexed in rotation order.
///
/// Only the active direction shows its sub-phase color; the rest are red.
/// Before the intersection has ever started every light is red. A stopped
/// intersection keeps showing the state it was stopped in.
pub fn derive_lights(state: &SchedulerState) -> [LightColor; LIGHT_COUNT] {
    let mut colors = [LightColor::Red; LIGHT_COUNT];
    if let Some(active) = active_direction(state) {
        colors[active.index()] = state.sub_phase.color();
    }
    colors
}

/// The one direction that is not red, if any.
pub fn active_direction(state: &SchedulerState) -> Option<Direction> {
    state
        .has_started
        .then(|| Direction::from_index(state.active_index))
}
