//! Four-way intersection simulation.
//!
//! One light per cardinal direction rotates through green and yellow while
//! the other three stay red. [`control_system::PhaseScheduler`] holds the
//! timing state machine on a virtual timeline and
//! [`control_system::SimulationController`] drives it with tokio timers.

pub mod console;
pub mod control_system;
pub mod data_structures;
pub mod error;
pub mod global_variables;
pub mod shared_data;
