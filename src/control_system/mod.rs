// control_system/mod.rs
pub mod duration_store;
pub mod light_derivation;
pub mod phase_scheduler;
pub mod simulation_controller;

pub use duration_store::DurationStore;
pub use phase_scheduler::{PendingTimer, PhaseScheduler, SchedulerState, SchedulerStats, TimerKind};
pub use simulation_controller::{Command, ControllerHandle, SimulationController};
