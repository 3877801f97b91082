use crate::control_system::duration_store::DurationStore;
use crate::control_system::light_derivation::{active_direction, derive_lights};
use crate::data_structures::{duration_ms, Direction, LightColor, SubPhase, TrafficLight};
use crate::global_variables::{TimingConfig, LIGHT_COUNT};
use crate::shared_data::{IntersectionSnapshot, PhaseTransition};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Position of the intersection in its green/yellow rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerState {
    /// Index of the active direction in rotation order.
    pub active_index: usize,
    pub sub_phase: SubPhase,
    pub running: bool,
    /// False until the first start; all lights are red before that.
    pub has_started: bool,
}

impl Default for SchedulerState {
    fn default() -> Self {
        Self {
            active_index: 0,
            sub_phase: SubPhase::Green,
            running: false,
            has_started: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerKind {
    /// Ends the green sub-phase of the active direction.
    Green,
    /// Ends the yellow sub-phase and hands over to the next direction.
    Yellow,
}

/// The single outstanding transition timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTimer {
    pub id: u64,
    pub kind: TimerKind,
    pub direction: Direction,
    #[serde(with = "duration_ms")]
    pub armed_at: Duration,
    #[serde(with = "duration_ms")]
    pub deadline: Duration,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub armed: u64,
    pub cancelled: u64,
    pub fired: u64,
}

/// Drives the green -> yellow -> next direction cycle on a virtual timeline.
///
/// The scheduler never sleeps. Callers pass the current offset on the
/// simulation timeline and either `fire` the pending timer once it is due or
/// `advance_to` a later instant. Whenever `running`, the active direction or
/// the sub-phase changes, the pending timer is cancelled before a new one is
/// armed, so at most one timer exists at a time.
#[derive(Debug, Clone)]
pub struct PhaseScheduler {
    config: TimingConfig,
    state: SchedulerState,
    durations: DurationStore,
    pending: Option<PendingTimer>,
    next_timer_id: u64,
    stats: SchedulerStats,
}

impl PhaseScheduler {
    pub fn new(config: TimingConfig) -> Self {
        let config = config.normalized();
        Self {
            durations: DurationStore::new(&config),
            config,
            state: SchedulerState::default(),
            pending: None,
            next_timer_id: 1,
            stats: SchedulerStats::default(),
        }
    }

    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    pub fn state(&self) -> &SchedulerState {
        &self.state
    }

    pub fn durations(&self) -> &DurationStore {
        &self.durations
    }

    pub fn pending(&self) -> Option<&PendingTimer> {
        self.pending.as_ref()
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.map(|timer| timer.deadline)
    }

    pub fn lights(&self) -> [LightColor; LIGHT_COUNT] {
        derive_lights(&self.state)
    }

    /// Starts (or resumes) the rotation from the current position.
    ///
    /// Returns false when already running.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.state.running {
            return false;
        }
        self.state.running = true;
        self.state.has_started = true;
        log::info!(
            "Simulation started at {} ms: {} {:?}",
            now.as_millis(),
            Direction::from_index(self.state.active_index),
            self.state.sub_phase
        );
        self.reschedule(now);
        true
    }

    /// Suspends the rotation and cancels the pending timer.
    ///
    /// The active direction and sub-phase are kept, a later `start` resumes
    /// from them with a freshly armed timer. Returns false when already
    /// stopped.
    pub fn stop(&mut self, now: Duration) -> bool {
        if !self.state.running {
            return false;
        }
        self.state.running = false;
        log::info!(
            "Simulation stopped at {} ms: {} {:?}",
            now.as_millis(),
            Direction::from_index(self.state.active_index),
            self.state.sub_phase
        );
        self.reschedule(now);
        true
    }

    /// Flips `running`, returning the new value.
    pub fn toggle(&mut self, now: Duration) -> bool {
        if self.state.running {
            self.stop(now);
        } else {
            self.start(now);
        }
        self.state.running
    }

    /// Stops and returns to north/green with every light red.
    pub fn reset(&mut self, now: Duration) {
        self.state = SchedulerState::default();
        log::info!("Simulation reset at {} ms", now.as_millis());
        self.reschedule(now);
    }

    /// Applies the pending timer if it is due at `now`.
    ///
    /// The next timer is armed from the fired deadline rather than `now`, so
    /// a late caller does not stretch the cycle.
    pub fn fire(&mut self, now: Duration) -> Option<PhaseTransition> {
        let timer = self.pending.filter(|timer| timer.deadline <= now)?;
        self.pending = None;
        self.stats.fired += 1;

        let released = match timer.kind {
            TimerKind::Green => {
                self.state.sub_phase = SubPhase::Yellow;
                None
            }
            TimerKind::Yellow => {
                let previous = Direction::from_index(self.state.active_index);
                self.state.sub_phase = SubPhase::Green;
                self.state.active_index = previous.next().index();
                Some(previous)
            }
        };
        let transition = PhaseTransition {
            at: timer.deadline,
            direction: Direction::from_index(self.state.active_index),
            sub_phase: self.state.sub_phase,
            released,
        };
        log::info!(
            "[{} ms] {} -> {:?}",
            transition.at.as_millis(),
            transition.direction,
            transition.sub_phase
        );
        self.reschedule(timer.deadline);
        Some(transition)
    }

    /// Fires every timer that falls due up to and including `now`.
    pub fn advance_to(&mut self, now: Duration) -> Vec<PhaseTransition> {
        let mut transitions = Vec::new();
        while let Some(transition) = self.fire(now) {
            transitions.push(transition);
        }
        transitions
    }

    /// Updates one direction's green duration.
    ///
    /// The in-flight timer keeps the duration it was armed with; the new value
    /// applies the next time `direction` turns green.
    pub fn set_green_duration(&mut self, direction: Direction, raw_seconds: &str) -> Duration {
        let duration = self.durations.set_green_duration(direction, raw_seconds);
        if self.state.running && active_direction(&self.state) == Some(direction) {
            log::debug!(
                "{} is active, new green duration applies on its next green phase",
                direction
            );
        }
        duration
    }

    pub fn set_all_green_durations(&mut self, raw_seconds: &str) -> Duration {
        self.durations.set_all_green_durations(raw_seconds)
    }

    pub fn snapshot(&self, now: Duration) -> IntersectionSnapshot {
        let colors = self.lights();
        let lights = Direction::ALL.map(|direction| TrafficLight {
            direction,
            color: colors[direction.index()],
            green_duration: self.durations.green_duration(direction),
        });
        IntersectionSnapshot {
            elapsed_ms: now.as_millis() as u64,
            running: self.state.running,
            active: active_direction(&self.state),
            sub_phase: self.state.sub_phase,
            lights,
            pending: self.pending,
            stats: self.stats,
        }
    }

    // Cancel, recompute, then arm at most one timer.
    fn reschedule(&mut self, now: Duration) {
        if let Some(timer) = self.pending.take() {
            self.stats.cancelled += 1;
            log::debug!("Cancelled {:?} timer #{} for {}", timer.kind, timer.id, timer.direction);
        }
        log::debug!("Lights now {:?}", self.lights());
        if self.state.running {
            self.arm(now);
        }
    }

    fn arm(&mut self, now: Duration) {
        let direction = Direction::from_index(self.state.active_index);
        let (kind, wait) = match self.state.sub_phase {
            SubPhase::Green => (TimerKind::Green, self.durations.green_duration(direction)),
            SubPhase::Yellow => (TimerKind::Yellow, self.config.yellow),
        };
        let timer = PendingTimer {
            id: self.next_timer_id,
            kind,
            direction,
            armed_at: now,
            deadline: now + wait,
        };
        self.next_timer_id += 1;
        self.stats.armed += 1;
        log::debug!(
            "Armed {:?} timer #{} for {} at {} ms",
            timer.kind,
            timer.id,
            direction,
            timer.deadline.as_millis()
        );
        self.pending = Some(timer);
    }
}
