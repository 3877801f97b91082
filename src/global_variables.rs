use std::time::Duration;

// Phase timings
pub const YELLOW_DURATION: Duration = Duration::from_millis(1000);
pub const DEFAULT_GREEN_DURATION: Duration = Duration::from_millis(5000);
pub const MIN_GREEN_DURATION: Duration = Duration::from_millis(1000);

// Unit conversion between the operator-facing seconds and stored milliseconds
pub const MS_PER_SECOND: u64 = 1000;

// One light per cardinal direction
pub const LIGHT_COUNT: usize = 4;

// Shortest phase a timer may be armed for
pub const MIN_PHASE_DURATION: Duration = Duration::from_millis(1);

/// Timing parameters for one intersection.
///
/// Fields are public so callers can build a config literally;
/// `PhaseScheduler::new` runs it through `normalized` before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Green duration every direction starts with.
    pub default_green: Duration,
    /// Length of the yellow phase.
    pub yellow: Duration,
    /// Floor applied to any green duration entered by an operator.
    pub min_green: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            default_green: DEFAULT_GREEN_DURATION,
            yellow: YELLOW_DURATION,
            min_green: MIN_GREEN_DURATION,
        }
    }
}

impl TimingConfig {
    /// Clamps every phase to at least `MIN_PHASE_DURATION` and the default
    /// green to at least `min_green`.
    ///
    /// A zero-length phase would fire in the same instant forever.
    pub fn normalized(self) -> Self {
        let min_green = self.min_green.max(MIN_PHASE_DURATION);
        Self {
            default_green: self.default_green.max(min_green),
            yellow: self.yellow.max(MIN_PHASE_DURATION),
            min_green,
        }
    }
}
