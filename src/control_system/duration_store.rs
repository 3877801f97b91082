use crate::data_structures::Direction;
use crate::global_variables::{TimingConfig, LIGHT_COUNT, MS_PER_SECOND};
use std::time::Duration;

/// Per-direction green durations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DurationStore {
    green: [Duration; LIGHT_COUNT],
    min_green: Duration,
}

impl DurationStore {
    pub fn new(config: &TimingConfig) -> Self {
        Self {
            green: [config.default_green; LIGHT_COUNT],
            min_green: config.min_green,
        }
    }

    pub fn green_duration(&self, direction: Direction) -> Duration {
        self.green[direction.index()]
    }

    /// Value shown in a seconds-based input field.
    pub fn green_duration_secs(&self, direction: Direction) -> u64 {
        self.green_duration(direction).as_millis() as u64 / MS_PER_SECOND
    }

    /// Stores the operator-entered seconds for one direction.
    ///
    /// Input is never rejected: anything that does not parse, or that is
    /// shorter than the floor, is stored as the floor. Only `direction` is
    /// touched. Returns the value actually stored.
    pub fn set_green_duration(&mut self, direction: Direction, raw_seconds: &str) -> Duration {
        let duration = normalize_green_duration(raw_seconds, self.min_green);
        log::debug!(
            "Green duration for {} set to {} ms (input {:?})",
            direction,
            duration.as_millis(),
            raw_seconds
        );
        self.green[direction.index()] = duration;
        duration
    }

    /// Applies one shared value to every direction.
    pub fn set_all_green_durations(&mut self, raw_seconds: &str) -> Duration {
        let duration = normalize_green_duration(raw_seconds, self.min_green);
        log::debug!(
            "Green duration for all directions set to {} ms (input {:?})",
            duration.as_millis(),
            raw_seconds
        );
        self.green = [duration; LIGHT_COUNT];
        duration
    }
}

/// Converts raw seconds to a green duration no shorter than `floor`.
pub fn normalize_green_duration(raw_seconds: &str, floor: Duration) -> Duration {
    let Some(seconds) = parse_leading_int(raw_seconds) else {
        log::warn!(
            "Green duration input {:?} is not a number, using {} ms",
            raw_seconds,
            floor.as_millis()
        );
        return floor;
    };
    let millis = seconds.saturating_mul(MS_PER_SECOND as i64);
    let millis = u64::try_from(millis).unwrap_or(0);
    let duration = Duration::from_millis(millis);
    if duration < floor {
        log::warn!(
            "Green duration {} ms is below the floor, using {} ms",
            millis,
            floor.as_millis()
        );
        return floor;
    }
    duration
}

/// Reads an integer from the start of `raw`.
///
/// Surrounding whitespace and an optional sign are accepted, parsing stops at
/// the first non-digit ("2.5" reads as 2, "3s" as 3). A `0x`/`0X` prefix
/// switches to hexadecimal ("0x10" reads as 16). Returns `None` when no digit
/// is found. Values past `i64` saturate.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let (radix, rest) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_digit(radix))
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.chars().fold(0i64, |acc, c| {
        let digit = c.to_digit(radix).map_or(0, i64::from);
        acc.saturating_mul(i64::from(radix)).saturating_add(digit)
    });
    Some(if negative { -magnitude } else { magnitude })
}
