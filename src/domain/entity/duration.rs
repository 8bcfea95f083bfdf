use std::fmt::{Display, Formatter, Result as FmtResult};

/// Largest value the hour step control reaches before wrapping.
pub const MAX_HOURS: u32 = 23;
/// Largest value the minute step control reaches before wrapping.
pub const MAX_MINUTES: u32 = 59;

/// One of the two editable components of a [`ModeDuration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Hours,
    Minutes,
}

impl TimeUnit {
    /// The upper bound used when a step control wraps around.
    pub fn max(self) -> u32 {
        match self {
            Self::Hours => MAX_HOURS,
            Self::Minutes => MAX_MINUTES,
        }
    }

    /// Short suffix used by duration field identifiers.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Hours => "h",
            Self::Minutes => "m",
        }
    }
}

/// The configured length of a mode as an (hours, minutes) pair.
///
/// Values typed by the user are not bounded by [`MAX_HOURS`] or
/// [`MAX_MINUTES`]; only the step controls wrap inside those ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeDuration {
    hours: u32,
    minutes: u32,
}

impl ModeDuration {
    /// Creates a new [`ModeDuration`].
    pub fn new(hours: u32, minutes: u32) -> Self {
        Self { hours, minutes }
    }

    /// Creates a [`ModeDuration`] with zero hours.
    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(0, minutes)
    }

    pub fn hours(&self) -> u32 {
        self.hours
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    /// Returns the component selected by `unit`.
    pub fn get(&self, unit: TimeUnit) -> u32 {
        match unit {
            TimeUnit::Hours => self.hours,
            TimeUnit::Minutes => self.minutes,
        }
    }

    /// Total length in seconds.
    pub fn seconds(&self) -> u64 {
        u64::from(self.hours) * 3600 + u64::from(self.minutes) * 60
    }

    /// Returns a copy with the component selected by `unit` replaced.
    pub fn with(self, unit: TimeUnit, value: u32) -> Self {
        match unit {
            TimeUnit::Hours => Self {
                hours: value,
                ..self
            },
            TimeUnit::Minutes => Self {
                minutes: value,
                ..self
            },
        }
    }

    /// Returns a copy with the component selected by `unit` moved by `delta`.
    /// Going below zero wraps to the unit's maximum and going above the
    /// maximum wraps to zero.
    pub fn stepped(self, unit: TimeUnit, delta: i32) -> Self {
        let max = i64::from(unit.max());
        let value = i64::from(self.get(unit)) + i64::from(delta);
        let value = if value < 0 {
            max
        } else if value > max {
            0
        } else {
            value
        };
        // `value` lies in `0..=max` here.
        self.with(unit, value as u32)
    }
}

impl Display for ModeDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}h{:02}m", self.hours, self.minutes)
    }
}

/// Parse a duration field leniently. Leading whitespace and an optional sign
/// are accepted, parsing stops at the first non-digit, and empty, invalid or
/// negative input yields zero.
pub fn parse_field(raw: &str) -> u32 {
    let raw = raw.trim_start();
    let (negative, digits) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];

    if negative || digits.is_empty() {
        return 0;
    }

    digits.parse::<u32>().unwrap_or(u32::MAX)
}
