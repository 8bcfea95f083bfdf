use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use snafu::prelude::*;

/// The kind of countdown the timer is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Work, Mode::ShortBreak, Mode::LongBreak];

    /// Get an initialized [`Mode`].
    pub fn initial() -> Self {
        Self::Work
    }

    /// Stable identifier used in persisted data and configuration keys.
    pub fn id(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::ShortBreak => "short-break",
            Self::LongBreak => "long-break",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Work => 0,
            Self::ShortBreak => 1,
            Self::LongBreak => 2,
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Work => f.write_str("Work"),
            Self::ShortBreak => f.write_str("Short Break"),
            Self::LongBreak => f.write_str("Long Break"),
        }
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "short-break" | "short" | "break" => Ok(Self::ShortBreak),
            "long-break" | "long" => Ok(Self::LongBreak),
            _ => UnknownSnafu { input: s }.fail(),
        }
    }
}

/// An error type of parsing a [`Mode`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseModeError {
    #[snafu(display("Unknown mode `{input}`"))]
    #[non_exhaustive]
    Unknown { input: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_id_roundtrip() {
        for mode in Mode::ALL {
            assert_eq!(mode.id().parse::<Mode>(), Ok(mode));
        }
        assert_eq!(Mode::initial(), Mode::Work);
    }

    #[test]
    fn mode_from_str_aliases() {
        assert_eq!("short".parse::<Mode>(), Ok(Mode::ShortBreak));
        assert_eq!("Break".parse::<Mode>(), Ok(Mode::ShortBreak));
        assert_eq!(" LONG ".parse::<Mode>(), Ok(Mode::LongBreak));
        assert!(matches!(
            "nap".parse::<Mode>(),
            Err(ParseModeError::Unknown { .. })
        ));
    }
}
