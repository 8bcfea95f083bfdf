use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use snafu::prelude::*;

use crate::domain::entity::{Mode, TimeUnit};
use crate::domain::timer::{Effects, Timer, TransitionError};

/// One of the six editable duration fields, e.g. `work-h` or `break-m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DurationField {
    pub mode: Mode,
    pub unit: TimeUnit,
}

impl DurationField {
    pub fn new(mode: Mode, unit: TimeUnit) -> Self {
        Self { mode, unit }
    }

    fn prefix(mode: Mode) -> &'static str {
        match mode {
            Mode::Work => "work",
            Mode::ShortBreak => "break",
            Mode::LongBreak => "long",
        }
    }
}

impl Display for DurationField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", Self::prefix(self.mode), self.unit.suffix())
    }
}

impl FromStr for DurationField {
    type Err = ParseDurationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let (prefix, suffix) = normalized
            .rsplit_once('-')
            .context(UnknownFieldSnafu { input: s })?;

        let mode = Mode::ALL
            .into_iter()
            .find(|&mode| Self::prefix(mode) == prefix)
            .context(UnknownFieldSnafu { input: s })?;

        let unit = match suffix {
            "h" => TimeUnit::Hours,
            "m" => TimeUnit::Minutes,
            _ => return UnknownFieldSnafu { input: s }.fail(),
        };

        Ok(Self { mode, unit })
    }
}

/// An error type of parsing a [`DurationField`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseDurationFieldError {
    #[snafu(display("Unknown duration field `{input}`"))]
    #[non_exhaustive]
    UnknownField { input: String },
}

/// Everything that can happen to the timer. User controls map one-to-one to
/// variants; [`Event::Tick`] and [`Event::Advance`] come from the timers the
/// worker arms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Toggle,
    Start,
    Pause,
    Reset,
    SelectMode(Mode),
    SetField { field: DurationField, raw: String },
    Step { field: DurationField, delta: i32 },
    SetAutoSwitch(bool),
    Tick,
    Advance,
}

impl Event {
    /// Returns `true` if the event comes from the user rather than a timer.
    pub fn is_manual(&self) -> bool {
        !matches!(self, Self::Tick | Self::Advance)
    }
}

/// Apply `event` to `timer` and collect the resulting effects.
///
/// A manual event arriving while an auto-advance is pending cancels the
/// advance before it is applied. Rejected transitions are logged and produce
/// no effects beyond that cancellation.
pub fn dispatch(timer: &mut Timer, event: Event) -> Effects {
    let mut effects = if event.is_manual() {
        timer.cancel_advance()
    } else {
        Effects::new()
    };

    match apply(timer, event) {
        Ok(applied) => effects.extend(applied),
        Err(err) => tracing::debug!(%err, "Ignored event"),
    }

    effects
}

fn apply(timer: &mut Timer, event: Event) -> Result<Effects, TransitionError> {
    match event {
        Event::Toggle => timer.toggle(),
        Event::Start => timer.start(),
        Event::Pause => timer.pause(),
        Event::Reset => Ok(timer.reset()),
        Event::SelectMode(mode) => Ok(timer.switch_mode(mode, false)),
        Event::SetField { field, raw } => timer.set_field(field.mode, field.unit, &raw),
        Event::Step { field, delta } => timer.step(field.mode, field.unit, delta),
        Event::SetAutoSwitch(enabled) => timer.set_auto_switch(enabled),
        Event::Tick => timer.tick(),
        Event::Advance => timer.advance(),
    }
}
