use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::domain::entity::{Mode, SessionCounter};

/// Everything the display needs to draw one frame. Frames are computed from
/// the timer on demand and carry no state of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayFrame {
    pub mode: Mode,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Fraction of the configured duration already elapsed, in `[0, 1]`.
    pub progress: f64,
    pub session_label: String,
}

impl DisplayFrame {
    /// Build a frame from the remaining and configured total seconds.
    pub fn new(mode: Mode, remaining: u64, total: u64, sessions: SessionCounter) -> Self {
        let progress = if total > 0 {
            let elapsed = total.saturating_sub(remaining);
            (elapsed as f64 / total as f64).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            mode,
            hours: remaining / 3600,
            minutes: (remaining % 3600) / 60,
            seconds: remaining % 60,
            progress,
            session_label: sessions.label(),
        }
    }

    /// The clock text. Hours are left out entirely when zero.
    pub fn clock(&self) -> String {
        if self.hours > 0 {
            format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        } else {
            format!("{:02}:{:02}", self.minutes, self.seconds)
        }
    }

    pub fn title(&self) -> String {
        format!("{} | Pomodoro Timer", self.clock())
    }
}

impl Display for DisplayFrame {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.mode, self.clock())
    }
}
