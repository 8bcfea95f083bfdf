use snafu::prelude::*;

use crate::domain::entity::Mode;

/// Summary and optional body of the desktop notification shown when a mode's
/// countdown completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    summary: String,
    body: Option<String>,
}

impl NotificationMessage {
    /// Try to create a [`NotificationMessage`].
    ///
    /// # Errors
    ///
    /// This function will return an error if the summary is blank.
    pub fn try_new(
        summary: String,
        body: Option<String>,
    ) -> Result<Self, TryNewNotificationMessageError> {
        ensure!(!summary.trim().is_empty(), EmptySummarySnafu);
        let body = body.filter(|body| !body.trim().is_empty());
        Ok(Self { summary, body })
    }

    /// The message used when no configuration overrides it.
    pub fn fallback(mode: Mode) -> Self {
        let (summary, body) = match mode {
            Mode::Work => ("Work Session Complete", "Time for a break."),
            Mode::ShortBreak => ("Short Break Over", "Back to work."),
            Mode::LongBreak => ("Long Break Over", "A new round of sessions starts now."),
        };
        Self {
            summary: summary.to_owned(),
            body: Some(body.to_owned()),
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}

/// An error type of creating a [`NotificationMessage`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TryNewNotificationMessageError {
    #[snafu(display("Summary of a notification must not be blank"))]
    #[non_exhaustive]
    EmptySummary,
}
