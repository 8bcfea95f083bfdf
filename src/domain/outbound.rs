use std::error::Error as StdError;

use snafu::prelude::*;

use crate::domain::entity::{Mode, NotificationMessage};
use crate::domain::timer::DisplayFrame;

/// A public port for presenting the timer. Implementations keep no state
/// derived from the timer between calls.
pub trait DisplayPort: Send + Sync + 'static {
    /// Draw the remaining time, progress and session label.
    fn render(&self, frame: &DisplayFrame);

    /// Play the visual cue for entering `mode`.
    fn mode_changed(&self, mode: Mode);

    /// Disable or re-enable the duration inputs while a countdown runs.
    fn inputs_locked(&self, locked: bool);
}

/// A public port for emitting a completion notification.
#[async_trait::async_trait]
pub trait NotifyPort: Send + Sync + 'static {
    /// Do the notification operation. This method is not intended to be
    /// implemented by adapters directly.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to make a notification.
    async fn notify(&self, mode: Mode, message: &NotificationMessage) -> Result<(), NotifyError> {
        let request = NotifyRequest {
            mode,
            summary: message.summary().to_owned(),
            body: message.body().map(ToOwned::to_owned),
        };
        self.notify_impl(request).await
    }

    /// Actual implementation of notification operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if failed to make a notification.
    async fn notify_impl(&self, request: NotifyRequest) -> Result<(), NotifyError>;
}

/// A structure that stores required data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyRequest {
    pub mode: Mode,
    pub summary: String,
    pub body: Option<String>,
}

/// An error type of the notification operation. The host refusing to play a
/// notification is expected and is never fatal.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum NotifyError {
    #[snafu(display("Notification is unavailable: {reason}"))]
    Unavailable { reason: String },
    #[snafu(whatever, display("Could not emit a notification: {message}"))]
    Unknown {
        message: String,
        #[snafu(source(from(Box<dyn StdError>, Some)))]
        source: Option<Box<dyn StdError>>,
    },
}
