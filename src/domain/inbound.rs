use snafu::prelude::*;

use crate::domain::entity::Mode;
use crate::domain::event::Event;
use crate::domain::timer::DisplayFrame;

/// A public port for driving the timer with user actions.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ControlPort: Send + Sync + 'static {
    /// Feed one user action to the timer.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer has shut down.
    async fn dispatch(&self, event: Event) -> Result<(), ControlError>;

    /// Stop the timer for good, waiting until it has saved its state.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer did not shut down
    /// cleanly.
    async fn shutdown(&self) -> Result<(), ControlError>;
}

/// An error type of [`ControlPort`].
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ControlError {
    #[snafu(display("Timer is no longer running"))]
    Unavailable,
    #[snafu(display("Timer crashed while shutting down"))]
    Crashed,
}

/// A public port for querying the current state.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait QueryPort: Send + Sync + 'static {
    /// Do the query operation.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer has shut down.
    async fn query(&self) -> Result<QueryResponse, QueryError>;
}

/// The state of the timer.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub mode: Mode,
    pub running: bool,
    pub remaining: u64,
    pub total: u64,
    pub sessions: u32,
    pub auto_switch: bool,
    pub advance_pending: bool,
    pub frame: DisplayFrame,
}

/// An error type of [`QueryPort`].
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    #[snafu(display("Timer has stopped answering queries"))]
    Stopped,
}
