use std::sync::Mutex;

use snafu::prelude::*;
use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot::{self, Sender as OneshotSender};
use tokio::task::JoinHandle;

use crate::domain::event::Event;
use crate::domain::timer::{DisplayFrame, TimerState};

/// Result of one query of the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerStatus {
    pub state: TimerState,
    pub total: u64,
    pub sessions: u32,
    pub auto_switch: bool,
    pub advance_pending: bool,
    pub frame: DisplayFrame,
}

/// Actions that a [`WorkerRoutine`] runs.
///
/// [`WorkerRoutine`]: crate::domain::worker::routine::WorkerRoutine
#[derive(Debug)]
pub enum Command {
    Dispatch(Event),
    Query {
        responder: OneshotSender<TimerStatus>,
    },
    Stop,
}

/// Handle that controls a [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: crate::domain::worker::routine::WorkerRoutine
#[derive(Debug)]
pub struct WorkerHandle {
    requester: Sender<Command>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerHandle {
    /// Creates a new [`WorkerHandle`].
    pub fn new(requester: Sender<Command>, task: JoinHandle<()>) -> Self {
        Self {
            requester,
            task: Mutex::new(Some(task)),
        }
    }

    /// Send an [`Event`] to the background worker.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker has stopped.
    pub async fn dispatch(&self, event: Event) -> Result<(), WorkerError> {
        self.requester
            .send(Command::Dispatch(event))
            .await
            .ok()
            .context(StoppedSnafu)
    }

    /// Send [`Command::Query`] to the background worker to get the current
    /// state.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker has stopped.
    pub async fn query(&self) -> Result<TimerStatus, WorkerError> {
        let (responder, receiver) = oneshot::channel();
        self.requester
            .send(Command::Query { responder })
            .await
            .ok()
            .context(StoppedSnafu)?;
        receiver.await.ok().context(StoppedSnafu)
    }

    /// Ask the background worker to stop and wait until it has.
    ///
    /// # Errors
    ///
    /// This function will return an error if the worker panicked.
    pub async fn stop(&self) -> Result<(), WorkerError> {
        // A worker that already stopped has dropped its receiver.
        let _ = self.requester.send(Command::Stop).await;

        let task = match self.task.lock() {
            Ok(mut task) => task.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match task {
            Some(task) => task.await.ok().context(PanickedSnafu),
            None => Ok(()),
        }
    }
}

/// An error type of talking to the background worker.
#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WorkerError {
    #[snafu(display("Timer worker has stopped"))]
    Stopped,
    #[snafu(display("Timer worker panicked"))]
    Panicked,
}
