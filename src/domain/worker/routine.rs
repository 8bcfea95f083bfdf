use std::sync::Arc;

use tokio::sync::mpsc::Receiver;
use tokio::task::JoinHandle;
use tokio::time::Duration;

use crate::domain::entity::{Mode, NotificationMessage};
use crate::domain::event::{self, Event};
use crate::domain::outbound::{DisplayPort, NotifyPort};
use crate::domain::repository::BlobStore;
use crate::domain::snapshot::SNAPSHOT_KEY;
use crate::domain::timer::{Effect, Effects, Timer};
use crate::domain::worker::handle::{Command, TimerStatus};
use crate::domain::worker::state::WorkerState;
use crate::tracing_report;

/// A type that stores configurations required by [`WorkerRoutine`]
/// initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerConfig {
    pub tick_period: Duration,
    pub settle_delay: Duration,
    pub work_notification: NotificationMessage,
    pub short_break_notification: NotificationMessage,
    pub long_break_notification: NotificationMessage,
}

impl WorkerConfig {
    /// Get the completion message corresponding to mode.
    pub fn notification(&self, mode: Mode) -> &NotificationMessage {
        match mode {
            Mode::Work => &self.work_notification,
            Mode::ShortBreak => &self.short_break_notification,
            Mode::LongBreak => &self.long_break_notification,
        }
    }
}

/// Adapters the worker performs effects against.
#[derive(Clone)]
pub struct WorkerPorts {
    pub display: Arc<dyn DisplayPort>,
    pub notifier: Arc<dyn NotifyPort>,
    pub store: Arc<dyn BlobStore>,
}

/// A [`WorkerContext`] stores all objects relevant to the [`WorkerRoutine`]
/// and the business logic.
pub struct WorkerContext {
    pub timer: Timer,
    pub config: WorkerConfig,
    pub commands: Receiver<Command>,
    pub ports: WorkerPorts,
}

impl WorkerContext {
    /// Dispatch `event` to the timer and perform the resulting effects.
    #[tracing::instrument(skip(self), fields(mode = %self.timer.mode()))]
    pub async fn apply(&mut self, event: Event) -> Effects {
        let effects = event::dispatch(&mut self.timer, event);
        self.perform(&effects).await;
        effects
    }

    /// Handle one command. Returns `None` when the worker should stop.
    pub async fn handle(&mut self, command: Command) -> Option<Effects> {
        match command {
            Command::Dispatch(event) => Some(self.apply(event).await),
            Command::Query { responder } => {
                let _ = responder.send(self.status());
                Some(Effects::new())
            }
            Command::Stop => {
                tracing::info!("Stopping timer worker");
                None
            }
        }
    }

    pub fn status(&self) -> TimerStatus {
        TimerStatus {
            state: self.timer.state(),
            total: self.timer.total(),
            sessions: self.timer.sessions().count(),
            auto_switch: self.timer.settings().auto_switch,
            advance_pending: self.timer.is_advance_pending(),
            frame: self.timer.frame(),
        }
    }

    /// Run effects in order. Rendering and persisting happen once per batch,
    /// after everything else.
    async fn perform(&self, effects: &Effects) {
        let mut render = false;
        let mut persist = false;

        for effect in effects.iter() {
            match *effect {
                Effect::Render => render = true,
                Effect::Persist => persist = true,
                Effect::ModeChanged(mode) => self.ports.display.mode_changed(mode),
                Effect::InputsLocked(locked) => self.ports.display.inputs_locked(locked),
                Effect::NotifyComplete(mode) => self.notify(mode).await,
                Effect::TickerArmed
                | Effect::TickerDisarmed
                | Effect::AdvanceScheduled
                | Effect::AdvanceCancelled => {
                    tracing::trace!(?effect, "Worker state follows the timer");
                }
            }
        }

        if render {
            self.ports.display.render(&self.timer.frame());
        }

        if persist {
            self.persist().await;
        }
    }

    async fn notify(&self, mode: Mode) {
        tracing::info!(%mode, "Countdown completed");
        let message = self.config.notification(mode);
        if let Err(err) = self.ports.notifier.notify(mode, message).await {
            tracing::warn!(
                err = %snafu::Report::from_error(&err),
                "Could not play completion notification"
            );
        }
    }

    async fn persist(&self) {
        let raw = match self.timer.snapshot().encode() {
            Ok(raw) => raw,
            Err(err) => {
                tracing_report!(err, "Could not encode timer state");
                return;
            }
        };

        if let Err(err) = self.ports.store.set(SNAPSHOT_KEY, raw).await {
            tracing_report!(err, "Could not persist timer state");
        }
    }
}

/// A type responsible for driving the [`Timer`]. A [`WorkerRoutine`] runs on
/// background, receiving [`Command`]s from [`WorkerHandle`] and feeding ticks
/// and auto-advances from its own timers.
///
/// [`WorkerHandle`]: crate::domain::worker::WorkerHandle
pub struct WorkerRoutine {
    context: WorkerContext,
    state: WorkerState,
}

impl WorkerRoutine {
    /// Spawn a running [`WorkerRoutine`] on background.
    pub fn spawn(
        timer: Timer,
        config: WorkerConfig,
        commands: Receiver<Command>,
        ports: WorkerPorts,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut worker = Self {
                context: WorkerContext {
                    timer,
                    config,
                    commands,
                    ports,
                },
                state: WorkerState::new(),
            };
            worker.run().await;
        })
    }

    /// Main part of its business logic.
    async fn run(&mut self) {
        let display = &self.context.ports.display;
        display.mode_changed(self.context.timer.mode());
        display.render(&self.context.timer.frame());

        while !self.state.is_stopped() {
            self.state.run(&mut self.context).await;
        }
    }
}
