use std::pin::Pin;

use tokio::time::{Duration, Instant, Interval, Sleep};

use crate::domain::event::Event;
use crate::domain::timer::{Effect, Effects};
use crate::domain::worker::routine::WorkerContext;

#[derive(Debug)]
#[repr(transparent)]
pub struct WorkerState {
    inner: Option<WorkerStateInner>,
}

impl WorkerState {
    /// Creates a new [`WorkerState`].
    pub fn new() -> Self {
        Self {
            inner: Some(WorkerStateInner::new()),
        }
    }

    /// Do the business logic based on its inner state.
    pub async fn run(&mut self, context: &mut WorkerContext) {
        self.inner = match self.inner.take() {
            Some(inner) => Some(inner.run(context).await),
            None => unreachable!("`WorkerState`'s inner should not be `None`"),
        };
    }

    /// Returns `true` if is stopped of this [`WorkerState`].
    pub fn is_stopped(&self) -> bool {
        matches!(self.inner, Some(WorkerStateInner::Stopped(_)))
    }
}

#[enum_dispatch::enum_dispatch]
trait StateRun {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner;
}

/// Actual implementation of running state of [`WorkerRoutine`].
///
/// [`WorkerRoutine`]: crate::domain::worker::routine::WorkerRoutine
#[derive(Debug)]
#[enum_dispatch::enum_dispatch(StateRun)]
enum WorkerStateInner {
    Idle(IdleState),
    Running(RunningState),
    Settling(SettlingState),
    Stopped(StoppedState),
}

impl WorkerStateInner {
    pub fn new() -> Self {
        Self::Idle(IdleState)
    }
}

/// Pick the state that matches the timer after a batch of effects. Timers
/// that are still wanted survive; a timer the effects re-armed is replaced.
fn follow(
    context: &WorkerContext,
    effects: Option<Effects>,
    ticker: Option<Interval>,
    deadline: Option<Pin<Box<Sleep>>>,
) -> WorkerStateInner {
    let Some(effects) = effects else {
        return StoppedState.into();
    };

    if context.timer.is_running() {
        match ticker {
            Some(ticker) if !effects.contains(Effect::TickerArmed) => RunningState { ticker }.into(),
            _ => RunningState::arm(context.config.tick_period).into(),
        }
    } else if context.timer.is_advance_pending() {
        match deadline {
            Some(deadline) if !effects.contains(Effect::AdvanceScheduled) => {
                SettlingState { deadline }.into()
            }
            _ => SettlingState::arm(context.config.settle_delay).into(),
        }
    } else {
        IdleState.into()
    }
}

/// A state which indicates that no countdown is running and nothing is
/// scheduled. Only commands wake the worker up.
#[derive(Debug)]
struct IdleState;

impl StateRun for IdleState {
    async fn run(self, context: &mut WorkerContext) -> WorkerStateInner {
        let effects = match context.commands.recv().await {
            Some(command) => context.handle(command).await,
            None => None,
        };
        follow(context, effects, None, None)
    }
}

/// A state which indicates that a countdown is running, with a one-second
/// ticker working internally.
#[derive(Debug)]
struct RunningState {
    ticker: Interval,
}

impl RunningState {
    fn arm(period: Duration) -> Self {
        let ticker = tokio::time::interval_at(Instant::now() + period, period);
        Self { ticker }
    }
}

impl StateRun for RunningState {
    async fn run(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        tokio::select! {
            _ = self.ticker.tick() => {
                let effects = context.apply(Event::Tick).await;
                follow(context, Some(effects), Some(self.ticker), None)
            }
            command = context.commands.recv() => {
                let effects = match command {
                    Some(command) => context.handle(command).await,
                    None => None,
                };
                follow(context, effects, Some(self.ticker), None)
            }
        }
    }
}

/// A state which indicates that a countdown completed and the next mode
/// starts once the settle delay elapses. Dropping the state cancels it.
#[derive(Debug)]
struct SettlingState {
    deadline: Pin<Box<Sleep>>,
}

impl SettlingState {
    fn arm(delay: Duration) -> Self {
        Self {
            deadline: Box::pin(tokio::time::sleep(delay)),
        }
    }
}

impl StateRun for SettlingState {
    async fn run(mut self, context: &mut WorkerContext) -> WorkerStateInner {
        tokio::select! {
            _ = &mut self.deadline => {
                let effects = context.apply(Event::Advance).await;
                follow(context, Some(effects), None, None)
            }
            command = context.commands.recv() => {
                let effects = match command {
                    Some(command) => context.handle(command).await,
                    None => None,
                };
                follow(context, effects, None, Some(self.deadline))
            }
        }
    }
}

/// A state which indicates that [`WorkerRoutine`] should stop running.
///
/// [`WorkerRoutine`]: crate::domain::worker::routine::WorkerRoutine
#[derive(Debug)]
struct StoppedState;

impl StateRun for StoppedState {
    async fn run(self, _context: &mut WorkerContext) -> WorkerStateInner {
        self.into()
    }
}
