use crate::domain::entity::Mode;

/// A side effect requested by a [`Timer`] transition. Transitions never
/// perform side effects themselves; the worker executes these in order.
///
/// [`Timer`]: crate::domain::timer::Timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Redraw the time, progress and session label.
    Render,
    /// Play the visual cue for entering a new mode.
    ModeChanged(Mode),
    /// Disable or re-enable the duration inputs.
    InputsLocked(bool),
    /// Emit the completion notification of a mode.
    NotifyComplete(Mode),
    /// Write the snapshot to the store.
    Persist,
    /// Start a fresh one-second ticker, replacing any previous one.
    TickerArmed,
    /// Drop the ticker.
    TickerDisarmed,
    /// Start the settle delay before auto-advancing.
    AdvanceScheduled,
    /// Drop a pending auto-advance.
    AdvanceCancelled,
}

/// Ordered list of [`Effect`]s produced by one transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, effect: Effect) {
        self.0.push(effect);
    }

    pub fn extend(&mut self, other: Effects) {
        self.0.extend(other.0);
    }

    pub fn contains(&self, effect: Effect) -> bool {
        self.0.contains(&effect)
    }

    /// Number of times `effect` occurs.
    pub fn count(&self, effect: Effect) -> usize {
        self.0.iter().filter(|&&e| e == effect).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.0.iter()
    }
}

impl From<Vec<Effect>> for Effects {
    fn from(value: Vec<Effect>) -> Self {
        Self(value)
    }
}

impl IntoIterator for Effects {
    type Item = Effect;
    type IntoIter = std::vec::IntoIter<Effect>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
