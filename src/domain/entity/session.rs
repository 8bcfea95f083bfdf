/// Number of completed work sessions after which a long break is due.
pub const SESSION_GOAL: u32 = 4;

/// Count of work sessions completed since the last long break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionCounter(u32);

impl SessionCounter {
    /// Creates a new [`SessionCounter`] starting at `count`.
    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn count(&self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn reset(&mut self) {
        self.0 = 0;
    }

    /// Returns `true` once enough work sessions are done for a long break.
    pub fn goal_reached(&self) -> bool {
        self.0 >= SESSION_GOAL
    }

    /// The session number shown to the user, capped at [`SESSION_GOAL`].
    pub fn displayed(&self) -> u32 {
        self.0.saturating_add(1).min(SESSION_GOAL)
    }

    pub fn label(&self) -> String {
        format!("{} / {SESSION_GOAL} Sessions Completed", self.displayed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_counter_operation() {
        let mut counter = SessionCounter::default();
        assert_eq!(counter.count(), 0);
        counter.increment();
        counter.increment();
        assert_eq!(counter.count(), 2);
        assert!(!counter.goal_reached());
        counter.increment();
        counter.increment();
        assert!(counter.goal_reached());
        counter.reset();
        assert_eq!(counter, SessionCounter::new(0));
    }

    #[test]
    fn session_counter_label_is_capped() {
        assert_eq!(SessionCounter::new(0).label(), "1 / 4 Sessions Completed");
        assert_eq!(SessionCounter::new(3).label(), "4 / 4 Sessions Completed");
        let counter = SessionCounter::new(7);
        assert_eq!(counter.label(), "4 / 4 Sessions Completed");
        assert_eq!(counter.count(), 7);
    }
}
