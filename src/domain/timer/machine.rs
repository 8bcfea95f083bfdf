use snafu::prelude::*;

use crate::domain::entity::duration::parse_field;
use crate::domain::entity::{Mode, ModeDuration, SessionCounter, TimeUnit};
use crate::domain::snapshot::Snapshot;
use crate::domain::timer::effect::{Effect, Effects};
use crate::domain::timer::frame::DisplayFrame;
use crate::domain::timer::progress::ModeProgress;
use crate::domain::timer::settings::Settings;

/// The observable countdown state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerState {
    pub mode: Mode,
    pub remaining: u64,
    pub running: bool,
}

/// The Pomodoro state machine.
///
/// A [`Timer`] owns every piece of mutable state and changes it only through
/// its transition methods. Each transition returns the [`Effects`] the caller
/// must perform (rendering, persisting, arming timers), so the machine itself
/// never touches the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    settings: Settings,
    state: TimerState,
    // Entries of inactive modes only. The active mode's progress lives in
    // `state.remaining`.
    progress: ModeProgress,
    sessions: SessionCounter,
    advance_pending: bool,
}

impl Timer {
    /// Creates an idle [`Timer`] in the initial mode, resuming its saved
    /// progress if there is any.
    pub fn new(settings: Settings, progress: ModeProgress, sessions: SessionCounter) -> Self {
        let mode = Mode::initial();
        let mut timer = Self {
            settings,
            state: TimerState {
                mode,
                remaining: 0,
                running: false,
            },
            progress,
            sessions,
            advance_pending: false,
        };
        timer.state.remaining = timer.restore(mode);
        timer
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self::new(snapshot.settings, snapshot.progress, snapshot.sessions)
    }

    /// Everything that survives a restart.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            settings: self.settings,
            sessions: self.sessions,
            progress: self.mode_progress(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn remaining(&self) -> u64 {
        self.state.remaining
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn sessions(&self) -> SessionCounter {
        self.sessions
    }

    /// Returns `true` while an auto-advance waits for its settle delay.
    pub fn is_advance_pending(&self) -> bool {
        self.advance_pending
    }

    /// Configured length of the active mode in seconds.
    pub fn total(&self) -> u64 {
        self.settings.seconds(self.state.mode)
    }

    /// Saved progress of every mode, including the active one when it is
    /// stopped partway through its countdown.
    pub fn mode_progress(&self) -> ModeProgress {
        let mut progress = self.progress;
        progress.set(self.state.mode, self.interrupted_remaining());
        progress
    }

    pub fn frame(&self) -> DisplayFrame {
        DisplayFrame::new(
            self.state.mode,
            self.state.remaining,
            self.total(),
            self.sessions,
        )
    }

    /// The mode auto-advance moves to from the active one.
    pub fn next_mode(&self) -> Mode {
        match self.state.mode {
            Mode::Work if self.sessions.goal_reached() => Mode::LongBreak,
            Mode::Work => Mode::ShortBreak,
            Mode::ShortBreak | Mode::LongBreak => Mode::Work,
        }
    }

    /// Begin counting down the active mode.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is already running or
    /// no time is left.
    pub fn start(&mut self) -> Result<Effects, TransitionError> {
        let mode = self.state.mode;
        ensure!(!self.state.running, AlreadyRunningSnafu { mode });
        ensure!(self.state.remaining > 0, NothingRemainingSnafu { mode });

        self.state.running = true;
        Ok(vec![Effect::TickerArmed, Effect::InputsLocked(true), Effect::Render].into())
    }

    /// Stop counting down, keeping the remaining time as it is.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is not running.
    pub fn pause(&mut self) -> Result<Effects, TransitionError> {
        ensure!(
            self.state.running,
            NotRunningSnafu {
                mode: self.state.mode
            }
        );

        let mut effects = Effects::new();
        self.stop(&mut effects);
        effects.push(Effect::Render);
        effects.push(Effect::Persist);
        Ok(effects)
    }

    /// Pause when running, start otherwise.
    ///
    /// # Errors
    ///
    /// This function will return an error if starting is not possible.
    pub fn toggle(&mut self) -> Result<Effects, TransitionError> {
        if self.state.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Count one elapsed second. Reaching zero completes the mode within the
    /// same call, so a running timer is never observed at zero.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is not running.
    pub fn tick(&mut self) -> Result<Effects, TransitionError> {
        ensure!(
            self.state.running,
            NotRunningSnafu {
                mode: self.state.mode
            }
        );

        self.state.remaining = self.state.remaining.saturating_sub(1);

        let mut effects = Effects::new();
        if self.state.remaining == 0 {
            self.complete(&mut effects);
        } else {
            effects.push(Effect::Render);
            effects.push(Effect::Persist);
        }
        Ok(effects)
    }

    fn complete(&mut self, effects: &mut Effects) {
        let mode = self.state.mode;
        self.stop(effects);
        self.progress.clear(mode);
        effects.push(Effect::NotifyComplete(mode));

        match mode {
            Mode::Work => self.sessions.increment(),
            Mode::LongBreak => self.sessions.reset(),
            Mode::ShortBreak => {}
        }

        effects.push(Effect::Render);
        if self.settings.auto_switch {
            self.advance_pending = true;
            effects.push(Effect::AdvanceScheduled);
        }
        effects.push(Effect::Persist);
    }

    /// Run a pending auto-advance: switch to the next mode and start it.
    ///
    /// # Errors
    ///
    /// This function will return an error if no auto-advance is pending.
    pub fn advance(&mut self) -> Result<Effects, TransitionError> {
        ensure!(self.advance_pending, NoPendingAdvanceSnafu);
        self.advance_pending = false;

        let next = self.next_mode();
        let mut effects = self.switch_mode(next, true);
        match self.start() {
            Ok(started) => effects.extend(started),
            Err(err) => tracing::debug!(%err, "Auto-advanced mode was not started"),
        }
        Ok(effects)
    }

    /// Drop a pending auto-advance, if any.
    pub fn cancel_advance(&mut self) -> Effects {
        let mut effects = Effects::new();
        if self.advance_pending {
            self.advance_pending = false;
            effects.push(Effect::AdvanceCancelled);
        }
        effects
    }

    /// Make `target` the active mode. Does nothing when `target` is already
    /// active unless `force` is set.
    pub fn switch_mode(&mut self, target: Mode, force: bool) -> Effects {
        let mut effects = Effects::new();
        if !force && target == self.state.mode {
            return effects;
        }

        let saved = self.interrupted_remaining();
        self.progress.set(self.state.mode, saved);
        self.stop(&mut effects);

        self.state.mode = target;
        self.state.remaining = self.restore(target);

        effects.push(Effect::ModeChanged(target));
        effects.push(Effect::Render);
        effects.push(Effect::Persist);
        effects
    }

    /// Stop and rewind the active mode to its full duration, discarding
    /// saved progress.
    pub fn reset(&mut self) -> Effects {
        let mut effects = Effects::new();
        self.stop(&mut effects);
        self.progress.clear(self.state.mode);
        self.state.remaining = self.total();
        effects.push(Effect::Render);
        effects.push(Effect::Persist);
        effects
    }

    /// Store a new duration for `mode`. The countdown is rewound only when
    /// `mode` is active and idle. A running countdown never keeps more time
    /// than its mode now allows.
    pub fn update_duration(&mut self, mode: Mode, duration: ModeDuration) -> Effects {
        self.settings.set_duration(mode, duration);
        if mode == self.state.mode {
            self.state.remaining = if self.state.running {
                self.state.remaining.min(duration.seconds())
            } else {
                duration.seconds()
            };
        }
        vec![Effect::Render, Effect::Persist].into()
    }

    /// Apply raw text typed into one duration field.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is running.
    pub fn set_field(
        &mut self,
        mode: Mode,
        unit: TimeUnit,
        raw: &str,
    ) -> Result<Effects, TransitionError> {
        ensure!(
            !self.state.running,
            InputsLockedSnafu {
                mode: self.state.mode
            }
        );
        let duration = self.settings.duration(mode).with(unit, parse_field(raw));
        Ok(self.update_duration(mode, duration))
    }

    /// Move one duration field up or down, wrapping at its range.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is running.
    pub fn step(&mut self, mode: Mode, unit: TimeUnit, delta: i32) -> Result<Effects, TransitionError> {
        ensure!(
            !self.state.running,
            InputsLockedSnafu {
                mode: self.state.mode
            }
        );
        let duration = self.settings.duration(mode).stepped(unit, delta);
        Ok(self.update_duration(mode, duration))
    }

    /// Turn auto-advance on or off.
    ///
    /// # Errors
    ///
    /// This function will return an error if the timer is running.
    pub fn set_auto_switch(&mut self, enabled: bool) -> Result<Effects, TransitionError> {
        ensure!(
            !self.state.running,
            InputsLockedSnafu {
                mode: self.state.mode
            }
        );
        self.settings.auto_switch = enabled;
        Ok(vec![Effect::Persist].into())
    }

    fn stop(&mut self, effects: &mut Effects) {
        self.state.running = false;
        effects.push(Effect::TickerDisarmed);
        effects.push(Effect::InputsLocked(false));
    }

    fn interrupted_remaining(&self) -> Option<u64> {
        let remaining = self.state.remaining;
        (remaining > 0 && remaining < self.total()).then_some(remaining)
    }

    fn restore(&mut self, mode: Mode) -> u64 {
        let total = self.settings.seconds(mode);
        self.progress
            .take(mode)
            .filter(|&remaining| remaining > 0)
            .map_or(total, |remaining| remaining.min(total))
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new(
            Settings::default(),
            ModeProgress::default(),
            SessionCounter::default(),
        )
    }
}

/// An operation was requested in a state that does not allow it. These are
/// expected during normal use and are never shown to the user.
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum TransitionError {
    #[snafu(display("{mode} timer is already running"))]
    AlreadyRunning { mode: Mode },
    #[snafu(display("{mode} timer has no time left"))]
    NothingRemaining { mode: Mode },
    #[snafu(display("{mode} timer is not running"))]
    NotRunning { mode: Mode },
    #[snafu(display("No auto-advance is pending"))]
    NoPendingAdvance,
    #[snafu(display("Settings are locked while the {mode} timer runs"))]
    InputsLocked { mode: Mode },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_default() {
        let timer = Timer::default();
        assert_eq!(
            timer.state(),
            TimerState {
                mode: Mode::Work,
                remaining: 1500,
                running: false,
            }
        );
        assert_eq!(timer.sessions().count(), 0);
        assert!(!timer.is_advance_pending());
    }

    #[test]
    fn timer_new_resumes_saved_progress() {
        let progress = [(Mode::Work, Some(700)), (Mode::ShortBreak, Some(10))]
            .into_iter()
            .collect();
        let timer = Timer::new(Settings::default(), progress, SessionCounter::new(2));
        assert_eq!(timer.remaining(), 700);
        assert_eq!(timer.mode_progress().get(Mode::Work), Some(700));
        assert_eq!(timer.mode_progress().get(Mode::ShortBreak), Some(10));
    }

    #[test]
    fn timer_new_clamps_saved_progress() {
        let progress = [(Mode::Work, Some(99_999))].into_iter().collect();
        let timer = Timer::new(Settings::default(), progress, SessionCounter::default());
        assert_eq!(timer.remaining(), 1500);
    }

    #[test]
    fn timer_start() {
        let mut timer = Timer::default();
        let effects = timer.start().unwrap();
        assert!(timer.is_running());
        assert!(effects.contains(Effect::TickerArmed));
        assert!(effects.contains(Effect::InputsLocked(true)));

        assert_eq!(
            timer.start(),
            Err(TransitionError::AlreadyRunning { mode: Mode::Work })
        );
    }

    #[test]
    fn timer_start_without_remaining_time() {
        let mut timer = Timer::default();
        timer.set_field(Mode::Work, TimeUnit::Minutes, "").unwrap();
        assert_eq!(timer.remaining(), 0);
        assert_eq!(
            timer.start(),
            Err(TransitionError::NothingRemaining { mode: Mode::Work })
        );
        assert!(!timer.is_running());
    }

    #[test]
    fn timer_pause_resume_keeps_remaining() {
        let mut timer = Timer::default();
        timer.start().unwrap();
        for _ in 0..3 {
            timer.tick().unwrap();
        }

        let effects = timer.pause().unwrap();
        assert!(effects.contains(Effect::TickerDisarmed));
        assert!(effects.contains(Effect::Persist));
        assert_eq!(timer.remaining(), 1497);

        timer.toggle().unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.remaining(), 1497);

        timer.toggle().unwrap();
        assert!(!timer.is_running());
        assert_eq!(
            timer.pause(),
            Err(TransitionError::NotRunning { mode: Mode::Work })
        );
    }

    #[test]
    fn timer_tick_requires_running() {
        let mut timer = Timer::default();
        assert_eq!(
            timer.tick(),
            Err(TransitionError::NotRunning { mode: Mode::Work })
        );
        assert_eq!(timer.remaining(), 1500);
    }

    #[test]
    fn timer_ticks_complete_exactly_once() {
        for mode in Mode::ALL {
            let mut timer = Timer::default();
            timer.switch_mode(mode, true);
            timer.start().unwrap();

            let mut completions = 0;
            for _ in 0..timer.remaining() {
                let effects = timer.tick().unwrap();
                completions += effects.count(Effect::NotifyComplete(mode));
            }

            assert_eq!(completions, 1);
            assert_eq!(timer.remaining(), 0);
            assert!(!timer.is_running());
            assert!(timer.tick().is_err());
        }
    }

    #[test]
    fn timer_full_work_session_without_auto_switch() {
        let mut timer = Timer::default();
        timer.start().unwrap();

        let mut completions = 0;
        for _ in 0..1500 {
            let effects = timer.tick().unwrap();
            completions += effects.count(Effect::NotifyComplete(Mode::Work));
            assert!(!effects.contains(Effect::AdvanceScheduled));
        }

        assert_eq!(completions, 1);
        assert_eq!(timer.sessions().count(), 1);
        assert_eq!(
            timer.state(),
            TimerState {
                mode: Mode::Work,
                remaining: 0,
                running: false,
            }
        );
        assert!(!timer.is_advance_pending());
        assert_eq!(timer.mode_progress().get(Mode::Work), None);
        assert_eq!(timer.advance(), Err(TransitionError::NoPendingAdvance));
    }

    #[test]
    fn timer_session_goal_leads_to_long_break() {
        let settings = Settings {
            auto_switch: true,
            ..Settings::default()
        };
        let mut timer = Timer::new(settings, ModeProgress::default(), SessionCounter::new(3));
        timer.start().unwrap();
        for _ in 0..1500 {
            timer.tick().unwrap();
        }

        assert_eq!(timer.sessions().count(), 4);
        assert!(timer.is_advance_pending());
        assert_eq!(timer.next_mode(), Mode::LongBreak);

        let effects = timer.advance().unwrap();
        assert!(effects.contains(Effect::ModeChanged(Mode::LongBreak)));
        assert!(effects.contains(Effect::TickerArmed));
        assert_eq!(
            timer.state(),
            TimerState {
                mode: Mode::LongBreak,
                remaining: 900,
                running: true,
            }
        );
        assert!(!timer.is_advance_pending());
    }

    #[test]
    fn timer_session_counting_rule() {
        let mut timer = Timer::new(
            Settings::default(),
            ModeProgress::default(),
            SessionCounter::new(2),
        );

        timer.switch_mode(Mode::ShortBreak, false);
        timer.start().unwrap();
        for _ in 0..300 {
            timer.tick().unwrap();
        }
        assert_eq!(timer.sessions().count(), 2);
        assert_eq!(timer.next_mode(), Mode::Work);

        timer.switch_mode(Mode::LongBreak, false);
        timer.start().unwrap();
        for _ in 0..900 {
            timer.tick().unwrap();
        }
        assert_eq!(timer.sessions().count(), 0);
        assert_eq!(timer.next_mode(), Mode::Work);
    }

    #[test]
    fn timer_work_goes_to_short_break_before_goal() {
        let timer = Timer::new(
            Settings::default(),
            ModeProgress::default(),
            SessionCounter::new(1),
        );
        assert_eq!(timer.next_mode(), Mode::ShortBreak);
    }

    #[test]
    fn timer_switch_mode_saves_and_restores_progress() {
        let mut timer = Timer::default();
        timer.start().unwrap();
        for _ in 0..100 {
            timer.tick().unwrap();
        }

        let effects = timer.switch_mode(Mode::ShortBreak, false);
        assert!(effects.contains(Effect::ModeChanged(Mode::ShortBreak)));
        assert!(effects.contains(Effect::TickerDisarmed));
        assert!(effects.contains(Effect::Persist));
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 300);
        assert_eq!(timer.mode_progress().get(Mode::Work), Some(1400));

        timer.switch_mode(Mode::Work, false);
        assert_eq!(timer.remaining(), 1400);
    }

    #[test]
    fn timer_switch_to_active_mode_is_noop_unless_forced() {
        let mut timer = Timer::default();
        timer.start().unwrap();
        timer.tick().unwrap();

        let effects = timer.switch_mode(Mode::Work, false);
        assert!(effects.is_empty());
        assert!(timer.is_running());

        let effects = timer.switch_mode(Mode::Work, true);
        assert!(effects.contains(Effect::ModeChanged(Mode::Work)));
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 1499);
    }

    #[test]
    fn timer_reset_discards_progress() {
        for mode in Mode::ALL {
            let other = if mode == Mode::Work {
                Mode::LongBreak
            } else {
                Mode::Work
            };

            let mut timer = Timer::default();
            timer.switch_mode(mode, true);
            timer.start().unwrap();
            for _ in 0..10 {
                timer.tick().unwrap();
            }

            timer.reset();
            assert!(!timer.is_running());
            timer.switch_mode(other, true);
            timer.switch_mode(mode, true);
            assert_eq!(timer.remaining(), timer.settings().seconds(mode));
        }
    }

    #[test]
    fn timer_completed_mode_keeps_no_progress() {
        let mut timer = Timer::default();
        timer.switch_mode(Mode::ShortBreak, false);
        timer.start().unwrap();
        for _ in 0..300 {
            timer.tick().unwrap();
        }

        timer.switch_mode(Mode::Work, false);
        assert_eq!(timer.mode_progress().get(Mode::ShortBreak), None);
        timer.switch_mode(Mode::ShortBreak, false);
        assert_eq!(timer.remaining(), 300);
    }

    #[test]
    fn timer_update_duration() {
        let mut timer = Timer::default();
        timer.update_duration(Mode::Work, ModeDuration::new(1, 0));
        assert_eq!(timer.remaining(), 3600);

        timer.update_duration(Mode::ShortBreak, ModeDuration::from_minutes(10));
        assert_eq!(timer.remaining(), 3600);
        assert_eq!(timer.settings().seconds(Mode::ShortBreak), 600);

        timer.start().unwrap();
        timer.tick().unwrap();
        timer.update_duration(Mode::Work, ModeDuration::new(1, 30));
        assert_eq!(timer.remaining(), 3599);

        let effects = timer.update_duration(Mode::Work, ModeDuration::from_minutes(50));
        assert!(effects.contains(Effect::Persist));
        assert_eq!(timer.remaining(), 3000);
        assert_eq!(timer.settings().seconds(Mode::Work), 3000);
        assert!(timer.is_running());
    }

    #[test]
    fn timer_restored_progress_never_exceeds_duration() {
        let mut timer = Timer::default();
        timer.start().unwrap();
        timer.tick().unwrap();
        timer.switch_mode(Mode::ShortBreak, false);

        timer.update_duration(Mode::Work, ModeDuration::from_minutes(10));
        timer.switch_mode(Mode::Work, false);
        assert_eq!(timer.remaining(), 600);
    }

    #[test]
    fn timer_step() {
        let mut timer = Timer::default();
        timer.step(Mode::Work, TimeUnit::Hours, -1).unwrap();
        assert_eq!(timer.settings().duration(Mode::Work), ModeDuration::new(23, 25));
        assert_eq!(timer.remaining(), 23 * 3600 + 25 * 60);

        timer.step(Mode::LongBreak, TimeUnit::Minutes, 1).unwrap();
        assert_eq!(timer.settings().duration(Mode::LongBreak), ModeDuration::from_minutes(16));

        timer.start().unwrap();
        assert_eq!(
            timer.step(Mode::Work, TimeUnit::Minutes, 1),
            Err(TransitionError::InputsLocked { mode: Mode::Work })
        );
    }

    #[test]
    fn timer_set_field() {
        let mut timer = Timer::default();
        timer.set_field(Mode::Work, TimeUnit::Hours, "2").unwrap();
        timer.set_field(Mode::Work, TimeUnit::Minutes, "xyz").unwrap();
        assert_eq!(timer.settings().duration(Mode::Work), ModeDuration::new(2, 0));
        assert_eq!(timer.remaining(), 7200);
    }

    #[test]
    fn timer_set_field_locked_while_running() {
        let mut timer = Timer::default();
        timer.start().unwrap();
        timer.tick().unwrap();

        assert_eq!(
            timer.set_field(Mode::Work, TimeUnit::Minutes, "1"),
            Err(TransitionError::InputsLocked { mode: Mode::Work })
        );
        assert_eq!(timer.settings().duration(Mode::Work), ModeDuration::from_minutes(25));

        timer.pause().unwrap();
        assert_eq!(timer.remaining(), 1499);
        let restored = Timer::from_snapshot(timer.snapshot());
        assert_eq!(restored.remaining(), 1499);
        assert!(restored.remaining() <= restored.total());
    }

    #[test]
    fn timer_set_auto_switch() {
        let mut timer = Timer::default();
        let effects = timer.set_auto_switch(true).unwrap();
        assert_eq!(effects, Effects::from(vec![Effect::Persist]));
        assert!(timer.settings().auto_switch);

        timer.start().unwrap();
        assert!(timer.set_auto_switch(false).is_err());
        assert!(timer.settings().auto_switch);
    }

    #[test]
    fn timer_cancel_advance() {
        let mut timer = Timer::default();
        timer.set_auto_switch(true).unwrap();
        timer.switch_mode(Mode::ShortBreak, false);
        timer.start().unwrap();
        for _ in 0..300 {
            timer.tick().unwrap();
        }
        assert!(timer.is_advance_pending());

        let effects = timer.cancel_advance();
        assert_eq!(effects, Effects::from(vec![Effect::AdvanceCancelled]));
        assert!(timer.cancel_advance().is_empty());
        assert!(timer.advance().is_err());
        assert_eq!(timer.mode(), Mode::ShortBreak);
    }

    #[test]
    fn timer_snapshot_includes_active_progress() {
        let mut timer = Timer::default();
        timer.start().unwrap();
        for _ in 0..60 {
            timer.tick().unwrap();
        }

        let snapshot = timer.snapshot();
        assert_eq!(snapshot.progress.get(Mode::Work), Some(1440));

        let restored = Timer::from_snapshot(snapshot);
        assert_eq!(restored.remaining(), 1440);
        assert!(!restored.is_running());
    }
}
