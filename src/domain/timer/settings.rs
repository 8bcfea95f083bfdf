use crate::domain::entity::{Mode, ModeDuration};

/// User-editable settings: one duration per mode plus the auto-advance flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub work: ModeDuration,
    pub short_break: ModeDuration,
    pub long_break: ModeDuration,
    pub auto_switch: bool,
}

impl Settings {
    /// Get the duration configured for `mode`.
    pub fn duration(&self, mode: Mode) -> ModeDuration {
        match mode {
            Mode::Work => self.work,
            Mode::ShortBreak => self.short_break,
            Mode::LongBreak => self.long_break,
        }
    }

    /// Get the duration configured for `mode` in seconds.
    pub fn seconds(&self, mode: Mode) -> u64 {
        self.duration(mode).seconds()
    }

    pub fn set_duration(&mut self, mode: Mode, duration: ModeDuration) {
        let slot = match mode {
            Mode::Work => &mut self.work,
            Mode::ShortBreak => &mut self.short_break,
            Mode::LongBreak => &mut self.long_break,
        };
        *slot = duration;
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            work: ModeDuration::from_minutes(25),
            short_break: ModeDuration::from_minutes(5),
            long_break: ModeDuration::from_minutes(15),
            auto_switch: false,
        }
    }
}
