use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::entity::Mode;

/// Parsed content of the configuration file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Configuration {
    #[serde(default)]
    pub timer: TimerSection,
    #[serde(default)]
    pub notification: NotificationSection,
    #[serde(default)]
    pub storage: StorageSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TimerSection {
    /// Milliseconds between a completion and the auto-advance.
    #[serde(default = "TimerSection::default_settle_delay")]
    pub settle_delay: u64,
}

impl TimerSection {
    fn default_settle_delay() -> u64 {
        1500
    }
}

impl Default for TimerSection {
    fn default() -> Self {
        Self {
            settle_delay: Self::default_settle_delay(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct NotificationSection {
    pub work: Option<MessageSection>,
    pub short_break: Option<MessageSection>,
    pub long_break: Option<MessageSection>,
}

impl NotificationSection {
    pub fn get(&self, mode: Mode) -> Option<&MessageSection> {
        match mode {
            Mode::Work => self.work.as_ref(),
            Mode::ShortBreak => self.short_break.as_ref(),
            Mode::LongBreak => self.long_break.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MessageSection {
    pub summary: String,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    /// Directory of the saved state. Defaults to the XDG data directory.
    pub directory: Option<PathBuf>,
}
