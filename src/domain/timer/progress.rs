use crate::domain::entity::Mode;

/// Remaining seconds saved for modes whose countdown was interrupted, so
/// switching back resumes where the user left off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModeProgress {
    entries: [Option<u64>; 3],
}

impl ModeProgress {
    pub fn get(&self, mode: Mode) -> Option<u64> {
        self.entries[mode.index()]
    }

    pub fn set(&mut self, mode: Mode, remaining: Option<u64>) {
        self.entries[mode.index()] = remaining;
    }

    /// Remove and return the saved entry of `mode`.
    pub fn take(&mut self, mode: Mode) -> Option<u64> {
        self.entries[mode.index()].take()
    }

    pub fn clear(&mut self, mode: Mode) {
        self.set(mode, None);
    }

    /// Iterate over every mode with its saved entry.
    pub fn iter(&self) -> impl Iterator<Item = (Mode, Option<u64>)> + '_ {
        Mode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }
}

impl FromIterator<(Mode, Option<u64>)> for ModeProgress {
    fn from_iter<T: IntoIterator<Item = (Mode, Option<u64>)>>(iter: T) -> Self {
        let mut progress = Self::default();
        for (mode, remaining) in iter {
            progress.set(mode, remaining);
        }
        progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_progress_operation() {
        let mut progress = ModeProgress::default();
        assert!(progress.iter().all(|(_, entry)| entry.is_none()));

        progress.set(Mode::Work, Some(600));
        progress.set(Mode::LongBreak, Some(30));
        assert_eq!(progress.get(Mode::Work), Some(600));
        assert_eq!(progress.get(Mode::ShortBreak), None);

        assert_eq!(progress.take(Mode::Work), Some(600));
        assert_eq!(progress.get(Mode::Work), None);

        progress.clear(Mode::LongBreak);
        assert_eq!(progress, ModeProgress::default());
    }

    #[test]
    fn mode_progress_from_iter() {
        let progress: ModeProgress = [(Mode::ShortBreak, Some(42))].into_iter().collect();
        assert_eq!(
            progress.iter().collect::<Vec<_>>(),
            vec![
                (Mode::Work, None),
                (Mode::ShortBreak, Some(42)),
                (Mode::LongBreak, None),
            ]
        );
    }
}
