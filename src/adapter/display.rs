use std::io::{Stdout, Write};
use std::sync::Mutex;

use crate::domain::entity::Mode;
use crate::domain::outbound::DisplayPort;
use crate::domain::timer::DisplayFrame;

const BAR_WIDTH: usize = 24;

/// A [`DisplayPort`] drawing the countdown as a single, continuously
/// rewritten terminal line.
pub struct TerminalDisplay<W> {
    out: Mutex<W>,
}

impl TerminalDisplay<Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> TerminalDisplay<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write(&self, text: &str) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            tracing::debug!(%err, "Could not draw to terminal");
        }
    }
}

impl<W: Write + Send + 'static> DisplayPort for TerminalDisplay<W> {
    fn render(&self, frame: &DisplayFrame) {
        // OSC 0 sets the window title, then the status line is redrawn.
        self.write(&format!(
            "\x1b]0;{}\x07\r\x1b[2K{:<11} {} [{}] {}",
            frame.title(),
            frame.mode.to_string(),
            frame.clock(),
            progress_bar(frame.progress, BAR_WIDTH),
            frame.session_label,
        ));
    }

    fn mode_changed(&self, mode: Mode) {
        self.write(&format!("\n== {mode} ==\n"));
    }

    fn inputs_locked(&self, locked: bool) {
        if locked {
            self.write("\n(durations are locked while the timer runs)\n");
        }
    }
}

fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::domain::entity::SessionCounter;

    #[test]
    fn progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "----");
        assert_eq!(progress_bar(0.5, 4), "##--");
        assert_eq!(progress_bar(1.0, 4), "####");
        assert_eq!(progress_bar(7.0, 4), "####");
    }

    #[test]
    fn render_frame() {
        let display = TerminalDisplay::new(Vec::new());
        display.render(&DisplayFrame::new(
            Mode::Work,
            750,
            1500,
            SessionCounter::new(1),
        ));

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(
            text,
            format!(
                "\x1b]0;12:30 | Pomodoro Timer\x07\r\x1b[2KWork        12:30 [{}{}] 2 / 4 Sessions Completed",
                "#".repeat(12),
                "-".repeat(12)
            )
        );
    }

    #[test]
    fn render_hours() {
        let display = TerminalDisplay::new(Vec::new());
        display.render(&DisplayFrame::new(
            Mode::LongBreak,
            3661,
            3661,
            SessionCounter::new(4),
        ));

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert!(text.starts_with("\x1b]0;01:01:01 | Pomodoro Timer\x07"));
        assert!(text.contains("Long Break  01:01:01 [------------------------]"));
        assert!(text.ends_with("4 / 4 Sessions Completed"));
    }

    #[test]
    fn mode_cue_and_lock() {
        let display = TerminalDisplay::new(Vec::new());
        display.mode_changed(Mode::ShortBreak);
        display.inputs_locked(false);
        display.inputs_locked(true);

        let text = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(
            text,
            "\n== Short Break ==\n\n(durations are locked while the timer runs)\n"
        );
    }
}
