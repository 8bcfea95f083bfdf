use std::sync::Arc;

use snafu::prelude::*;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Error as IoError};

use crate::console::command::{Command, HELP};
use crate::domain::inbound::{ControlError, ControlPort, QueryError, QueryPort, QueryResponse};
use crate::domain::ApplicationCore;

/// An interactive front end that reads one command per line and drives the
/// timer through the inbound ports.
pub struct Console<R, W> {
    control: Arc<dyn ControlPort>,
    query: Arc<dyn QueryPort>,
    input: R,
    output: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Creates a new [`Console`].
    pub fn new(core: &ApplicationCore, input: R, output: W) -> Self {
        Self::with_ports(Arc::clone(&core.control), Arc::clone(&core.query), input, output)
    }

    pub fn with_ports(
        control: Arc<dyn ControlPort>,
        query: Arc<dyn QueryPort>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            control,
            query,
            input,
            output,
        }
    }

    /// Read commands until `quit` or the end of input, then shut the timer
    /// down.
    ///
    /// # Errors
    ///
    /// This function will return an error if the terminal fails or the timer
    /// stopped unexpectedly.
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        self.write("Type `help` for a list of commands.\n").await?;

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            let read = self.input.read_until(b'\n', &mut buffer).await.context(ReadSnafu)?;
            if read == 0 {
                tracing::debug!("Input closed");
                break;
            }

            let line = String::from_utf8_lossy(&buffer);
            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command).await?,
                Err(err) => self.write(&format!("\n{err}\n")).await?,
            }
        }

        self.control.shutdown().await.context(ControlSnafu)
    }

    #[tracing::instrument(skip(self))]
    async fn execute(&mut self, command: Command) -> Result<(), ConsoleError> {
        match command {
            Command::Event(event) => self.control.dispatch(event).await.context(ControlSnafu),
            Command::Status => {
                let response = self.query.query().await.context(QuerySnafu)?;
                self.write(&status_text(&response)).await
            }
            Command::Help => self.write(HELP).await,
            Command::Quit => Ok(()),
        }
    }

    async fn write(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.output
            .write_all(text.as_bytes())
            .await
            .context(WriteSnafu)?;
        self.output.flush().await.context(WriteSnafu)
    }
}

fn status_text(response: &QueryResponse) -> String {
    let state = if response.running {
        "running"
    } else if response.advance_pending {
        "advancing"
    } else {
        "paused"
    };
    let auto = if response.auto_switch { "on" } else { "off" };

    format!(
        "\n{} {} ({state})\n{}\nAuto-advance: {auto}\n",
        response.mode,
        response.frame.clock(),
        response.frame.session_label,
    )
}

/// An error type of running the [`Console`].
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum ConsoleError {
    #[snafu(display("Could not read a command"))]
    Read { source: IoError },
    #[snafu(display("Could not write to the terminal"))]
    Write { source: IoError },
    #[snafu(display("Could not control the timer"))]
    Control { source: ControlError },
    #[snafu(display("Could not query the timer"))]
    Query { source: QueryError },
}

#[cfg(test)]
mod tests {
    use super::*;

    use mockall::predicate::eq;
    use mockall::Sequence;

    use crate::domain::entity::{Mode, SessionCounter};
    use crate::domain::event::Event;
    use crate::domain::inbound::{MockControlPort, MockQueryPort};
    use crate::domain::timer::DisplayFrame;

    #[tokio::test]
    async fn run_dispatches_events_then_shuts_down() {
        let mut control = MockControlPort::new();
        let mut seq = Sequence::new();
        control
            .expect_dispatch()
            .with(eq(Event::Toggle))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        control
            .expect_dispatch()
            .with(eq(Event::SelectMode(Mode::LongBreak)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        control
            .expect_shutdown()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let output = run_console(control, MockQueryPort::new(), b"\nlong\nquit\nreset\n").await;
        assert_eq!(output, "Type `help` for a list of commands.\n");
    }

    #[tokio::test]
    async fn end_of_input_shuts_down() {
        let mut control = MockControlPort::new();
        control.expect_shutdown().times(1).returning(|| Ok(()));

        run_console(control, MockQueryPort::new(), b"").await;
    }

    #[tokio::test]
    async fn invalid_command_is_reported() {
        let mut control = MockControlPort::new();
        control.expect_dispatch().never();
        control.expect_shutdown().times(1).returning(|| Ok(()));

        let output = run_console(control, MockQueryPort::new(), b"inc work-x\n").await;
        assert!(output.ends_with("\nInvalid duration field\n"));
    }

    #[tokio::test]
    async fn malformed_bytes_are_reported_and_reading_continues() {
        let mut control = MockControlPort::new();
        let mut seq = Sequence::new();
        control
            .expect_dispatch()
            .with(eq(Event::Start))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        control
            .expect_shutdown()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(()));

        let output = run_console(control, MockQueryPort::new(), b"\xff\xfe\nstart\nquit\n").await;
        assert!(output.contains("Unknown command"));
    }

    #[tokio::test]
    async fn status_is_printed() {
        let mut control = MockControlPort::new();
        control.expect_shutdown().times(1).returning(|| Ok(()));
        let mut query = MockQueryPort::new();
        query.expect_query().times(1).returning(|| {
            Ok(QueryResponse {
                mode: Mode::ShortBreak,
                running: true,
                remaining: 299,
                total: 300,
                sessions: 1,
                auto_switch: false,
                advance_pending: false,
                frame: DisplayFrame::new(Mode::ShortBreak, 299, 300, SessionCounter::new(1)),
            })
        });

        let output = run_console(control, query, b"status\n").await;
        assert!(output.ends_with(
            "\nShort Break 04:59 (running)\n2 / 4 Sessions Completed\nAuto-advance: off\n"
        ));
    }

    #[tokio::test]
    async fn stopped_timer_is_an_error() {
        let mut control = MockControlPort::new();
        control
            .expect_dispatch()
            .returning(|_| Err(ControlError::Unavailable));

        let mut console = Console::with_ports(
            Arc::new(control),
            Arc::new(MockQueryPort::new()),
            "start\n".as_bytes(),
            Vec::new(),
        );
        assert!(matches!(
            console.run().await,
            Err(ConsoleError::Control {
                source: ControlError::Unavailable
            })
        ));
    }

    async fn run_console(control: MockControlPort, query: MockQueryPort, input: &[u8]) -> String {
        let mut console = Console::with_ports(
            Arc::new(control),
            Arc::new(query),
            input,
            Vec::new(),
        );
        console.run().await.unwrap();
        String::from_utf8(console.output).unwrap()
    }
}
