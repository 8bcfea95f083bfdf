use std::str::FromStr;

use snafu::prelude::*;

use crate::domain::entity::mode::ParseModeError;
use crate::domain::entity::Mode;
use crate::domain::event::{DurationField, Event, ParseDurationFieldError};

pub const HELP: &str = "\
Commands:
  toggle, <enter>      start or pause the countdown
  start | pause        start or pause explicitly
  reset                rewind the current mode
  work | short | long  switch mode (also `mode <name>`)
  set <field> <value>  change a duration field
  inc <field>          step a duration field up
  dec <field>          step a duration field down
  auto on|off          advance to the next mode automatically
  status               show the current state
  help                 show this text
  quit                 save and exit
Fields: work-h work-m break-h break-m long-h long-m
";

/// One line typed into the console.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Status,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(Self::Event(Event::Toggle));
        };
        let name = name.to_ascii_lowercase();

        let command = match name.as_str() {
            "toggle" | "t" => Self::Event(Event::Toggle),
            "start" => Self::Event(Event::Start),
            "pause" => Self::Event(Event::Pause),
            "reset" => Self::Event(Event::Reset),
            "work" => Self::Event(Event::SelectMode(Mode::Work)),
            "short" => Self::Event(Event::SelectMode(Mode::ShortBreak)),
            "long" => Self::Event(Event::SelectMode(Mode::LongBreak)),
            "mode" => {
                let mode = argument(&mut words, &name, "mode name")?
                    .parse()
                    .context(InvalidModeSnafu)?;
                Self::Event(Event::SelectMode(mode))
            }
            "set" => {
                let field = field(&mut words, &name)?;
                // Whatever follows the field is the raw text of the input, as
                // typed. An absent value clears the field.
                let raw = words.collect::<Vec<_>>().join(" ");
                return Ok(Self::Event(Event::SetField { field, raw }));
            }
            "inc" | "dec" => {
                let field = field(&mut words, &name)?;
                let delta = if name == "inc" { 1 } else { -1 };
                Self::Event(Event::Step { field, delta })
            }
            "auto" => {
                let enabled = match argument(&mut words, &name, "on or off")? {
                    "on" => true,
                    "off" => false,
                    input => return InvalidSwitchSnafu { input }.fail(),
                };
                Self::Event(Event::SetAutoSwitch(enabled))
            }
            "status" | "s" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return UnknownSnafu { input: &name }.fail(),
        };

        ensure!(words.next().is_none(), TrailingInputSnafu { command: name });
        Ok(command)
    }
}

fn argument<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &str,
    expected: &'static str,
) -> Result<&'a str, ParseCommandError> {
    words
        .next()
        .context(MissingArgumentSnafu { command, expected })
}

fn field<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    command: &str,
) -> Result<DurationField, ParseCommandError> {
    argument(words, command, "duration field")?
        .parse()
        .context(InvalidFieldSnafu)
}

/// An error type of parsing a console line.
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseCommandError {
    #[snafu(display("Unknown command `{input}`, type `help` for a list"))]
    Unknown { input: String },
    #[snafu(display("`{command}` expects a {expected}"))]
    MissingArgument {
        command: String,
        expected: &'static str,
    },
    #[snafu(display("`{command}` takes no more arguments"))]
    TrailingInput { command: String },
    #[snafu(display("Expected `on` or `off`, got `{input}`"))]
    InvalidSwitch { input: String },
    #[snafu(display("Invalid duration field"))]
    InvalidField { source: ParseDurationFieldError },
    #[snafu(display("Invalid mode"))]
    InvalidMode { source: ParseModeError },
}
