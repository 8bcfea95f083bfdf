mod command;
mod session;

pub use command::{Command, ParseCommandError, HELP};
pub use session::{Console, ConsoleError};
