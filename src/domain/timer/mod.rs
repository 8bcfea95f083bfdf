mod effect;
mod frame;
mod machine;
mod progress;
mod settings;

pub use effect::{Effect, Effects};
pub use frame::DisplayFrame;
pub use machine::{Timer, TimerState, TransitionError};
pub use progress::ModeProgress;
pub use settings::Settings;
