pub mod duration;
pub mod mode;
pub mod notification;
pub mod session;

pub use duration::{ModeDuration, TimeUnit};
pub use mode::Mode;
pub use notification::NotificationMessage;
pub use session::{SessionCounter, SESSION_GOAL};
