pub mod display;
pub mod notification;
pub mod notify;
pub mod store;

pub use display::TerminalDisplay;
pub use notification::NotificationConfiguration;
pub use notify::NotifyService;
pub use store::{FileStore, MemoryStore};
