pub mod blob;
pub mod notification;

pub use blob::{BlobStore, BlobStoreError};
pub use notification::{GetNotificationError, NotificationRepository};
