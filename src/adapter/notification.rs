use std::sync::Arc;

use crate::config::Configuration;
use crate::domain::entity::{Mode, NotificationMessage};
use crate::domain::repository::{GetNotificationError, NotificationRepository};

/// A [`NotificationRepository`] implementation which reads configuration files.
/// Modes without a section use [`NotificationMessage::fallback`].
pub struct NotificationConfiguration {
    config: Arc<Configuration>,
}

impl NotificationConfiguration {
    /// Creates a new [`NotificationConfiguration`].
    pub fn new(config: Arc<Configuration>) -> Self {
        Self { config }
    }
}

#[async_trait::async_trait]
impl NotificationRepository for NotificationConfiguration {
    async fn completion_message(
        &self,
        mode: Mode,
    ) -> Result<NotificationMessage, GetNotificationError> {
        let Some(section) = self.config.notification.get(mode).cloned() else {
            return Ok(NotificationMessage::fallback(mode));
        };
        let value = NotificationMessage::try_new(section.summary, section.body)
            .map_err(|err| GetNotificationError::Invalid { source: err })?;
        Ok(value)
    }
}
