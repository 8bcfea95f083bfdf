mod handle;
mod routine;
mod state;

pub use handle::{TimerStatus, WorkerError, WorkerHandle};

use std::sync::Arc;

use snafu::prelude::*;
use tokio::time::Duration;

use crate::domain::entity::Mode;
use crate::domain::outbound::{DisplayPort, NotifyPort};
use crate::domain::repository::notification::{GetNotificationError, NotificationRepository};
use crate::domain::repository::BlobStore;
use crate::domain::snapshot::{Snapshot, SNAPSHOT_KEY};
use crate::domain::timer::Timer;

use routine::{WorkerConfig, WorkerPorts, WorkerRoutine};

/// Periods of the timers owned by the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerTiming {
    pub tick_period: Duration,
    pub settle_delay: Duration,
}

impl Default for WorkerTiming {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            settle_delay: Duration::from_millis(1500),
        }
    }
}

/// Restore the timer from `store` and start driving it on background.
///
/// # Errors
///
/// This function will return an error if a completion message could not be
/// loaded.
pub async fn spawn(
    store: Arc<dyn BlobStore>,
    notification_repository: Arc<dyn NotificationRepository>,
    display: Arc<dyn DisplayPort>,
    notifier: Arc<dyn NotifyPort>,
    timing: WorkerTiming,
) -> Result<WorkerHandle, SpawnWorkerError> {
    let (requester, commands) = tokio::sync::mpsc::channel(1);
    let config = load_config(notification_repository, timing).await?;
    let timer = Timer::from_snapshot(load_snapshot(store.as_ref()).await);
    let ports = WorkerPorts {
        display,
        notifier,
        store,
    };
    let handle = WorkerRoutine::spawn(timer, config, commands, ports);
    Ok(WorkerHandle::new(requester, handle))
}

async fn load_config(
    notification_repository: Arc<dyn NotificationRepository>,
    timing: WorkerTiming,
) -> Result<WorkerConfig, SpawnWorkerError> {
    let work_notification = notification_repository
        .completion_message(Mode::Work)
        .await
        .context(NotificationConfigSnafu { mode: Mode::Work })?;
    let short_break_notification = notification_repository
        .completion_message(Mode::ShortBreak)
        .await
        .context(NotificationConfigSnafu {
            mode: Mode::ShortBreak,
        })?;
    let long_break_notification = notification_repository
        .completion_message(Mode::LongBreak)
        .await
        .context(NotificationConfigSnafu {
            mode: Mode::LongBreak,
        })?;

    Ok(WorkerConfig {
        tick_period: timing.tick_period,
        settle_delay: timing.settle_delay,
        work_notification,
        short_break_notification,
        long_break_notification,
    })
}

async fn load_snapshot(store: &dyn BlobStore) -> Snapshot {
    let raw = match store.get(SNAPSHOT_KEY).await {
        Ok(raw) => raw,
        Err(err) => {
            tracing::warn!(
                err = %snafu::Report::from_error(&err),
                "Could not read saved state"
            );
            None
        }
    };
    Snapshot::decode_or_default(raw.as_deref())
}

/// An error for spawning the background worker.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SpawnWorkerError {
    #[snafu(display("Could not load notification configuration for {mode} from repository"))]
    NotificationConfig {
        mode: Mode,
        source: GetNotificationError,
    },
}
