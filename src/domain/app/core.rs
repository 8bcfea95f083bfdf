use std::sync::Arc;

use snafu::prelude::*;

use crate::domain::app::service::{ControlService, QueryService};
use crate::domain::inbound::{ControlPort, QueryPort};
use crate::domain::outbound::{DisplayPort, NotifyPort};
use crate::domain::repository::{BlobStore, NotificationRepository};
use crate::domain::worker::{self, SpawnWorkerError, WorkerTiming};

/// Entrance to the domain logic, providing ports for external adapters.
pub struct ApplicationCore {
    pub control: Arc<dyn ControlPort>,
    pub query: Arc<dyn QueryPort>,
}

impl ApplicationCore {
    /// Initialize the application by injecting external repositories and
    /// adapters. The saved state in `store` is restored before this returns.
    ///
    /// # Errors
    ///
    /// This function will return an error if initialization failed.
    pub async fn setup(
        store: Arc<dyn BlobStore>,
        notification_repository: Arc<dyn NotificationRepository>,
        display: Arc<dyn DisplayPort>,
        notifier: Arc<dyn NotifyPort>,
        timing: WorkerTiming,
    ) -> Result<ApplicationCore, SetupApplicationCoreError> {
        let worker = worker::spawn(store, notification_repository, display, notifier, timing)
            .await
            .context(WorkerSnafu)?;
        let worker = Arc::new(worker);

        let control_port = Arc::new(ControlService::new(Arc::clone(&worker)));
        let query_port = Arc::new(QueryService::new(Arc::clone(&worker)));

        let app = ApplicationCore {
            control: control_port,
            query: query_port,
        };

        Ok(app)
    }
}

/// An error for initializing the application.
#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum SetupApplicationCoreError {
    #[snafu(display("Could not spawn a background worker"))]
    Worker { source: SpawnWorkerError },
}
