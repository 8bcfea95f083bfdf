use std::sync::Arc;

use crate::domain::event::Event;
use crate::domain::inbound::{ControlError, ControlPort, QueryError, QueryPort, QueryResponse};
use crate::domain::worker::{TimerStatus, WorkerError, WorkerHandle};

#[derive(Debug)]
pub struct ControlService {
    worker: Arc<WorkerHandle>,
}

impl ControlService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl ControlPort for ControlService {
    async fn dispatch(&self, event: Event) -> Result<(), ControlError> {
        self.worker
            .dispatch(event)
            .await
            .map_err(|_| ControlError::Unavailable)
    }

    async fn shutdown(&self) -> Result<(), ControlError> {
        self.worker.stop().await.map_err(|err| match err {
            WorkerError::Panicked => ControlError::Crashed,
            _ => ControlError::Unavailable,
        })
    }
}

#[derive(Debug)]
pub struct QueryService {
    worker: Arc<WorkerHandle>,
}

impl QueryService {
    pub fn new(worker: Arc<WorkerHandle>) -> Self {
        Self { worker }
    }
}

#[async_trait::async_trait]
impl QueryPort for QueryService {
    async fn query(&self) -> Result<QueryResponse, QueryError> {
        let TimerStatus {
            state,
            total,
            sessions,
            auto_switch,
            advance_pending,
            frame,
        } = self
            .worker
            .query()
            .await
            .map_err(|_| QueryError::Stopped)?;

        Ok(QueryResponse {
            mode: state.mode,
            running: state.running,
            remaining: state.remaining,
            total,
            sessions,
            auto_switch,
            advance_pending,
            frame,
        })
    }
}
